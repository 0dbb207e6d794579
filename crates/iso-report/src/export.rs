//! Writing standardized datasets.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use iso_common::resolve_output_path;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, Result};

/// File name stem used when exporting into a directory.
pub const EXPORT_STEM: &str = "file_export";

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }
}

/// Write `df` to `location`.
///
/// If `location` is an existing directory the file is named
/// `file_export-<timestamp>-<n>.<ext>` inside it; otherwise `location` is
/// the file path. Parent directories are created.
pub fn export_dataset(df: &mut DataFrame, location: &Path, format: OutputFormat) -> Result<PathBuf> {
    let path = resolve_output_path(location, EXPORT_STEM, format.extension());
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ReportError::saving(parent, e))?;
    }

    let mut file = File::create(&path).map_err(|e| ReportError::saving(&path, e))?;
    match format {
        OutputFormat::Parquet => ParquetWriter::new(&mut file)
            .finish(df)
            .map(|_| ())
            .map_err(|e| ReportError::saving(&path, e))?,
        OutputFormat::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| ReportError::saving(&path, e))?,
    }

    info!(
        path = %path.display(),
        format = format.extension(),
        rows = df.height(),
        "Dataset exported"
    );
    Ok(path)
}
