//! Extension-dispatched dataset readers.

mod csv;
mod excel;
mod fixed_width;
mod json;
mod parquet;

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::format::SourceFormat;

pub use self::csv::read_csv;
pub use self::excel::read_excel;
pub use self::fixed_width::{parse_fixed_width, read_fixed_width};
pub use self::json::read_json;
pub use self::parquet::read_parquet;

/// Read a dataset, choosing the reader from the file extension.
pub fn read_dataset(path: &Path) -> Result<DataFrame> {
    let format = SourceFormat::from_path(path)?;
    read_dataset_as(path, format)
}

/// Read a dataset with an explicit format.
pub fn read_dataset_as(path: &Path, format: SourceFormat) -> Result<DataFrame> {
    let start = Instant::now();
    let df = match format {
        SourceFormat::Csv => read_csv(path)?,
        SourceFormat::Json => read_json(path)?,
        SourceFormat::Parquet => read_parquet(path)?,
        SourceFormat::FixedWidth => read_fixed_width(path)?,
        SourceFormat::Excel => read_excel(path)?,
    };
    debug!(
        path = %path.display(),
        format = %format,
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "Read dataset"
    );
    Ok(df)
}

/// Open `path`, mapping a missing file to [`IngestError::FileNotFound`].
pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| io_error(path, e))
}

pub(crate) fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

pub(crate) fn parse_error(path: &Path, format: SourceFormat, e: impl ToString) -> IngestError {
    IngestError::Parse {
        path: path.to_path_buf(),
        format,
        message: e.to_string(),
    }
}

/// Column names from header cells: blanks become `column_<n>`, repeats get
/// `_2`, `_3` and so on.
pub(crate) fn unique_names<I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut seen = HashSet::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let base = header.unwrap_or_else(|| format!("column_{}", idx + 1));
            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                n += 1;
                name = format!("{base}_{n}");
            }
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(headers: &[Option<&str>]) -> Vec<String> {
        unique_names(headers.iter().map(|h| h.map(str::to_string)))
    }

    #[test]
    fn test_unique_names() {
        assert_eq!(
            names(&[Some("country"), None, Some("country"), Some("country")]),
            ["country", "column_2", "country_2", "country_3"]
        );
        assert_eq!(names(&[Some("a_2"), Some("a"), Some("a")]), ["a_2", "a", "a_3"]);
    }
}
