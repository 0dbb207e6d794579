use std::path::Path;

use polars::prelude::*;

use super::{io_error, parse_error};
use crate::error::Result;
use crate::format::SourceFormat;

/// Read a CSV file with a single header row.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(io_error(
            path,
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| parse_error(path, SourceFormat::Csv, e))?
        .finish()
        .map_err(|e| parse_error(path, SourceFormat::Csv, e))
}
