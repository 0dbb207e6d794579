use std::path::Path;

use polars::prelude::*;

use super::{open_file, parse_error};
use crate::error::Result;
use crate::format::SourceFormat;

/// Read a Parquet file.
pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = open_file(path)?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| parse_error(path, SourceFormat::Parquet, e))
}
