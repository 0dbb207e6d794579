use std::path::Path;

use polars::prelude::*;

use super::{open_file, parse_error};
use crate::error::Result;
use crate::format::SourceFormat;

/// Read a JSON array of records.
pub fn read_json(path: &Path) -> Result<DataFrame> {
    let file = open_file(path)?;
    JsonReader::new(file)
        .with_json_format(JsonFormat::Json)
        .finish()
        .map_err(|e| parse_error(path, SourceFormat::Json, e))
}
