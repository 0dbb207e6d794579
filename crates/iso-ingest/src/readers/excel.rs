//! Spreadsheets (.xlsx, .xlsm, .xlsb, .xls, .ods).
//!
//! Only the first worksheet is read. Its first row is the header and every
//! cell is converted to text so codes and names keep their spelling.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use iso_common::format_numeric;
use polars::prelude::*;
use tracing::debug;

use super::unique_names;
use crate::error::{IngestError, Result};

/// Read the first worksheet of a workbook.
pub fn read_excel(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let workbook_error = |source| IngestError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    };
    let range = workbook.worksheet_range(&sheet).map_err(workbook_error)?;
    debug!(path = %path.display(), sheet = %sheet, "Reading first worksheet");

    range_to_frame(&range)?.ok_or_else(|| IngestError::NoHeaderDetected {
        path: path.to_path_buf(),
    })
}

fn range_to_frame(range: &Range<Data>) -> Result<Option<DataFrame>> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(None);
    };

    let names = unique_names(header.iter().map(cell_to_text));

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (idx, column) in values.iter_mut().enumerate() {
            column.push(row.get(idx).and_then(cell_to_text));
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(values)
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    Ok(Some(DataFrame::new(columns)?))
}

/// Text of a cell; empty and error cells are missing.
fn cell_to_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Float(f) => format_numeric(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(d) => format_numeric(d.as_f64()),
    };
    Some(text).filter(|text| !text.is_empty())
}
