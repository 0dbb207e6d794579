//! Folding one standardized dataset into the report.

use chrono::Local;
use iso_common::{MISSING_SENTINEL, column_text};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::template::{ReportRow, ReportTemplate};

/// Timestamp format of summary rows.
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Report flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// One row per final column with unresolved cells.
    #[default]
    Summary,
    /// The offending rows themselves.
    Detailed,
}

/// What [`update_report`] produced.
#[derive(Debug, Clone)]
pub enum ReportUpdate {
    /// Rows appended to the running template.
    Summary { added: usize },
    /// Offending rows (the two final columns); the template is untouched.
    Detailed(DataFrame),
}

/// Whether a cell counts as unresolved: null, or the text `"None"`.
fn is_missing(column: &Column, row: usize) -> bool {
    column_text(column, row).is_none_or(|text| text == MISSING_SENTINEL)
}

/// The two trailing columns of a standardized dataset.
pub fn final_columns(df: &DataFrame) -> Result<[&Column; 2]> {
    match df.get_columns() {
        [.., name, code] => Ok([name, code]),
        _ => Err(ReportError::MissingFinalColumns { width: df.width() }),
    }
}

/// Unresolved cells in `column`.
pub fn count_missing(column: &Column) -> usize {
    (0..column.len()).filter(|&row| is_missing(column, row)).count()
}

/// Rows where either final column is unresolved, restricted to those two columns.
pub fn missing_rows(df: &DataFrame) -> Result<DataFrame> {
    let [name, code] = final_columns(df)?;
    let mask: Vec<bool> = (0..df.height())
        .map(|row| is_missing(name, row) || is_missing(code, row))
        .collect();
    let mask = BooleanChunked::from_slice("missing".into(), &mask);

    let subset = df.select([name.name().clone(), code.name().clone()])?;
    Ok(subset.filter(&mask)?)
}

/// Summary rows for `df`: one per final column with a non-zero count.
pub fn summarize_missing(df: &DataFrame, file_name: &str) -> Result<Vec<ReportRow>> {
    let time = Local::now().format(REPORT_TIME_FORMAT).to_string();
    let rows = final_columns(df)?
        .into_iter()
        .filter_map(|column| {
            let count = count_missing(column);
            (count > 0).then(|| ReportRow {
                file_name: file_name.to_string(),
                column_name: column.name().to_string(),
                count_missing: count as u64,
                time: time.clone(),
            })
        })
        .collect();
    Ok(rows)
}

/// Fold a standardized dataset into the report.
pub fn update_report(
    df: &DataFrame,
    template: &mut ReportTemplate,
    file_name: &str,
    mode: ReportMode,
) -> Result<ReportUpdate> {
    match mode {
        ReportMode::Detailed => {
            let rows = missing_rows(df)?;
            debug!(file = %file_name, rows = rows.height(), "Collected unresolved rows");
            Ok(ReportUpdate::Detailed(rows))
        }
        ReportMode::Summary => {
            let rows = summarize_missing(df, file_name)?;
            let added = rows.len();
            for row in rows {
                debug!(
                    file = %file_name,
                    column = %row.column_name,
                    count_missing = row.count_missing,
                    "Unresolved values recorded"
                );
                template.push(row);
            }
            Ok(ReportUpdate::Summary { added })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_text_counts_as_missing() {
        let column = Series::new("c".into(), [Some("CA"), Some("None"), None, Some("none")]).into_column();
        assert_eq!(count_missing(&column), 2);
    }

    #[test]
    fn test_final_columns_need_two() {
        let df = df!("only" => ["x"]).unwrap();
        assert!(matches!(
            final_columns(&df),
            Err(ReportError::MissingFinalColumns { width: 1 })
        ));
    }
}
