//! Report tables accumulated across a batch.

use polars::prelude::*;
use serde::Serialize;

/// Columns of the summary report, in order.
pub const REPORT_COLUMNS: [&str; 4] = ["file_name", "column_name", "count_missing", "time"];

/// Column prepended to detailed rows to name their source file.
pub const FILE_NAME_COLUMN: &str = "file_name";

/// One summary line: how many cells of a final column stayed unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub file_name: String,
    pub column_name: String,
    pub count_missing: u64,
    /// Local time, `%Y-%m-%d-%H-%M-%S`.
    pub time: String,
}

/// Summary report: starts empty and grows by one row per affected column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTemplate {
    rows: Vec<ReportRow>,
}

/// An empty summary report.
pub fn empty_report() -> ReportTemplate {
    ReportTemplate::empty()
}

impl ReportTemplate {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ReportRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total unresolved cells over all rows.
    pub fn total_missing(&self) -> u64 {
        self.rows.iter().map(|row| row.count_missing).sum()
    }

    /// The report as a frame with exactly [`REPORT_COLUMNS`].
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let file_names: Vec<&str> = self.rows.iter().map(|r| r.file_name.as_str()).collect();
        let column_names: Vec<&str> = self.rows.iter().map(|r| r.column_name.as_str()).collect();
        let counts: Vec<u64> = self.rows.iter().map(|r| r.count_missing).collect();
        let times: Vec<&str> = self.rows.iter().map(|r| r.time.as_str()).collect();

        DataFrame::new(vec![
            Series::new(REPORT_COLUMNS[0].into(), file_names).into_column(),
            Series::new(REPORT_COLUMNS[1].into(), column_names).into_column(),
            Series::new(REPORT_COLUMNS[2].into(), counts).into_column(),
            Series::new(REPORT_COLUMNS[3].into(), times).into_column(),
        ])
    }
}

/// Detailed report: offending rows of every file, stacked.
#[derive(Debug, Clone, Default)]
pub struct DetailedReport {
    frame: Option<DataFrame>,
}

impl DetailedReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a `file_name` column to `rows` and stack it under earlier files.
    pub fn append(&mut self, file_name: &str, mut rows: DataFrame) -> PolarsResult<()> {
        let names = vec![file_name; rows.height()];
        rows.insert_column(0, Series::new(FILE_NAME_COLUMN.into(), names))?;
        match self.frame.as_mut() {
            Some(frame) => {
                frame.vstack_mut(&rows)?;
            }
            None => self.frame = Some(rows),
        }
        Ok(())
    }

    /// Number of stacked rows.
    pub fn len(&self) -> usize {
        self.frame.as_ref().map_or(0, DataFrame::height)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stacked rows; an empty report has only the `file_name` column.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        match &self.frame {
            Some(frame) => Ok(frame.clone()),
            None => DataFrame::new(vec![
                Series::new_empty(FILE_NAME_COLUMN.into(), &DataType::String).into_column(),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(file: &str, count: u64) -> ReportRow {
        ReportRow {
            file_name: file.to_string(),
            column_name: "country_code_final".to_string(),
            count_missing: count,
            time: "2024-01-02-03-04-05".to_string(),
        }
    }

    #[test]
    fn test_empty_report_has_schema() {
        let df = empty_report().to_dataframe().unwrap();
        assert_eq!(df.height(), 0);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, REPORT_COLUMNS);
    }

    #[test]
    fn test_rows_keep_insertion_order() {
        let mut report = ReportTemplate::empty();
        report.push(row("b.csv", 1));
        report.push(row("a.csv", 4));

        assert_eq!(report.total_missing(), 5);
        let df = report.to_dataframe().unwrap();
        let files = df.column("file_name").unwrap().str().unwrap();
        assert_eq!(files.get(0), Some("b.csv"));
        assert_eq!(files.get(1), Some("a.csv"));
    }

    #[test]
    fn test_detailed_report_stacks_files() {
        let mut detailed = DetailedReport::new();
        assert!(detailed.is_empty());

        let rows = df!("country_name_final" => [None::<&str>], "country_code_final" => [Some("CA")])
            .unwrap();
        detailed.append("a.csv", rows.clone()).unwrap();
        detailed.append("b.csv", rows).unwrap();

        let df = detailed.to_dataframe().unwrap();
        assert_eq!(df.shape(), (2, 3));
        let files = df.column(FILE_NAME_COLUMN).unwrap().str().unwrap();
        assert_eq!(files.get(1), Some("b.csv"));
    }
}
