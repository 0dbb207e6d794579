//! Persisting reports.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use iso_common::timestamped_file_name;
use polars::prelude::*;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::template::{DetailedReport, ReportTemplate};

/// File name stem of persisted reports.
pub const REPORT_STEM: &str = "error_report";

/// Write the summary report to `dir` as `error_report-<timestamp>-<n>.csv`.
///
/// The directory is created when missing. An empty report is still written.
pub fn finalize_report(report: &ReportTemplate, dir: &Path) -> Result<PathBuf> {
    if report.is_empty() {
        info!("No issues found, writing empty report");
    }
    let mut df = report.to_dataframe()?;
    write_report_frame(&mut df, dir)
}

/// Write a stacked detailed report to `dir`.
pub fn finalize_detailed_report(report: &DetailedReport, dir: &Path) -> Result<PathBuf> {
    if report.is_empty() {
        info!("No issues found, writing empty report");
    }
    let mut df = report.to_dataframe()?;
    write_report_frame(&mut df, dir)
}

/// Write any report frame to a fresh timestamped CSV in `dir`.
pub fn write_report_frame(df: &mut DataFrame, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| ReportError::saving(dir, e))?;
    let path = dir.join(timestamped_file_name(REPORT_STEM, "csv"));

    let mut file = File::create(&path).map_err(|e| ReportError::saving(&path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| ReportError::saving(&path, e))?;

    info!(path = %path.display(), rows = df.height(), "Report written");
    Ok(path)
}
