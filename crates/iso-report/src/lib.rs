//! Reporting and export for standardized datasets.
//!
//! A batch starts with [`empty_report`], folds each dataset in with
//! [`update_report`], and ends with [`finalize_report`]. Standardized
//! datasets are written with [`export_dataset`].

pub mod error;
pub mod export;
pub mod finalize;
pub mod template;
pub mod update;

pub use error::{ReportError, Result};
pub use export::{EXPORT_STEM, OutputFormat, export_dataset};
pub use finalize::{REPORT_STEM, finalize_detailed_report, finalize_report, write_report_frame};
pub use template::{
    DetailedReport, FILE_NAME_COLUMN, REPORT_COLUMNS, ReportRow, ReportTemplate, empty_report,
};
pub use update::{
    REPORT_TIME_FORMAT, ReportMode, ReportUpdate, count_missing, final_columns, missing_rows,
    summarize_missing, update_report,
};
