//! Error types for reporting and export.

use std::path::PathBuf;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from report building, report persistence and dataset export.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// A report or exported dataset could not be written.
    #[error("failed to save {path}: {source}")]
    FileSaving {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The dataset does not end with the two final columns.
    #[error("dataset has {width} column(s); expected the two final country columns at the end")]
    MissingFinalColumns { width: usize },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

impl ReportError {
    pub(crate) fn saving(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::FileSaving {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result type for reporting operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_saving_display() {
        let err = ReportError::saving(
            "/reports/error_report.csv",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(err.to_string().starts_with("failed to save /reports/error_report.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
