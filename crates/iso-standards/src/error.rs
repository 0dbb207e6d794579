//! Error types for reference table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the reference table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Reference file not found.
    #[error("Reference file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Reference file exists but could not be read.
    #[error("Failed to read reference file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the CSV content.
    #[error("Failed to read CSV {origin}: {source}")]
    CsvRead {
        origin: String,
        #[source]
        source: csv::Error,
    },

    /// A required header is absent.
    #[error("Missing required column '{column}' in {origin}")]
    MissingColumn { column: &'static str, origin: String },

    /// Invalid value in a CSV field.
    #[error("Invalid {field} value '{value}' on row {row} of {origin}")]
    InvalidValue {
        field: &'static str,
        value: String,
        row: usize,
        origin: String,
    },

    /// The resource parsed but holds no entries.
    #[error("Reference table {origin} contains no entries")]
    Empty { origin: String },

    /// Attribute name that is not one of the reference columns.
    #[error("Unknown reference attribute '{value}' (expected name, official, alpha-2 or alpha-3)")]
    UnknownAttribute { value: String },
}

/// Result type for reference loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StandardsError::MissingColumn {
            column: "alpha-2",
            origin: "countries.csv".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required column 'alpha-2' in countries.csv"
        );

        let err = StandardsError::InvalidValue {
            field: "alpha-2",
            value: String::new(),
            row: 3,
            origin: "countries.csv".to_string(),
        };
        assert!(err.to_string().contains("row 3"));
    }
}
