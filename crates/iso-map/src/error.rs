//! Error types for detection and standardization.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors from the standardization engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MapError {
    /// Neither a name-like nor a code-like column could be located.
    #[error("No country column detected among {} column(s): {}", .columns.len(), .columns.join(", "))]
    AutoDetection { columns: Vec<String> },

    /// A cell could not be turned into text for matching.
    #[error("Cannot convert {dtype} value to text for matching")]
    TypeConversion { dtype: String },

    /// The dataset already carries one of the output columns.
    #[error("Output column '{column}' already exists in dataset")]
    OutputColumnExists { column: String },

    /// An option is outside its valid range.
    #[error("Invalid option {field}: {message}")]
    InvalidOption { field: &'static str, message: String },

    /// Polars error while reading or extending the frame.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_detection_display() {
        let err = MapError::AutoDetection {
            columns: vec!["id".to_string(), "amount".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No country column detected among 2 column(s): id, amount"
        );
    }
}
