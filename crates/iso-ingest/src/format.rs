//! Input formats recognised by extension.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Supported dataset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Csv,
    /// JSON array of records.
    Json,
    Parquet,
    /// Fixed-width text (`.txt`).
    FixedWidth,
    /// First worksheet of a spreadsheet.
    Excel,
}

impl SourceFormat {
    /// Every extension with a registered reader.
    pub const EXTENSIONS: [&'static str; 9] = [
        "csv", "json", "parquet", "txt", "xlsx", "xlsm", "xlsb", "xls", "ods",
    ];

    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "parquet" => Some(Self::Parquet),
            "txt" => Some(Self::FixedWidth),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Format of `path`, or [`IngestError::UnsupportedFormat`].
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: ext.to_string(),
        })
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Parquet => "Parquet",
            Self::FixedWidth => "fixed-width text",
            Self::Excel => "Excel",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceFormat::from_extension("CSV"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_extension("txt"), Some(SourceFormat::FixedWidth));
        assert_eq!(SourceFormat::from_extension("ods"), Some(SourceFormat::Excel));
        assert_eq!(SourceFormat::from_extension("xml"), None);
    }

    #[test]
    fn test_every_extension_maps() {
        for ext in SourceFormat::EXTENSIONS {
            assert!(SourceFormat::from_extension(ext).is_some(), "{ext}");
        }
    }

    #[test]
    fn test_from_path_without_extension() {
        let err = SourceFormat::from_path(Path::new("/data/README")).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { ref extension, .. } if extension.is_empty()));
    }
}
