//! Dataset discovery for input files and folders.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};
use crate::format::SourceFormat;

/// Lists every file in `dir` with a supported extension.
///
/// Not recursive. Returns files sorted by filename.
pub fn list_dataset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if SourceFormat::from_path(&path).is_ok() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping file with unsupported extension");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Resolve an input path into the datasets to process.
///
/// A file is returned as-is (its format is checked when read); a directory
/// is listed with [`list_dataset_files`].
pub fn discover_datasets(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if input.is_dir() {
        return list_dataset_files(input);
    }
    Err(IngestError::FileNotFound {
        path: input.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["sales.csv", "clients.json", "notes.md", "b.parquet", "A.txt"] {
            std::fs::write(dir.path().join(name), "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_dataset_files() {
        let dir = create_test_dir();
        let files = list_dataset_files(dir.path()).unwrap();

        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["A.txt", "b.parquet", "clients.json", "sales.csv"]);
    }

    #[test]
    fn test_list_dataset_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("test.csv");
        std::fs::write(&file_path, "data").unwrap();

        let result = list_dataset_files(&file_path);
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_discover_single_file() {
        let dir = create_test_dir();
        let file = dir.path().join("notes.md");
        assert_eq!(discover_datasets(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_discover_missing_path() {
        let result = discover_datasets(Path::new("/nonexistent/input"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
