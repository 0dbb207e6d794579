use std::path::PathBuf;

use iso_map::ReconcileStats;

/// Outcome of one dataset in a batch.
#[derive(Debug)]
pub struct FileResult {
    pub file_name: String,
    pub source: PathBuf,
    pub rows: usize,
    pub stats: Option<ReconcileStats>,
    /// Unresolved cells over both final columns.
    pub missing: usize,
    pub output: Option<PathBuf>,
    pub error: Option<String>,
}

impl FileResult {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of a whole batch run.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub files: Vec<FileResult>,
    pub report: Option<PathBuf>,
    /// Set when cancellation or `--fail-fast` stopped the run early.
    pub halted: bool,
}

impl BatchResult {
    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileResult::is_failed)
    }

    pub fn total_missing(&self) -> usize {
        self.files.iter().map(|file| file.missing).sum()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|file| file.is_failed()).count()
    }
}
