//! Output file naming.

use std::path::{Path, PathBuf};

use chrono::Local;
use rand::Rng;

/// Builds `<stem>-<YYYYmmdd-HHMMSS>-<NNNN>.<extension>` with a random four digit suffix.
///
/// The suffix keeps two files written within the same second apart.
pub fn timestamped_file_name(stem: &str, extension: &str) -> String {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let suffix: u16 = rand::rng().random_range(1000..=9999);
    format!("{stem}-{stamp}-{suffix}.{extension}")
}

/// Resolves an output location: directories get a generated file name, files are used as-is.
pub fn resolve_output_path(location: &Path, stem: &str, extension: &str) -> PathBuf {
    if location.is_dir() {
        location.join(timestamped_file_name(stem, extension))
    } else {
        location.to_path_buf()
    }
}
