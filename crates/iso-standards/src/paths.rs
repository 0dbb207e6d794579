//! Reference file path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the embedded reference table.
pub const REFERENCE_ENV_VAR: &str = "ISO3166_REFERENCE_FILE";

/// Reference file named by `ISO3166_REFERENCE_FILE`, if set and non-empty.
pub fn reference_override() -> Option<PathBuf> {
    std::env::var_os(REFERENCE_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
