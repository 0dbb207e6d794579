//! Shared utilities for the ISO-3166 standardizer crates.
//!
//! - [`cells`]: turning Polars cells into text
//! - [`naming`]: timestamped output file names
//! - [`text`]: the comparison key used for every lookup

pub mod cells;
pub mod naming;
pub mod text;

pub use cells::{cell_text, column_text, format_numeric};
pub use naming::{resolve_output_path, timestamped_file_name};
pub use text::normalize_key;

/// Column appended with the canonical (official) country name.
pub const FINAL_NAME_COLUMN: &str = "country_name_final";

/// Column appended with the canonical alpha-2 code.
pub const FINAL_CODE_COLUMN: &str = "country_code_final";

/// Text form of a missing value after a dataset has been round-tripped through text.
pub const MISSING_SENTINEL: &str = "None";
