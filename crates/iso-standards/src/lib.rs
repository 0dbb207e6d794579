//! ISO-3166 reference table for the standardizer.
//!
//! - [`attribute`]: the four reference projections (name, official, alpha-2, alpha-3)
//! - [`table`]: the immutable [`ReferenceTable`] and its normalized indices
//! - [`loader`]: loading from the embedded CSV, a file, or a string
//! - [`embedded`]: the compiled-in ISO-3166 resource
//!
//! # Example
//!
//! ```
//! use iso_standards::{ReferenceAttribute, load_default};
//!
//! let table = load_default().unwrap();
//! let idx = table.position(ReferenceAttribute::Alpha2, "bg").unwrap();
//! assert_eq!(table.value(idx, ReferenceAttribute::Official), Some("Republic of Bulgaria"));
//! ```

pub mod attribute;
pub mod embedded;
pub mod error;
pub mod loader;
pub mod paths;
pub mod table;

pub use attribute::ReferenceAttribute;
pub use error::{Result, StandardsError};
pub use loader::{load_default, load_from_path, load_from_str, load_reference};
pub use paths::{REFERENCE_ENV_VAR, reference_override};
pub use table::{NormalizedIndex, ReferenceEntry, ReferenceTable};
