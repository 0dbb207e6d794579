//! Country column detection and value standardization.
//!
//! The engine works in three steps:
//!
//! 1. [`detect`] samples columns to find a name-like and a code-like column.
//! 2. [`standardize`](mod@standardize) resolves each cell, exact lookup first
//!    and a fuzzy scan with the [`SimilarityEngine`] on a miss.
//! 3. [`reconcile`] merges the two passes into `country_name_final` and
//!    `country_code_final`.
//!
//! All calls take a [`StandardizationContext`] holding the shared reference
//! table, the similarity memo, and the options.

pub mod context;
pub mod detect;
pub mod error;
pub mod options;
pub mod reconcile;
pub mod similarity;
pub mod standardize;

pub use context::StandardizationContext;
pub use detect::{find_column, find_name_column};
pub use error::{MapError, Result};
pub use options::{
    DEFAULT_AUTO_FIND_RETRY, DEFAULT_CACHE_CAPACITY, DEFAULT_FUZZY_THRESHOLD,
    DEFAULT_SAMPLE_SIZE, ScanMode, StandardizeOptions,
};
pub use reconcile::{
    DatasetOutcome, DetectedColumn, ReconcileStats, standardize_dataset, standardize_frame,
};
pub use similarity::{CacheStats, SimilarityEngine, similarity, weighted_edit_distance};
pub use standardize::{
    ColumnMatches, Lookup, MatchCounts, MatchKind, MatchResult, resolve, resolve_key,
    resolve_text, standardize, standardize_column,
};
