//! Shared state for every standardization call.

use std::sync::Arc;

use iso_standards::{ReferenceAttribute, ReferenceTable};

use crate::error::Result;
use crate::options::StandardizeOptions;
use crate::similarity::SimilarityEngine;
use crate::standardize::Lookup;

/// Reference table, similarity memo and options, built once per process.
#[derive(Debug)]
pub struct StandardizationContext {
    reference: Arc<ReferenceTable>,
    similarity: SimilarityEngine,
    options: StandardizeOptions,
}

impl StandardizationContext {
    /// Validate `options` and bundle them with the reference table.
    pub fn new(reference: Arc<ReferenceTable>, options: StandardizeOptions) -> Result<Self> {
        options.validate()?;
        let similarity = SimilarityEngine::new(options.cache_capacity);
        Ok(Self {
            reference,
            similarity,
            options,
        })
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    pub fn similarity(&self) -> &SimilarityEngine {
        &self.similarity
    }

    pub fn options(&self) -> &StandardizeOptions {
        &self.options
    }

    /// Lookup against `attribute` using the configured threshold and scan mode.
    pub fn lookup(&self, attribute: ReferenceAttribute, desired: ReferenceAttribute) -> Lookup {
        Lookup::new(attribute, desired)
            .with_threshold(self.options.fuzzy_threshold)
            .with_mode(self.options.scan_mode())
    }
}
