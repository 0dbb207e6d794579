//! In-memory reference table and its normalized indices.

use std::collections::HashMap;

use iso_common::normalize_key;
use serde::Serialize;

use crate::attribute::ReferenceAttribute;

/// One canonical country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub name: String,
    pub official_name: String,
    pub alpha2: String,
    pub alpha3: Option<String>,
}

impl ReferenceEntry {
    /// Raw value of `attr` for this entry. A missing alpha-3 reads as "".
    pub fn get(&self, attr: ReferenceAttribute) -> &str {
        match attr {
            ReferenceAttribute::Name => &self.name,
            ReferenceAttribute::Official => &self.official_name,
            ReferenceAttribute::Alpha2 => &self.alpha2,
            ReferenceAttribute::Alpha3 => self.alpha3.as_deref().unwrap_or(""),
        }
    }
}

/// Case-folded, whitespace-stripped projection of one attribute.
///
/// `keys` is row-aligned with the table; `positions` maps each key to the
/// first row holding it. Empty keys are never indexed.
#[derive(Debug, Clone, Default)]
pub struct NormalizedIndex {
    keys: Vec<String>,
    positions: HashMap<String, usize>,
}

impl NormalizedIndex {
    fn build<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let keys: Vec<String> = values.map(normalize_key).collect();
        let mut positions = HashMap::with_capacity(keys.len());
        for (idx, key) in keys.iter().enumerate() {
            if !key.is_empty() {
                positions.entry(key.clone()).or_insert(idx);
            }
        }
        Self { keys, positions }
    }

    /// Row-aligned normalized keys.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// First row whose key equals `key` (already normalized).
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }
}

/// Immutable dictionary of canonical entries.
///
/// Built once by the loader and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
    indices: [NormalizedIndex; 4],
    origin: String,
}

impl ReferenceTable {
    /// Build a table from entries, deriving every normalized index.
    pub fn new(entries: Vec<ReferenceEntry>, origin: impl Into<String>) -> Self {
        let indices = ReferenceAttribute::ALL
            .map(|attr| NormalizedIndex::build(entries.iter().map(|entry| entry.get(attr))));
        Self {
            entries,
            indices,
            origin: origin.into(),
        }
    }

    /// Where the table was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Raw attribute column, row-aligned.
    pub fn column(&self, attr: ReferenceAttribute) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.get(attr)).collect()
    }

    /// Normalized projection of `attr`.
    pub fn normalized(&self, attr: ReferenceAttribute) -> &NormalizedIndex {
        &self.indices[attr.slot()]
    }

    /// Exact lookup of an already-normalized key.
    pub fn position(&self, attr: ReferenceAttribute, key: &str) -> Option<usize> {
        self.normalized(attr).position(key)
    }

    /// Co-indexed value of `attr` at `index`; `None` when out of range or empty.
    pub fn value(&self, index: usize, attr: ReferenceAttribute) -> Option<&str> {
        self.entries
            .get(index)
            .map(|entry| entry.get(attr))
            .filter(|value| !value.is_empty())
    }
}
