//! Per-cell resolution: exact lookup first, fuzzy scan on a miss.

use std::collections::HashMap;

use iso_common::{cell_text, column_text, normalize_key};
use iso_standards::{ReferenceAttribute, ReferenceTable};
use polars::prelude::{AnyValue, Column};
use tracing::{debug, trace};

use crate::context::StandardizationContext;
use crate::error::{MapError, Result};
use crate::options::{DEFAULT_FUZZY_THRESHOLD, ScanMode};

/// How a cell was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Fuzzy,
    Unresolved,
}

/// Outcome of resolving one value.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Desired-output value of the matched entry.
    pub canonical_value: Option<String>,
    /// 1.0 for exact matches, the similarity for fuzzy ones, 0.0 otherwise.
    pub score: f64,
    /// Row of the matched reference entry.
    pub source_index: Option<usize>,
    pub kind: MatchKind,
}

impl MatchResult {
    pub fn unresolved() -> Self {
        Self {
            canonical_value: None,
            score: 0.0,
            source_index: None,
            kind: MatchKind::Unresolved,
        }
    }
}

/// What to match against and what to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    /// Attribute the raw value is compared with.
    pub attribute: ReferenceAttribute,
    /// Attribute returned for the matched entry.
    pub desired: ReferenceAttribute,
    /// Minimum fuzzy similarity, in percent.
    pub threshold_pct: u8,
    pub mode: ScanMode,
}

impl Lookup {
    pub fn new(attribute: ReferenceAttribute, desired: ReferenceAttribute) -> Self {
        Self {
            attribute,
            desired,
            threshold_pct: DEFAULT_FUZZY_THRESHOLD,
            mode: ScanMode::Fast,
        }
    }

    pub fn with_threshold(mut self, threshold_pct: u8) -> Self {
        self.threshold_pct = threshold_pct;
        self
    }

    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_desired(mut self, desired: ReferenceAttribute) -> Self {
        self.desired = desired;
        self
    }

    /// Attributes consulted, in scan order.
    fn scanned(&self) -> impl Iterator<Item = ReferenceAttribute> {
        let counterpart = match self.mode {
            ScanMode::Fast => None,
            ScanMode::Slow => self.attribute.counterpart(),
        };
        std::iter::once(self.attribute).chain(counterpart)
    }
}

/// Resolve a cell value. A null cell fails with [`MapError::TypeConversion`].
pub fn resolve(
    ctx: &StandardizationContext,
    value: AnyValue<'_>,
    lookup: &Lookup,
) -> Result<MatchResult> {
    let dtype = value.dtype();
    let text = cell_text(value).ok_or_else(|| MapError::TypeConversion {
        dtype: dtype.to_string(),
    })?;
    Ok(resolve_text(ctx, &text, lookup))
}

/// Resolve raw text.
pub fn resolve_text(ctx: &StandardizationContext, raw: &str, lookup: &Lookup) -> MatchResult {
    resolve_key(ctx, &normalize_key(raw), lookup)
}

/// Resolve a cell to its canonical desired value; null and unmatched give `None`.
///
/// ```
/// use std::sync::Arc;
///
/// use iso_map::{Lookup, StandardizationContext, StandardizeOptions, standardize};
/// use iso_standards::ReferenceAttribute;
/// use polars::prelude::AnyValue;
///
/// let reference = Arc::new(iso_standards::load_default().unwrap());
/// let ctx = StandardizationContext::new(reference, StandardizeOptions::default()).unwrap();
/// let lookup = Lookup::new(ReferenceAttribute::Name, ReferenceAttribute::Alpha2);
/// assert_eq!(standardize(&ctx, AnyValue::String("canada"), &lookup).as_deref(), Some("CA"));
/// ```
pub fn standardize(
    ctx: &StandardizationContext,
    value: AnyValue<'_>,
    lookup: &Lookup,
) -> Option<String> {
    match resolve(ctx, value, lookup) {
        Ok(result) => result.canonical_value,
        Err(err) => {
            trace!(error = %err, "Cell treated as unresolved");
            None
        }
    }
}

/// Resolve an already-normalized key.
pub fn resolve_key(ctx: &StandardizationContext, key: &str, lookup: &Lookup) -> MatchResult {
    if key.is_empty() {
        return MatchResult::unresolved();
    }
    let reference = ctx.reference();

    for attr in lookup.scanned() {
        if let Some(index) = reference.position(attr, key) {
            return matched(reference, index, 1.0, MatchKind::Exact, lookup.desired);
        }
    }

    let threshold = f64::from(lookup.threshold_pct) / 100.0;
    let mut best: Option<(f64, usize)> = None;
    for attr in lookup.scanned() {
        for (index, candidate) in reference.normalized(attr).keys().iter().enumerate() {
            let score = ctx.similarity().score(key, candidate);
            if score < threshold {
                continue;
            }
            // Equal scores go to the later row.
            let better = match best {
                None => true,
                Some((best_score, best_index)) => {
                    score > best_score || (score == best_score && index > best_index)
                }
            };
            if better {
                best = Some((score, index));
            }
        }
    }

    match best {
        Some((score, index)) => matched(reference, index, score, MatchKind::Fuzzy, lookup.desired),
        None => MatchResult::unresolved(),
    }
}

fn matched(
    reference: &ReferenceTable,
    index: usize,
    score: f64,
    kind: MatchKind,
    desired: ReferenceAttribute,
) -> MatchResult {
    MatchResult {
        canonical_value: reference.value(index, desired).map(str::to_string),
        score,
        source_index: Some(index),
        kind,
    }
}

/// Resolution counts for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCounts {
    pub exact: usize,
    pub fuzzy: usize,
    pub unresolved: usize,
    pub null: usize,
}

impl MatchCounts {
    pub fn resolved(&self) -> usize {
        self.exact + self.fuzzy
    }

    fn record(&mut self, kind: MatchKind) {
        match kind {
            MatchKind::Exact => self.exact += 1,
            MatchKind::Fuzzy => self.fuzzy += 1,
            MatchKind::Unresolved => self.unresolved += 1,
        }
    }
}

/// Row-aligned results for one column.
#[derive(Debug, Clone)]
pub struct ColumnMatches {
    pub column: String,
    pub results: Vec<MatchResult>,
    pub counts: MatchCounts,
}

impl ColumnMatches {
    /// Value of `attr` for each row's matched entry.
    pub fn project(&self, reference: &ReferenceTable, attr: ReferenceAttribute) -> Vec<Option<String>> {
        self.results
            .iter()
            .map(|result| {
                result
                    .source_index
                    .and_then(|index| reference.value(index, attr))
                    .map(str::to_string)
            })
            .collect()
    }
}

/// Resolve every cell of `column`, resolving each distinct value once.
pub fn standardize_column(
    ctx: &StandardizationContext,
    column: &Column,
    lookup: &Lookup,
) -> ColumnMatches {
    let mut memo: HashMap<String, MatchResult> = HashMap::new();
    let mut counts = MatchCounts::default();
    let mut results = Vec::with_capacity(column.len());

    for row in 0..column.len() {
        let Some(text) = column_text(column, row) else {
            counts.null += 1;
            results.push(MatchResult::unresolved());
            continue;
        };
        let key = normalize_key(&text);
        let result = memo
            .entry(key)
            .or_insert_with_key(|key| resolve_key(ctx, key, lookup))
            .clone();
        counts.record(result.kind);
        results.push(result);
    }

    debug!(
        column = %column.name(),
        attribute = %lookup.attribute,
        mode = ?lookup.mode,
        distinct = memo.len(),
        exact = counts.exact,
        fuzzy = counts.fuzzy,
        unresolved = counts.unresolved,
        null = counts.null,
        "Standardized column"
    );

    ColumnMatches {
        column: column.name().to_string(),
        results,
        counts,
    }
}
