//! Probabilistic column detection.
//!
//! Each attempt samples a handful of cells per column and stops at the first
//! column where any sampled value is an exact key of the target attribute.
//! Columns are never scored against each other, and the full column is only
//! read when it is shorter than the sample size.

use iso_common::{column_text, normalize_key};
use iso_standards::{ReferenceAttribute, ReferenceTable};
use polars::prelude::{Column, DataFrame};
use rand::Rng;
use rand::seq::index;
use tracing::{debug, trace};

/// Name-like targets, tried in this order within each attempt.
pub const NAME_TARGETS: [ReferenceAttribute; 2] =
    [ReferenceAttribute::Official, ReferenceAttribute::Name];

/// Find the first column holding values of `target`.
pub fn find_column<R: Rng + ?Sized>(
    df: &DataFrame,
    reference: &ReferenceTable,
    target: ReferenceAttribute,
    sample_size: usize,
    retries: usize,
    rng: &mut R,
) -> Option<String> {
    detect(df, reference, &[target], sample_size, retries, rng).map(|(column, _)| column)
}

/// Find the primary name-like column and the attribute that matched it.
pub fn find_name_column<R: Rng + ?Sized>(
    df: &DataFrame,
    reference: &ReferenceTable,
    sample_size: usize,
    retries: usize,
    rng: &mut R,
) -> Option<(String, ReferenceAttribute)> {
    detect(df, reference, &NAME_TARGETS, sample_size, retries, rng)
}

fn detect<R: Rng + ?Sized>(
    df: &DataFrame,
    reference: &ReferenceTable,
    targets: &[ReferenceAttribute],
    sample_size: usize,
    retries: usize,
    rng: &mut R,
) -> Option<(String, ReferenceAttribute)> {
    for attempt in 1..=retries {
        for &target in targets {
            for column in df.get_columns() {
                if sample_hits(column, reference, target, sample_size, rng) {
                    debug!(
                        column = %column.name(),
                        attribute = %target,
                        attempt,
                        "Detected country column"
                    );
                    return Some((column.name().to_string(), target));
                }
            }
        }
        trace!(attempt, targets = ?targets, "No column matched, resampling");
    }
    debug!(targets = ?targets, retries, "Column detection exhausted retries");
    None
}

/// Whether any sampled cell of `column` is an exact key of `target`.
fn sample_hits<R: Rng + ?Sized>(
    column: &Column,
    reference: &ReferenceTable,
    target: ReferenceAttribute,
    sample_size: usize,
    rng: &mut R,
) -> bool {
    let len = column.len();
    if len == 0 {
        return false;
    }
    let index = reference.normalized(target);
    let hit = |row: usize| {
        column_text(column, row)
            .map(|text| normalize_key(&text))
            .is_some_and(|key| index.contains(&key))
    };

    sample_rows(len, sample_size, rng).into_iter().any(hit)
}

/// Distinct row indices to inspect; every row when the column fits the sample.
fn sample_rows<R: Rng + ?Sized>(len: usize, sample_size: usize, rng: &mut R) -> Vec<usize> {
    if len <= sample_size {
        (0..len).collect()
    } else {
        index::sample(rng, len, sample_size).into_vec()
    }
}
