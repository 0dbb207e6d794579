//! Two-pass reconciliation into the final name and code columns.

use iso_common::{FINAL_CODE_COLUMN, FINAL_NAME_COLUMN};
use iso_standards::ReferenceAttribute;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use rand::Rng;
use tracing::{info, warn};

use crate::context::StandardizationContext;
use crate::detect::{find_column, find_name_column};
use crate::error::{MapError, Result};
use crate::options::ScanMode;
use crate::standardize::{ColumnMatches, MatchCounts, standardize_column};

/// A column picked by detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedColumn {
    pub name: String,
    pub attribute: ReferenceAttribute,
}

/// What reconciliation found and produced for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub primary: Option<DetectedColumn>,
    pub secondary: Option<DetectedColumn>,
    pub primary_counts: Option<MatchCounts>,
    pub secondary_counts: Option<MatchCounts>,
    pub rows: usize,
    pub resolved_names: usize,
    pub resolved_codes: usize,
    /// Rows where either final column stayed empty.
    pub unresolved_rows: usize,
}

/// Augmented frame plus reconciliation stats.
#[derive(Debug, Clone)]
pub struct DatasetOutcome {
    pub frame: DataFrame,
    pub stats: ReconcileStats,
}

/// Standardize `df`, returning the frame with the two final columns appended.
pub fn standardize_dataset<R: Rng + ?Sized>(
    mut df: DataFrame,
    ctx: &StandardizationContext,
    rng: &mut R,
) -> Result<DatasetOutcome> {
    let stats = standardize_frame(&mut df, ctx, rng)?;
    Ok(DatasetOutcome { frame: df, stats })
}

/// Append `country_name_final` and `country_code_final` to `df` in place.
///
/// Fails with [`MapError::AutoDetection`] when neither pass finds a column,
/// and with [`MapError::OutputColumnExists`] when an output column is present.
pub fn standardize_frame<R: Rng + ?Sized>(
    df: &mut DataFrame,
    ctx: &StandardizationContext,
    rng: &mut R,
) -> Result<ReconcileStats> {
    for output in [FINAL_NAME_COLUMN, FINAL_CODE_COLUMN] {
        if df.get_column_index(output).is_some() {
            return Err(MapError::OutputColumnExists {
                column: output.to_string(),
            });
        }
    }

    let options = ctx.options();
    let reference = ctx.reference();

    let primary = find_name_column(
        df,
        reference,
        options.sample_size,
        options.auto_find_retry,
        rng,
    )
    .map(|(name, attribute)| DetectedColumn { name, attribute });
    let secondary = find_column(
        df,
        reference,
        ReferenceAttribute::Alpha2,
        options.sample_size,
        options.auto_find_retry,
        rng,
    )
    .map(|name| DetectedColumn {
        name,
        attribute: ReferenceAttribute::Alpha2,
    });

    if primary.is_none() && secondary.is_none() {
        return Err(MapError::AutoDetection {
            columns: df
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
        });
    }

    let primary_matches = primary
        .as_ref()
        .map(|detected| run_pass(df, ctx, detected, options.scan_mode()))
        .transpose()?;
    // Codes have no naming counterpart, so the secondary pass is always fast.
    let secondary_matches = secondary
        .as_ref()
        .map(|detected| run_pass(df, ctx, detected, ScanMode::Fast))
        .transpose()?;

    let rows = df.height();
    let names = merge(
        project(primary_matches.as_ref(), ctx, ReferenceAttribute::Official, rows),
        project(secondary_matches.as_ref(), ctx, ReferenceAttribute::Official, rows),
    );
    let codes = merge(
        project(primary_matches.as_ref(), ctx, ReferenceAttribute::Alpha2, rows),
        project(secondary_matches.as_ref(), ctx, ReferenceAttribute::Alpha2, rows),
    );

    let stats = ReconcileStats {
        primary,
        secondary,
        primary_counts: primary_matches.as_ref().map(|m| m.counts),
        secondary_counts: secondary_matches.as_ref().map(|m| m.counts),
        rows,
        resolved_names: names.iter().flatten().count(),
        resolved_codes: codes.iter().flatten().count(),
        unresolved_rows: names
            .iter()
            .zip(&codes)
            .filter(|(name, code)| name.is_none() || code.is_none())
            .count(),
    };

    df.with_column(Series::new(FINAL_NAME_COLUMN.into(), names).into_column())?;
    df.with_column(Series::new(FINAL_CODE_COLUMN.into(), codes).into_column())?;

    if stats.unresolved_rows > 0 {
        warn!(
            rows,
            unresolved = stats.unresolved_rows,
            "Some country values could not be standardized"
        );
    }
    info!(
        primary = ?stats.primary.as_ref().map(|d| d.name.as_str()),
        secondary = ?stats.secondary.as_ref().map(|d| d.name.as_str()),
        rows,
        resolved_names = stats.resolved_names,
        resolved_codes = stats.resolved_codes,
        "Reconciled country columns"
    );

    Ok(stats)
}

fn run_pass(
    df: &DataFrame,
    ctx: &StandardizationContext,
    detected: &DetectedColumn,
    mode: ScanMode,
) -> Result<ColumnMatches> {
    let column = df.column(&detected.name)?;
    let lookup = ctx
        .lookup(detected.attribute, ReferenceAttribute::Official)
        .with_mode(mode);
    Ok(standardize_column(ctx, column, &lookup))
}

/// Project a pass onto `attr`; a pass that did not run is all missing.
fn project(
    matches: Option<&ColumnMatches>,
    ctx: &StandardizationContext,
    attr: ReferenceAttribute,
    rows: usize,
) -> Vec<Option<String>> {
    match matches {
        Some(matches) => matches.project(ctx.reference(), attr),
        None => vec![None; rows],
    }
}

/// First non-missing value per row.
fn merge(primary: Vec<Option<String>>, secondary: Vec<Option<String>>) -> Vec<Option<String>> {
    primary
        .into_iter()
        .zip(secondary)
        .map(|(first, second)| first.or(second))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_primary() {
        let merged = merge(
            vec![Some("A".to_string()), None, None],
            vec![Some("B".to_string()), Some("C".to_string()), None],
        );
        assert_eq!(merged, vec![Some("A".to_string()), Some("C".to_string()), None]);
    }
}
