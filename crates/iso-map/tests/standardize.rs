use std::sync::Arc;

use iso_map::{
    Lookup, MapError, MatchKind, ScanMode, StandardizationContext, StandardizeOptions, resolve,
    resolve_text, standardize,
};
use iso_standards::{ReferenceAttribute, load_default, load_from_str};
use polars::prelude::AnyValue;

fn context() -> StandardizationContext {
    let reference = Arc::new(load_default().expect("load reference"));
    StandardizationContext::new(reference, StandardizeOptions::default()).expect("context")
}

fn by_name() -> Lookup {
    Lookup::new(ReferenceAttribute::Name, ReferenceAttribute::Alpha2)
}

#[test]
fn exact_match_short_circuits() {
    let ctx = context();
    let result = resolve_text(&ctx, "  Can ada ", &by_name());

    assert_eq!(result.canonical_value.as_deref(), Some("CA"));
    assert_eq!(result.kind, MatchKind::Exact);
    assert_eq!(result.score, 1.0);
    // No similarity was computed.
    assert_eq!(ctx.similarity().stats().misses, 0);
}

#[test]
fn fuzzy_fallback_resolves_typo() {
    let ctx = context();
    let lookup = by_name().with_threshold(50);
    let result = resolve_text(&ctx, "Cnada", &lookup);

    assert_eq!(result.canonical_value.as_deref(), Some("CA"));
    assert_eq!(result.kind, MatchKind::Fuzzy);
    assert!((result.score - 10.0 / 11.0).abs() < 1e-12);
}

#[test]
fn below_threshold_is_unresolved() {
    let ctx = context();
    let lookup = by_name().with_threshold(70);

    assert_eq!(
        standardize(&ctx, AnyValue::String("completely unrelated text"), &lookup),
        None
    );
}

#[test]
fn null_cell_is_a_type_conversion_error() {
    let ctx = context();
    let err = resolve(&ctx, AnyValue::Null, &by_name()).unwrap_err();
    assert!(matches!(err, MapError::TypeConversion { .. }));

    assert_eq!(standardize(&ctx, AnyValue::Null, &by_name()), None);
}

#[test]
fn numeric_cells_are_stringified() {
    let ctx = context();
    let result = resolve(&ctx, AnyValue::Int64(42), &by_name().with_threshold(90)).unwrap();
    assert_eq!(result.kind, MatchKind::Unresolved);
    assert_eq!(result.source_index, None);
}

#[test]
fn slow_mode_scans_the_counterpart() {
    let ctx = context();
    let fast = by_name()
        .with_desired(ReferenceAttribute::Official)
        .with_threshold(70);
    let slow = fast.with_mode(ScanMode::Slow);

    assert_eq!(resolve_text(&ctx, "Republic of Bulgria", &fast).canonical_value, None);
    assert_eq!(
        resolve_text(&ctx, "Republic of Bulgria", &slow)
            .canonical_value
            .as_deref(),
        Some("Republic of Bulgaria")
    );
}

#[test]
fn slow_mode_checks_counterpart_exactly() {
    let ctx = context();
    let slow = by_name().with_mode(ScanMode::Slow);
    let result = resolve_text(&ctx, "People's Republic of China", &slow);

    assert_eq!(result.canonical_value.as_deref(), Some("CN"));
    assert_eq!(result.kind, MatchKind::Exact);
}

#[test]
fn equal_scores_prefer_the_later_entry() {
    let csv = "name,official,alpha-2\nabce,Abce Republic,AA\nabcf,Abcf Republic,BB\n";
    let reference = Arc::new(load_from_str(csv, "inline").expect("inline table"));
    let ctx = StandardizationContext::new(reference, StandardizeOptions::default()).unwrap();

    let result = resolve_text(&ctx, "abcd", &by_name().with_threshold(70));
    assert_eq!(result.canonical_value.as_deref(), Some("BB"));
    assert_eq!(result.source_index, Some(1));
}

#[test]
fn invalid_options_are_rejected() {
    let reference = Arc::new(load_default().expect("load reference"));
    let err = StandardizationContext::new(
        reference,
        StandardizeOptions::default().with_fuzzy_threshold(150),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        MapError::InvalidOption {
            field: "fuzzy_threshold",
            ..
        }
    ));
}
