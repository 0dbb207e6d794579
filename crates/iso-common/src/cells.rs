//! Polars `AnyValue` utility functions.
//!
//! Datasets arrive with whatever dtypes the reader inferred, so every cell
//! that takes part in matching is first turned into text here.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to its text form.
///
/// Returns `None` for `Null`. Floats are formatted without trailing zeros so
/// that a code column read as `1.0` compares as `1`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use iso_common::cell_text;
///
/// assert_eq!(cell_text(AnyValue::Null), None);
/// assert_eq!(cell_text(AnyValue::Int32(42)).as_deref(), Some("42"));
/// assert_eq!(cell_text(AnyValue::String("Canada")).as_deref(), Some("Canada"));
/// ```
pub fn cell_text(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_owned()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Boolean(b) => Some(b.to_string()),
        AnyValue::Float32(v) => float_text(f64::from(v)),
        AnyValue::Float64(v) => float_text(v),
        other if other.dtype().is_integer() => Some(other.to_string()),
        // Display quotes nested text values.
        other => Some(unquote(other.to_string())),
    }
}

fn float_text(v: f64) -> Option<String> {
    (!v.is_nan()).then(|| format_numeric(v))
}

fn unquote(text: String) -> String {
    match text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) => inner.to_string(),
        None => text,
    }
}

/// Reads the cell at `idx` of a column as text, treating out-of-range as null.
pub fn column_text(column: &Column, idx: usize) -> Option<String> {
    cell_text(column.get(idx).unwrap_or(AnyValue::Null))
}

/// Renders a float the way it would be typed: `40.0` becomes `"40"`.
///
/// ```
/// use iso_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        // Also folds -0.0 into "0".
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
