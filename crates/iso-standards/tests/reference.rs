use std::io::Write;

use iso_standards::{ReferenceAttribute, StandardsError, load_default, load_from_path};

#[test]
fn embedded_table_has_expected_countries() {
    let table = load_default().expect("load embedded table");

    let canada = table
        .position(ReferenceAttribute::Name, "canada")
        .expect("Canada by name");
    assert_eq!(table.value(canada, ReferenceAttribute::Alpha2), Some("CA"));
    assert_eq!(table.value(canada, ReferenceAttribute::Alpha3), Some("CAN"));

    let china = table
        .position(ReferenceAttribute::Official, "people'srepublicofchina")
        .expect("China by official name");
    assert_eq!(table.value(china, ReferenceAttribute::Alpha2), Some("CN"));
}

#[test]
fn namibia_code_is_not_treated_as_missing() {
    let table = load_default().expect("load embedded table");
    let idx = table
        .position(ReferenceAttribute::Alpha2, "na")
        .expect("NA is a country code");
    assert_eq!(table.value(idx, ReferenceAttribute::Name), Some("Namibia"));
}

#[test]
fn embedded_codes_are_unique() {
    let table = load_default().expect("load embedded table");
    let mut codes: Vec<&str> = table.column(ReferenceAttribute::Alpha2);
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), table.len());
}

#[test]
fn loads_table_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "alpha-2,name,official").unwrap();
    writeln!(file, "BG,Bulgaria,Republic of Bulgaria").unwrap();
    writeln!(file, "\"XK\",\"Kosovo\",\"Republic of Kosovo\"").unwrap();

    let table = load_from_path(file.path()).expect("load from file");
    assert_eq!(table.len(), 2);
    assert_eq!(table.value(1, ReferenceAttribute::Official), Some("Republic of Kosovo"));
    assert_eq!(table.value(1, ReferenceAttribute::Alpha3), None);
}

#[test]
fn missing_file_is_reported() {
    let err = load_from_path(std::path::Path::new("/nonexistent/countries.csv")).unwrap_err();
    assert!(matches!(err, StandardsError::FileNotFound { .. }));
}
