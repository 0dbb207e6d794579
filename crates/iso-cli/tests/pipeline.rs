//! Batch driver tests over temporary dataset folders.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use iso_cli::pipeline::{BatchConfig, default_output_dir, run_batch};
use iso_map::{StandardizationContext, StandardizeOptions};
use iso_report::{OutputFormat, ReportMode};
use polars::prelude::*;
use tempfile::TempDir;

fn context() -> StandardizationContext {
    let reference = Arc::new(iso_standards::load_default().unwrap());
    let options = StandardizeOptions::default().with_fuzzy_threshold(60);
    StandardizationContext::new(reference, options).unwrap()
}

/// `a.csv` has one unresolvable row, `b.csv` has no country column, `c.csv` only codes.
fn dataset_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.csv"),
        "id,country,code\n1,France,FR\n2,Germany,DE\n3,Xyzzy qwerty,\n",
    )
    .unwrap();
    fs::write(dir.path().join("b.csv"), "notes\nhello\nworld\n").unwrap();
    fs::write(dir.path().join("c.csv"), "code\nDE\nfr\n").unwrap();
    fs::write(dir.path().join("readme.md"), "not a dataset").unwrap();
    dir
}

fn batch(input: &Path, out: &Path) -> BatchConfig {
    let mut config = BatchConfig::new(input).with_output(out.join("exports"));
    config.seed = Some(7);
    config
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect()
}

#[test]
fn failed_dataset_is_recorded_and_batch_continues() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let config = batch(input.path(), out.path());

    let result = run_batch(&config, &context(), &AtomicBool::new(false)).unwrap();

    let names: Vec<&str> = result.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, ["a.csv", "b.csv", "c.csv"]);
    assert!(result.has_errors());
    assert!(!result.halted);

    let failed = &result.files[1];
    assert!(failed.is_failed());
    assert!(
        failed
            .error
            .as_deref()
            .unwrap()
            .contains("No country column detected")
    );

    assert_eq!(result.files[0].missing, 2);
    assert_eq!(result.files[2].missing, 0);
    assert_eq!(result.total_missing(), 2);

    let stats = result.files[0].stats.as_ref().unwrap();
    assert_eq!(stats.primary.as_ref().unwrap().name, "country");
    assert_eq!(stats.secondary.as_ref().unwrap().name, "code");

    assert_eq!(files_in(&out.path().join("exports")).len(), 2);

    let report = fs::read_to_string(result.report.as_ref().unwrap()).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "file_name,column_name,count_missing,time");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("a.csv,country_name_final,1,"));
    assert!(lines[2].starts_with("a.csv,country_code_final,1,"));
}

#[test]
fn exports_carry_final_columns() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let config = batch(input.path(), out.path());

    let result = run_batch(&config, &context(), &AtomicBool::new(false)).unwrap();

    let exported = result.files[0].output.as_ref().unwrap();
    assert_eq!(exported.extension().unwrap(), "parquet");
    let df = iso_ingest::read_dataset(exported).unwrap();
    let columns: Vec<&str> = df.get_column_names().into_iter().map(|c| c.as_str()).collect();
    assert_eq!(
        columns,
        ["id", "country", "code", "country_name_final", "country_code_final"]
    );
    assert_eq!(
        strings(&df, "country_name_final"),
        [
            Some("French Republic".to_string()),
            Some("Federal Republic of Germany".to_string()),
            None
        ]
    );
    assert_eq!(
        strings(&df, "country_code_final"),
        [Some("FR".to_string()), Some("DE".to_string()), None]
    );

    let codes_only = iso_ingest::read_dataset(result.files[2].output.as_ref().unwrap()).unwrap();
    assert_eq!(
        strings(&codes_only, "country_name_final"),
        [
            Some("Federal Republic of Germany".to_string()),
            Some("French Republic".to_string())
        ]
    );
}

#[test]
fn fail_fast_stops_at_first_failure() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let mut config = batch(input.path(), out.path());
    config.fail_fast = true;

    let result = run_batch(&config, &context(), &AtomicBool::new(false)).unwrap();

    assert_eq!(result.files.len(), 2);
    assert!(result.halted);
    assert!(result.report.is_some());
}

#[test]
fn cancelled_batch_processes_nothing() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let config = batch(input.path(), out.path());
    let cancel = Arc::new(AtomicBool::new(true));

    let result = run_batch(&config, &context(), &cancel).unwrap();

    assert!(result.files.is_empty());
    assert!(result.halted);
    let report = fs::read_to_string(result.report.unwrap()).unwrap();
    assert_eq!(report.trim_end(), "file_name,column_name,count_missing,time");
}

#[test]
fn dry_run_writes_nothing() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let mut config = batch(input.path(), out.path());
    config.dry_run = true;

    let result = run_batch(&config, &context(), &AtomicBool::new(false)).unwrap();

    assert_eq!(result.files.len(), 3);
    assert!(result.report.is_none());
    assert!(result.files.iter().all(|f| f.output.is_none()));
    assert!(files_in(out.path()).is_empty());
}

#[test]
fn detailed_report_lists_unresolved_rows() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let mut config = batch(input.path(), out.path());
    config.report_mode = ReportMode::Detailed;

    let result = run_batch(&config, &context(), &AtomicBool::new(false)).unwrap();

    let report = fs::read_to_string(result.report.unwrap()).unwrap();
    insta::assert_snapshot!(report, @r"
    file_name,country_name_final,country_code_final
    a.csv,,
    ");
}

#[test]
fn single_file_exports_to_given_path() {
    let input = dataset_dir();
    let out = TempDir::new().unwrap();
    let target = out.path().join("clean.csv");
    let mut config = BatchConfig::new(input.path().join("c.csv")).with_output(&target);
    config.format = OutputFormat::Csv;
    config.seed = Some(1);

    let result = run_batch(&config, &context(), &AtomicBool::new(false)).unwrap();

    assert_eq!(result.files[0].output.as_deref(), Some(target.as_path()));
    let written = fs::read_to_string(&target).unwrap();
    assert_eq!(
        written.lines().next(),
        Some("code,country_name_final,country_code_final")
    );
    assert_eq!(
        result.report.as_ref().unwrap().parent(),
        Some(out.path().join("reports").as_path())
    );
}

#[test]
fn default_output_sits_next_to_input() {
    let input = dataset_dir();
    assert_eq!(
        default_output_dir(input.path()),
        input.path().join("standardized")
    );
    assert_eq!(
        default_output_dir(&input.path().join("a.csv")),
        input.path().join("standardized")
    );
}

#[test]
fn missing_input_is_an_error() {
    let out = TempDir::new().unwrap();
    let config = batch(&out.path().join("absent"), out.path());
    assert!(run_batch(&config, &context(), &AtomicBool::new(false)).is_err());
}
