use iso_report::{
    OutputFormat, REPORT_COLUMNS, ReportMode, ReportRow, ReportTemplate, ReportUpdate,
    empty_report, export_dataset, finalize_report, update_report,
};
use polars::prelude::*;
use tempfile::TempDir;

fn standardized() -> DataFrame {
    df!(
        "country" => ["Canada", "Atlantis", "Bulgaria", "Narnia"],
        "country_name_final" => [Some("Canada"), None, Some("Republic of Bulgaria"), Some("None")],
        "country_code_final" => [Some("CA"), Some("XX"), Some("BG"), Some("NN")],
    )
    .unwrap()
}

#[test]
fn summary_counts_missing_cells_per_column() {
    let mut report = empty_report();
    let update = update_report(&standardized(), &mut report, "sales.csv", ReportMode::Summary).unwrap();

    assert!(matches!(update, ReportUpdate::Summary { added: 1 }));
    assert_eq!(report.len(), 1);
    let row = &report.rows()[0];
    assert_eq!(row.file_name, "sales.csv");
    assert_eq!(row.column_name, "country_name_final");
    assert_eq!(row.count_missing, 2);
    assert_eq!(row.time.len(), "2024-01-02-03-04-05".len());
}

#[test]
fn summary_accumulates_across_files() {
    let mut report = empty_report();
    let clean = df!(
        "country_name_final" => ["Canada"],
        "country_code_final" => ["CA"],
    )
    .unwrap();

    update_report(&standardized(), &mut report, "a.csv", ReportMode::Summary).unwrap();
    update_report(&clean, &mut report, "b.csv", ReportMode::Summary).unwrap();
    update_report(&standardized(), &mut report, "c.csv", ReportMode::Summary).unwrap();

    let files: Vec<&str> = report.rows().iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(files, ["a.csv", "c.csv"]);
}

#[test]
fn detailed_mode_returns_offending_rows_only() {
    let mut report = empty_report();
    let update = update_report(&standardized(), &mut report, "sales.csv", ReportMode::Detailed).unwrap();

    let ReportUpdate::Detailed(rows) = update else {
        panic!("expected detailed rows");
    };
    assert!(report.is_empty());
    assert_eq!(rows.shape(), (2, 2));
    let codes = rows.column("country_code_final").unwrap().str().unwrap();
    assert_eq!(codes.get(0), Some("XX"));
    assert_eq!(codes.get(1), Some("NN"));
}

#[test]
fn report_csv_layout() {
    let mut report = ReportTemplate::empty();
    report.push(ReportRow {
        file_name: "sales.csv".to_string(),
        column_name: "country_name_final".to_string(),
        count_missing: 2,
        time: "2024-01-02-03-04-05".to_string(),
    });

    let mut df = report.to_dataframe().unwrap();
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)
        .unwrap();
    let csv = String::from_utf8(buffer).unwrap();

    insta::assert_snapshot!(csv.trim_end(), @r"
    file_name,column_name,count_missing,time
    sales.csv,country_name_final,2,2024-01-02-03-04-05
    ");
}

#[test]
fn finalize_writes_timestamped_csv() {
    let dir = TempDir::new().unwrap();
    let reports = dir.path().join("reports");

    let path = finalize_report(&empty_report(), &reports).unwrap();

    assert_eq!(path.parent(), Some(reports.as_path()));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("error_report-"), "{name}");
    assert!(name.ends_with(".csv"), "{name}");

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), REPORT_COLUMNS.join(","));
}

#[test]
fn export_into_directory_uses_generated_name() {
    let dir = TempDir::new().unwrap();
    let mut df = standardized();

    let path = export_dataset(&mut df, dir.path(), OutputFormat::Parquet).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("file_export-"), "{name}");
    assert!(name.ends_with(".parquet"), "{name}");
    let read = ParquetReader::new(std::fs::File::open(&path).unwrap())
        .finish()
        .unwrap();
    assert_eq!(read.shape(), (4, 3));
}

#[test]
fn export_to_explicit_file_path() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out").join("clean.csv");
    let mut df = standardized();

    let path = export_dataset(&mut df, &target, OutputFormat::Csv).unwrap();

    assert_eq!(path, target);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("country,country_name_final,country_code_final"));
}
