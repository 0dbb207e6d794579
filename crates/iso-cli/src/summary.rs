use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use iso_cli::types::{BatchResult, FileResult};
use iso_map::DetectedColumn;

pub fn print_summary(result: &BatchResult) {
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Country column"),
        header_cell("Code column"),
        header_cell("Rows"),
        header_cell("Exact"),
        header_cell("Fuzzy"),
        header_cell("Missing"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rows = 0usize;
    let mut total_exact = 0usize;
    let mut total_fuzzy = 0usize;
    let mut total_missing = 0usize;
    for file in &result.files {
        total_rows += file.rows;
        total_missing += file.missing;
        let (exact, fuzzy) = match_counts(file);
        total_exact += exact.unwrap_or(0);
        total_fuzzy += fuzzy.unwrap_or(0);
        let stats = file.stats.as_ref();
        table.add_row(vec![
            Cell::new(&file.file_name),
            column_cell(stats.and_then(|s| s.primary.as_ref())),
            column_cell(stats.and_then(|s| s.secondary.as_ref())),
            Cell::new(file.rows),
            count_cell(exact, Color::Green),
            count_cell(fuzzy, Color::Yellow),
            count_cell(Some(file.missing), Color::Red),
            output_cell(file),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        dim_cell(""),
        dim_cell(""),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(Some(total_exact), Color::Green),
        count_cell(Some(total_fuzzy), Color::Yellow),
        count_cell(Some(total_missing), Color::Red),
        dim_cell(""),
    ]);
    println!("{table}");

    if result.has_errors() {
        print_failures(result);
    }
    if result.halted {
        println!("Batch stopped early; remaining datasets were not processed.");
    }
}

fn print_failures(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Dataset"), header_cell("Error")]);
    apply_table_style(&mut table);
    for file in result.files.iter().filter(|file| file.is_failed()) {
        table.add_row(vec![
            Cell::new(&file.file_name).fg(Color::Red),
            Cell::new(file.error.as_deref().unwrap_or_default()),
        ]);
    }
    println!("{table}");
}

/// Exact and fuzzy counts over both passes; `None` for failed datasets.
fn match_counts(file: &FileResult) -> (Option<usize>, Option<usize>) {
    let Some(stats) = &file.stats else {
        return (None, None);
    };
    let passes = [stats.primary_counts, stats.secondary_counts];
    let exact = passes.iter().flatten().map(|counts| counts.exact).sum();
    let fuzzy = passes.iter().flatten().map(|counts| counts.fuzzy).sum();
    (Some(exact), Some(fuzzy))
}

fn column_cell(detected: Option<&DetectedColumn>) -> Cell {
    match detected {
        Some(column) => Cell::new(format!("{} ({})", column.name, column.attribute)),
        None => dim_cell("-"),
    }
}

fn output_cell(file: &FileResult) -> Cell {
    if file.is_failed() {
        return Cell::new("failed").fg(Color::Red);
    }
    match file.output.as_deref().and_then(Path::file_name) {
        Some(name) => Cell::new(name.to_string_lossy()),
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(0) => dim_cell(0),
        Some(value) => Cell::new(value).fg(color),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
