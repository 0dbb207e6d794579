use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Color, Table};
use serde::Serialize;
use tracing::{info, info_span, trace};

use iso_cli::config::{ConfigFile, StandardizeOverrides};
use iso_cli::logging::redact_value;
use iso_cli::pipeline::{BatchConfig, run_batch};
use iso_cli::types::BatchResult;
use iso_map::{Lookup, MatchKind, ScanMode, StandardizationContext, resolve_text};
use iso_report::{OutputFormat, ReportMode};
use iso_standards::{ReferenceAttribute, ReferenceTable, load_reference};

use crate::cli::{LookupArgs, OutputFormatArg, StandardizeArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_reference() -> Result<()> {
    let reference = load_reference().context("load reference table")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Official name"),
        header_cell("Alpha-2"),
        header_cell("Alpha-3"),
    ]);
    apply_table_style(&mut table);
    for entry in reference.entries() {
        table.add_row(vec![
            entry.name.as_str(),
            entry.official_name.as_str(),
            entry.alpha2.as_str(),
            entry.alpha3.as_deref().unwrap_or("-"),
        ]);
    }
    println!("{table}");
    println!("{} entries from {}", reference.len(), reference.origin());
    Ok(())
}

pub fn run_standardize(args: &StandardizeArgs, config: &ConfigFile) -> Result<BatchResult> {
    let batch_span = info_span!("standardize", input = %args.input.display());
    let _batch_guard = batch_span.enter();
    let start = Instant::now();

    let options = config.standardize_options(StandardizeOverrides {
        fuzzy_threshold: args.fuzzy_threshold,
        sample_size: args.sample_size,
        auto_find_retry: args.auto_find_retry,
        slow: args.slow,
    })?;
    let reference = Arc::new(load_reference().context("load reference table")?);
    let ctx = StandardizationContext::new(reference, options)
        .context("build standardization context")?;

    let mut batch = BatchConfig::new(args.input.clone());
    if let Some(output) = &args.output {
        batch = batch.with_output(output.clone());
    }
    if let Some(dir) = args.report_dir.as_ref().or(config.report.dir.as_ref()) {
        batch.report_dir.clone_from(dir);
    }
    batch.format = match args.format {
        OutputFormatArg::Parquet => OutputFormat::Parquet,
        OutputFormatArg::Csv => OutputFormat::Csv,
    };
    batch.report_mode = if args.detailed_report || config.report.detailed {
        ReportMode::Detailed
    } else {
        ReportMode::Summary
    };
    batch.seed = args.seed;
    batch.dry_run = args.dry_run;
    batch.fail_fast = args.fail_fast;

    let cancel = AtomicBool::new(false);
    let result = run_batch(&batch, &ctx, &cancel)?;
    info!(
        duration_ms = start.elapsed().as_millis(),
        "Standardize command finished"
    );
    Ok(result)
}

/// One resolved value, as printed by `lookup --json`.
#[derive(Debug, Serialize)]
struct LookupRow<'a> {
    value: &'a str,
    name: Option<&'a str>,
    official_name: Option<&'a str>,
    alpha2: Option<&'a str>,
    score: f64,
    kind: &'static str,
}

pub fn run_lookup(args: &LookupArgs, config: &ConfigFile) -> Result<()> {
    let options = config.standardize_options(StandardizeOverrides {
        fuzzy_threshold: args.fuzzy_threshold,
        slow: args.slow,
        ..StandardizeOverrides::default()
    })?;
    let reference = Arc::new(load_reference().context("load reference table")?);
    let ctx = StandardizationContext::new(reference, options)
        .context("build standardization context")?;
    let lookup = ctx.lookup(args.attribute, ReferenceAttribute::Alpha2);

    let rows = args
        .values
        .iter()
        .map(|value| lookup_row(&ctx, value, &lookup))
        .collect::<Vec<_>>();

    if args.json {
        let json = serde_json::to_string_pretty(&rows).context("serialize lookup results")?;
        println!("{json}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Official name"),
        header_cell("Alpha-2"),
        header_cell("Score"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for row in &rows {
        let kind_color = match row.kind {
            "exact" => Color::Green,
            "fuzzy" => Color::Yellow,
            _ => Color::Red,
        };
        table.add_row(vec![
            Cell::new(row.value),
            Cell::new(row.official_name.unwrap_or("-")),
            Cell::new(row.alpha2.unwrap_or("-")),
            Cell::new(format!("{:.3}", row.score)),
            Cell::new(row.kind).fg(kind_color),
        ]);
    }
    println!("{table}");
    if lookup.mode == ScanMode::Fast && rows.iter().any(|row| row.kind == "unresolved") {
        println!("Hint: --slow also compares against the counterpart name attribute.");
    }
    Ok(())
}

fn lookup_row<'a>(
    ctx: &'a StandardizationContext,
    value: &'a str,
    lookup: &Lookup,
) -> LookupRow<'a> {
    let result = resolve_text(ctx, value, lookup);
    trace!(
        value = redact_value(value),
        kind = ?result.kind,
        score = result.score,
        "Resolved lookup value"
    );
    let entry = |attr| field(ctx.reference(), result.source_index, attr);
    LookupRow {
        value,
        name: entry(ReferenceAttribute::Name),
        official_name: entry(ReferenceAttribute::Official),
        alpha2: entry(ReferenceAttribute::Alpha2),
        score: result.score,
        kind: match result.kind {
            MatchKind::Exact => "exact",
            MatchKind::Fuzzy => "fuzzy",
            MatchKind::Unresolved => "unresolved",
        },
    }
}

fn field(
    reference: &ReferenceTable,
    index: Option<usize>,
    attr: ReferenceAttribute,
) -> Option<&str> {
    index.and_then(|index| reference.value(index, attr))
}
