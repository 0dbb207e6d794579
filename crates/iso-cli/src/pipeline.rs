//! Batch driver: every dataset under an input path, one at a time.
//!
//! Per dataset the stages run in order:
//! 1. **Read**: dispatch on the file extension
//! 2. **Standardize**: detect columns and append the two final columns
//! 3. **Report**: fold unresolved cells into the running report
//! 4. **Export**: write the augmented dataset
//!
//! A failing dataset is recorded and the batch moves on unless `fail_fast`
//! is set. The report is finalized once, after the last dataset.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use iso_ingest::{discover_datasets, read_dataset};
use iso_map::{StandardizationContext, standardize_dataset};
use iso_report::{
    DetailedReport, OutputFormat, ReportMode, ReportTemplate, ReportUpdate, count_missing,
    export_dataset, final_columns, finalize_detailed_report, finalize_report, update_report,
};
use polars::prelude::DataFrame;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, info_span, warn};

use crate::types::{BatchResult, FileResult};

/// Everything the batch needs besides the standardization context.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// A dataset file or a directory of datasets.
    pub input: PathBuf,
    /// Export directory, or a file path when the input is a single dataset.
    pub output: PathBuf,
    pub format: OutputFormat,
    pub report_dir: PathBuf,
    pub report_mode: ReportMode,
    /// Seed for column sampling; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Standardize and report on screen without writing any file.
    pub dry_run: bool,
    pub fail_fast: bool,
}

impl BatchConfig {
    /// Defaults: exports next to the input in `standardized/`, reports in `standardized/reports/`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output_dir(&input);
        let report_dir = default_report_dir(&output);
        Self {
            input,
            output,
            format: OutputFormat::default(),
            report_dir,
            report_mode: ReportMode::default(),
            seed: None,
            dry_run: false,
            fail_fast: false,
        }
    }

    /// Export to `output`; the report directory follows unless set afterwards.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self.report_dir = default_report_dir(&self.output);
        self
    }
}

/// `<dir>/standardized` for a directory input, the sibling directory for a file.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let base = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    base.join("standardized")
}

/// `reports/` inside an export directory, or beside an export file.
fn default_report_dir(output: &Path) -> PathBuf {
    if is_file_path(output) {
        output
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("reports")
    } else {
        output.join("reports")
    }
}

fn is_file_path(path: &Path) -> bool {
    !path.is_dir() && path.extension().is_some()
}

/// Report accumulated across datasets, in whichever shape the mode asks for.
enum Accumulator {
    Summary(ReportTemplate),
    Detailed(DetailedReport),
}

impl Accumulator {
    fn new(mode: ReportMode) -> Self {
        match mode {
            ReportMode::Summary => Self::Summary(ReportTemplate::empty()),
            ReportMode::Detailed => Self::Detailed(DetailedReport::new()),
        }
    }

    fn add(&mut self, frame: &DataFrame, file_name: &str) -> Result<()> {
        match self {
            Self::Summary(template) => {
                update_report(frame, template, file_name, ReportMode::Summary)?;
            }
            Self::Detailed(report) => {
                let mut scratch = ReportTemplate::empty();
                if let ReportUpdate::Detailed(rows) =
                    update_report(frame, &mut scratch, file_name, ReportMode::Detailed)?
                {
                    report.append(file_name, rows)?;
                }
            }
        }
        Ok(())
    }

    fn finalize(&self, dir: &Path) -> Result<PathBuf> {
        let path = match self {
            Self::Summary(template) => finalize_report(template, dir),
            Self::Detailed(report) => finalize_detailed_report(report, dir),
        }
        .context("write report")?;
        Ok(path)
    }
}

/// Run every dataset found at `config.input`.
///
/// `cancel` is checked between datasets; a set flag stops the batch and the
/// report is still finalized for what was processed.
pub fn run_batch(
    config: &BatchConfig,
    ctx: &StandardizationContext,
    cancel: &AtomicBool,
) -> Result<BatchResult> {
    let files = discover_datasets(&config.input)
        .with_context(|| format!("discover datasets in {}", config.input.display()))?;
    info!(
        input = %config.input.display(),
        datasets = files.len(),
        "Discovered datasets"
    );

    let output = export_location(config, files.len())?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut report = Accumulator::new(config.report_mode);
    let mut result = BatchResult::default();

    for path in &files {
        if cancel.load(Ordering::Relaxed) {
            warn!("Cancelled, skipping remaining datasets");
            result.halted = true;
            break;
        }
        let file_name = dataset_name(path);
        let file_span = info_span!("dataset", file = %file_name);
        let _file_guard = file_span.enter();

        match process_file(path, &file_name, config, ctx, &mut rng, &mut report, &output) {
            Ok(file) => result.files.push(file),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "Dataset failed");
                result.files.push(FileResult {
                    file_name,
                    source: path.clone(),
                    rows: 0,
                    stats: None,
                    missing: 0,
                    output: None,
                    error: Some(format!("{error:#}")),
                });
                if config.fail_fast {
                    result.halted = true;
                    break;
                }
            }
        }
    }

    if config.dry_run {
        debug!("Dry run, report not written");
    } else {
        result.report = Some(report.finalize(&config.report_dir)?);
    }

    let cache = ctx.similarity().stats();
    info!(
        datasets = result.files.len(),
        failed = result.failed(),
        missing = result.total_missing(),
        cache_hits = cache.hits,
        cache_misses = cache.misses,
        "Batch complete"
    );
    Ok(result)
}

fn process_file(
    path: &Path,
    file_name: &str,
    config: &BatchConfig,
    ctx: &StandardizationContext,
    rng: &mut StdRng,
    report: &mut Accumulator,
    output: &Path,
) -> Result<FileResult> {
    let start = Instant::now();
    let df = read_dataset(path).with_context(|| format!("read {}", path.display()))?;
    let rows = df.height();

    let outcome = standardize_dataset(df, ctx, rng)
        .with_context(|| format!("standardize {file_name}"))?;
    let mut frame = outcome.frame;

    let missing: usize = final_columns(&frame)?.into_iter().map(count_missing).sum();

    let written = if config.dry_run {
        None
    } else {
        Some(
            export_dataset(&mut frame, output, config.format)
                .with_context(|| format!("export {file_name}"))?,
        )
    };
    report.add(&frame, file_name)?;

    info!(
        rows,
        missing,
        duration_ms = start.elapsed().as_millis(),
        "Dataset standardized"
    );
    if missing > 0 {
        warn!(missing, "Unresolved country values left in final columns");
    }

    Ok(FileResult {
        file_name: file_name.to_string(),
        source: path.to_path_buf(),
        rows,
        stats: Some(outcome.stats),
        missing,
        output: written,
        error: None,
    })
}

/// The output path is a file only for a single dataset with a file-like path.
fn export_location(config: &BatchConfig, datasets: usize) -> Result<PathBuf> {
    let output = &config.output;
    let as_file = datasets == 1 && is_file_path(output);
    if !as_file && !config.dry_run {
        fs::create_dir_all(output)
            .with_context(|| format!("create output directory {}", output.display()))?;
    }
    Ok(output.clone())
}

fn dataset_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
