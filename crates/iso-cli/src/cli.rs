//! CLI argument definitions for the `iso3166` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use iso_standards::ReferenceAttribute;

#[derive(Parser)]
#[command(
    name = "iso3166",
    version,
    about = "Standardize country names and codes to ISO 3166",
    long_about = "Find the country columns of tabular datasets and append canonical\n\
                  ISO 3166 names and alpha-2 codes.\n\n\
                  Reads CSV, JSON, Parquet, fixed-width text and spreadsheets; writes\n\
                  Parquet or CSV plus a report of values that could not be resolved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw cell values in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH", env = "ISO3166_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Standardize every dataset in a file or folder.
    Standardize(StandardizeArgs),

    /// Resolve individual values against the reference table.
    Lookup(LookupArgs),

    /// List the loaded reference table.
    Reference,
}

#[derive(Parser)]
pub struct StandardizeArgs {
    /// A dataset file or a folder of datasets.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory, or file path for a single dataset (default: <INPUT>/standardized).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format of the exported datasets.
    #[arg(long = "format", value_enum, default_value = "parquet")]
    pub format: OutputFormatArg,

    /// Directory for the error report (default: <OUTPUT>/reports).
    #[arg(long = "report-dir", value_name = "DIR", env = "ISO3166_REPORT_DIR")]
    pub report_dir: Option<PathBuf>,

    /// List every unresolved row instead of per-column counts.
    #[arg(long = "detailed-report")]
    pub detailed_report: bool,

    /// Also scan the counterpart naming attribute when fuzzy matching.
    ///
    /// Slower, but catches official names in a common-name column and the
    /// reverse.
    #[arg(long = "slow")]
    pub slow: bool,

    /// Minimum similarity, in percent, for a fuzzy match.
    #[arg(
        long = "fuzzy-threshold",
        value_name = "PCT",
        env = "ISO3166_FUZZY_THRESHOLD",
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub fuzzy_threshold: Option<u8>,

    /// Cells sampled per column when detecting country columns.
    #[arg(long = "sample-size", value_name = "N", env = "ISO3166_SAMPLE_SIZE")]
    pub sample_size: Option<usize>,

    /// Detection attempts per dataset.
    #[arg(long = "auto-find-retry", value_name = "N", env = "ISO3166_AUTO_FIND_RETRY")]
    pub auto_find_retry: Option<usize>,

    /// Seed column sampling for reproducible detection.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Standardize and summarize without writing exports or reports.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Stop at the first dataset that fails.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Exit with status 2 when any cell stays unresolved.
    #[arg(long = "fail-on-missing")]
    pub fail_on_missing: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Values to resolve.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,

    /// Reference attribute the values are compared with.
    #[arg(long = "attribute", value_name = "ATTR", default_value = "name", value_parser = parse_attribute)]
    pub attribute: ReferenceAttribute,

    /// Minimum similarity, in percent, for a fuzzy match.
    #[arg(
        long = "fuzzy-threshold",
        value_name = "PCT",
        env = "ISO3166_FUZZY_THRESHOLD",
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub fuzzy_threshold: Option<u8>,

    /// Also scan the counterpart naming attribute.
    #[arg(long = "slow")]
    pub slow: bool,

    /// Print results as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

fn parse_attribute(value: &str) -> Result<ReferenceAttribute, String> {
    value.parse().map_err(|error| format!("{error}"))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Parquet,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
