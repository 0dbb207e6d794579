//! ISO 3166 country standardizer CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use iso_cli::config::ConfigFile;
use iso_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_lookup, run_reference, run_standardize};
use crate::summary::print_summary;

/// Exit status when `--fail-on-missing` is set and cells stayed unresolved.
const EXIT_MISSING: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match ConfigFile::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            error!(error = %format!("{error:#}"), "Configuration rejected");
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Standardize(args) => match run_standardize(&args, &config) {
            Ok(result) => {
                print_summary(&result);
                if result.has_errors() {
                    1
                } else if args.fail_on_missing && result.total_missing() > 0 {
                    EXIT_MISSING
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Lookup(args) => match run_lookup(&args, &config) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Reference => match run_reference() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
