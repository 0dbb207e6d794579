//! TOML configuration and its merge with command-line and environment values.
//!
//! Precedence, highest first: command-line flag, environment variable, config
//! file, built-in default. Clap already folds flags and environment variables
//! into [`StandardizeOverrides`], so this module only layers those over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use iso_map::StandardizeOptions;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "ISO3166_CONFIG";

/// Contents of an `iso3166.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub standardize: StandardizeOptions,
    pub report: ReportSection,
}

/// The `[report]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSection {
    /// List offending rows instead of per-column counts.
    pub detailed: bool,
    /// Where reports are written.
    pub dir: Option<PathBuf>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardizeOverrides {
    pub fuzzy_threshold: Option<u8>,
    pub sample_size: Option<usize>,
    pub auto_find_retry: Option<usize>,
    /// `--slow`; only ever turns fast mode off.
    pub slow: bool,
}

impl ConfigFile {
    /// Parse TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse config")
    }

    /// Read `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// File options with `overrides` applied, validated.
    pub fn standardize_options(&self, overrides: StandardizeOverrides) -> Result<StandardizeOptions> {
        let mut options = self.standardize.clone();
        if let Some(threshold) = overrides.fuzzy_threshold {
            options.fuzzy_threshold = threshold;
        }
        if let Some(sample_size) = overrides.sample_size {
            options.sample_size = sample_size;
        }
        if let Some(retries) = overrides.auto_find_retry {
            options.auto_find_retry = retries;
        }
        if overrides.slow {
            options.fast_mode = false;
        }
        options.validate().context("invalid standardization options")?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ConfigFile::parse("").unwrap();
        assert_eq!(config, ConfigFile::default());
        assert!(config.standardize.fast_mode);
    }

    #[test]
    fn test_partial_tables() {
        let config = ConfigFile::parse(
            "[standardize]\nfuzzy_threshold = 85\nfast_mode = false\n\n[report]\ndetailed = true\ndir = \"out/reports\"\n",
        )
        .unwrap();
        assert_eq!(config.standardize.fuzzy_threshold, 85);
        assert_eq!(config.standardize.sample_size, iso_map::DEFAULT_SAMPLE_SIZE);
        assert!(!config.standardize.fast_mode);
        assert!(config.report.detailed);
        assert_eq!(config.report.dir, Some(PathBuf::from("out/reports")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFile::parse("[standardise]\nfuzzy_threshold = 10\n").is_err());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let config = ConfigFile::parse("[standardize]\nfuzzy_threshold = 85\nsample_size = 4\n").unwrap();
        let options = config
            .standardize_options(StandardizeOverrides {
                fuzzy_threshold: Some(60),
                slow: true,
                ..StandardizeOverrides::default()
            })
            .unwrap();
        assert_eq!(options.fuzzy_threshold, 60);
        assert_eq!(options.sample_size, 4);
        assert!(!options.fast_mode);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let overrides = StandardizeOverrides {
            sample_size: Some(0),
            ..StandardizeOverrides::default()
        };
        assert!(ConfigFile::default().standardize_options(overrides).is_err());
    }

    #[test]
    fn test_missing_file_errors() {
        let err = ConfigFile::load(Some(Path::new("/no/such/iso3166.toml"))).unwrap_err();
        assert!(err.to_string().contains("read config"));
    }
}
