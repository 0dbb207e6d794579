//! Configuration options for standardization.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Default fuzzy acceptance threshold, in percent.
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;
/// Default number of cells sampled per column during detection.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;
/// Default number of detection attempts.
pub const DEFAULT_AUTO_FIND_RETRY: usize = 3;
/// Default similarity cache capacity (entries).
pub const DEFAULT_CACHE_CAPACITY: usize = 65_536;

/// Which reference projections the fuzzy path scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Only the detected attribute.
    #[default]
    Fast,
    /// The detected attribute and its naming counterpart.
    Slow,
}

/// Options controlling detection and matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardizeOptions {
    /// Minimum similarity, in percent, for a fuzzy candidate to be accepted.
    pub fuzzy_threshold: u8,

    /// Cells sampled per column in each detection attempt.
    pub sample_size: usize,

    /// Detection attempts before giving up on a dataset.
    pub auto_find_retry: usize,

    /// Scan only the detected attribute in the primary pass.
    pub fast_mode: bool,

    /// Similarity cache entries; `0` means unbounded.
    pub cache_capacity: usize,
}

impl Default for StandardizeOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            sample_size: DEFAULT_SAMPLE_SIZE,
            auto_find_retry: DEFAULT_AUTO_FIND_RETRY,
            fast_mode: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl StandardizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_auto_find_retry(mut self, retries: usize) -> Self {
        self.auto_find_retry = retries;
        self
    }

    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.fast_mode = mode == ScanMode::Fast;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn scan_mode(&self) -> ScanMode {
        if self.fast_mode {
            ScanMode::Fast
        } else {
            ScanMode::Slow
        }
    }

    /// Check ranges: threshold at most 100, sample size and retries at least 1.
    pub fn validate(&self) -> Result<()> {
        if self.fuzzy_threshold > 100 {
            return Err(MapError::InvalidOption {
                field: "fuzzy_threshold",
                message: format!("{} is above 100", self.fuzzy_threshold),
            });
        }
        if self.sample_size == 0 {
            return Err(MapError::InvalidOption {
                field: "sample_size",
                message: "must be at least 1".to_string(),
            });
        }
        if self.auto_find_retry == 0 {
            return Err(MapError::InvalidOption {
                field: "auto_find_retry",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
