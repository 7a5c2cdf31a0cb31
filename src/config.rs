// Configuration and fixed heuristic constants

use std::path::PathBuf;

/// A message seen more than this many times is classified as frequent
pub const FREQUENT_THRESHOLD: usize = 3;

/// Confidence of a heuristic (source-scan) suggestion
pub const HEURISTIC_CONFIDENCE: f64 = 0.9;

/// Confidence of a suggestion located by an external compiler diagnostic
pub const EXTERNAL_CONFIDENCE: f64 = 0.95;

/// Default on-disk diagnostic log
pub const DEFAULT_LOG_PATH: &str = "error_log.txt";

/// Default on-disk diagnostic history
pub const DEFAULT_HISTORY_PATH: &str = "error_history.json";

/// Locations of the persisted stores and the analysis threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_path: PathBuf,
    pub history_path: PathBuf,
    pub frequent_threshold: usize,
}

impl Config {
    pub fn new() -> Self {
        Config {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            frequent_threshold: FREQUENT_THRESHOLD,
        }
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.frequent_threshold = threshold;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
