//! Revocation ledger cleanup schedule

use serde::{Deserialize, Serialize};

/// Once a day
pub const DEFAULT_CLEANUP_INTERVAL_SECONDS: u64 = 24 * 60 * 60;

/// Longest accepted interval between purges: 30 days
pub const MAX_CLEANUP_INTERVAL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Configuration for the background purge of expired revocation records
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether the background task is started at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between purge runs
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,

    /// Run a purge immediately at startup instead of waiting one interval
    #[serde(default)]
    pub run_on_start: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_seconds: default_interval(),
            run_on_start: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_interval() -> u64 {
    DEFAULT_CLEANUP_INTERVAL_SECONDS
}
