//! # Hunt Configuration
//!
//! Configuration for the treasure-hunt orchestrator.

use crate::domain::{DEFAULT_HISTORY_CAPACITY, RECENT_WINDOW_SECS};
use serde::{Deserialize, Serialize};

/// Orchestrator configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Milliseconds before a success status auto-clears.
    pub success_clear_ms: u64,

    /// Milliseconds before an error status auto-clears.
    pub error_clear_ms: u64,

    /// Number of activity history entries to retain.
    pub history_capacity: usize,

    /// Window for the "recent treasures" statistic, in seconds.
    pub recent_window_secs: u64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            success_clear_ms: 2_000,
            error_clear_ms: 3_000,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            recent_window_secs: RECENT_WINDOW_SECS,
        }
    }
}

impl HuntConfig {
    /// Create a config for testing (smaller windows, same status
    /// timings since those are a tested contract).
    pub fn for_testing() -> Self {
        Self {
            history_capacity: 5,
            recent_window_secs: 3_600,
            ..Self::default()
        }
    }
}
