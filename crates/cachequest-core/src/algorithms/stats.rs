//! # Dashboard Statistics
//!
//! Aggregates over the in-memory record set.

use crate::domain::{HuntStats, Treasure};

/// Compute dashboard statistics for the given snapshot.
pub fn hunt_stats(records: &[Treasure], now_secs: u64, recent_window_secs: u64) -> HuntStats {
    HuntStats {
        total: records.len(),
        verified: records.iter().filter(|t| t.is_verified).count(),
        recent: records
            .iter()
            .filter(|t| t.is_recent(now_secs, recent_window_secs))
            .count(),
    }
}
