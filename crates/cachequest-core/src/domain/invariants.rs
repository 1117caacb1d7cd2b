//! # Domain Invariants
//!
//! Business rules that must always hold over the record set.

use super::entities::Treasure;
use std::collections::HashSet;

/// Bounded length of the session activity history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Window for the "recent treasures" statistic (one week).
pub const RECENT_WINDOW_SECS: u64 = 7 * 24 * 60 * 60;

/// Invariant: verification is monotonic.
///
/// A record that was verified in the previous snapshot must never come
/// back unverified in the next one. The ledger guarantees this; a
/// violation means the reader is talking to an inconsistent source.
pub fn invariant_monotonic_verification(previous: &[Treasure], next: &[Treasure]) -> bool {
    previous
        .iter()
        .filter(|t| t.is_verified)
        .all(|prev| match next.iter().find(|n| n.id == prev.id) {
            Some(n) => n.is_verified,
            // A record missing from a partial reload is not a rollback.
            None => true,
        })
}

/// Invariant: record ids are globally unique within a snapshot.
pub fn invariant_unique_ids(records: &[Treasure]) -> bool {
    let mut seen = HashSet::with_capacity(records.len());
    records.iter().all(|t| seen.insert(t.id.as_str()))
}

/// Invariant: a verified record carries its authoritative clear value.
pub fn invariant_verified_value_present(record: &Treasure) -> bool {
    !record.is_verified || record.decrypted_value.is_some()
}
