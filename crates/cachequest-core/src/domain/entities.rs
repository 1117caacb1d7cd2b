//! # Domain Entities
//!
//! The treasure record and the session statistics derived from it.

use super::value_objects::{Address, CiphertextHandle, TreasureId, VerificationState};
use serde::{Deserialize, Serialize};

/// An encrypted-location record ("treasure") as read from the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Treasure {
    /// Unique identifier, assigned client-side at creation time.
    pub id: TreasureId,
    /// Public display name.
    pub name: String,
    /// Public free-text hint for hunters.
    pub hint: String,
    /// Opaque reference to the on-ledger ciphertext of the location code.
    pub encrypted_location: CiphertextHandle,
    /// Public reward amount.
    pub reward: u64,
    /// Secondary public numeric field.
    pub secondary_value: u64,
    /// Address of the submitting identity; immutable once set.
    pub creator: Address,
    /// Ledger-assigned creation timestamp (seconds since epoch).
    pub created_at: u64,
    /// Flips exactly once, false to true, on successful on-chain
    /// decryption verification.
    pub is_verified: bool,
    /// Present only when verified; once set, immutable and authoritative.
    pub decrypted_value: Option<u64>,
}

impl Treasure {
    /// Derive the verification state of this record.
    pub fn verification_state(&self) -> VerificationState {
        match (self.is_verified, self.decrypted_value) {
            (true, Some(v)) => VerificationState::Verified(v),
            _ => VerificationState::Unverified,
        }
    }

    /// Resolve the revealed location code, preferring the
    /// ledger-authoritative value over a provisional session-local one.
    pub fn revealed_value(&self, provisional: Option<u64>) -> Option<u64> {
        match self.verification_state() {
            VerificationState::Verified(v) => Some(v),
            VerificationState::Unverified => provisional,
        }
    }

    /// Check whether the record was created within the given window.
    pub fn is_recent(&self, now_secs: u64, window_secs: u64) -> bool {
        now_secs.saturating_sub(self.created_at) < window_secs
    }
}

/// Dashboard statistics over the in-memory record set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntStats {
    /// Total number of treasures.
    pub total: usize,
    /// Number of treasures with a verified location.
    pub verified: usize,
    /// Number of treasures created within the recent window.
    pub recent: usize,
}
