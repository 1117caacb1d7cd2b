//! # Domain Value Objects
//!
//! Immutable value types for the treasure-hunt lifecycle.

use serde::{Deserialize, Serialize};

/// Ledger account address (hex string as supplied by the wallet provider).
pub type Address = String;

/// Client-assigned treasure identifier (`"treasure-" + creation millis`).
pub type TreasureId = String;

/// Opaque reference to a ciphertext stored on the ledger.
///
/// The handle is not interpretable client-side; only the decryption
/// oracle can resolve it to a clear value.
pub type CiphertextHandle = String;

/// FHE session lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FheStatus {
    /// Session not yet initialized.
    #[default]
    Uninitialized,
    /// Initialization in progress.
    Initializing,
    /// Session ready; encrypt/decrypt calls may be issued.
    Ready,
    /// Initialization failed; retryable by the caller.
    Failed,
}

/// Verification state of a treasure record.
///
/// The transition is monotonic: `Unverified` to `Verified` only, driven
/// solely by a successful on-chain decryption verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationState {
    /// Location only accessible via a client-requested decryption.
    Unverified,
    /// Ledger-authoritative clear value is available.
    Verified(u64),
}

impl VerificationState {
    /// Check whether the state carries an authoritative value.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
}

/// A geodetic position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Create a new position.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Kind of a transient transaction status notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    /// Operation in flight; never auto-clears.
    Pending,
    /// Operation completed; auto-clears after the success delay.
    Success,
    /// Operation failed; auto-clears after the error delay.
    Error,
}

/// Transient status notification emitted by every side-effecting flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    /// Status kind.
    pub kind: StatusKind,
    /// Human-readable message.
    pub message: String,
}

impl TransactionStatus {
    /// Create a new status notification.
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
