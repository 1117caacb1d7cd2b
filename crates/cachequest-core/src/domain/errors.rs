//! # Domain Errors
//!
//! Error taxonomies for the lifecycle flows and the ledger contract
//! surface. Every flow-level failure is caught at the flow boundary and
//! converted into a status notification; nothing here is fatal to the
//! process.

use super::value_objects::TreasureId;
use thiserror::Error;

/// Flow-level errors surfaced by the orchestrator.
#[derive(Debug, Error)]
pub enum HuntError {
    /// A mutating flow was invoked without an active wallet identity.
    #[error("no wallet connected")]
    NotConnected,

    /// FHE session setup failed; blocks mutating flows until retried.
    #[error("FHE session initialization failed: {0}")]
    InitializationFailed(String),

    /// Encryption service error; the create-flow aborts before any
    /// ledger write.
    #[error("location encryption failed: {0}")]
    EncryptionFailed(String),

    /// Ledger write rejected.
    #[error("submission rejected (user initiated: {user_initiated})")]
    SubmissionRejected {
        /// True when the signing identity declined the transaction.
        user_initiated: bool,
    },

    /// Decryption/verification round-trip failed; no automatic retry.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// The ledger could not be reached or listed.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// Geolocation was denied or is not available.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    /// No record with the given id exists.
    #[error("treasure not found: {0}")]
    TreasureNotFound(TreasureId),

    /// A flow of the same kind is already in flight.
    #[error("a {0} flow is already in flight")]
    FlowInFlight(&'static str),
}

/// Structured error codes of the ledger contract surface.
///
/// A production adapter owns the mapping from provider error messages to
/// these codes; the core never inspects message text.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record with this id already exists; submissions are not
    /// idempotent and must not be retried with the same id.
    #[error("duplicate treasure id: {0}")]
    DuplicateId(TreasureId),

    /// No record with this id.
    #[error("treasure not found: {0}")]
    NotFound(TreasureId),

    /// A verification for this record has already landed. Benign race
    /// outcome, not a failure.
    #[error("treasure already verified: {0}")]
    AlreadyVerified(TreasureId),

    /// The signing identity declined the transaction.
    #[error("user rejected transaction")]
    UserRejected,

    /// The contract reports itself unavailable.
    #[error("contract unavailable")]
    Unavailable,

    /// The submitted decryption proof was rejected.
    #[error("invalid decryption proof")]
    InvalidProof,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),
}
