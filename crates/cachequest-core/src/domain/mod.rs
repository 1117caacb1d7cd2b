//! # Domain Layer
//!
//! Core types for the encrypted-treasure lifecycle: entities, value
//! objects, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::{HuntStats, Treasure};
pub use errors::{HuntError, LedgerError};
pub use invariants::{
    invariant_monotonic_verification, invariant_unique_ids, invariant_verified_value_present,
    DEFAULT_HISTORY_CAPACITY, RECENT_WINDOW_SECS,
};
pub use value_objects::{
    Address, CiphertextHandle, FheStatus, GeoPoint, StatusKind, TransactionStatus, TreasureId,
    VerificationState,
};
