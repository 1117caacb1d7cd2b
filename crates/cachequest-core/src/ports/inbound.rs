//! # Inbound Ports
//!
//! API trait defining what the treasure-hunt orchestrator can do.

use crate::domain::{
    GeoPoint, HuntError, HuntStats, TransactionStatus, Treasure, TreasureId,
};
use async_trait::async_trait;

/// Raw form input for the create-flow.
///
/// Numeric fields arrive as free text; parse failures (fractional or
/// negative input) clamp to 0 rather than aborting the flow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateTreasureRequest {
    /// Public display name.
    pub name: String,
    /// Location code to encrypt, as entered (non-negative integer).
    pub location_code: String,
    /// Public hint text.
    pub hint: String,
    /// Public reward amount, as entered.
    pub reward: String,
}

/// Treasure-hunt orchestrator API - inbound port.
#[async_trait]
pub trait TreasureHuntApi: Send + Sync {
    /// Initialize the FHE session if it is not already initialized.
    ///
    /// Idempotent; repeated calls while ready are no-ops. Failure blocks
    /// all mutating flows until the caller retries.
    async fn ensure_initialized(&self) -> Result<(), HuntError>;

    /// Create-flow: encrypt the location client-side, submit the record
    /// with its proof, await confirmation, then reload.
    ///
    /// Returns the flow-scoped id assigned to the new record. Aborts
    /// before any ledger write when encryption fails.
    async fn create_treasure(&self, request: CreateTreasureRequest)
        -> Result<TreasureId, HuntError>;

    /// Reload-flow: re-fetch all records and replace the in-memory set
    /// atomically. A single record's fetch failure is logged and that
    /// record skipped. A quiet no-op while no wallet is connected.
    async fn reload(&self) -> Result<(), HuntError>;

    /// Decrypt-flow: request a verifiable decryption of one record.
    ///
    /// Returns `Some(clear_value)` when a value was obtained (either the
    /// ledger-authoritative one or a freshly verified one), or `None`
    /// when a concurrent verification won the race and the reloaded
    /// record should be consulted instead.
    async fn decrypt_location(&self, id: &str) -> Result<Option<u64>, HuntError>;

    /// Check that the ledger contract reports itself available.
    async fn check_availability(&self) -> Result<bool, HuntError>;

    /// Acquire the caller's position, once per session.
    async fn acquire_location(&self) -> Result<GeoPoint, HuntError>;

    /// Distance-flow: pure computation from the session position to a
    /// revealed location code.
    fn distance_to_treasure(&self, location_code: u64) -> Result<f64, HuntError>;

    /// Open the detail view for a record, taking ownership of the
    /// session-local provisional value and distance.
    fn open_detail(&self, id: &str) -> Result<(), HuntError>;

    /// Close the detail view, releasing its session-local state.
    fn close_detail(&self);

    /// Current snapshot of the record set.
    fn treasures(&self) -> Vec<Treasure>;

    /// Dashboard statistics for the current snapshot.
    fn stats(&self) -> HuntStats;

    /// Bounded session activity history, newest first.
    fn history(&self) -> Vec<String>;

    /// Latest transaction status notification, if still visible.
    fn status(&self) -> Option<TransactionStatus>;
}
