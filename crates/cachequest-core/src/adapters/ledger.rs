//! # In-Memory Ledger
//!
//! Contract-surface stand-in holding the record set, assigning
//! timestamps, and enforcing the write rules a deployed contract would:
//! duplicate ids rejected, a second verification for an already-verified
//! record rejected with a structured code.

use super::fhe::ciphertext_handle;
use crate::domain::{Address, CiphertextHandle, LedgerError, Treasure, TreasureId};
use crate::ports::outbound::{TreasureLedger, TreasureSubmission};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

struct StoredTreasure {
    record: Treasure,
    handle: CiphertextHandle,
}

/// In-memory implementation of the ledger contract surface.
pub struct InMemoryLedger {
    contract: Address,
    order: RwLock<Vec<TreasureId>>,
    records: RwLock<HashMap<TreasureId, StoredTreasure>>,
    now_secs: RwLock<u64>,
    available: RwLock<bool>,
    unreachable: RwLock<HashSet<TreasureId>>,
    reject_next_write: RwLock<Option<LedgerError>>,
    fail_listing: RwLock<bool>,
    fail_availability: RwLock<bool>,
}

impl InMemoryLedger {
    /// Create an empty ledger with the given chain time.
    pub fn new(now_secs: u64) -> Self {
        Self {
            contract: "0x5eCReTCaCheC0nTracT000000000000000000000".to_string(),
            order: RwLock::new(Vec::new()),
            records: RwLock::new(HashMap::new()),
            now_secs: RwLock::new(now_secs),
            available: RwLock::new(true),
            unreachable: RwLock::new(HashSet::new()),
            reject_next_write: RwLock::new(None),
            fail_listing: RwLock::new(false),
            fail_availability: RwLock::new(false),
        }
    }

    /// Advance the chain clock.
    pub fn set_now(&self, now_secs: u64) {
        *self.now_secs.write() = now_secs;
    }

    /// Toggle the contract's availability flag.
    pub fn set_available(&self, available: bool) {
        *self.available.write() = available;
    }

    /// Make fetches for one record fail with a network error, leaving
    /// the rest of the set readable.
    pub fn set_unreachable(&self, id: &str, unreachable: bool) {
        if unreachable {
            self.unreachable.write().insert(id.to_string());
        } else {
            self.unreachable.write().remove(id);
        }
    }

    /// Reject the next write call with the given error.
    pub fn reject_next_write(&self, error: LedgerError) {
        *self.reject_next_write.write() = Some(error);
    }

    /// Make `list_ids` fail.
    pub fn set_fail_listing(&self, fail: bool) {
        *self.fail_listing.write() = fail;
    }

    /// Make `is_available` fail.
    pub fn set_fail_availability(&self, fail: bool) {
        *self.fail_availability.write() = fail;
    }

    fn take_write_rejection(&self) -> Option<LedgerError> {
        self.reject_next_write.write().take()
    }

    fn decode_clear_value(encoded: &[u8]) -> Result<u64, LedgerError> {
        let bytes: [u8; 8] = encoded
            .get(..8)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| LedgerError::Network("malformed clear-value encoding".to_string()))?;
        Ok(u64::from_be_bytes(bytes))
    }
}

#[async_trait]
impl TreasureLedger for InMemoryLedger {
    async fn list_ids(&self) -> Result<Vec<TreasureId>, LedgerError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if *self.fail_listing.read() {
            return Err(LedgerError::Network("id listing failed".to_string()));
        }
        Ok(self.order.read().clone())
    }

    async fn get_treasure(&self, id: &str) -> Result<Treasure, LedgerError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if self.unreachable.read().contains(id) {
            return Err(LedgerError::Network(format!(
                "record fetch failed for {id}"
            )));
        }
        self.records
            .read()
            .get(id)
            .map(|stored| stored.record.clone())
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    async fn get_encrypted_handle(&self, id: &str) -> Result<CiphertextHandle, LedgerError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        self.records
            .read()
            .get(id)
            .map(|stored| stored.handle.clone())
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    async fn create_treasure(&self, submission: TreasureSubmission) -> Result<(), LedgerError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if !*self.available.read() {
            return Err(LedgerError::Unavailable);
        }
        if let Some(rejection) = self.take_write_rejection() {
            return Err(rejection);
        }
        if submission.proof.is_empty() {
            return Err(LedgerError::InvalidProof);
        }

        let id = submission.id.clone();
        let mut records = self.records.write();
        if records.contains_key(&id) {
            return Err(LedgerError::DuplicateId(id));
        }

        let handle = ciphertext_handle(&submission.ciphertext);
        let record = Treasure {
            id: id.clone(),
            name: submission.name,
            hint: submission.hint,
            encrypted_location: handle.clone(),
            reward: submission.reward,
            secondary_value: submission.secondary_value,
            creator: submission.creator,
            created_at: *self.now_secs.read(),
            is_verified: false,
            decrypted_value: None,
        };

        info!(%id, "[ledger] treasure created");
        records.insert(id.clone(), StoredTreasure { record, handle });
        drop(records);
        self.order.write().push(id);

        Ok(())
    }

    async fn verify_decryption(
        &self,
        id: &str,
        encoded_values: &[u8],
        proof: &[u8],
    ) -> Result<(), LedgerError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if !*self.available.read() {
            return Err(LedgerError::Unavailable);
        }
        if let Some(rejection) = self.take_write_rejection() {
            return Err(rejection);
        }
        if proof.is_empty() {
            return Err(LedgerError::InvalidProof);
        }

        let mut records = self.records.write();
        let stored = records
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        if stored.record.is_verified {
            debug!(%id, "[ledger] verification rejected: already verified");
            return Err(LedgerError::AlreadyVerified(id.to_string()));
        }

        let clear_value = Self::decode_clear_value(encoded_values)?;
        stored.record.is_verified = true;
        stored.record.decrypted_value = Some(clear_value);
        info!(%id, clear_value, "[ledger] decryption verified");

        Ok(())
    }

    async fn is_available(&self) -> Result<bool, LedgerError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if *self.fail_availability.read() {
            return Err(LedgerError::Network("availability probe failed".to_string()));
        }
        Ok(*self.available.read())
    }

    fn contract_address(&self) -> Address {
        self.contract.clone()
    }
}
