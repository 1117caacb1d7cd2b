//! # Outbound Ports
//!
//! Traits for external dependencies: the wallet identity provider, the
//! FHE session and its encrypt/decrypt services, the ledger contract
//! surface, and the geolocation provider.

use crate::domain::{
    Address, CiphertextHandle, FheStatus, GeoPoint, HuntError, LedgerError, Treasure, TreasureId,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Wallet/identity provider - outbound port.
pub trait WalletProvider: Send + Sync {
    /// Address of the connected identity, if any.
    fn address(&self) -> Option<Address>;

    /// Whether an identity is connected. Disconnection is a hard
    /// precondition failure for every mutating flow.
    fn is_connected(&self) -> bool {
        self.address().is_some()
    }
}

/// FHE session service - outbound port.
#[async_trait]
pub trait FheSession: Send + Sync {
    /// Initialize the session. Idempotent, async, fallible.
    async fn initialize(&self) -> Result<(), HuntError>;

    /// Current session state.
    fn status(&self) -> FheStatus;
}

/// Ciphertext plus the proof that it encrypts a well-formed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedLocation {
    /// Opaque ciphertext bytes.
    pub ciphertext: Vec<u8>,
    /// Zero-knowledge input proof accompanying the ciphertext.
    pub proof: Vec<u8>,
}

/// Encrypt service - outbound port.
///
/// A pure (stateless per call) cryptographic transform delegated to an
/// external service; the core never inspects ciphertext structure.
#[async_trait]
pub trait LocationEncryptor: Send + Sync {
    /// Encrypt a non-negative location code under the given addressing
    /// context.
    async fn encrypt(
        &self,
        contract: &Address,
        user: &Address,
        value: u64,
    ) -> Result<EncryptedLocation, HuntError>;
}

/// Result of the decryption oracle's proof computation: clear values
/// keyed by handle, plus the encoded form and proof to submit on-chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecryptionShare {
    /// Clear values keyed by the requested handles.
    pub clear_values: HashMap<CiphertextHandle, u64>,
    /// Clear values encoded for on-chain submission.
    pub encoded_values: Vec<u8>,
    /// Decryption proof for on-chain verification.
    pub proof: Vec<u8>,
}

/// Decrypt/verify service - outbound port.
///
/// First leg of the two-leg verification: computes clear values and a
/// proof. The on-chain submission is a separate, explicitly awaited leg
/// through [`TreasureLedger::verify_decryption`].
#[async_trait]
pub trait DecryptionOracle: Send + Sync {
    /// Request verifiable decryption of the given handles.
    async fn decrypt_with_proof(
        &self,
        handles: &[CiphertextHandle],
        contract: &Address,
    ) -> Result<DecryptionShare, HuntError>;
}

/// Everything the ledger needs to durably store a new record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasureSubmission {
    /// Client-assigned record id.
    pub id: TreasureId,
    /// Public display name.
    pub name: String,
    /// Encrypted location ciphertext.
    pub ciphertext: Vec<u8>,
    /// Input proof for the ciphertext.
    pub proof: Vec<u8>,
    /// Public reward amount.
    pub reward: u64,
    /// Secondary public numeric field.
    pub secondary_value: u64,
    /// Public hint text.
    pub hint: String,
    /// Submitting identity.
    pub creator: Address,
}

/// Ledger contract surface - outbound port.
///
/// Write calls resolve only once the transaction is confirmed; the
/// orchestrator treats an `Ok` as durable.
#[async_trait]
pub trait TreasureLedger: Send + Sync {
    /// All record ids currently on the ledger.
    async fn list_ids(&self) -> Result<Vec<TreasureId>, LedgerError>;

    /// Snapshot of one record.
    async fn get_treasure(&self, id: &str) -> Result<Treasure, LedgerError>;

    /// Opaque handle to a record's location ciphertext.
    async fn get_encrypted_handle(&self, id: &str) -> Result<CiphertextHandle, LedgerError>;

    /// Submit a new record and await confirmation. Not idempotent:
    /// a duplicate id is rejected with [`LedgerError::DuplicateId`].
    async fn create_treasure(&self, submission: TreasureSubmission) -> Result<(), LedgerError>;

    /// Submit a decryption verification and await confirmation.
    ///
    /// Safe to attempt for an already-verified record; the ledger
    /// answers with [`LedgerError::AlreadyVerified`] in that case.
    async fn verify_decryption(
        &self,
        id: &str,
        encoded_values: &[u8],
        proof: &[u8],
    ) -> Result<(), LedgerError>;

    /// Whether the contract reports itself available.
    async fn is_available(&self) -> Result<bool, LedgerError>;

    /// Address of the contract, used as encryption context.
    fn contract_address(&self) -> Address;
}

/// Geolocation provider - outbound port.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// One-shot position request; fails on denied permission or an
    /// unavailable positioning service.
    async fn current_position(&self) -> Result<GeoPoint, HuntError>;
}
