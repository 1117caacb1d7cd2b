//! # Mock FHE Gateway
//!
//! In-memory stand-in for the FHEVM session, encrypt, and decrypt
//! services. Ciphertexts are deterministic digests; the gateway keeps a
//! private handle-to-value table playing the role of the decryption
//! network.

use crate::domain::{Address, CiphertextHandle, FheStatus, HuntError};
use crate::ports::outbound::{
    DecryptionOracle, DecryptionShare, EncryptedLocation, FheSession, LocationEncryptor,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Derive the on-ledger handle for a ciphertext.
///
/// Both the gateway and the in-memory ledger derive handles the same way
/// so that a handle fetched from the ledger resolves in the gateway's
/// table without any side channel.
pub fn ciphertext_handle(ciphertext: &[u8]) -> CiphertextHandle {
    hex::encode(Sha256::digest(ciphertext))
}

/// Mock FHE gateway implementing session, encryptor, and oracle ports.
pub struct MockFheGateway {
    status: RwLock<FheStatus>,
    secrets: RwLock<HashMap<CiphertextHandle, u64>>,
    nonce: AtomicUsize,
    encrypt_calls: AtomicUsize,
    decrypt_calls: AtomicUsize,
    fail_init: RwLock<bool>,
    fail_encrypt: RwLock<bool>,
    fail_decrypt: RwLock<bool>,
}

impl MockFheGateway {
    /// Create a gateway in the uninitialized state.
    pub fn new() -> Self {
        Self {
            status: RwLock::new(FheStatus::Uninitialized),
            secrets: RwLock::new(HashMap::new()),
            nonce: AtomicUsize::new(0),
            encrypt_calls: AtomicUsize::new(0),
            decrypt_calls: AtomicUsize::new(0),
            fail_init: RwLock::new(false),
            fail_encrypt: RwLock::new(false),
            fail_decrypt: RwLock::new(false),
        }
    }

    /// Make the next initialization attempts fail.
    pub fn set_fail_init(&self, fail: bool) {
        *self.fail_init.write() = fail;
    }

    /// Make encrypt calls fail.
    pub fn set_fail_encrypt(&self, fail: bool) {
        *self.fail_encrypt.write() = fail;
    }

    /// Make decrypt calls fail.
    pub fn set_fail_decrypt(&self, fail: bool) {
        *self.fail_decrypt.write() = fail;
    }

    /// Number of encrypt round-trips issued so far.
    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.load(Ordering::SeqCst)
    }

    /// Number of decryption round-trips issued so far.
    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockFheGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FheSession for MockFheGateway {
    async fn initialize(&self) -> Result<(), HuntError> {
        if *self.status.read() == FheStatus::Ready {
            return Ok(());
        }

        *self.status.write() = FheStatus::Initializing;
        // Network suspension point.
        tokio::task::yield_now().await;

        if *self.fail_init.read() {
            *self.status.write() = FheStatus::Failed;
            return Err(HuntError::InitializationFailed(
                "gateway key fetch failed".to_string(),
            ));
        }

        *self.status.write() = FheStatus::Ready;
        debug!("[fhe] session initialized");
        Ok(())
    }

    fn status(&self) -> FheStatus {
        *self.status.read()
    }
}

#[async_trait]
impl LocationEncryptor for MockFheGateway {
    async fn encrypt(
        &self,
        contract: &Address,
        user: &Address,
        value: u64,
    ) -> Result<EncryptedLocation, HuntError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if *self.fail_encrypt.read() {
            return Err(HuntError::EncryptionFailed(
                "encryption service unavailable".to_string(),
            ));
        }
        if self.status() != FheStatus::Ready {
            return Err(HuntError::EncryptionFailed(
                "FHE session not ready".to_string(),
            ));
        }

        self.encrypt_calls.fetch_add(1, Ordering::SeqCst);
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);

        let mut hasher = Sha256::new();
        hasher.update(contract.as_bytes());
        hasher.update(user.as_bytes());
        hasher.update(value.to_be_bytes());
        hasher.update(nonce.to_be_bytes());
        let ciphertext = hasher.finalize().to_vec();

        let handle = ciphertext_handle(&ciphertext);
        self.secrets.write().insert(handle.clone(), value);
        debug!(%handle, "[fhe] encrypted location code");

        Ok(EncryptedLocation {
            ciphertext,
            proof: Uuid::new_v4().into_bytes().to_vec(),
        })
    }
}

#[async_trait]
impl DecryptionOracle for MockFheGateway {
    async fn decrypt_with_proof(
        &self,
        handles: &[CiphertextHandle],
        _contract: &Address,
    ) -> Result<DecryptionShare, HuntError> {
        // Network suspension point.
        tokio::task::yield_now().await;

        if *self.fail_decrypt.read() {
            return Err(HuntError::DecryptionFailed(
                "oracle unreachable".to_string(),
            ));
        }
        if self.status() != FheStatus::Ready {
            return Err(HuntError::DecryptionFailed(
                "FHE session not ready".to_string(),
            ));
        }

        self.decrypt_calls.fetch_add(1, Ordering::SeqCst);

        let secrets = self.secrets.read();
        let mut clear_values = HashMap::with_capacity(handles.len());
        let mut encoded_values = Vec::with_capacity(handles.len() * 8);
        for handle in handles {
            let value = secrets.get(handle).copied().ok_or_else(|| {
                HuntError::DecryptionFailed(format!("unknown ciphertext handle: {handle}"))
            })?;
            clear_values.insert(handle.clone(), value);
            encoded_values.extend_from_slice(&value.to_be_bytes());
        }

        Ok(DecryptionShare {
            clear_values,
            encoded_values,
            proof: Uuid::new_v4().into_bytes().to_vec(),
        })
    }
}
