//! # Decryption Coordinator
//!
//! Per-invocation state machine for revealing one encrypted location:
//! CheckVerified, RequestHandle, VerifyDecryption (two awaited legs:
//! oracle proof, then on-chain submission), Reconcile.

use crate::domain::{HuntError, LedgerError};
use crate::ports::outbound::{DecryptionOracle, TreasureLedger};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one decryption round-trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecryptOutcome {
    /// The record was already verified; the ledger-authoritative value
    /// was returned without touching the decryption service.
    AlreadyVerified(u64),
    /// A fresh verification landed on-chain; the clear value comes from
    /// the oracle result keyed by the original handle.
    Verified(u64),
    /// A concurrent verification won the race. Success-equivalent: the
    /// caller should reload and consult the record instead.
    RaceLost,
}

impl DecryptOutcome {
    /// Clear value carried by this outcome, if any.
    pub fn clear_value(&self) -> Option<u64> {
        match self {
            Self::AlreadyVerified(v) | Self::Verified(v) => Some(*v),
            Self::RaceLost => None,
        }
    }
}

/// Coordinates the verifiable decryption of one encrypted handle.
pub struct DecryptionCoordinator {
    ledger: Arc<dyn TreasureLedger>,
    oracle: Arc<dyn DecryptionOracle>,
}

impl DecryptionCoordinator {
    /// Create a coordinator over the given ledger and oracle.
    pub fn new(ledger: Arc<dyn TreasureLedger>, oracle: Arc<dyn DecryptionOracle>) -> Self {
        Self { ledger, oracle }
    }

    /// Run the decryption state machine for one record.
    ///
    /// The retry/no-retry decision on failure belongs to the caller;
    /// nothing here retries automatically.
    pub async fn decrypt(&self, id: &str) -> Result<DecryptOutcome, HuntError> {
        // CheckVerified: prefer the ledger-authoritative value to avoid
        // a redundant proof generation.
        let record = self.ledger.get_treasure(id).await.map_err(|e| match e {
            LedgerError::NotFound(id) => HuntError::TreasureNotFound(id),
            other => HuntError::DecryptionFailed(other.to_string()),
        })?;
        if record.is_verified {
            let value = record.decrypted_value.ok_or_else(|| {
                HuntError::DecryptionFailed("verified record missing clear value".to_string())
            })?;
            debug!(%id, value, "decryption short-circuit: already verified");
            return Ok(DecryptOutcome::AlreadyVerified(value));
        }

        // RequestHandle.
        let handle = self
            .ledger
            .get_encrypted_handle(id)
            .await
            .map_err(|e| HuntError::DecryptionFailed(e.to_string()))?;

        // VerifyDecryption, leg one: proof computation.
        let contract = self.ledger.contract_address();
        let share = self
            .oracle
            .decrypt_with_proof(std::slice::from_ref(&handle), &contract)
            .await?;

        // VerifyDecryption, leg two: on-chain submission.
        match self
            .ledger
            .verify_decryption(id, &share.encoded_values, &share.proof)
            .await
        {
            Ok(()) => {}
            Err(LedgerError::AlreadyVerified(_)) => {
                info!(%id, "verification race lost; treating as resolved");
                return Ok(DecryptOutcome::RaceLost);
            }
            Err(LedgerError::UserRejected) => {
                return Err(HuntError::SubmissionRejected {
                    user_initiated: true,
                });
            }
            Err(other) => return Err(HuntError::DecryptionFailed(other.to_string())),
        }

        // Reconcile: extract the clear value keyed by the original handle.
        let value = share.clear_values.get(&handle).copied().ok_or_else(|| {
            HuntError::DecryptionFailed("oracle result missing requested handle".to_string())
        })?;
        info!(%id, value, "decryption verified on-chain");
        Ok(DecryptOutcome::Verified(value))
    }
}
