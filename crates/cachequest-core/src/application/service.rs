//! # Treasure Hunt Service
//!
//! Top-level lifecycle orchestrator sequencing the create, reload,
//! decrypt, and distance flows over the outbound ports. One logical
//! actor: flows interleave on the async scheduler, local state
//! transitions are synchronous and atomic between suspension points.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, warn};

use crate::algorithms::{distance_to_code, hunt_stats};
use crate::application::decryption::{DecryptOutcome, DecryptionCoordinator};
use crate::application::status::TransactionStatusReporter;
use crate::config::HuntConfig;
use crate::domain::{
    invariant_monotonic_verification, Address, FheStatus, GeoPoint, HuntError, HuntStats,
    LedgerError, TransactionStatus, Treasure, TreasureId,
};
use crate::ports::inbound::{CreateTreasureRequest, TreasureHuntApi};
use crate::ports::outbound::{
    DecryptionOracle, FheSession, GeolocationProvider, LocationEncryptor, TreasureLedger,
    TreasureSubmission, WalletProvider,
};

/// Outbound collaborators wired into the service.
pub struct HuntDependencies {
    /// Wallet/identity provider.
    pub wallet: Arc<dyn WalletProvider>,
    /// FHE session service.
    pub fhe: Arc<dyn FheSession>,
    /// Encrypt service.
    pub encryptor: Arc<dyn LocationEncryptor>,
    /// Decrypt/verify service.
    pub oracle: Arc<dyn DecryptionOracle>,
    /// Ledger contract surface.
    pub ledger: Arc<dyn TreasureLedger>,
    /// Geolocation provider.
    pub geolocation: Arc<dyn GeolocationProvider>,
}

/// Session-local state, lost on reload of the process.
#[derive(Default)]
struct SessionState {
    /// Caller position, obtained once per session.
    current_location: Option<GeoPoint>,
    /// Record whose detail view is open, if any.
    open_detail: Option<TreasureId>,
    /// Provisional clear value for the open detail view. Superseded by
    /// the ledger-authoritative value once a reload lands.
    locally_decrypted: Option<u64>,
    /// Last computed distance for the open detail view.
    distance: Option<f64>,
    /// Bounded activity history, newest first.
    history: VecDeque<String>,
}

/// Top-level orchestrator for the encrypted-treasure lifecycle.
pub struct TreasureHuntService {
    config: HuntConfig,
    wallet: Arc<dyn WalletProvider>,
    fhe: Arc<dyn FheSession>,
    encryptor: Arc<dyn LocationEncryptor>,
    ledger: Arc<dyn TreasureLedger>,
    geolocation: Arc<dyn GeolocationProvider>,
    coordinator: DecryptionCoordinator,
    reporter: TransactionStatusReporter,
    treasures: RwLock<Vec<Treasure>>,
    state: RwLock<SessionState>,
    // Highest creation-millis handed out; makes time-derived ids
    // flow-unique even within one millisecond.
    last_id_millis: Mutex<u64>,
    init_lock: tokio::sync::Mutex<()>,
    creating: AtomicBool,
    refreshing: AtomicBool,
    decrypting: AtomicBool,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Parse a public numeric form field, clamping to 0 on any parse
/// failure (fractional or negative input included).
fn parse_public_int(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

impl TreasureHuntService {
    /// Create a service over the given collaborators.
    pub fn new(config: HuntConfig, deps: HuntDependencies) -> Self {
        let coordinator =
            DecryptionCoordinator::new(Arc::clone(&deps.ledger), Arc::clone(&deps.oracle));
        let reporter = TransactionStatusReporter::new(&config);
        Self {
            config,
            wallet: deps.wallet,
            fhe: deps.fhe,
            encryptor: deps.encryptor,
            ledger: deps.ledger,
            geolocation: deps.geolocation,
            coordinator,
            reporter,
            treasures: RwLock::new(Vec::new()),
            state: RwLock::new(SessionState::default()),
            last_id_millis: Mutex::new(0),
            init_lock: tokio::sync::Mutex::new(()),
            creating: AtomicBool::new(false),
            refreshing: AtomicBool::new(false),
            decrypting: AtomicBool::new(false),
        }
    }

    /// Address of the ledger contract (encryption context).
    pub fn contract_address(&self) -> Address {
        self.ledger.contract_address()
    }

    /// Current FHE session state.
    pub fn fhe_status(&self) -> FheStatus {
        self.fhe.status()
    }

    /// Whether a create-flow is in flight.
    pub fn is_creating(&self) -> bool {
        self.creating.load(Ordering::SeqCst)
    }

    /// Whether a reload-flow is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Whether a decrypt-flow is in flight.
    pub fn is_decrypting(&self) -> bool {
        self.decrypting.load(Ordering::SeqCst)
    }

    /// Session position, if already acquired.
    pub fn current_location(&self) -> Option<GeoPoint> {
        self.state.read().current_location
    }

    /// Provisional clear value owned by the open detail view.
    pub fn locally_decrypted(&self) -> Option<u64> {
        self.state.read().locally_decrypted
    }

    /// Last computed distance for the open detail view.
    pub fn last_distance(&self) -> Option<f64> {
        self.state.read().distance
    }

    fn connected_address(&self) -> Result<Address, HuntError> {
        self.wallet.address().ok_or(HuntError::NotConnected)
    }

    fn push_history(&self, entry: String) {
        let mut state = self.state.write();
        state.history.push_front(entry);
        state.history.truncate(self.config.history_capacity);
    }

    fn next_treasure_id(&self) -> TreasureId {
        let mut last = self.last_id_millis.lock();
        let mut millis = now_millis();
        if millis <= *last {
            millis = *last + 1;
        }
        *last = millis;
        format!("treasure-{millis}")
    }

    fn store_provisional(&self, id: &str, value: u64) {
        let mut state = self.state.write();
        if state.open_detail.as_deref() == Some(id) {
            state.locally_decrypted = Some(value);
        }
    }

    async fn run_create(
        &self,
        request: CreateTreasureRequest,
        creator: Address,
    ) -> Result<TreasureId, HuntError> {
        self.reporter.pending("Creating treasure with FHE...");

        let location = parse_public_int(&request.location_code);
        let reward = parse_public_int(&request.reward);
        let id = self.next_treasure_id();
        let contract = self.ledger.contract_address();

        // Encryption failure aborts before any ledger write.
        let encrypted = self.encryptor.encrypt(&contract, &creator, location).await?;

        self.reporter.pending("Waiting for confirmation...");
        self.ledger
            .create_treasure(TreasureSubmission {
                id: id.clone(),
                name: request.name.clone(),
                ciphertext: encrypted.ciphertext,
                proof: encrypted.proof,
                reward,
                secondary_value: 0,
                hint: request.hint,
                creator,
            })
            .await
            .map_err(|e| match e {
                LedgerError::UserRejected => HuntError::SubmissionRejected {
                    user_initiated: true,
                },
                _ => HuntError::SubmissionRejected {
                    user_initiated: false,
                },
            })?;

        // The write is confirmed; a failed refresh must not turn the
        // flow into an error.
        if let Err(e) = self.run_reload().await {
            warn!(error = %e, "refresh after create failed; record is on the ledger");
        }
        self.reporter.success("Treasure created!");
        self.push_history(format!("Created treasure: {}", request.name));
        Ok(id)
    }

    async fn run_reload(&self) -> Result<(), HuntError> {
        let ids = self
            .ledger
            .list_ids()
            .await
            .map_err(|e| HuntError::LedgerUnavailable(e.to_string()))?;

        let mut fresh = Vec::with_capacity(ids.len());
        for id in ids {
            match self.ledger.get_treasure(&id).await {
                Ok(treasure) => fresh.push(treasure),
                // Partial-success policy: one bad record never aborts
                // the whole reload.
                Err(e) => warn!(%id, error = %e, "skipping treasure that failed to load"),
            }
        }

        {
            let current = self.treasures.read();
            if !invariant_monotonic_verification(&current, &fresh) {
                error!("ledger returned a verification rollback");
            }
        }

        // Readers never observe a half-populated set.
        *self.treasures.write() = fresh;
        Ok(())
    }

    async fn run_decrypt(&self, id: &str) -> Result<Option<u64>, HuntError> {
        match self.coordinator.decrypt(id).await? {
            DecryptOutcome::AlreadyVerified(value) => {
                self.reporter.success("Location already verified");
                self.store_provisional(id, value);
                Ok(Some(value))
            }
            DecryptOutcome::Verified(value) => {
                self.reporter.pending("Verifying location...");
                // Verification already landed on-chain; a failed refresh
                // must not turn the flow into an error.
                if let Err(e) = self.run_reload().await {
                    warn!(error = %e, "refresh after verification failed");
                }
                self.push_history(format!("Decrypted treasure: {id}"));
                self.reporter.success("Location verified!");
                self.store_provisional(id, value);
                Ok(Some(value))
            }
            DecryptOutcome::RaceLost => {
                if let Err(e) = self.run_reload().await {
                    warn!(error = %e, "refresh after lost verification race failed");
                }
                self.reporter.success("Location already verified");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl TreasureHuntApi for TreasureHuntService {
    async fn ensure_initialized(&self) -> Result<(), HuntError> {
        if self.fhe.status() == FheStatus::Ready {
            return Ok(());
        }

        let _guard = self.init_lock.lock().await;
        if self.fhe.status() == FheStatus::Ready {
            return Ok(());
        }

        self.fhe.initialize().await.map_err(|e| {
            self.reporter.error("FHEVM initialization failed");
            e
        })
    }

    async fn create_treasure(
        &self,
        request: CreateTreasureRequest,
    ) -> Result<TreasureId, HuntError> {
        let creator = match self.connected_address() {
            Ok(address) => address,
            Err(e) => {
                self.reporter.error("Connect wallet first");
                return Err(e);
            }
        };
        self.ensure_initialized().await?;

        if self
            .creating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(HuntError::FlowInFlight("create"));
        }
        let result = self.run_create(request, creator).await;
        self.creating.store(false, Ordering::SeqCst);

        if let Err(e) = &result {
            let message = match e {
                HuntError::SubmissionRejected {
                    user_initiated: true,
                } => "Transaction rejected".to_string(),
                other => format!("Creation failed: {other}"),
            };
            self.reporter.error(message);
        }
        result
    }

    async fn reload(&self) -> Result<(), HuntError> {
        // No identity, nothing to load.
        if !self.wallet.is_connected() {
            return Ok(());
        }

        self.refreshing.store(true, Ordering::SeqCst);
        let result = self.run_reload().await;
        self.refreshing.store(false, Ordering::SeqCst);

        if result.is_err() {
            self.reporter.error("Failed to load treasures");
        }
        result
    }

    async fn decrypt_location(&self, id: &str) -> Result<Option<u64>, HuntError> {
        if !self.wallet.is_connected() {
            self.reporter.error("Connect wallet first");
            return Err(HuntError::NotConnected);
        }
        self.ensure_initialized().await?;

        self.decrypting.store(true, Ordering::SeqCst);
        let result = self.run_decrypt(id).await;
        self.decrypting.store(false, Ordering::SeqCst);

        if let Err(e) = &result {
            let message = match e {
                HuntError::SubmissionRejected {
                    user_initiated: true,
                } => "Transaction rejected",
                _ => "Decryption failed",
            };
            self.reporter.error(message);
        }
        result
    }

    async fn check_availability(&self) -> Result<bool, HuntError> {
        match self.ledger.is_available().await {
            Ok(true) => {
                self.reporter.success("Contract is available");
                self.push_history("Checked contract availability".to_string());
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                self.reporter.error("Availability check failed");
                Err(HuntError::LedgerUnavailable(e.to_string()))
            }
        }
    }

    async fn acquire_location(&self) -> Result<GeoPoint, HuntError> {
        if let Some(position) = self.state.read().current_location {
            return Ok(position);
        }

        match self.geolocation.current_position().await {
            Ok(position) => {
                self.state.write().current_location = Some(position);
                self.push_history("Fetched current location".to_string());
                Ok(position)
            }
            Err(e) => {
                self.reporter.error("Location access denied");
                Err(e)
            }
        }
    }

    fn distance_to_treasure(&self, location_code: u64) -> Result<f64, HuntError> {
        let here = self.state.read().current_location.ok_or_else(|| {
            HuntError::LocationUnavailable("current location not acquired".to_string())
        })?;

        let distance = distance_to_code(&here, location_code);
        self.state.write().distance = Some(distance);
        self.push_history(format!("Calculated distance to treasure: {distance:.2} km"));
        Ok(distance)
    }

    fn open_detail(&self, id: &str) -> Result<(), HuntError> {
        if !self.treasures.read().iter().any(|t| t.id == id) {
            return Err(HuntError::TreasureNotFound(id.to_string()));
        }

        let mut state = self.state.write();
        state.open_detail = Some(id.to_string());
        state.locally_decrypted = None;
        state.distance = None;
        Ok(())
    }

    fn close_detail(&self) {
        let mut state = self.state.write();
        state.open_detail = None;
        state.locally_decrypted = None;
        state.distance = None;
    }

    fn treasures(&self) -> Vec<Treasure> {
        self.treasures.read().clone()
    }

    fn stats(&self) -> HuntStats {
        hunt_stats(
            &self.treasures.read(),
            now_secs(),
            self.config.recent_window_secs,
        )
    }

    fn history(&self) -> Vec<String> {
        self.state.read().history.iter().cloned().collect()
    }

    fn status(&self) -> Option<TransactionStatus> {
        self.reporter.current()
    }
}
