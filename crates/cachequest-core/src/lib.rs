//! # CacheQuest Core
//!
//! Lifecycle orchestrator for FHE-encrypted treasure records on a
//! public ledger.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Let hunters hide and reveal location-encrypted treasure records
//! without the ledger ever seeing a clear location, using:
//! - Client-side FHE encryption with zero-knowledge input proofs
//! - Verifiable decryption through an oracle, settled on-chain
//! - A monotonic unverified-to-verified record lifecycle
//!
//! ## Key Properties
//!
//! | Property | Description |
//! |----------|-------------|
//! | Monotonic verification | A verified record never reverts, its value never changes |
//! | Race tolerance | A lost verification race is success-equivalent |
//! | Partial reloads | One unreadable record never aborts a refresh |
//! | Atomic snapshots | Readers never observe a half-populated record set |
//!
//! ## Module Structure
//!
//! ```text
//! cachequest-core/
//! ├── domain/          # Core types: Treasure, HuntError, invariants
//! ├── algorithms/      # Location decoding, distance, dashboard stats
//! ├── ports/           # API trait (inbound) + dependency traits (outbound)
//! ├── adapters/        # In-memory ledger, mock FHE gateway, wallet, geolocation
//! ├── application/     # TreasureHuntService orchestrating everything
//! └── config.rs        # HuntConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{
    ciphertext_handle, FixedGeolocation, InMemoryLedger, MockFheGateway, StaticWallet,
};
pub use algorithms::{decode_location, distance_to_code, hunt_stats, planar_distance};
pub use application::{
    DecryptOutcome, DecryptionCoordinator, HuntDependencies, TransactionStatusReporter,
    TreasureHuntService,
};
pub use config::HuntConfig;
pub use domain::{
    invariant_monotonic_verification, invariant_unique_ids, invariant_verified_value_present,
    Address, CiphertextHandle, FheStatus, GeoPoint, HuntError, HuntStats, LedgerError, StatusKind,
    TransactionStatus, Treasure, TreasureId, VerificationState, DEFAULT_HISTORY_CAPACITY,
    RECENT_WINDOW_SECS,
};
pub use ports::{
    CreateTreasureRequest, DecryptionOracle, DecryptionShare, EncryptedLocation, FheSession,
    GeolocationProvider, LocationEncryptor, TreasureHuntApi, TreasureLedger, TreasureSubmission,
    WalletProvider,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
