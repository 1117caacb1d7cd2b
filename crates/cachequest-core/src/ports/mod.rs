//! # Ports
//!
//! Inbound API trait plus outbound traits for every external
//! collaborator (wallet, ledger contract, FHE services, geolocation).

pub mod inbound;
pub mod outbound;

pub use inbound::{CreateTreasureRequest, TreasureHuntApi};
pub use outbound::{
    DecryptionOracle, DecryptionShare, EncryptedLocation, FheSession, GeolocationProvider,
    LocationEncryptor, TreasureLedger, TreasureSubmission, WalletProvider,
};
