//! # Application Layer
//!
//! The lifecycle orchestrator, the decryption coordinator, and the
//! transaction status reporter.

pub mod decryption;
pub mod service;
pub mod status;

pub use decryption::{DecryptOutcome, DecryptionCoordinator};
pub use service::{HuntDependencies, TreasureHuntService};
pub use status::TransactionStatusReporter;
