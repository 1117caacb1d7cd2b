//! # Adapters
//!
//! In-memory implementations of the outbound ports. These stand in for
//! the real wallet, FHEVM gateway, and contract RPC clients; production
//! adapters implement the same traits against live services.

pub mod fhe;
pub mod geolocation;
pub mod ledger;
pub mod wallet;

pub use fhe::{ciphertext_handle, MockFheGateway};
pub use geolocation::FixedGeolocation;
pub use ledger::InMemoryLedger;
pub use wallet::StaticWallet;
