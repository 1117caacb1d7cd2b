//! # Static Wallet
//!
//! Wallet provider stand-in with a switchable identity.

use crate::domain::Address;
use crate::ports::outbound::WalletProvider;
use parking_lot::RwLock;

/// Wallet provider holding a fixed, switchable identity.
pub struct StaticWallet {
    address: RwLock<Option<Address>>,
}

impl StaticWallet {
    /// Create a connected wallet.
    pub fn connected(address: impl Into<Address>) -> Self {
        Self {
            address: RwLock::new(Some(address.into())),
        }
    }

    /// Create a disconnected wallet.
    pub fn disconnected() -> Self {
        Self {
            address: RwLock::new(None),
        }
    }

    /// Connect as the given identity.
    pub fn connect(&self, address: impl Into<Address>) {
        *self.address.write() = Some(address.into());
    }

    /// Drop the identity.
    pub fn disconnect(&self) {
        *self.address.write() = None;
    }
}

impl WalletProvider for StaticWallet {
    fn address(&self) -> Option<Address> {
        self.address.read().clone()
    }
}
