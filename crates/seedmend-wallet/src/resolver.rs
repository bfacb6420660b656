//! Wallet resolver trait and types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::WalletError;

/// Which network a balance lookup goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "Mainnet"),
            Network::Testnet => write!(f, "Testnet"),
        }
    }
}

/// An account derived from a recovered phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedWallet {
    /// Account id
    pub address: String,
    /// Public key in hex format
    pub public_key_hex: String,
    /// Path used for derivation
    pub derivation_path: String,
    /// Ledger ticker
    pub ledger: String,
}

/// Derives a ledger account from a checksum-valid phrase
pub trait WalletResolver: Send + Sync {
    /// Ledger ticker symbol (e.g., "PI", "XLM")
    fn ticker(&self) -> &'static str;

    /// Full ledger name
    fn name(&self) -> &'static str;

    /// Derive the first account for `phrase` (empty BIP-39 passphrase)
    fn derive(&self, phrase: &str) -> Result<DerivedWallet, WalletError>;

    /// Horizon endpoint for `network`
    fn horizon_url(&self, network: Network) -> &'static str;
}
