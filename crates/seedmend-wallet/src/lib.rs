//! SeedMend Wallet Resolution
//!
//! Turns recovered phrases into ledger accounts and looks up their balances.
//! Nothing here runs inside the search; callers invoke it on the results.

pub mod resolver;
pub mod ledger;
pub mod horizon;
pub mod config;

use thiserror::Error;

// Re-exports
pub use resolver::{WalletResolver, DerivedWallet, Network};
pub use ledger::{StellarLedger, all_ledgers, get_ledger};
pub use horizon::{HorizonClient, Balance};
pub use config::WalletConfig;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Failed to derive wallet: {0}")]
    Derivation(#[from] seedmend_crypto::CryptoError),
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Account {0} not found")]
    AccountNotFound(String),
    #[error("Unexpected Horizon response: {0}")]
    InvalidResponse(String),
    #[error("Invalid account id {0}: {1}")]
    InvalidAccount(String, seedmend_crypto::strkey::StrKeyError),
    #[error("Unknown ledger: {0}")]
    UnknownLedger(String),
}
