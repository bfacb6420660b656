//! Wallet resolution settings

use serde::{Deserialize, Serialize};

use crate::ledger::{get_ledger, StellarLedger};
use crate::resolver::{Network, WalletResolver};
use crate::WalletError;

/// How recovered phrases are turned into accounts and balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Ledger ticker ("PI" or "XLM")
    pub ledger: String,
    pub network: Network,
    /// Overrides the ledger's default derivation path
    pub derivation_path: Option<String>,
    /// Overrides the ledger's Horizon endpoint
    pub horizon_url: Option<String>,
    /// Look up balances after derivation
    pub fetch_balance: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            ledger: "PI".to_string(),
            network: Network::Mainnet,
            derivation_path: None,
            horizon_url: None,
            fetch_balance: true,
        }
    }
}

impl WalletConfig {
    /// Ledger with the configured path applied
    pub fn resolver(&self) -> Result<StellarLedger, WalletError> {
        let ledger = get_ledger(&self.ledger)
            .ok_or_else(|| WalletError::UnknownLedger(self.ledger.clone()))?;

        match &self.derivation_path {
            Some(path) => Ok(ledger.with_path(path.parse()?)),
            None => Ok(ledger),
        }
    }

    /// Horizon endpoint to query for `resolver`
    pub fn horizon_url<R: WalletResolver + ?Sized>(&self, resolver: &R) -> String {
        self.horizon_url
            .clone()
            .unwrap_or_else(|| resolver.horizon_url(self.network).to_string())
    }
}
