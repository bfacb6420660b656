//! Stellar-family ledgers
//!
//! Account = SLIP-10 ed25519 key at `m/44'/{coin}'/0'`, encoded as a StrKey
//! account id. Pi Network uses the same scheme under its own coin type.

use seedmend_crypto::{hex, mnemonic, strkey, DerivationPath, Ed25519Keypair, ExtendedKey};

use crate::resolver::{DerivedWallet, Network, WalletResolver};
use crate::WalletError;

/// SLIP-44 coin type for Pi Network
pub const PI_COIN_TYPE: u32 = 314159;
/// SLIP-44 coin type for Stellar
pub const STELLAR_COIN_TYPE: u32 = 148;

/// Stellar-style ledger with configurable ticker, path and endpoints
#[derive(Debug, Clone)]
pub struct StellarLedger {
    ticker: &'static str,
    name: &'static str,
    path: DerivationPath,
    mainnet_url: &'static str,
    testnet_url: &'static str,
}

impl StellarLedger {
    /// Pi Network
    pub fn pi_network() -> Self {
        Self {
            ticker: "PI",
            name: "Pi Network",
            path: DerivationPath::bip44(PI_COIN_TYPE, 0),
            mainnet_url: "https://api.mainnet.minepi.com",
            testnet_url: "https://api.testnet.minepi.com",
        }
    }

    /// Stellar
    pub fn stellar() -> Self {
        Self {
            ticker: "XLM",
            name: "Stellar",
            path: DerivationPath::bip44(STELLAR_COIN_TYPE, 0),
            mainnet_url: "https://horizon.stellar.org",
            testnet_url: "https://horizon-testnet.stellar.org",
        }
    }

    /// Same ledger, different derivation path
    pub fn with_path(mut self, path: DerivationPath) -> Self {
        self.path = path;
        self
    }

    pub fn derivation_path(&self) -> &DerivationPath {
        &self.path
    }
}

impl WalletResolver for StellarLedger {
    fn ticker(&self) -> &'static str {
        self.ticker
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn derive(&self, phrase: &str) -> Result<DerivedWallet, WalletError> {
        let seed = mnemonic::to_seed(phrase, "")?;
        let node = ExtendedKey::derive(&seed, &self.path)?;
        let keypair = Ed25519Keypair::from_bytes(&node.private_key());
        let public_key = keypair.public_key_bytes();

        Ok(DerivedWallet {
            address: strkey::encode_account_id(&public_key),
            public_key_hex: hex::encode(public_key),
            derivation_path: self.path.to_string(),
            ledger: self.ticker.to_string(),
        })
    }

    fn horizon_url(&self, network: Network) -> &'static str {
        match network {
            Network::Mainnet => self.mainnet_url,
            Network::Testnet => self.testnet_url,
        }
    }
}

/// Get all supported ledgers
pub fn all_ledgers() -> Vec<StellarLedger> {
    vec![StellarLedger::pi_network(), StellarLedger::stellar()]
}

/// Get ledger by ticker
pub fn get_ledger(ticker: &str) -> Option<StellarLedger> {
    all_ledgers()
        .into_iter()
        .find(|l| l.ticker.eq_ignore_ascii_case(ticker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_pi_derivation() {
        let pi = StellarLedger::pi_network();
        let wallet = pi.derive(ABOUT).unwrap();

        assert!(wallet.address.starts_with('G'));
        assert_eq!(wallet.address.len(), 56);
        assert_eq!(wallet.derivation_path, "m/44'/314159'/0'");
        assert_eq!(wallet.ledger, "PI");

        let decoded = strkey::decode(strkey::VERSION_ACCOUNT_ID, &wallet.address).unwrap();
        assert_eq!(hex::encode(decoded), wallet.public_key_hex);
    }

    #[test]
    fn test_stellar_known_addresses() {
        // SEP-0005 account 0 at m/44'/148'/0'
        let xlm = StellarLedger::stellar();

        let illness = xlm
            .derive("illness spike retreat truth genius clock brain pass fit cave bargain toe")
            .unwrap();
        assert_eq!(
            illness.address,
            "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6"
        );

        let about = xlm.derive(ABOUT).unwrap();
        assert_eq!(
            about.address,
            "GB3JDWCQJCWMJ3IILWIGDTQJJC5567PGVEVXSCVPEQOTDN64VJBDQBYX"
        );
        assert_eq!(about.derivation_path, "m/44'/148'/0'");
    }

    #[test]
    fn test_deterministic() {
        let pi = StellarLedger::pi_network();
        assert_eq!(pi.derive(ABOUT).unwrap(), pi.derive(ABOUT).unwrap());
    }

    #[test]
    fn test_path_changes_address() {
        let pi = StellarLedger::pi_network().derive(ABOUT).unwrap();
        let xlm = StellarLedger::stellar().derive(ABOUT).unwrap();
        let custom = StellarLedger::pi_network()
            .with_path("m/44'/314159'/1'".parse().unwrap())
            .derive(ABOUT)
            .unwrap();

        assert_ne!(pi.address, xlm.address);
        assert_ne!(pi.address, custom.address);
        assert_eq!(custom.derivation_path, "m/44'/314159'/1'");
    }

    #[test]
    fn test_invalid_phrase_is_derivation_error() {
        let err = StellarLedger::pi_network().derive("abandon abandon").unwrap_err();
        assert!(matches!(err, WalletError::Derivation(_)));
    }

    #[test]
    fn test_get_ledger() {
        assert_eq!(get_ledger("pi").map(|l| l.name()), Some("Pi Network"));
        assert_eq!(get_ledger("XLM").map(|l| l.name()), Some("Stellar"));
        assert!(get_ledger("BTC").is_none());
    }

    #[test]
    fn test_horizon_urls() {
        let pi = StellarLedger::pi_network();
        assert_eq!(pi.horizon_url(Network::Mainnet), "https://api.mainnet.minepi.com");
        assert_eq!(pi.horizon_url(Network::Testnet), "https://api.testnet.minepi.com");
    }
}
