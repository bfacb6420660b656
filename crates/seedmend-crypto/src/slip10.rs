//! SLIP-10 hierarchical derivation for ed25519
//!
//! Only hardened children exist on this curve, so every path component must
//! carry the `'` (or `h`) suffix.

use std::fmt;
use std::str::FromStr;

use crate::hash::hmac_sha512;
use crate::CryptoError;

const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Offset added to hardened child indices
pub const HARDENED: u32 = 0x8000_0000;

/// Parsed derivation path such as `m/44'/314159'/0'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    /// BIP-44 account path `m/44'/{coin}'/{account}'`
    pub fn bip44(coin_type: u32, account: u32) -> Self {
        Self {
            indices: vec![44 | HARDENED, coin_type | HARDENED, account | HARDENED],
        }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
}

impl FromStr for DerivationPath {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CryptoError::InvalidPath(s.to_string());
        let mut parts = s.trim().split('/');

        if parts.next() != Some("m") {
            return Err(invalid());
        }

        let mut indices = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
                Some(d) => (d, true),
                None => (part, false),
            };
            let index: u32 = digits.parse().map_err(|_| invalid())?;
            if index >= HARDENED {
                return Err(invalid());
            }
            if !hardened {
                return Err(CryptoError::NonHardened(index));
            }
            indices.push(index | HARDENED);
        }

        Ok(Self { indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.indices {
            write!(f, "/{}'", index & !HARDENED)?;
        }
        Ok(())
    }
}

/// Private key plus chain code at one node of the tree
#[derive(Clone)]
pub struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Master node from a BIP-39 seed
    pub fn master(seed: &[u8]) -> Self {
        Self::from_hmac(hmac_sha512(ED25519_SEED_KEY, &[seed]))
    }

    /// Hardened child `index` (must already include [`HARDENED`])
    pub fn child(&self, index: u32) -> Result<Self, CryptoError> {
        if index < HARDENED {
            return Err(CryptoError::NonHardened(index));
        }
        let i = hmac_sha512(&self.chain_code, &[&[0u8][..], &self.key[..], &index.to_be_bytes()[..]]);
        Ok(Self::from_hmac(i))
    }

    /// Walk `path` from the master node of `seed`
    pub fn derive(seed: &[u8], path: &DerivationPath) -> Result<Self, CryptoError> {
        path.indices()
            .iter()
            .try_fold(Self::master(seed), |node, &index| node.child(index))
    }

    pub fn private_key(&self) -> [u8; 32] {
        self.key
    }

    fn from_hmac(i: [u8; 64]) -> Self {
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&i[..32]);
        chain_code.copy_from_slice(&i[32..]);
        Self { key, chain_code }
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("chain_code", &hex::encode(self.chain_code))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_seed() -> Vec<u8> {
        hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()
    }

    #[test]
    fn test_master_vector() {
        let master = ExtendedKey::master(&vector_seed());
        assert_eq!(
            hex::encode(master.chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
        assert_eq!(
            hex::encode(master.private_key()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
    }

    #[test]
    fn test_hardened_child_vector() {
        let path: DerivationPath = "m/0'".parse().unwrap();
        let node = ExtendedKey::derive(&vector_seed(), &path).unwrap();
        assert_eq!(
            hex::encode(node.chain_code),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
        assert_eq!(
            hex::encode(node.private_key()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn test_non_hardened_rejected() {
        let master = ExtendedKey::master(&vector_seed());
        assert!(matches!(master.child(1), Err(CryptoError::NonHardened(1))));
        assert!(matches!(
            "m/44'/0".parse::<DerivationPath>(),
            Err(CryptoError::NonHardened(0))
        ));
    }

    #[test]
    fn test_parse_path() {
        let path: DerivationPath = "m/44'/314159'/0'".parse().unwrap();
        assert_eq!(path, DerivationPath::bip44(314159, 0));
        assert_eq!(path.to_string(), "m/44'/314159'/0'");

        let h: DerivationPath = "m/44h/148h/0h".parse().unwrap();
        assert_eq!(h, DerivationPath::bip44(148, 0));

        let root: DerivationPath = "m".parse().unwrap();
        assert!(root.indices().is_empty());
    }

    #[test]
    fn test_parse_path_errors() {
        assert!(matches!("44'/0'".parse::<DerivationPath>(), Err(CryptoError::InvalidPath(_))));
        assert!(matches!("m/x'".parse::<DerivationPath>(), Err(CryptoError::InvalidPath(_))));
        assert!(matches!("m/2147483648'".parse::<DerivationPath>(), Err(CryptoError::InvalidPath(_))));
        assert!(matches!("m//".parse::<DerivationPath>(), Err(CryptoError::InvalidPath(_))));
    }
}
