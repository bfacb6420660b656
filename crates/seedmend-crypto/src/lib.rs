//! SeedMend Crypto Primitives
//!
//! BIP-39 checksum and seed, SLIP-10 ed25519 derivation, and StrKey
//! account encoding.

pub mod mnemonic;
pub mod slip10;
pub mod ed25519;
pub mod hash;
pub mod strkey;

pub use self::ed25519::Ed25519Keypair;
pub use self::slip10::{DerivationPath, ExtendedKey};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("Invalid derivation path '{0}'")]
    InvalidPath(String),
    #[error("SLIP-10 ed25519 only supports hardened children (index {0})")]
    NonHardened(u32),
}

// Re-export dependencies for use by other crates
pub use hex;
