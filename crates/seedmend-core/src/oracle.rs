//! Checksum oracles

use seedmend_crypto::mnemonic;

/// Decides whether a whitespace-joined, lowercase phrase is well-formed.
///
/// Implementations must be pure: the same phrase always gives the same answer.
pub trait ChecksumOracle: Send + Sync {
    fn is_valid(&self, phrase: &str) -> bool;
}

/// English BIP-39 word list membership, word count and checksum
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip39Checksum;

impl ChecksumOracle for Bip39Checksum {
    fn is_valid(&self, phrase: &str) -> bool {
        mnemonic::is_valid(phrase)
    }
}

impl<F> ChecksumOracle for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_valid(&self, phrase: &str) -> bool {
        self(phrase)
    }
}
