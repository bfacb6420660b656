//! BIP-39 mnemonic checksum and seed derivation

use bip39::{Language, Mnemonic};

use crate::CryptoError;

/// True when `phrase` is a well-formed English BIP-39 mnemonic: every word in
/// the list, an accepted word count, and a matching checksum
pub fn is_valid(phrase: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}

/// Validate `phrase`, reporting why it was rejected
pub fn validate(phrase: &str) -> Result<(), CryptoError> {
    Mnemonic::parse_in_normalized(Language::English, phrase)
        .map(|_| ())
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))
}

/// 64-byte BIP-39 seed (PBKDF2-HMAC-SHA512, 2048 rounds)
pub fn to_seed(phrase: &str, passphrase: &str) -> Result<[u8; 64], CryptoError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| CryptoError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed_normalized(passphrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_valid_phrase() {
        assert!(is_valid(ABOUT));
        assert!(validate(ABOUT).is_ok());
    }

    #[test]
    fn test_bad_checksum() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(!is_valid(phrase));
        assert!(matches!(validate(phrase), Err(CryptoError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_unknown_word_and_length() {
        assert!(!is_valid("abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon notaword"));
        assert!(!is_valid("abandon about"));
    }

    #[test]
    fn test_24_words() {
        let phrase = format!("{} art", vec!["abandon"; 23].join(" "));
        assert!(is_valid(&phrase));
    }

    #[test]
    fn test_seed_vector() {
        let seed = to_seed(ABOUT, "TREZOR").unwrap();
        assert_eq!(
            hex::encode(seed),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }
}
