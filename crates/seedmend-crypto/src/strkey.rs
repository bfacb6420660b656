//! Stellar StrKey: version byte + payload + CRC16 checksum, Base32 encoded
//!
//! Pi Network reuses the Stellar account format unchanged.

use thiserror::Error;

/// Version byte for account ids ('G...')
pub const VERSION_ACCOUNT_ID: u8 = 6 << 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StrKeyError {
    #[error("Invalid character in input")]
    InvalidCharacter,
    #[error("Invalid length")]
    InvalidLength,
    #[error("Unexpected version byte {0:#04x}")]
    InvalidVersion(u8),
    #[error("Invalid checksum")]
    InvalidChecksum,
}

// RFC 4648 alphabet
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

// CRC16-XModem
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0x0000;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut result = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut bits = 0u32;
    let mut value = 0u32;

    for &byte in data {
        value = (value << 8) | (byte as u32);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            result.push(ALPHABET[((value >> bits) & 0x1F) as usize] as char);
        }
    }

    if bits > 0 {
        result.push(ALPHABET[((value << (5 - bits)) & 0x1F) as usize] as char);
    }

    result
}

fn base32_decode(input: &str) -> Result<Vec<u8>, StrKeyError> {
    let mut result = Vec::with_capacity(input.len() * 5 / 8);
    let mut bits = 0u32;
    let mut value = 0u32;

    for c in input.bytes() {
        let digit = ALPHABET
            .iter()
            .position(|&a| a == c)
            .ok_or(StrKeyError::InvalidCharacter)? as u32;
        value = ((value << 5) | digit) & 0xFFFF;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            result.push((value >> bits) as u8);
        }
    }

    Ok(result)
}

/// Encode a 32-byte payload under `version`
pub fn encode(version: u8, payload: &[u8; 32]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 2);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = crc16_xmodem(&data);
    data.push((checksum & 0xFF) as u8);
    data.push((checksum >> 8) as u8);

    base32_encode(&data)
}

/// Decode a StrKey, checking version and checksum
pub fn decode(version: u8, input: &str) -> Result<[u8; 32], StrKeyError> {
    if input.len() != 56 {
        return Err(StrKeyError::InvalidLength);
    }
    let data = base32_decode(input)?;
    if data.len() != 35 {
        return Err(StrKeyError::InvalidLength);
    }
    if data[0] != version {
        return Err(StrKeyError::InvalidVersion(data[0]));
    }

    let (body, checksum) = data.split_at(33);
    let expected = crc16_xmodem(body);
    if checksum != [(expected & 0xFF) as u8, (expected >> 8) as u8] {
        return Err(StrKeyError::InvalidChecksum);
    }

    let mut payload = [0u8; 32];
    payload.copy_from_slice(&body[1..]);
    Ok(payload)
}

/// Account id ('G...') for an ed25519 public key
pub fn encode_account_id(public_key: &[u8; 32]) -> String {
    encode(VERSION_ACCOUNT_ID, public_key)
}
