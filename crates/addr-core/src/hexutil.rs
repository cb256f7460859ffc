//! Hex conversions and hashing helpers for string-facing callers.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::hash::{hash160, sha256};

/// Lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex in either case.
pub fn from_hex(input: &str) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { c, index } => Error::InvalidCharacter {
            ch: c,
            position: index,
        },
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            Error::InvalidLength {
                expected: input.len() + 1,
                actual: input.len(),
            }
        }
    })
}

/// SHA-256 of the hex-decoded input, as hex.
pub fn sha256_hex(input: &str) -> Result<String> {
    Ok(to_hex(&sha256(&from_hex(input)?)))
}

/// HASH160 of the hex-decoded input, as hex.
pub fn hash160_hex(input: &str) -> Result<String> {
    Ok(to_hex(&hash160(&from_hex(input)?)))
}
