//! Base58 and Base58Check encoding.
//!
//! The numeric conversion works directly on byte arrays (long division by 58
//! when encoding, multiply-by-58-and-add when decoding). Leading zero bytes
//! are carried separately as leading `'1'` characters.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::hash::double_sha256;

pub const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the Base58Check checksum suffix.
pub const CHECKSUM_LEN: usize = 4;

/// Reverse lookup from ASCII to digit value, 0xFF for characters outside the alphabet.
const DIGIT_VALUES: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        table[BASE58_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

fn digit_value(c: char) -> Option<u8> {
    let code = c as usize;
    if code < 128 && DIGIT_VALUES[code] != 0xFF {
        Some(DIGIT_VALUES[code])
    } else {
        None
    }
}

/// Encode raw bytes as Base58.
pub fn encode(data: &[u8]) -> String {
    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();

    // Base-58 digits, least significant first.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in &data[leading_zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            let value = ((*digit as u32) << 8) + carry;
            *digit = (value % 58) as u8;
            carry = value / 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(leading_zeros + digits.len());
    for _ in 0..leading_zeros {
        out.push('1');
    }
    for &digit in digits.iter().rev() {
        out.push(BASE58_ALPHABET[digit as usize] as char);
    }
    out
}

/// Decode a Base58 string into raw bytes.
///
/// Only the alphabet is checked; checksums are the caller's concern.
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let mut result: Vec<u8> = Vec::new();

    // Count leading '1's (they become leading zeros)
    let leading_zeros = input.chars().take_while(|&c| c == '1').count();

    for (position, c) in input.chars().enumerate() {
        let value = digit_value(c).ok_or(Error::InvalidCharacter { ch: c, position })?;

        // Multiply result by 58 and add value
        let mut carry = value as u32;
        for byte in result.iter_mut().rev() {
            let temp = (*byte as u32) * 58 + carry;
            *byte = (temp & 0xFF) as u8;
            carry = temp >> 8;
        }

        while carry > 0 {
            result.insert(0, (carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    // Add leading zeros
    let mut decoded = vec![0u8; leading_zeros];
    decoded.extend(result);

    Ok(decoded)
}

/// Compute the 4-byte Base58Check checksum of `data`.
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = double_sha256(data);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Base58Check: `version || payload || checksum`, Base58 encoded.
pub fn check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let sum = checksum(&data);
    data.extend_from_slice(&sum);
    encode(&data)
}

/// Decode a Base58Check string and verify its checksum.
///
/// Returns the version byte and the payload.
pub fn check_decode(input: &str) -> Result<(u8, Vec<u8>)> {
    let decoded = decode(input)?;
    if decoded.len() < 1 + CHECKSUM_LEN {
        return Err(Error::InvalidLength {
            expected: 1 + CHECKSUM_LEN,
            actual: decoded.len(),
        });
    }

    let (body, sum) = decoded.split_at(decoded.len() - CHECKSUM_LEN);
    if checksum(body) != sum {
        return Err(Error::InvalidChecksum);
    }

    Ok((body[0], body[1..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(&[0x00]), "1");
        assert_eq!(encode(&[0x00, 0x00, 0x01]), "112");
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(encode(&[0xff; 4]), "7YXq9G");
    }

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("1").unwrap(), vec![0x00]);
        assert_eq!(decode("111").unwrap(), vec![0x00, 0x00, 0x00]);
        assert_eq!(decode("112").unwrap(), vec![0x00, 0x00, 0x01]);
        assert_eq!(decode("StV1DL6CwTryKyV").unwrap(), b"hello world".to_vec());
    }

    #[test]
    fn test_decode_rejects_excluded_characters() {
        for (input, bad, position) in [("1O1", 'O', 1), ("0abc", '0', 0), ("abI", 'I', 2), ("l", 'l', 0)] {
            assert_eq!(
                decode(input),
                Err(Error::InvalidCharacter { ch: bad, position })
            );
        }
        assert!(matches!(decode("ab€"), Err(Error::InvalidCharacter { ch: '€', .. })));
    }

    #[test]
    fn test_check_encode_p2pkh() {
        // HASH160 of the compressed generator point.
        let h160 = hex::decode("751e76e8199196d454941c45d1b3a323f1433bd6").unwrap();
        assert_eq!(check_encode(0x00, &h160), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_check_round_trip() {
        let payloads: [&[u8]; 4] = [&[], &[0x00; 20], &[0xab; 20], &[0x01, 0x02, 0x03]];
        for version in [0x00u8, 0x05, 0x6f, 0xc4, 0x80] {
            for payload in payloads {
                let encoded = check_encode(version, payload);

                let raw = decode(&encoded).unwrap();
                assert_eq!(raw.len(), 1 + payload.len() + CHECKSUM_LEN);
                assert_eq!(raw[0], version);
                assert_eq!(&raw[1..1 + payload.len()], payload);

                let (v, p) = check_decode(&encoded).unwrap();
                assert_eq!(v, version);
                assert_eq!(p, payload);
            }
        }
    }

    #[test]
    fn test_check_decode_detects_corruption() {
        let encoded = check_encode(0x00, &[0x42; 20]);
        let mut corrupted: Vec<u8> = encoded.clone().into_bytes();
        let last = corrupted.len() - 1;
        corrupted[last] = if corrupted[last] == b'2' { b'3' } else { b'2' };
        let corrupted = String::from_utf8(corrupted).unwrap();

        assert_eq!(check_decode(&corrupted), Err(Error::InvalidChecksum));
    }

    #[test]
    fn test_check_decode_too_short() {
        assert_eq!(
            check_decode("1111"),
            Err(Error::InvalidLength { expected: 5, actual: 4 })
        );
    }
}
