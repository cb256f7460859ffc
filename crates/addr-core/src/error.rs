//! Error taxonomy shared by every component of the crate.

use alloc::string::String;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong while decoding, classifying or deriving.
///
/// Structurally valid but unrecognized data (an unknown version byte, a
/// future witness version) is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Nothing to decode.
    #[error("empty input")]
    EmptyInput,

    /// A character outside the Base58 or Bech32 alphabet.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// Decoded data has the wrong number of bytes.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Checksum mismatch (Base58Check, Bech32/Bech32m or BIP39).
    #[error("invalid checksum")]
    InvalidChecksum,

    /// Malformed Bech32 separator, HRP or grouping.
    #[error("malformed structure: {0}")]
    InvalidStructure(&'static str),

    /// Non-zero or excess leftover bits after 5-to-8 bit regrouping.
    #[error("invalid padding in bit conversion")]
    InvalidPadding,

    /// Not a 33-byte compressed SEC1 public key in hex.
    #[error("invalid compressed public key: expected 66 hex characters starting with 02 or 03")]
    InvalidPubkeyFormat,

    /// Mnemonic length outside {12, 15, 18, 21, 24}.
    #[error("invalid word count {0}: expected 12, 15, 18, 21 or 24")]
    InvalidWordCount(usize),

    /// The injected wordlist is missing or does not hold 2048 words.
    #[error("wordlist unavailable: expected 2048 words, got {0}")]
    WordlistUnavailable(usize),

    /// A mnemonic word that is not in the wordlist.
    #[error("word {0:?} is not in the wordlist")]
    UnknownWord(String),

    /// The operating system random source failed.
    #[error("secure random source unavailable")]
    EntropyUnavailable,

    /// A network name that is neither mainnet nor testnet.
    #[error("unknown network {0:?}")]
    UnknownNetwork(String),
}

impl Error {
    /// Stable machine-readable tag for this error.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::EmptyInput => "empty_input",
            Error::InvalidCharacter { .. } => "invalid_character",
            Error::InvalidLength { .. } => "invalid_length",
            Error::InvalidChecksum => "invalid_checksum",
            Error::InvalidStructure(_) => "invalid_structure",
            Error::InvalidPadding => "invalid_padding",
            Error::InvalidPubkeyFormat => "invalid_pubkey_format",
            Error::InvalidWordCount(_) => "invalid_word_count",
            Error::WordlistUnavailable(_) => "wordlist_unavailable",
            Error::UnknownWord(_) => "unknown_word",
            Error::EntropyUnavailable => "entropy_unavailable",
            Error::UnknownNetwork(_) => "unknown_network",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidLength { expected: 25, actual: 24 };
        assert_eq!(err.to_string(), "invalid length: expected 25 bytes, got 24");

        let err = Error::InvalidCharacter { ch: '0', position: 3 };
        assert_eq!(err.to_string(), "invalid character '0' at position 3");
    }

    #[test]
    fn test_reason_tags() {
        assert_eq!(Error::EmptyInput.reason(), "empty_input");
        assert_eq!(Error::InvalidStructure("no separator").reason(), "invalid_structure");
        assert_eq!(Error::WordlistUnavailable(0).reason(), "wordlist_unavailable");
        assert_eq!(Error::UnknownNetwork("regtest".into()).reason(), "unknown_network");
    }
}
