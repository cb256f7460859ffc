//! Core primitives for inspecting and generating Bitcoin addresses.
//!
//! This crate provides pure Rust implementations of:
//! - SHA-256, RIPEMD-160 and HASH160
//! - Base58Check and Bech32/Bech32m codecs
//! - Bitcoin address validation (P2PKH, P2SH, P2WPKH, P2WSH, P2TR)
//! - Address derivation from a compressed public key
//! - BIP39 mnemonic generation against an injected wordlist

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod address;
pub mod base58;
pub mod bech32;
pub mod derive;
pub mod error;
pub mod hash;
pub mod hexutil;
pub mod mnemonic;
pub mod network;

pub use address::{
    validate_address, AddressPayload, AddressRecord, AddressType, Encoding, ValidationError,
};
pub use bech32::{SegwitAddress, Variant};
pub use derive::{pubkey_to_addresses, DerivedAddress, DerivedAddressSet};
pub use error::{Error, Result};
pub use hash::{double_sha256, hash160, ripemd160, sha256, Ripemd160, Sha256};
pub use hexutil::{from_hex, hash160_hex, sha256_hex, to_hex};
pub use mnemonic::{
    entropy_to_mnemonic, generate_mnemonic, generate_mnemonic_with, mnemonic_to_entropy,
    EntropySource, MnemonicResult, OsEntropy, WordCount, Wordlist,
};
pub use network::Network;
pub use zeroize::Zeroizing;
