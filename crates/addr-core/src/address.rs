//! Bitcoin address validation and classification.
//!
//! Supports:
//! - P2PKH (Pay to Public Key Hash) - Legacy addresses starting with 1 (mainnet) or m/n (testnet)
//! - P2SH (Pay to Script Hash) - Addresses starting with 3 (mainnet) or 2 (testnet)
//! - P2WPKH (Pay to Witness Public Key Hash) - Native SegWit v0, bc1q.../tb1q...
//! - P2WSH (Pay to Witness Script Hash) - Native SegWit v0, bc1q... (32-byte program)
//! - P2TR (Pay to Taproot) - SegWit v1, bc1p.../tb1p...
//!
//! Anything structurally valid but unrecognized (an unknown version byte, a
//! future witness version) is classified with a generic type rather than
//! rejected.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use thiserror::Error;

use crate::base58::{self, CHECKSUM_LEN};
use crate::bech32::{self, Variant};
use crate::error::Error;
use crate::hash::double_sha256;
use crate::network::Network;

/// Decoded length of every Base58Check address: version + 20-byte hash + checksum.
pub const BASE58_ADDRESS_LEN: usize = 1 + 20 + CHECKSUM_LEN;

/// Bitcoin address type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressType {
    /// Legacy P2PKH: OP_DUP OP_HASH160 <20-byte-hash> OP_EQUALVERIFY OP_CHECKSIG
    P2PKH,
    /// P2SH: OP_HASH160 <20-byte-hash> OP_EQUAL
    P2SH,
    /// Native SegWit v0 P2WPKH: OP_0 <20-byte-hash>
    P2WPKH,
    /// Native SegWit v0 P2WSH: OP_0 <32-byte-hash>
    P2WSH,
    /// Taproot P2TR: OP_1 <32-byte-x-only-pubkey>
    P2TR,
    /// Base58Check address with a version byte we don't recognize.
    UnknownVersion(u8),
    /// Witness version/program length combination without a named type.
    Witness { version: u8 },
}

impl AddressType {
    /// Short script-type name.
    pub fn name(&self) -> &'static str {
        match self {
            AddressType::P2PKH => "P2PKH",
            AddressType::P2SH => "P2SH",
            AddressType::P2WPKH => "P2WPKH",
            AddressType::P2WSH => "P2WSH",
            AddressType::P2TR => "P2TR",
            AddressType::UnknownVersion(_) => "Unknown",
            AddressType::Witness { .. } => "Witness",
        }
    }
}

/// The text encoding an address was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base58Check,
    Bech32,
    Bech32m,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Base58Check => "Base58Check",
            Encoding::Bech32 => "Bech32",
            Encoding::Bech32m => "Bech32m",
        }
    }
}

/// Encoding-specific fields of a classified address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressPayload {
    /// Version byte and the 20-byte hash that follows it.
    Base58 { version: u8, payload: Vec<u8> },
    /// Witness version and program.
    Segwit {
        witness_version: u8,
        program: Vec<u8>,
        variant: Variant,
    },
}

/// A successfully classified address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// The address as given (surrounding whitespace removed).
    pub address: String,
    pub address_type: AddressType,
    /// `None` when the version byte doesn't belong to a known network.
    pub network: Option<Network>,
    pub payload: AddressPayload,
}

impl AddressRecord {
    fn is_testnet(&self) -> bool {
        self.network == Some(Network::Testnet)
    }

    pub fn encoding(&self) -> Encoding {
        match &self.payload {
            AddressPayload::Base58 { .. } => Encoding::Base58Check,
            AddressPayload::Segwit { variant: Variant::Bech32, .. } => Encoding::Bech32,
            AddressPayload::Segwit { variant: Variant::Bech32m, .. } => Encoding::Bech32m,
        }
    }

    /// Human-readable type label, e.g. `Legacy (P2PKH)` or `Witness v2`.
    pub fn type_label(&self) -> String {
        match self.address_type {
            AddressType::P2PKH if self.is_testnet() => "Testnet (P2PKH)".into(),
            AddressType::P2SH if self.is_testnet() => "Testnet (P2SH)".into(),
            AddressType::P2PKH => "Legacy (P2PKH)".into(),
            AddressType::P2SH => "Script Hash (P2SH)".into(),
            AddressType::P2WPKH => "Native SegWit (P2WPKH)".into(),
            AddressType::P2WSH => "Native SegWit (P2WSH)".into(),
            AddressType::P2TR => "Taproot (P2TR)".into(),
            AddressType::UnknownVersion(version) => format!("Unknown (version: 0x{:02x})", version),
            AddressType::Witness { version } => format!("Witness v{}", version),
        }
    }

    pub fn description(&self) -> String {
        match self.address_type {
            AddressType::P2PKH if self.is_testnet() => {
                "Pay-to-Public-Key-Hash: testnet address".into()
            }
            AddressType::P2SH if self.is_testnet() => "Pay-to-Script-Hash: testnet address".into(),
            AddressType::P2PKH => "Pay-to-Public-Key-Hash: original Bitcoin address format".into(),
            AddressType::P2SH => {
                "Pay-to-Script-Hash: can wrap SegWit (P2SH-P2WPKH) or multisig scripts".into()
            }
            AddressType::P2WPKH => {
                "Pay-to-Witness-Public-Key-Hash: Segregated Witness v0 for single keys".into()
            }
            AddressType::P2WSH => {
                "Pay-to-Witness-Script-Hash: Segregated Witness v0 for scripts".into()
            }
            AddressType::P2TR => {
                "Pay-to-Taproot: witness v1, Schnorr signatures, enhanced privacy".into()
            }
            AddressType::UnknownVersion(_) => "Unknown address version".into(),
            AddressType::Witness { version } => {
                format!("Unknown witness version {} program", version)
            }
        }
    }

    /// Network name for display; `Unknown` for unrecognized version bytes.
    pub fn network_name(&self) -> &'static str {
        self.network.map_or("Unknown", |n| n.display_name())
    }

    /// Short facts about the address format.
    pub fn characteristics(&self) -> &'static [&'static str] {
        if self.is_testnet() {
            return &["Testnet address, no real value", "For testing and development only"];
        }
        match self.address_type {
            AddressType::P2PKH => &[
                "Starts with \"1\"",
                "Most compatible (supported by all wallets)",
                "Highest transaction fees",
                "Base58Check encoding",
            ],
            AddressType::P2SH => &[
                "Starts with \"3\"",
                "Can wrap SegWit for backward compatibility",
                "Moderate transaction fees",
                "Base58Check encoding",
            ],
            AddressType::P2WPKH => &[
                "Starts with \"bc1q\"",
                "Lower fees (~38% savings vs P2PKH)",
                "Native SegWit support",
                "Bech32 encoding (lowercase)",
            ],
            AddressType::P2WSH => &[
                "Starts with \"bc1q\"",
                "Native SegWit for complex scripts",
                "Lower fees than legacy",
                "Bech32 encoding (lowercase)",
            ],
            AddressType::P2TR => &[
                "Starts with \"bc1p\"",
                "Lowest fees + best privacy",
                "Schnorr signatures",
                "Bech32m encoding",
                "Enhanced scripting with MAST",
            ],
            AddressType::UnknownVersion(_) | AddressType::Witness { .. } => &[],
        }
    }

    pub fn version_byte(&self) -> Option<u8> {
        match &self.payload {
            AddressPayload::Base58 { version, .. } => Some(*version),
            AddressPayload::Segwit { .. } => None,
        }
    }

    /// Version byte formatted as `0x..`.
    pub fn version_byte_hex(&self) -> Option<String> {
        self.version_byte().map(|v| format!("0x{:02x}", v))
    }

    pub fn payload_hex(&self) -> Option<String> {
        match &self.payload {
            AddressPayload::Base58 { payload, .. } => Some(hex::encode(payload)),
            AddressPayload::Segwit { .. } => None,
        }
    }

    pub fn witness_version(&self) -> Option<u8> {
        match &self.payload {
            AddressPayload::Segwit { witness_version, .. } => Some(*witness_version),
            AddressPayload::Base58 { .. } => None,
        }
    }

    pub fn program_hex(&self) -> Option<String> {
        match &self.payload {
            AddressPayload::Segwit { program, .. } => Some(hex::encode(program)),
            AddressPayload::Base58 { .. } => None,
        }
    }

    pub fn program_len(&self) -> Option<usize> {
        match &self.payload {
            AddressPayload::Segwit { program, .. } => Some(program.len()),
            AddressPayload::Base58 { .. } => None,
        }
    }

    /// The scriptPubKey paying to this address.
    ///
    /// `None` for unknown version bytes and for witness versions above 16,
    /// which have no push opcode.
    pub fn script_pubkey(&self) -> Option<Vec<u8>> {
        match (&self.payload, self.address_type) {
            (AddressPayload::Base58 { payload: hash, .. }, AddressType::P2PKH) => {
                // OP_DUP OP_HASH160 <20-byte-hash> OP_EQUALVERIFY OP_CHECKSIG
                let mut script = Vec::with_capacity(25);
                script.push(0x76); // OP_DUP
                script.push(0xa9); // OP_HASH160
                script.push(0x14); // Push 20 bytes
                script.extend_from_slice(hash);
                script.push(0x88); // OP_EQUALVERIFY
                script.push(0xac); // OP_CHECKSIG
                Some(script)
            }
            (AddressPayload::Base58 { payload: hash, .. }, AddressType::P2SH) => {
                // OP_HASH160 <20-byte-hash> OP_EQUAL
                let mut script = Vec::with_capacity(23);
                script.push(0xa9); // OP_HASH160
                script.push(0x14); // Push 20 bytes
                script.extend_from_slice(hash);
                script.push(0x87); // OP_EQUAL
                Some(script)
            }
            (AddressPayload::Base58 { .. }, _) => None,
            (AddressPayload::Segwit { witness_version, program, .. }, _) => {
                // OP_0 = 0x00, OP_1 = 0x51, OP_2 = 0x52, etc.
                let version_opcode = match *witness_version {
                    0 => 0x00,
                    v @ 1..=16 => 0x50 + v,
                    _ => return None,
                };
                let mut script = Vec::with_capacity(2 + program.len());
                script.push(version_opcode);
                script.push(program.len() as u8);
                script.extend_from_slice(program);
                Some(script)
            }
        }
    }
}

/// A rejected address together with the input that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address {input:?}: {error}")]
pub struct ValidationError {
    pub input: String,
    #[source]
    pub error: Error,
}

/// Validate and classify a Bitcoin address.
///
/// `bc1`/`tb1` prefixes (any case) take the Bech32 path; everything else is
/// tried as Base58Check.
pub fn validate_address(address: &str) -> Result<AddressRecord, ValidationError> {
    let trimmed = address.trim();
    let reject = |error: Error| ValidationError {
        input: address.to_string(),
        error,
    };

    if trimmed.is_empty() {
        return Err(reject(Error::EmptyInput));
    }

    // Try Bech32/Bech32m first (bc1.../tb1...)
    let result = match Network::from_segwit_prefix(trimmed) {
        Some(network) => {
            log::trace!("{} routed to the bech32 path", network.bech32_hrp());
            classify_bech32(trimmed, network)
        }
        None => classify_base58(trimmed),
    };

    match result {
        Ok(record) => {
            log::debug!(
                "classified {} as {} ({})",
                record.address,
                record.address_type.name(),
                record.encoding().name()
            );
            Ok(record)
        }
        Err(error) => {
            log::debug!("rejected address: {}", error);
            Err(reject(error))
        }
    }
}

/// Classify a Base58Check encoded address (P2PKH or P2SH).
fn classify_base58(address: &str) -> Result<AddressRecord, Error> {
    let decoded = base58::decode(address)?;

    if decoded.len() != BASE58_ADDRESS_LEN {
        return Err(Error::InvalidLength {
            expected: BASE58_ADDRESS_LEN,
            actual: decoded.len(),
        });
    }

    // Verify checksum (last 4 bytes)
    let (body, checksum) = decoded.split_at(BASE58_ADDRESS_LEN - CHECKSUM_LEN);
    if checksum != &double_sha256(body)[..CHECKSUM_LEN] {
        return Err(Error::InvalidChecksum);
    }

    let version = body[0];
    let (address_type, network) = Network::ALL
        .into_iter()
        .find_map(|network| {
            if version == network.p2pkh_version() {
                Some((AddressType::P2PKH, Some(network)))
            } else if version == network.p2sh_version() {
                Some((AddressType::P2SH, Some(network)))
            } else {
                None
            }
        })
        .unwrap_or((AddressType::UnknownVersion(version), None));

    Ok(AddressRecord {
        address: address.to_string(),
        address_type,
        network,
        payload: AddressPayload::Base58 {
            version,
            payload: body[1..].to_vec(),
        },
    })
}

/// Classify a Bech32/Bech32m encoded address (P2WPKH, P2WSH, P2TR or a
/// generic witness program).
fn classify_bech32(address: &str, network: Network) -> Result<AddressRecord, Error> {
    let decoded = bech32::segwit_decode(address)?;

    if Network::from_bech32_hrp(&decoded.hrp) != Some(network) {
        return Err(Error::InvalidStructure("human-readable part does not match prefix"));
    }

    let address_type = match (decoded.witness_version, decoded.program.len()) {
        (0, 20) => AddressType::P2WPKH,
        (0, 32) => AddressType::P2WSH,
        (1, 32) => AddressType::P2TR,
        (version, _) => AddressType::Witness { version },
    };

    Ok(AddressRecord {
        address: address.to_string(),
        address_type,
        network: Some(network),
        payload: AddressPayload::Segwit {
            witness_version: decoded.witness_version,
            program: decoded.program,
            variant: decoded.variant,
        },
    })
}
