//! Result shapes handed to JavaScript.

use addr_core::{
    AddressRecord, DerivedAddress, DerivedAddressSet, Error, MnemonicResult, ValidationError,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
}

/// A valid, classified address.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    /// Always `true`.
    pub valid: bool,
    pub address: String,
    /// Display label, e.g. `Native SegWit (P2WPKH)`.
    #[serde(rename = "type")]
    pub address_type: String,
    /// Short script type, e.g. `P2WPKH`.
    pub script_type: String,
    pub description: String,
    pub network: String,
    pub encoding: String,
    pub characteristics: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_byte: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub witness_version: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_pub_key: Option<String>,
}

impl From<&AddressRecord> for AddressInfo {
    fn from(record: &AddressRecord) -> Self {
        AddressInfo {
            valid: true,
            address: record.address.clone(),
            address_type: record.type_label(),
            script_type: record.address_type.name().to_string(),
            description: record.description(),
            network: record.network_name().to_string(),
            encoding: record.encoding().name().to_string(),
            characteristics: record.characteristics().iter().map(|c| c.to_string()).collect(),
            version_byte: record.version_byte_hex(),
            payload_hex: record.payload_hex(),
            witness_version: record.witness_version(),
            program_hex: record.program_hex(),
            program_length: record.program_len(),
            script_pub_key: record.script_pubkey().map(hex::encode),
        }
    }
}

impl AddressInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(self)
    }
}

/// A rejected input and why.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Always `false`.
    pub valid: bool,
    /// Human-readable message.
    pub error: String,
    /// Machine-readable tag, e.g. `invalid_checksum`.
    pub reason: String,
    pub input: String,
}

impl ErrorInfo {
    pub fn new(input: &str, error: &Error) -> Self {
        ErrorInfo {
            valid: false,
            error: error.to_string(),
            reason: error.reason().to_string(),
            input: input.to_string(),
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(self)
    }
}

impl From<&ValidationError> for ErrorInfo {
    fn from(err: &ValidationError) -> Self {
        ErrorInfo::new(&err.input, &err.error)
    }
}

/// One derived address for display.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedAddressInfo {
    pub address: String,
    #[serde(rename = "type")]
    pub address_type: String,
    pub prefix: String,
    pub description: String,
}

impl From<&DerivedAddress> for DerivedAddressInfo {
    fn from(derived: &DerivedAddress) -> Self {
        DerivedAddressInfo {
            address: derived.address.clone(),
            address_type: derived.address_type.to_string(),
            prefix: derived.prefix.to_string(),
            description: derived.description.to_string(),
        }
    }
}

/// All four addresses derived from one public key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAddressesInfo {
    pub pubkey: String,
    pub pubkey_hash: String,
    pub p2pkh: DerivedAddressInfo,
    pub p2sh: DerivedAddressInfo,
    pub p2wpkh: DerivedAddressInfo,
    pub p2tr: DerivedAddressInfo,
}

impl From<&DerivedAddressSet> for DerivedAddressesInfo {
    fn from(set: &DerivedAddressSet) -> Self {
        DerivedAddressesInfo {
            pubkey: set.pubkey.clone(),
            pubkey_hash: set.pubkey_hash_hex(),
            p2pkh: (&set.p2pkh).into(),
            p2sh: (&set.p2sh).into(),
            p2wpkh: (&set.p2wpkh).into(),
            p2tr: (&set.p2tr).into(),
        }
    }
}

impl DerivedAddressesInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(self)
    }
}

/// A freshly generated mnemonic.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicInfo {
    pub mnemonic: String,
    pub words: Vec<String>,
    pub word_count: usize,
    pub entropy_hex: String,
    pub entropy_bits: usize,
    pub checksum_bits: usize,
}

impl From<&MnemonicResult> for MnemonicInfo {
    fn from(result: &MnemonicResult) -> Self {
        MnemonicInfo {
            mnemonic: result.phrase(),
            words: result.words.clone(),
            word_count: result.word_count(),
            entropy_hex: result.entropy_hex(),
            entropy_bits: result.entropy_bits,
            checksum_bits: result.checksum_bits,
        }
    }
}

impl MnemonicInfo {
    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(self)
    }
}

/// Outcome of checking an existing phrase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MnemonicCheck {
    pub valid: bool,
    pub word_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl MnemonicCheck {
    pub fn from_result<T>(phrase: &str, result: &Result<T, Error>) -> Self {
        let word_count = phrase.split_whitespace().count();
        match result {
            Ok(_) => MnemonicCheck {
                valid: true,
                word_count,
                error: None,
                reason: None,
            },
            Err(e) => MnemonicCheck {
                valid: false,
                word_count,
                error: Some(e.to_string()),
                reason: Some(e.reason().to_string()),
            },
        }
    }

    /// Convert to JS value.
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        to_js(self)
    }
}
