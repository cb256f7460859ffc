//! WebAssembly bindings for the Bitcoin address toolkit.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Validating and classifying addresses
//! - Deriving addresses from a compressed public key
//! - Generating and checking BIP39 mnemonics
//! - Hashing hex input with SHA-256 and HASH160

use wasm_bindgen::prelude::*;

pub mod logger;
pub mod state;
pub mod toolkit;

// Re-export main types for JS access
pub use toolkit::Toolkit;

use state::{AddressInfo, DerivedAddressesInfo, ErrorInfo};

/// Initialize the WASM module with better panic messages and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logger::init(log::LevelFilter::Info);
}

/// Change how much of the core's logging reaches the console.
///
/// Accepts `error`, `warn`, `info`, `debug`, `trace` or `off`.
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level
        .parse::<log::LevelFilter>()
        .map_err(|_| JsValue::from_str("Invalid log level"))?;
    logger::init(filter);
    Ok(())
}

/// Validate and classify a Bitcoin address.
///
/// Returns `{ valid: true, ... }` or `{ valid: false, error, reason, input }`.
#[wasm_bindgen(js_name = validateAddress)]
pub fn validate_address(address: &str) -> Result<JsValue, JsValue> {
    match addr_core::validate_address(address) {
        Ok(record) => AddressInfo::from(&record).to_js(),
        Err(e) => ErrorInfo::from(&e).to_js(),
    }
}

/// Derive P2PKH, P2SH-P2WPKH, P2WPKH and P2TR addresses from a compressed
/// public key in hex.
#[wasm_bindgen(js_name = pubkeyToAddresses)]
pub fn pubkey_to_addresses(pubkey: &str) -> Result<JsValue, JsValue> {
    let set = addr_core::pubkey_to_addresses(pubkey)
        .map_err(|e| JsValue::from_str(&format!("Invalid public key: {}", e)))?;
    DerivedAddressesInfo::from(&set).to_js()
}

/// SHA-256 of hex input, as hex.
#[wasm_bindgen(js_name = sha256Hex)]
pub fn sha256_hex(data: &str) -> Result<String, JsValue> {
    addr_core::sha256_hex(data).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// HASH160 of hex input, as hex.
#[wasm_bindgen(js_name = hash160Hex)]
pub fn hash160_hex(data: &str) -> Result<String, JsValue> {
    addr_core::hash160_hex(data).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
