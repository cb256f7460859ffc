//! Browser-side checks of the JS boundary.

#![cfg(target_arch = "wasm32")]

use addr_wasm::{hash160_hex, pubkey_to_addresses, validate_address, version, Toolkit};
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_json(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn validate_reports_both_outcomes() {
    let ok = to_json(validate_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq").unwrap());
    assert_eq!(ok["valid"], json!(true));
    assert_eq!(ok["type"], json!("Native SegWit (P2WPKH)"));

    let bad = to_json(validate_address("").unwrap());
    assert_eq!(bad["valid"], json!(false));
    assert_eq!(bad["reason"], json!("empty_input"));
}

#[wasm_bindgen_test]
fn derive_and_hash() {
    let g = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    assert!(pubkey_to_addresses(g).is_ok());
    assert!(pubkey_to_addresses("04").is_err());
    assert_eq!(
        hash160_hex(g).unwrap(),
        "751e76e8199196d454941c45d1b3a323f1433bd6"
    );
    assert!(!version().is_empty());
}

#[wasm_bindgen_test]
fn toolkit_generates_checkable_phrases() {
    let text: String = (0..2048).map(|i| format!("w{i}\n")).collect();
    let toolkit = Toolkit::with_wordlist(&text).unwrap();

    let generated = to_json(toolkit.generate_mnemonic(12).unwrap());
    let phrase = generated["mnemonic"].as_str().unwrap();
    let check = to_json(toolkit.validate_mnemonic(phrase).unwrap());
    assert_eq!(check["valid"], json!(true));

    assert!(toolkit.generate_mnemonic(13).is_err());
    assert!(Toolkit::with_wordlist("only\nthree\nwords").is_err());
}
