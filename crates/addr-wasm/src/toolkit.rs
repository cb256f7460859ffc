//! Mnemonic tooling bound to a loaded wordlist.

use addr_core::{generate_mnemonic, mnemonic_to_entropy, Wordlist};
use wasm_bindgen::prelude::*;

use crate::state::{MnemonicCheck, MnemonicInfo};

/// Holds the wordlist that mnemonic operations index into.
#[wasm_bindgen]
pub struct Toolkit {
    wordlist: Wordlist,
}

#[wasm_bindgen]
impl Toolkit {
    /// Create a toolkit from a newline separated 2048-word list.
    ///
    /// # Arguments
    /// * `text` - The wordlist file contents (e.g. the BIP39 English list)
    #[wasm_bindgen(js_name = withWordlist)]
    pub fn with_wordlist(text: &str) -> Result<Toolkit, JsValue> {
        let wordlist = Wordlist::from_text(text)
            .map_err(|e| JsValue::from_str(&format!("Could not load wordlist: {}", e)))?;
        log::info!("wordlist loaded");
        Ok(Toolkit { wordlist })
    }

    /// Generate a new mnemonic of 12, 15, 18, 21 or 24 words.
    #[wasm_bindgen(js_name = generateMnemonic)]
    pub fn generate_mnemonic(&self, word_count: usize) -> Result<JsValue, JsValue> {
        let result = generate_mnemonic(word_count, &self.wordlist)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        MnemonicInfo::from(&result).to_js()
    }

    /// Check the word count, words and checksum of an existing phrase.
    #[wasm_bindgen(js_name = validateMnemonic)]
    pub fn validate_mnemonic(&self, phrase: &str) -> Result<JsValue, JsValue> {
        let result = mnemonic_to_entropy(phrase, &self.wordlist);
        MnemonicCheck::from_result(phrase, &result).to_js()
    }
}
