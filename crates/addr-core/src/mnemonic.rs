//! BIP39 mnemonic phrases.
//!
//! Entropy plus a SHA-256 checksum is split into 11-bit indices into an
//! injected 2048-word list. Seed derivation (PBKDF2) is out of scope.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};
use crate::hash::sha256;

/// Number of words a BIP39 wordlist must hold.
pub const WORDLIST_LEN: usize = 2048;

const BITS_PER_WORD: u32 = 11;
const WORD_MASK: u32 = (1 << BITS_PER_WORD) - 1;

/// Supported mnemonic lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve,
    /// 15 words (160-bit entropy)
    Fifteen,
    /// 18 words (192-bit entropy)
    Eighteen,
    /// 21 words (224-bit entropy)
    TwentyOne,
    /// 24 words (256-bit entropy)
    TwentyFour,
}

impl WordCount {
    pub const ALL: [WordCount; 5] = [
        WordCount::Twelve,
        WordCount::Fifteen,
        WordCount::Eighteen,
        WordCount::TwentyOne,
        WordCount::TwentyFour,
    ];

    pub fn from_count(count: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|wc| wc.words() == count)
            .ok_or(Error::InvalidWordCount(count))
    }

    fn from_entropy_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|wc| wc.entropy_bytes() == len)
    }

    pub const fn words(self) -> usize {
        match self {
            WordCount::Twelve => 12,
            WordCount::Fifteen => 15,
            WordCount::Eighteen => 18,
            WordCount::TwentyOne => 21,
            WordCount::TwentyFour => 24,
        }
    }

    pub const fn entropy_bits(self) -> usize {
        self.words() * 32 / 3
    }

    pub const fn entropy_bytes(self) -> usize {
        self.entropy_bits() / 8
    }

    pub const fn checksum_bits(self) -> usize {
        self.entropy_bits() / 32
    }
}

impl TryFrom<usize> for WordCount {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        Self::from_count(count)
    }
}

/// An ordered list of exactly 2048 words.
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    index: BTreeMap<String, u16>,
}

impl Wordlist {
    pub fn new(words: Vec<String>) -> Result<Self> {
        if words.len() != WORDLIST_LEN {
            return Err(Error::WordlistUnavailable(words.len()));
        }

        // Keys are lowercase so lookups ignore case; the first occurrence
        // wins for entries that collide.
        let mut index = BTreeMap::new();
        for (i, word) in words.iter().enumerate() {
            index.entry(word.to_lowercase()).or_insert(i as u16);
        }
        Ok(Wordlist { words, index })
    }

    /// Parse a newline separated wordlist, ignoring blank lines and
    /// surrounding whitespace.
    pub fn from_text(text: &str) -> Result<Self> {
        let words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();
        Self::new(words)
    }

    /// The word at an 11-bit index.
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// Case-insensitive reverse lookup.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word.to_lowercase().as_str()).copied()
    }
}

/// Source of random bytes for new mnemonics.
pub trait EntropySource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        getrandom::getrandom(dest).map_err(|e| {
            log::warn!("secure random source failed: {}", e);
            Error::EntropyUnavailable
        })
    }
}

/// A generated or decoded mnemonic. Words and entropy are wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct MnemonicResult {
    pub words: Vec<String>,
    pub entropy: Vec<u8>,
    pub entropy_bits: usize,
    pub checksum_bits: usize,
}

impl MnemonicResult {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words joined by single spaces.
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    pub fn entropy_hex(&self) -> String {
        hex::encode(&self.entropy)
    }
}

// Never print the words or entropy.
impl fmt::Debug for MnemonicResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MnemonicResult")
            .field("word_count", &self.words.len())
            .field("entropy_bits", &self.entropy_bits)
            .field("checksum_bits", &self.checksum_bits)
            .field("words", &"[REDACTED]")
            .finish()
    }
}

/// Generate a mnemonic of `word_count` words from the OS random source.
pub fn generate_mnemonic(word_count: usize, wordlist: &Wordlist) -> Result<MnemonicResult> {
    generate_mnemonic_with(word_count, wordlist, &mut OsEntropy)
}

/// Generate a mnemonic of `word_count` words from `source`.
pub fn generate_mnemonic_with(
    word_count: usize,
    wordlist: &Wordlist,
    source: &mut impl EntropySource,
) -> Result<MnemonicResult> {
    let count = WordCount::from_count(word_count)?;

    let mut buffer = Zeroizing::new([0u8; 32]);
    let entropy = &mut buffer[..count.entropy_bytes()];
    source.fill_bytes(entropy)?;

    let result = entropy_to_mnemonic(entropy, wordlist)?;
    log::debug!("generated {}-word mnemonic", result.word_count());
    Ok(result)
}

/// Deterministically map 16, 20, 24, 28 or 32 bytes of entropy to words.
pub fn entropy_to_mnemonic(entropy: &[u8], wordlist: &Wordlist) -> Result<MnemonicResult> {
    let count = WordCount::from_entropy_len(entropy.len()).ok_or_else(|| Error::InvalidLength {
        expected: WordCount::ALL
            .into_iter()
            .map(WordCount::entropy_bytes)
            .find(|&len| len >= entropy.len())
            .unwrap_or(WordCount::TwentyFour.entropy_bytes()),
        actual: entropy.len(),
    })?;

    let checksum_bits = count.checksum_bits() as u32;
    let checksum = sha256(entropy)[0] >> (8 - checksum_bits);

    let mut indices: Zeroizing<Vec<u16>> = Zeroizing::new(Vec::with_capacity(count.words()));
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut push_bits = |value: u32, width: u32, indices: &mut Vec<u16>| {
        acc = (acc << width) | value;
        bits += width;
        while bits >= BITS_PER_WORD {
            bits -= BITS_PER_WORD;
            indices.push(((acc >> bits) & WORD_MASK) as u16);
        }
        acc &= (1 << bits) - 1;
    };
    for &byte in entropy {
        push_bits(byte as u32, 8, &mut *indices);
    }
    push_bits(checksum as u32, checksum_bits, &mut *indices);
    acc.zeroize();

    let words = indices
        .iter()
        .map(|&i| wordlist.word(i).map(ToString::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::WordlistUnavailable(wordlist.words.len()))?;

    Ok(MnemonicResult {
        words,
        entropy: entropy.to_vec(),
        entropy_bits: count.entropy_bits(),
        checksum_bits: count.checksum_bits(),
    })
}

/// Recover the entropy behind a phrase, verifying its checksum.
///
/// Words may be separated by any whitespace and are matched case-insensitively.
/// The returned entropy is wiped when dropped.
pub fn mnemonic_to_entropy(phrase: &str, wordlist: &Wordlist) -> Result<Zeroizing<Vec<u8>>> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let count = WordCount::from_count(words.len())?;

    let mut entropy = Zeroizing::new(Vec::with_capacity(count.entropy_bytes()));
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &word in &words {
        let index = wordlist
            .index_of(word)
            .ok_or_else(|| Error::UnknownWord(word.to_lowercase()))?;
        acc = (acc << BITS_PER_WORD) | index as u32;
        bits += BITS_PER_WORD;
        while bits >= 8 && entropy.len() < count.entropy_bytes() {
            bits -= 8;
            entropy.push((acc >> bits) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    // What remains is exactly the checksum.
    let expected = sha256(&entropy)[0] >> (8 - count.checksum_bits());
    let matches = acc == expected as u32;
    acc.zeroize();
    if !matches {
        return Err(Error::InvalidChecksum);
    }
    Ok(entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    fn fixture() -> Wordlist {
        Wordlist::new((0..WORDLIST_LEN).map(|i| format!("w{i}")).collect()).unwrap()
    }

    fn words(indices: &[u16]) -> Vec<String> {
        indices.iter().map(|i| format!("w{i}")).collect()
    }

    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
            dest.fill(self.0);
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill_bytes(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::EntropyUnavailable)
        }
    }

    #[test]
    fn test_word_count_table() {
        let table: Vec<_> = WordCount::ALL
            .iter()
            .map(|wc| (wc.words(), wc.entropy_bits(), wc.checksum_bits()))
            .collect();
        assert_eq!(
            table,
            vec![(12, 128, 4), (15, 160, 5), (18, 192, 6), (21, 224, 7), (24, 256, 8)]
        );
        assert_eq!(WordCount::try_from(13), Err(Error::InvalidWordCount(13)));
    }

    #[test]
    fn test_zero_entropy() {
        let result = entropy_to_mnemonic(&[0u8; 16], &fixture()).unwrap();

        let mut expected = vec![0u16; 11];
        expected.push(3);
        assert_eq!(result.words, words(&expected));
        assert_eq!(result.entropy_bits, 128);
        assert_eq!(result.checksum_bits, 4);
        assert_eq!(result.entropy_hex(), "00".repeat(16));
    }

    #[test]
    fn test_known_index_vectors() {
        let list = fixture();

        let result = entropy_to_mnemonic(&[0x7f; 16], &list).unwrap();
        assert_eq!(
            result.words,
            words(&[1019, 2015, 1790, 2039, 1983, 1533, 2031, 1919, 1019, 2015, 1790, 2040])
        );

        let result = entropy_to_mnemonic(&[0xff; 32], &list).unwrap();
        let mut expected = vec![2047u16; 23];
        expected.push(1967);
        assert_eq!(result.words, words(&expected));
        assert_eq!(result.checksum_bits, 8);

        let result = entropy_to_mnemonic(&[0x80; 20], &list).unwrap();
        assert_eq!(
            result.words,
            words(&[1028, 32, 257, 8, 64, 514, 16, 128, 1028, 32, 257, 8, 64, 514, 11])
        );
    }

    #[test]
    fn test_phrase_round_trip() {
        let list = fixture();
        let entropy: Vec<u8> = (0..28).collect();
        let result = entropy_to_mnemonic(&entropy, &list).unwrap();

        assert_eq!(result.word_count(), 21);
        assert_eq!(result.words[..3], words(&[0, 64, 1030])[..]);
        assert_eq!(*mnemonic_to_entropy(&result.phrase(), &list).unwrap(), entropy);
    }

    #[test]
    fn test_phrase_whitespace_and_case() {
        let list = fixture();
        let phrase = "W0 w0 w0 w0\tw0 w0 w0 w0 w0 w0 w0\n  w3 ";
        assert_eq!(*mnemonic_to_entropy(phrase, &list).unwrap(), vec![0u8; 16]);
    }

    #[test]
    fn test_phrase_errors() {
        let list = fixture();

        let bad_checksum = words(&[0; 12]).join(" ");
        assert_eq!(mnemonic_to_entropy(&bad_checksum, &list), Err(Error::InvalidChecksum));

        let short = words(&[0; 11]).join(" ");
        assert_eq!(mnemonic_to_entropy(&short, &list), Err(Error::InvalidWordCount(11)));

        let unknown = "w0 w0 w0 w0 w0 w0 w0 w0 w0 w0 w0 bogus";
        assert_eq!(
            mnemonic_to_entropy(unknown, &list),
            Err(Error::UnknownWord("bogus".into()))
        );
    }

    #[test]
    fn test_invalid_entropy_length() {
        assert_eq!(
            entropy_to_mnemonic(&[0u8; 17], &fixture()),
            Err(Error::InvalidLength { expected: 20, actual: 17 })
        );
        assert_eq!(
            entropy_to_mnemonic(&[0u8; 33], &fixture()),
            Err(Error::InvalidLength { expected: 32, actual: 33 })
        );
    }

    #[test]
    fn test_generate_with_injected_source() {
        let list = fixture();
        for wc in WordCount::ALL {
            let result = generate_mnemonic_with(wc.words(), &list, &mut FixedEntropy(0)).unwrap();
            assert_eq!(result.word_count(), wc.words());
            assert_eq!(result.entropy.len(), wc.entropy_bytes());
            assert_eq!(result.entropy_bits, wc.entropy_bits());
        }

        let result = generate_mnemonic_with(12, &list, &mut FixedEntropy(0x7f)).unwrap();
        assert_eq!(result.words[11], "w2040");
    }

    #[test]
    fn test_generate_rejects_bad_word_count() {
        let list = fixture();
        for count in [0, 11, 13, 25] {
            assert_eq!(
                generate_mnemonic_with(count, &list, &mut FixedEntropy(0)),
                Err(Error::InvalidWordCount(count))
            );
        }
    }

    #[test]
    fn test_entropy_failure() {
        assert_eq!(
            generate_mnemonic_with(12, &fixture(), &mut BrokenEntropy),
            Err(Error::EntropyUnavailable)
        );
    }

    #[test]
    fn test_os_entropy_produces_distinct_phrases() {
        let list = fixture();
        let a = generate_mnemonic(24, &list).unwrap();
        let b = generate_mnemonic(24, &list).unwrap();

        assert_ne!(a.entropy, b.entropy);
        assert_eq!(*mnemonic_to_entropy(&a.phrase(), &list).unwrap(), a.entropy);
    }

    #[test]
    fn test_os_entropy_twelve_words() {
        let list = fixture();
        let a = generate_mnemonic(12, &list).unwrap();
        let b = generate_mnemonic(12, &list).unwrap();

        for result in [&a, &b] {
            assert_eq!(result.word_count(), 12);
            assert_eq!(result.entropy.len(), 16);
            assert_eq!(result.entropy_bits, 128);
            assert_eq!(result.checksum_bits, 4);
        }
        assert_ne!(a.entropy, b.entropy);
        assert_eq!(*mnemonic_to_entropy(&b.phrase(), &list).unwrap(), b.entropy);
    }

    #[test]
    fn test_secrets_are_wiped() {
        fn wipes_on_drop<T: ZeroizeOnDrop>() {}
        wipes_on_drop::<MnemonicResult>();
        wipes_on_drop::<Zeroizing<Vec<u8>>>();

        let mut result = entropy_to_mnemonic(&[0x7f; 16], &fixture()).unwrap();
        result.zeroize();
        assert!(result.words.is_empty());
        assert!(result.entropy.is_empty());
        assert_eq!((result.entropy_bits, result.checksum_bits), (0, 0));

        let mut expected = vec![0u16; 11];
        expected.push(3);
        let mut entropy = mnemonic_to_entropy(&words(&expected).join(" "), &fixture()).unwrap();
        assert_eq!(*entropy, vec![0u8; 16]);
        entropy.zeroize();
        assert!(entropy.is_empty());
    }

    #[test]
    fn test_wordlist_size_is_enforced() {
        assert_eq!(
            Wordlist::new(words(&[0, 1, 2])).unwrap_err(),
            Error::WordlistUnavailable(3)
        );

        let text: String = (0..WORDLIST_LEN).map(|i| format!("  w{i}\r\n")).collect();
        let list = Wordlist::from_text(&format!("\n{text}\n\n")).unwrap();
        assert_eq!(list.word(2047), Some("w2047"));
        assert_eq!(list.index_of("w5"), Some(5));
        assert_eq!(list.word(2048), None);
    }

    #[test]
    fn test_wordlist_lookup_ignores_entry_case() {
        let list = Wordlist::new((0..WORDLIST_LEN).map(|i| format!("Word{i}")).collect()).unwrap();
        assert_eq!(list.word(7), Some("Word7"));
        assert_eq!(list.index_of("word7"), Some(7));
        assert_eq!(list.index_of("WORD7"), Some(7));

        let result = entropy_to_mnemonic(&[0x7f; 16], &list).unwrap();
        assert_eq!(result.words[11], "Word2040");
        assert_eq!(*mnemonic_to_entropy(&result.phrase(), &list).unwrap(), vec![0x7f; 16]);
        assert_eq!(
            *mnemonic_to_entropy(&result.phrase().to_uppercase(), &list).unwrap(),
            vec![0x7f; 16]
        );
    }

    #[test]
    fn test_debug_redacts_words() {
        let result = entropy_to_mnemonic(&[0u8; 16], &fixture()).unwrap();
        let debug = format!("{:?}", result);
        assert!(!debug.contains("w0"));
        assert!(debug.contains("REDACTED"));
    }
}
