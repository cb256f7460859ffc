//! Address derivation from a compressed public key.
//!
//! Every output is a mainnet address. The P2TR output commits to the raw
//! x-only key with no BIP341 tweak applied.

use alloc::string::String;
use alloc::vec::Vec;

use crate::base58;
use crate::bech32;
use crate::error::{Error, Result};
use crate::hash::hash160;
use crate::network::Network;

/// Length of a compressed SEC1 public key.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

/// One derived address and how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddress {
    pub address: String,
    pub address_type: &'static str,
    pub prefix: &'static str,
    pub description: &'static str,
}

/// The four standard addresses for a single public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAddressSet {
    /// Lowercase hex of the public key.
    pub pubkey: String,
    /// HASH160 of the public key.
    pub pubkey_hash: [u8; 20],
    pub p2pkh: DerivedAddress,
    /// P2SH-wrapped P2WPKH.
    pub p2sh: DerivedAddress,
    pub p2wpkh: DerivedAddress,
    pub p2tr: DerivedAddress,
}

impl DerivedAddressSet {
    pub fn pubkey_hash_hex(&self) -> String {
        hex::encode(self.pubkey_hash)
    }

    /// The addresses in ascending order of SegWit adoption.
    pub fn addresses(&self) -> [&DerivedAddress; 4] {
        [&self.p2pkh, &self.p2sh, &self.p2wpkh, &self.p2tr]
    }
}

/// Parse `02`/`03` followed by 64 hex digits into key bytes.
fn parse_compressed_pubkey(input: &str) -> Result<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() != COMPRESSED_PUBKEY_LEN * 2
        || !(bytes.starts_with(b"02") || bytes.starts_with(b"03"))
        || !bytes.iter().all(u8::is_ascii_hexdigit)
    {
        return Err(Error::InvalidPubkeyFormat);
    }
    hex::decode(input).map_err(|_| Error::InvalidPubkeyFormat)
}

/// Derive P2PKH, P2SH-P2WPKH, P2WPKH and P2TR addresses from a hex
/// compressed public key.
pub fn pubkey_to_addresses(pubkey_hex: &str) -> Result<DerivedAddressSet> {
    let trimmed = pubkey_hex.trim();
    let pubkey = parse_compressed_pubkey(trimmed)?;
    let network = Network::Mainnet;
    let hrp = network.bech32_hrp();

    let pubkey_hash = hash160(&pubkey);

    // P2SH-P2WPKH redeem script: OP_0 <20-byte-hash>
    let mut redeem_script = Vec::with_capacity(22);
    redeem_script.push(0x00);
    redeem_script.push(0x14);
    redeem_script.extend_from_slice(&pubkey_hash);
    let script_hash = hash160(&redeem_script);

    let p2pkh = DerivedAddress {
        address: base58::check_encode(network.p2pkh_version(), &pubkey_hash),
        address_type: "Legacy (P2PKH)",
        prefix: "1",
        description: "Original format. Most compatible, highest fees.",
    };
    let p2sh = DerivedAddress {
        address: base58::check_encode(network.p2sh_version(), &script_hash),
        address_type: "P2SH-SegWit",
        prefix: "3",
        description: "SegWit wrapped in P2SH for backward compatibility.",
    };
    let p2wpkh = DerivedAddress {
        address: bech32::segwit_encode(hrp, 0, &pubkey_hash)?,
        address_type: "Native SegWit (P2WPKH)",
        prefix: "bc1q",
        description: "Lower fees (~38% savings). Bech32 encoding.",
    };
    let p2tr = DerivedAddress {
        address: bech32::segwit_encode(hrp, 1, &pubkey[1..])?,
        address_type: "Taproot (P2TR)",
        prefix: "bc1p",
        description: "Lowest fees, best privacy. Schnorr signatures.",
    };

    log::debug!("derived four addresses for pubkey hash {}", hex::encode(&pubkey_hash));

    Ok(DerivedAddressSet {
        pubkey: hex::encode(&pubkey),
        pubkey_hash,
        p2pkh,
        p2sh,
        p2wpkh,
        p2tr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{validate_address, AddressType};

    // Compressed secp256k1 generator point.
    const G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn test_generator_point_addresses() {
        let set = pubkey_to_addresses(G).unwrap();

        assert_eq!(set.pubkey, G);
        assert_eq!(set.pubkey_hash_hex(), "751e76e8199196d454941c45d1b3a323f1433bd6");
        assert_eq!(set.p2pkh.address, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(set.p2sh.address, "3JvL6Ymt8MVWiCNHC7oWU6nLeHNJKLZGLN");
        assert_eq!(set.p2wpkh.address, "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert_eq!(
            set.p2tr.address,
            "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0"
        );
    }

    #[test]
    fn test_odd_y_pubkey() {
        let pubkey = "03C6047F9441ED7D6D3045406E95C07CD85C778E4B8CEF3CA7ABAC09B95C709EE5";
        let set = pubkey_to_addresses(pubkey).unwrap();

        // Normalized to lowercase.
        assert_eq!(set.pubkey, pubkey.to_ascii_lowercase());
        assert_eq!(set.p2pkh.address, "1NjSB7UL4MtdjmPbTUfaHne9R5C2YGxUSA");
        assert_eq!(set.p2sh.address, "3QKUJNy5PAGrZeSvnReuV2aqLp9uEYFrPJ");
        assert_eq!(set.p2wpkh.address, "bc1qaesjq46ah99ealwecl6kyy4j8elldet0zuk529");
        assert_eq!(
            set.p2tr.address,
            "bc1pccz8l9zpa47k6vz9gphftsrumpw80rjt3nhnefat4symjhrsnmjsj88cv0"
        );
    }

    #[test]
    fn test_derived_addresses_reclassify() {
        let set = pubkey_to_addresses(&alloc::format!("  {}\n", G)).unwrap();

        let expected = [
            AddressType::P2PKH,
            AddressType::P2SH,
            AddressType::P2WPKH,
            AddressType::P2TR,
        ];
        for (derived, expected_type) in set.addresses().into_iter().zip(expected) {
            let record = validate_address(&derived.address).unwrap();
            assert_eq!(record.address_type, expected_type);
            assert_eq!(record.network, Some(Network::Mainnet));
            assert!(derived.address.starts_with(derived.prefix));
        }
    }

    #[test]
    fn test_labels() {
        let set = pubkey_to_addresses(G).unwrap();
        assert_eq!(set.p2pkh.address_type, "Legacy (P2PKH)");
        assert_eq!(set.p2sh.address_type, "P2SH-SegWit");
        assert_eq!(set.p2wpkh.address_type, "Native SegWit (P2WPKH)");
        assert_eq!(set.p2tr.address_type, "Taproot (P2TR)");
    }

    #[test]
    fn test_rejects_malformed_pubkeys() {
        let uncompressed = alloc::format!("04{}", &G[2..]);
        let bad_inputs = [
            "",
            "02",
            &G[..65],
            uncompressed.as_str(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f8179g",
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f8179800",
        ];
        for input in bad_inputs {
            assert_eq!(pubkey_to_addresses(input), Err(Error::InvalidPubkeyFormat), "{input}");
        }
    }
}
