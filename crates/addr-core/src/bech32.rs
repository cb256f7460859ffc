//! Bech32 (BIP173) and Bech32m (BIP350) encoding of SegWit addresses.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};

pub const BECH32_CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATOR: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

const BECH32_CONST: u32 = 1;
const BECH32M_CONST: u32 = 0x2bc830a3;

/// Number of 5-bit checksum symbols at the end of every string.
pub const CHECKSUM_LEN: usize = 6;

/// Which checksum constant a string is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// BIP173, witness version 0.
    Bech32,
    /// BIP350, witness versions 1 through 16.
    Bech32m,
}

impl Variant {
    /// The variant a SegWit address of this witness version must use.
    pub fn for_witness_version(version: u8) -> Self {
        if version == 0 {
            Variant::Bech32
        } else {
            Variant::Bech32m
        }
    }

    fn constant(self) -> u32 {
        match self {
            Variant::Bech32 => BECH32_CONST,
            Variant::Bech32m => BECH32M_CONST,
        }
    }

    fn from_residue(residue: u32) -> Option<Self> {
        match residue {
            BECH32_CONST => Some(Variant::Bech32),
            BECH32M_CONST => Some(Variant::Bech32m),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Bech32 => "Bech32",
            Variant::Bech32m => "Bech32m",
        }
    }
}

impl core::fmt::Display for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded SegWit address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegwitAddress {
    pub hrp: String,
    pub witness_version: u8,
    pub program: Vec<u8>,
    pub variant: Variant,
}

/// Expand the human-readable part for checksum computation.
pub fn hrp_expand(hrp: &str) -> Vec<u8> {
    let bytes = hrp.as_bytes();
    let mut result = Vec::with_capacity(bytes.len() * 2 + 1);

    for &c in bytes {
        result.push(c >> 5);
    }
    result.push(0);
    for &c in bytes {
        result.push(c & 31);
    }

    result
}

/// BCH checksum residue over a sequence of 5-bit values.
pub fn polymod(values: impl IntoIterator<Item = u8>) -> u32 {
    let mut chk: u32 = 1;

    for value in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ (value as u32);
        for (i, &g) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= g;
            }
        }
    }

    chk
}

fn create_checksum(hrp: &str, data: &[u8], variant: Variant) -> [u8; CHECKSUM_LEN] {
    let values = hrp_expand(hrp)
        .into_iter()
        .chain(data.iter().copied())
        .chain([0u8; CHECKSUM_LEN]);
    let residue = polymod(values) ^ variant.constant();

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, symbol) in checksum.iter_mut().enumerate() {
        *symbol = ((residue >> (5 * (5 - i))) & 31) as u8;
    }
    checksum
}

/// Regroup a bit stream from `from_bits`-wide to `to_bits`-wide values.
///
/// With `pad`, trailing bits are zero-filled into a final group. Without it,
/// a full leftover group or any non-zero leftover bit is an error. Both
/// widths must be in `1..=8`.
pub fn convert_bits(data: &[u8], from_bits: u8, to_bits: u8, pad: bool) -> Result<Vec<u8>> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(Error::InvalidStructure("group width outside 1..=8 bits"));
    }
    let mut acc: u32 = 0;
    let mut bits: u8 = 0;
    let mut result = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);
    let max_value = (1u32 << to_bits) - 1;

    for &value in data {
        if (value as u32) >> from_bits != 0 {
            return Err(Error::InvalidStructure("value wider than source group"));
        }
        acc = ((acc << from_bits) | value as u32) & 0xFFFF;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & max_value) != 0 {
        return Err(Error::InvalidPadding);
    }

    Ok(result)
}

/// Encode 5-bit `data` under `hrp` with the given checksum variant.
pub fn encode(hrp: &str, data: &[u8], variant: Variant) -> String {
    let checksum = create_checksum(hrp, data, variant);

    let mut out = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LEN);
    out.push_str(hrp);
    out.push('1');
    for &symbol in data.iter().chain(checksum.iter()) {
        out.push(BECH32_CHARSET[symbol as usize] as char);
    }
    out
}

/// Decode a Bech32 or Bech32m string into its HRP, 5-bit data (checksum
/// stripped) and the variant its checksum matched.
pub fn decode(input: &str) -> Result<(String, Vec<u8>, Variant)> {
    let lower = input.to_ascii_lowercase();

    let sep_pos = lower
        .rfind('1')
        .ok_or(Error::InvalidStructure("no separator found"))?;
    if sep_pos == 0 {
        return Err(Error::InvalidStructure("empty human-readable part"));
    }
    if sep_pos + 1 + CHECKSUM_LEN + 1 > lower.len() {
        return Err(Error::InvalidStructure("data part too short"));
    }

    let hrp = &lower[..sep_pos];
    let data_part = &lower[sep_pos + 1..];

    let mut data = Vec::with_capacity(data_part.len());
    for (offset, c) in data_part.chars().enumerate() {
        let symbol = BECH32_CHARSET
            .iter()
            .position(|&x| x as char == c)
            .ok_or(Error::InvalidCharacter {
                ch: c,
                position: sep_pos + 1 + offset,
            })?;
        data.push(symbol as u8);
    }

    let residue = polymod(hrp_expand(hrp).into_iter().chain(data.iter().copied()));
    let variant = Variant::from_residue(residue).ok_or(Error::InvalidChecksum)?;

    data.truncate(data.len() - CHECKSUM_LEN);

    Ok((hrp.into(), data, variant))
}

/// Encode a SegWit output as an address: `hrp 1 version program checksum`.
pub fn segwit_encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String> {
    if witness_version > 31 {
        return Err(Error::InvalidStructure("witness version does not fit in one symbol"));
    }
    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    data.push(witness_version);
    data.extend(convert_bits(program, 8, 5, true)?);

    Ok(encode(hrp, &data, Variant::for_witness_version(witness_version)))
}

/// Decode a SegWit address.
///
/// The checksum must match the variant its witness version calls for; a v0
/// program under Bech32m (or v1+ under Bech32) is a checksum failure.
pub fn segwit_decode(input: &str) -> Result<SegwitAddress> {
    let (hrp, data, variant) = decode(input)?;

    let witness_version = data[0];
    if variant != Variant::for_witness_version(witness_version) {
        log::debug!(
            "witness v{} checksum matched {} instead of {}",
            witness_version,
            variant,
            Variant::for_witness_version(witness_version)
        );
        return Err(Error::InvalidChecksum);
    }

    let program = convert_bits(&data[1..], 5, 8, false)?;

    Ok(SegwitAddress {
        hrp,
        witness_version,
        program,
        variant,
    })
}
