//! CashAddr encoding: `prefix:payload` with a base32 payload and a 40-bit
//! BCH-code checksum over the prefix and payload.

use crate::address::AddressKind;
use crate::error::UtxoError;

/// Human-readable prefix of Bitcoin Cash mainnet addresses.
pub const MAINNET_PREFIX: &str = "bitcoincash";

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Checksum length in 5-bit groups.
const CHECKSUM_LEN: usize = 8;

/// Size code for a 160-bit hash in the version byte.
const SIZE_160: u8 = 0;

/// Encode a 20-byte hash as a prefixed CashAddr string.
pub fn encode(prefix: &str, kind: AddressKind, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push((type_bits(kind) << 3) | SIZE_160);
    payload.extend_from_slice(hash);

    let mut data = convert_bits(&payload, 8, 5, true).unwrap_or_default();
    let checksum = create_checksum(prefix, &data);
    data.extend_from_slice(&checksum);

    let mut out = String::with_capacity(prefix.len() + 1 + data.len());
    out.push_str(prefix);
    out.push(':');
    out.extend(data.iter().map(|&d| CHARSET[d as usize] as char));
    out
}

/// Decode a CashAddr string. The prefix may be omitted, in which case
/// `expected_prefix` is assumed; if present it must match.
pub fn decode(address: &str, expected_prefix: &str) -> Result<(AddressKind, [u8; 20]), UtxoError> {
    let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(UtxoError::InvalidAddress("cashaddr mixes upper and lower case".into()));
    }
    let address = address.to_ascii_lowercase();

    let (prefix, payload) = match address.split_once(':') {
        Some((prefix, payload)) => (prefix, payload),
        None => (expected_prefix, address.as_str()),
    };
    if prefix != expected_prefix {
        return Err(UtxoError::InvalidAddress(format!(
            "unexpected cashaddr prefix {prefix:?}"
        )));
    }
    if payload.len() <= CHECKSUM_LEN {
        return Err(UtxoError::InvalidAddress("cashaddr payload too short".into()));
    }

    let values = payload
        .bytes()
        .map(|c| {
            CHARSET
                .iter()
                .position(|&x| x == c)
                .map(|p| p as u8)
                .ok_or_else(|| {
                    UtxoError::InvalidAddress(format!("invalid cashaddr character {:?}", c as char))
                })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if polymod(&checksum_input(prefix, &values)) != 0 {
        return Err(UtxoError::InvalidAddress("invalid cashaddr checksum".into()));
    }

    let data = &values[..values.len() - CHECKSUM_LEN];
    let bytes = convert_bits(data, 5, 8, false)
        .ok_or_else(|| UtxoError::InvalidAddress("invalid cashaddr padding".into()))?;

    if bytes.len() != 21 {
        return Err(UtxoError::InvalidAddress(format!(
            "unsupported cashaddr hash length {}",
            bytes.len().saturating_sub(1)
        )));
    }

    let version = bytes[0];
    if version & 0x80 != 0 || version & 0x07 != SIZE_160 {
        return Err(UtxoError::InvalidAddress(format!(
            "invalid cashaddr version byte {version:#04x}"
        )));
    }
    let kind = match version >> 3 {
        0 => AddressKind::PubkeyHash,
        1 => AddressKind::ScriptHash,
        other => {
            return Err(UtxoError::InvalidAddress(format!(
                "unsupported cashaddr type {other}"
            )))
        }
    };

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&bytes[1..]);
    Ok((kind, hash))
}

/// Whether `address` looks like a CashAddr (has the prefix, or only uses
/// charset characters in a single case).
pub fn is_cashaddr(address: &str, prefix: &str) -> bool {
    let lower = address.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix(prefix) {
        return rest.starts_with(':');
    }
    !lower.is_empty() && lower.bytes().all(|c| CHARSET.contains(&c))
}

fn type_bits(kind: AddressKind) -> u8 {
    match kind {
        AddressKind::PubkeyHash => 0,
        AddressKind::ScriptHash => 1,
    }
}

fn checksum_input(prefix: &str, data: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(prefix.len() + 1 + data.len());
    input.extend(prefix.bytes().map(|b| b & 0x1f));
    input.push(0);
    input.extend_from_slice(data);
    input
}

fn create_checksum(prefix: &str, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut input = checksum_input(prefix, data);
    input.extend_from_slice(&[0u8; CHECKSUM_LEN]);
    let m = polymod(&input);

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, c) in checksum.iter_mut().enumerate() {
        *c = ((m >> (5 * (7 - i))) & 0x1f) as u8;
    }
    checksum
}

fn polymod(values: &[u8]) -> u64 {
    const GENERATORS: [u64; 5] = [
        0x98_f2bc_8e61,
        0x79_b76d_99e2,
        0xf3_3e5f_b3c4,
        0xae_2eab_e2a8,
        0x1e_4f43_e470,
    ];

    let mut c: u64 = 1;
    for &d in values {
        let c0 = (c >> 35) as u8;
        c = ((c & 0x07_ffff_ffff) << 5) ^ d as u64;
        for (bit, g) in GENERATORS.iter().enumerate() {
            if c0 & (1 << bit) != 0 {
                c ^= g;
            }
        }
    }
    c ^ 1
}

/// Regroup bits; with `pad == false`, leftover bits must be zero padding.
fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Option<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_v: u32 = (1 << to) - 1;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        let v = value as u32;
        if v >> from != 0 {
            return None;
        }
        acc = (acc << from) | v;
        bits += from;
        while bits >= to {
            bits -= to;
            out.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to - bits)) & max_v) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_v) != 0 {
        return None;
    }
    Some(out)
}
