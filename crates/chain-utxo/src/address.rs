use crypto_utils::hash160;

use crate::cashaddr;
use crate::error::UtxoError;
use crate::network::{ChainParams, BITCOIN_CASH};

/// Kind of script an address commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    PubkeyHash,
    ScriptHash,
}

/// A decoded address: the script kind and its 20-byte hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPayload {
    pub kind: AddressKind,
    pub hash: [u8; 20],
}

impl AddressPayload {
    /// Locking script paying to this address.
    pub fn script_pubkey(&self) -> Vec<u8> {
        match self.kind {
            AddressKind::PubkeyHash => p2pkh_script(&self.hash),
            AddressKind::ScriptHash => p2sh_script(&self.hash),
        }
    }

    /// Base58Check text using the chain's legacy version bytes.
    pub fn to_legacy(&self, params: &ChainParams) -> String {
        let version = match self.kind {
            AddressKind::PubkeyHash => params.pubkey_hash_version,
            AddressKind::ScriptHash => params.script_hash_version,
        };
        base58check_encode(version, &self.hash)
    }
}

/// P2PKH scriptPubKey: OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG
pub fn p2pkh_script(pubkey_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.push(0x76); // OP_DUP
    script.push(0xA9); // OP_HASH160
    script.push(0x14); // Push 20 bytes
    script.extend_from_slice(pubkey_hash);
    script.push(0x88); // OP_EQUALVERIFY
    script.push(0xAC); // OP_CHECKSIG
    script
}

/// P2SH scriptPubKey: OP_HASH160 <20-byte hash> OP_EQUAL
pub fn p2sh_script(script_hash: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(23);
    script.push(0xA9); // OP_HASH160
    script.push(0x14);
    script.extend_from_slice(script_hash);
    script.push(0x87); // OP_EQUAL
    script
}

/// Extract the pubkey hash from a P2PKH locking script.
pub fn p2pkh_hash(script: &[u8]) -> Option<[u8; 20]> {
    match script {
        [0x76, 0xA9, 0x14, hash @ .., 0x88, 0xAC] if hash.len() == 20 => hash.try_into().ok(),
        _ => None,
    }
}

/// Derive the chain's native P2PKH address for a compressed public key.
///
/// Base58Check for Bitcoin and Litecoin, prefixed CashAddr for Bitcoin Cash.
pub fn derive_address(pubkey_bytes: &[u8; 33], params: &ChainParams) -> Result<String, UtxoError> {
    let payload = pubkey_payload(pubkey_bytes)?;
    if params.alternate_encoding {
        Ok(cashaddr::encode(cashaddr::MAINNET_PREFIX, payload.kind, &payload.hash))
    } else {
        Ok(payload.to_legacy(params))
    }
}

/// Derive the Base58Check P2PKH address regardless of the chain's display
/// encoding.
pub fn derive_legacy_address(
    pubkey_bytes: &[u8; 33],
    params: &ChainParams,
) -> Result<String, UtxoError> {
    Ok(pubkey_payload(pubkey_bytes)?.to_legacy(params))
}

fn pubkey_payload(pubkey_bytes: &[u8; 33]) -> Result<AddressPayload, UtxoError> {
    if pubkey_bytes[0] != 0x02 && pubkey_bytes[0] != 0x03 {
        return Err(UtxoError::AddressDerivation(
            "compressed key must start with 0x02 or 0x03".into(),
        ));
    }
    k256::PublicKey::from_sec1_bytes(pubkey_bytes).map_err(|e| {
        UtxoError::AddressDerivation(format!("public key is not a curve point: {e}"))
    })?;

    Ok(AddressPayload {
        kind: AddressKind::PubkeyHash,
        hash: hash160(pubkey_bytes),
    })
}

/// Parse an address for `params`.
///
/// Legacy Base58Check is accepted for every chain; CashAddr (prefixed or
/// bare) is additionally accepted when the chain uses it.
pub fn decode_address(address: &str, params: &ChainParams) -> Result<AddressPayload, UtxoError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(UtxoError::InvalidAddress("empty address".into()));
    }

    if params.alternate_encoding && address.contains(':') {
        return decode_cashaddr(address);
    }

    match decode_legacy(address, params) {
        Ok(payload) => Ok(payload),
        Err(legacy_err) if params.alternate_encoding => {
            if cashaddr::is_cashaddr(address, cashaddr::MAINNET_PREFIX) {
                decode_cashaddr(address)
            } else {
                Err(legacy_err)
            }
        }
        Err(e) => Err(e),
    }
}

fn decode_cashaddr(address: &str) -> Result<AddressPayload, UtxoError> {
    let (kind, hash) = cashaddr::decode(address, cashaddr::MAINNET_PREFIX)?;
    Ok(AddressPayload { kind, hash })
}

fn decode_legacy(address: &str, params: &ChainParams) -> Result<AddressPayload, UtxoError> {
    let decoded = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| UtxoError::InvalidAddress(format!("invalid base58check: {e}")))?;

    // 1 version byte + 20-byte hash (checksum already stripped).
    if decoded.len() != 21 {
        return Err(UtxoError::InvalidAddress(format!(
            "expected 21 payload bytes, got {}",
            decoded.len()
        )));
    }

    let kind = if decoded[0] == params.pubkey_hash_version {
        AddressKind::PubkeyHash
    } else if decoded[0] == params.script_hash_version {
        AddressKind::ScriptHash
    } else {
        return Err(UtxoError::InvalidAddress(format!(
            "version byte {:#04x} is not valid for {}",
            decoded[0], params.name
        )));
    };

    let mut hash = [0u8; 20];
    hash.copy_from_slice(&decoded[1..]);
    Ok(AddressPayload { kind, hash })
}

/// Convert a Bitcoin Cash address to its CashAddr form.
///
/// Legacy input is converted; CashAddr input is validated and returned in
/// canonical lowercase, prefixed form.
pub fn to_alternate_encoding(address: &str) -> Result<String, UtxoError> {
    let payload = decode_address(address, &BITCOIN_CASH)?;
    Ok(cashaddr::encode(cashaddr::MAINNET_PREFIX, payload.kind, &payload.hash))
}

/// Convert a Bitcoin Cash address to its legacy Base58Check form.
///
/// CashAddr input is converted; legacy input is validated and returned as-is.
pub fn to_standard_encoding(address: &str) -> Result<String, UtxoError> {
    let payload = decode_address(address, &BITCOIN_CASH)?;
    Ok(payload.to_legacy(&BITCOIN_CASH))
}

fn base58check_encode(version: u8, hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(hash);
    bs58::encode(payload).with_check().into_string()
}
