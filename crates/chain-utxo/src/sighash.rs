//! Signature-hash digests for P2PKH inputs.
//!
//! Bitcoin and Litecoin use the original (legacy) digest: the transaction is
//! re-serialized with only the signed input carrying a script. Bitcoin Cash
//! uses the BIP-143 digest, which commits to the spent value, and tags the
//! hash type with `SIGHASH_FORKID` for replay protection.

use bitcoin::hashes::Hash;
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::{Amount, Script, Transaction};
use crypto_utils::sha256d;

use crate::error::UtxoError;
use crate::network::ChainParams;
use crate::transaction::UnsignedTx;

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

/// Replay-protection flag of the Bitcoin Cash fork.
pub const SIGHASH_FORKID: u32 = 0x40;

/// Hash-type flags used when signing on `params`.
pub fn sighash_flags(params: &ChainParams) -> u32 {
    if params.fork_sighash {
        SIGHASH_ALL | SIGHASH_FORKID
    } else {
        SIGHASH_ALL
    }
}

/// Digest for input `input_index` under the chain's signing rules, using the
/// spent output's own locking script and value.
pub fn signature_hash(
    tx: &UnsignedTx,
    input_index: usize,
    params: &ChainParams,
) -> Result<[u8; 32], UtxoError> {
    let prevout = tx
        .prevouts
        .get(input_index)
        .ok_or_else(|| out_of_range(&tx.tx, input_index))?;
    let flags = sighash_flags(params);
    if params.fork_sighash {
        forkid_sighash(&tx.tx, input_index, &prevout.script_pubkey, prevout.value, flags)
    } else {
        legacy_sighash(&tx.tx, input_index, &prevout.script_pubkey, flags)
    }
}

/// Legacy digest: sha256d of the transaction with `script_code` in the
/// signed input, empty scripts elsewhere, followed by the 4-byte hash type.
pub fn legacy_sighash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    flags: u32,
) -> Result<[u8; 32], UtxoError> {
    SighashCache::new(tx)
        .legacy_signature_hash(input_index, script_code, flags)
        .map(|hash| hash.to_byte_array())
        .map_err(|e| UtxoError::SigningError(format!("legacy sighash failed: {e}")))
}

/// BIP-143 digest as adopted by Bitcoin Cash.
///
/// The preimage is the segwit v0 one; only its trailing 4-byte hash type is
/// replaced with `flags`, which carries `SIGHASH_FORKID`.
pub fn forkid_sighash(
    tx: &Transaction,
    input_index: usize,
    script_code: &Script,
    value: Amount,
    flags: u32,
) -> Result<[u8; 32], UtxoError> {
    let mut preimage = Vec::with_capacity(160 + script_code.len());
    SighashCache::new(tx)
        .segwit_v0_encode_signing_data_to(
            &mut preimage,
            input_index,
            script_code,
            value,
            EcdsaSighashType::All,
        )
        .map_err(|e| UtxoError::SigningError(format!("BIP-143 preimage failed: {e}")))?;

    preimage.truncate(preimage.len().saturating_sub(4));
    preimage.extend_from_slice(&flags.to_le_bytes());
    Ok(sha256d(&preimage))
}

fn out_of_range(tx: &Transaction, input_index: usize) -> UtxoError {
    UtxoError::SigningError(format!(
        "input index {input_index} out of range (tx has {} inputs)",
        tx.input.len()
    ))
}
