use bitcoin::absolute::LockTime;
use bitcoin::script::{PushBytesBuf, ScriptBuf};
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, Sequence, Transaction, TxIn, TxOut, Txid, Witness};
use log::{debug, trace};

use crate::address::{self, p2pkh_hash};
use crate::error::UtxoError;
use crate::keys::SigningKey;
use crate::network::ChainParams;
use crate::sighash;
use crate::utxo::{TransferRequest, Utxo};

/// Transaction format version.
pub const TX_VERSION: Version = Version::ONE;

/// Final sequence: no relative lock time, no replace-by-fee.
pub const SEQUENCE_FINAL: Sequence = Sequence::MAX;

/// An unsigned P2PKH transaction ready for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTx {
    /// The transaction with empty input scripts.
    pub tx: Transaction,
    /// The outputs being spent, in the same order as the transaction inputs.
    /// Their locking scripts and values feed the sighash.
    pub prevouts: Vec<TxOut>,
    /// Position of each input in the caller's candidate list.
    pub source_indices: Vec<usize>,
}

impl UnsignedTx {
    fn ensure_consistent(&self) -> Result<(), UtxoError> {
        let inputs = self.tx.input.len();
        if self.prevouts.len() != inputs || self.source_indices.len() != inputs {
            return Err(UtxoError::TransactionBuildError(format!(
                "{inputs} inputs but {} prevouts and {} source indices",
                self.prevouts.len(),
                self.source_indices.len()
            )));
        }
        Ok(())
    }
}

/// Order spendable outputs by value, largest first.
///
/// The sort is stable, so outputs of equal value keep their supplied order.
/// The input slice is left untouched.
pub fn sort_largest_first(utxos: &[Utxo]) -> Vec<&Utxo> {
    largest_first_order(utxos)
        .into_iter()
        .map(|i| &utxos[i])
        .collect()
}

fn largest_first_order(utxos: &[Utxo]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..utxos.len()).collect();
    order.sort_by(|&a, &b| utxos[b].satoshis.cmp(&utxos[a].satoshis));
    order
}

/// Build the unsigned transaction for `request`.
///
/// Every candidate input is spent, largest first. Output 0 pays the amount to
/// the destination; any positive remainder after the fee is returned to the
/// signer's address as a second output.
pub fn build_transaction(
    key: &SigningKey,
    params: &ChainParams,
    request: &TransferRequest,
) -> Result<UnsignedTx, UtxoError> {
    ensure_key_matches(key, params)?;

    let sender = address::derive_legacy_address(key.public_key(), params)?;
    let sender_script = address::decode_address(&sender, params)?.script_pubkey();
    let destination = normalize_address(&request.to_address, params)?;
    let destination_script = address::decode_address(&destination, params)?.script_pubkey();

    let amount = params.to_base_units(&request.amount)?;
    if amount == 0 {
        return Err(UtxoError::InvalidAmount("transfer amount must be positive".into()));
    }

    let signer_hash = key.pubkey_hash();
    let prepared = request
        .inputs
        .iter()
        .enumerate()
        .map(|(index, utxo)| prepare_input(index, utxo, &signer_hash, params))
        .collect::<Result<Vec<_>, _>>()?;

    let available = prepared
        .iter()
        .try_fold(0u64, |acc, (_, prevout)| acc.checked_add(prevout.value.to_sat()))
        .ok_or_else(|| UtxoError::InvalidAmount("input total overflows".into()))?;
    let needed = amount
        .checked_add(request.fee)
        .ok_or_else(|| UtxoError::InvalidAmount("amount plus fee overflows".into()))?;
    if available < needed {
        return Err(UtxoError::InsufficientFunds { needed, available });
    }
    let change = available - needed;

    let source_indices = largest_first_order(&request.inputs);
    let mut inputs = Vec::with_capacity(source_indices.len());
    let mut prevouts = Vec::with_capacity(source_indices.len());
    for &i in &source_indices {
        let (input, prevout) = &prepared[i];
        inputs.push(input.clone());
        prevouts.push(prevout.clone());
    }

    let mut outputs = vec![TxOut {
        value: Amount::from_sat(amount),
        script_pubkey: ScriptBuf::from(destination_script),
    }];
    if change > 0 {
        outputs.push(TxOut {
            value: Amount::from_sat(change),
            script_pubkey: ScriptBuf::from(sender_script),
        });
    }

    debug!(
        "built {} transaction: {} inputs, total {available}, amount {amount}, fee {}, change {change}",
        params.code,
        inputs.len(),
        request.fee
    );

    let tx = Transaction {
        version: TX_VERSION,
        lock_time: LockTime::ZERO,
        input: inputs,
        output: outputs,
    };

    Ok(UnsignedTx {
        tx,
        prevouts,
        source_indices,
    })
}

/// Sign every input of `tx` and serialize the result.
///
/// All inputs must be P2PKH outputs of `key`. A foreign input is reported
/// with its position in the caller's candidate list, as `build_transaction`
/// does. Returns the raw transaction bytes ready for broadcast.
pub fn sign_transaction(
    tx: &UnsignedTx,
    key: &SigningKey,
    params: &ChainParams,
) -> Result<Vec<u8>, UtxoError> {
    ensure_key_matches(key, params)?;
    tx.ensure_consistent()?;

    let flags = sighash::sighash_flags(params);
    let hash_type = u8::try_from(flags)
        .map_err(|_| UtxoError::SigningError(format!("hash type {flags:#x} exceeds one byte")))?;
    let signer_hash = key.pubkey_hash();

    let mut signed_tx = tx.tx.clone();
    for (index, prevout) in tx.prevouts.iter().enumerate() {
        if p2pkh_hash(prevout.script_pubkey.as_bytes()) != Some(signer_hash) {
            return Err(UtxoError::malformed(
                tx.source_indices[index],
                "locking script is not a P2PKH output of the signing key",
            ));
        }

        let digest = sighash::signature_hash(tx, index, params)?;
        let mut sig = key.sign_digest(&digest)?;
        sig.push(hash_type);

        // P2PKH scriptSig: <sig+hashtype> <pubkey>
        let sig_push = PushBytesBuf::try_from(sig)
            .map_err(|e| UtxoError::TransactionBuildError(format!("signature push: {e}")))?;
        let key_push = PushBytesBuf::try_from(key.public_key().to_vec())
            .map_err(|e| UtxoError::TransactionBuildError(format!("public key push: {e}")))?;
        signed_tx.input[index].script_sig = ScriptBuf::builder()
            .push_slice(sig_push)
            .push_slice(key_push)
            .into_script();

        trace!("signed input {index} with hash type {hash_type:#04x}");
    }

    Ok(bitcoin::consensus::serialize(&signed_tx))
}

/// Serialize `tx` with empty input scripts.
pub fn serialize_unsigned(tx: &UnsignedTx) -> Vec<u8> {
    bitcoin::consensus::serialize(&tx.tx)
}

/// Build, sign and serialize a transfer; returns lowercase hex.
///
/// Nothing is returned unless every input was signed.
pub fn sign_transfer(
    key: &SigningKey,
    params: &ChainParams,
    request: &TransferRequest,
) -> Result<String, UtxoError> {
    let unsigned = build_transaction(key, params, request)?;
    let raw = sign_transaction(&unsigned, key, params)?;
    debug!("signed {} transaction: {} bytes", params.code, raw.len());
    Ok(hex::encode(raw))
}

/// For the CashAddr chain, scripts are built from the legacy form.
fn normalize_address(address: &str, params: &ChainParams) -> Result<String, UtxoError> {
    if params.alternate_encoding {
        address::to_standard_encoding(address)
    } else {
        Ok(address.trim().to_string())
    }
}

fn ensure_key_matches(key: &SigningKey, params: &ChainParams) -> Result<(), UtxoError> {
    if key.params().code != params.code {
        return Err(UtxoError::InvalidPrivateKey(format!(
            "key is bound to {}, not {}",
            key.params().code,
            params.code
        )));
    }
    Ok(())
}

fn prepare_input(
    index: usize,
    utxo: &Utxo,
    signer_hash: &[u8; 20],
    params: &ChainParams,
) -> Result<(TxIn, TxOut), UtxoError> {
    let txid: Txid = utxo
        .txid
        .trim()
        .parse()
        .map_err(|e| UtxoError::malformed(index, format!("invalid txid: {e}")))?;

    let script_pubkey = hex::decode(utxo.script_pub_key.trim())
        .map_err(|e| UtxoError::malformed(index, format!("invalid script hex: {e}")))?;
    match p2pkh_hash(&script_pubkey) {
        Some(hash) if &hash == signer_hash => {}
        Some(_) => {
            return Err(UtxoError::malformed(
                index,
                "output does not belong to the signing key",
            ))
        }
        None => return Err(UtxoError::malformed(index, "only P2PKH outputs can be spent")),
    }

    let declared = params
        .to_base_units(&utxo.amount)
        .map_err(|e| UtxoError::malformed(index, e.to_string()))?;
    if declared != utxo.satoshis {
        return Err(UtxoError::malformed(
            index,
            format!(
                "amount {} does not match {} satoshis",
                utxo.amount, utxo.satoshis
            ),
        ));
    }

    let input = TxIn {
        previous_output: OutPoint::new(txid, utxo.vout),
        script_sig: ScriptBuf::new(),
        sequence: SEQUENCE_FINAL,
        witness: Witness::default(),
    };
    let prevout = TxOut {
        value: Amount::from_sat(utxo.satoshis),
        script_pubkey: ScriptBuf::from(script_pubkey),
    };
    Ok((input, prevout))
}
