use bip39::{Language, Mnemonic};
use crypto_utils::ZeroizingBytes;
use zeroize::Zeroize;

use crate::error::WalletError;

/// Validate a mnemonic phrase against the English BIP-39 word list
pub fn validate_mnemonic(phrase: &str) -> Result<bool, WalletError> {
    match Mnemonic::parse_in_normalized(Language::English, phrase) {
        Ok(_) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Derive the 64-byte BIP-39 seed from mnemonic + optional passphrase.
/// The seed is wiped when the returned buffer is dropped.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<ZeroizingBytes, WalletError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

    let mut seed = mnemonic.to_seed(passphrase);
    let out = ZeroizingBytes::from(&seed[..]);
    seed.zeroize();
    Ok(out)
}
