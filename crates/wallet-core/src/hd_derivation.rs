use bip32::{DerivationPath, XPrv};
use chain_utxo::ChainParams;
use crypto_utils::ZeroizingBytes;
use log::trace;
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::mnemonic::mnemonic_to_seed;

/// Turns a mnemonic descriptor into raw private-key bytes for one chain.
///
/// The facade only depends on this trait, so callers can substitute their
/// own derivation scheme (hardware-backed, non-standard paths, ...).
pub trait KeyDeriver: Send + Sync {
    fn derive_private_key(
        &self,
        phrase: &str,
        index: u32,
        passphrase: &str,
        params: &ChainParams,
    ) -> Result<ZeroizingBytes, WalletError>;
}

/// BIP-39 seed + BIP-32 derivation along the BIP-44 external chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bip44Deriver;

impl KeyDeriver for Bip44Deriver {
    fn derive_private_key(
        &self,
        phrase: &str,
        index: u32,
        passphrase: &str,
        params: &ChainParams,
    ) -> Result<ZeroizingBytes, WalletError> {
        let seed = mnemonic_to_seed(phrase, passphrase)?;
        derive_secp256k1_key(&seed, params, index)
    }
}

/// BIP-44 path: m/44'/coin_type'/0'/0/index
pub fn derivation_path(params: &ChainParams, index: u32) -> String {
    format!("m/44'/{}'/0'/0/{}", params.coin_type, index)
}

/// Derive a secp256k1 private key from seed using BIP-32
pub fn derive_secp256k1_key(
    seed: &[u8],
    params: &ChainParams,
    index: u32,
) -> Result<ZeroizingBytes, WalletError> {
    let path_str = derivation_path(params, index);
    trace!("deriving {} key at {path_str}", params.code);

    let path: DerivationPath = path_str
        .parse()
        .map_err(|e: bip32::Error| WalletError::DerivationFailed(e.to_string()))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;

    let mut private_key_bytes: [u8; 32] = xprv.to_bytes();
    let key = ZeroizingBytes::from(&private_key_bytes[..]);
    private_key_bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_utxo::network::{BITCOIN, BITCOIN_CASH, LITECOIN};

    // BIP-39 test vector: "abandon" x11 + "about"
    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn test_seed() -> ZeroizingBytes {
        mnemonic_to_seed(TEST_MNEMONIC, "").unwrap()
    }

    #[test]
    fn test_derivation_paths() {
        assert_eq!(derivation_path(&BITCOIN, 0), "m/44'/0'/0'/0/0");
        assert_eq!(derivation_path(&LITECOIN, 3), "m/44'/2'/0'/0/3");
        assert_eq!(derivation_path(&BITCOIN_CASH, 1), "m/44'/145'/0'/0/1");
    }

    #[test]
    fn test_derive_btc_key_vector() {
        let key = derive_secp256k1_key(&test_seed(), &BITCOIN, 0).unwrap();
        assert_eq!(
            hex::encode(&*key),
            "e284129cc0922579a535bbf4d1a3b25773090d28c909bc0fed73b5e0222cc372"
        );
    }

    #[test]
    fn test_derive_ltc_and_bch_key_vectors() {
        let ltc = derive_secp256k1_key(&test_seed(), &LITECOIN, 0).unwrap();
        assert_eq!(
            hex::encode(&*ltc),
            "4baa38b7623a40da63836cd9ee8c51d0b6273e766c88adde156fd5fec6e19008"
        );
        let bch = derive_secp256k1_key(&test_seed(), &BITCOIN_CASH, 1).unwrap();
        assert_eq!(
            hex::encode(&*bch),
            "a7140cd08d7fcd9cbc65ce5d09459b7f4ff99c861129d6436e06ffe8e45ae4dc"
        );
    }

    #[test]
    fn test_derivation_deterministic() {
        let key1 = derive_secp256k1_key(&test_seed(), &BITCOIN, 0).unwrap();
        let key2 = derive_secp256k1_key(&test_seed(), &BITCOIN, 0).unwrap();
        assert_eq!(*key1, *key2);
    }

    #[test]
    fn test_different_indexes_different_keys() {
        let key0 = derive_secp256k1_key(&test_seed(), &BITCOIN, 0).unwrap();
        let key1 = derive_secp256k1_key(&test_seed(), &BITCOIN, 1).unwrap();
        assert_ne!(*key0, *key1);
    }

    #[test]
    fn test_bip44_deriver_uses_passphrase() {
        let plain = Bip44Deriver
            .derive_private_key(TEST_MNEMONIC, 0, "", &BITCOIN)
            .unwrap();
        let protected = Bip44Deriver
            .derive_private_key(TEST_MNEMONIC, 0, "TREZOR", &BITCOIN)
            .unwrap();
        assert_ne!(*plain, *protected);
    }

    #[test]
    fn test_bip44_deriver_rejects_bad_mnemonic() {
        assert!(matches!(
            Bip44Deriver.derive_private_key("abandon", 0, "", &BITCOIN),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }
}
