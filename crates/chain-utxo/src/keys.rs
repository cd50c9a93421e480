use crypto_utils::{hash160, ZeroizingBytes, ZeroizingString};
use k256::ecdsa::{signature::hazmat::PrehashSigner, Signature};
use zeroize::Zeroizing;

use crate::address;
use crate::error::UtxoError;
use crate::network::ChainParams;

/// Suffix marking a WIF key whose public key is serialized compressed.
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// A secp256k1 key pair bound to one chain.
///
/// The secret scalar is zeroized when the key is dropped (`k256` keys are
/// `ZeroizeOnDrop`). Public keys are always used in compressed form.
#[derive(Clone)]
pub struct SigningKey {
    inner: k256::ecdsa::SigningKey,
    public_key: [u8; 33],
    params: &'static ChainParams,
}

/// Build a signing key from 32 raw private-key bytes.
pub fn signing_key_from(raw: &[u8], params: &'static ChainParams) -> Result<SigningKey, UtxoError> {
    if raw.len() != 32 {
        return Err(UtxoError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            raw.len()
        )));
    }
    let inner = k256::ecdsa::SigningKey::from_slice(raw)
        .map_err(|e| UtxoError::InvalidPrivateKey(format!("invalid secp256k1 key: {e}")))?;
    let public_key: [u8; 33] = inner
        .verifying_key()
        .to_sec1_bytes()
        .as_ref()
        .try_into()
        .map_err(|_| UtxoError::InvalidPrivateKey("invalid public key length".into()))?;

    Ok(SigningKey {
        inner,
        public_key,
        params,
    })
}

impl SigningKey {
    /// Build a signing key from a hex-encoded 32-byte secret.
    pub fn from_hex(secret_hex: &str, params: &'static ChainParams) -> Result<Self, UtxoError> {
        let raw = ZeroizingBytes::from_hex(secret_hex)
            .map_err(|e| UtxoError::InvalidPrivateKey(format!("invalid hex: {e}")))?;
        signing_key_from(&raw, params)
    }

    /// Import a compressed-key WIF string; its version byte must be the
    /// chain's `wif_version`.
    pub fn from_wif(wif: &str, params: &'static ChainParams) -> Result<Self, UtxoError> {
        let decoded = ZeroizingBytes::new(
            bs58::decode(wif.trim())
                .with_check(None)
                .into_vec()
                .map_err(|e| UtxoError::InvalidPrivateKey(format!("invalid WIF encoding: {e}")))?,
        );

        match decoded.len() {
            34 if decoded[33] == WIF_COMPRESSED_FLAG => {}
            33 => {
                return Err(UtxoError::InvalidPrivateKey(
                    "uncompressed WIF keys are not supported".into(),
                ))
            }
            n => {
                return Err(UtxoError::InvalidPrivateKey(format!(
                    "unexpected WIF payload length {n}"
                )))
            }
        }
        if decoded[0] != params.wif_version {
            return Err(UtxoError::InvalidPrivateKey(format!(
                "WIF version {:#04x} does not belong to {}",
                decoded[0], params.name
            )));
        }

        signing_key_from(&decoded[1..33], params)
    }

    /// Export as a compressed-key WIF string.
    pub fn to_wif(&self) -> ZeroizingString {
        let mut payload = Zeroizing::new(Vec::with_capacity(34));
        payload.push(self.params.wif_version);
        let secret = Zeroizing::new(self.inner.to_bytes());
        payload.extend_from_slice(&secret);
        payload.push(WIF_COMPRESSED_FLAG);
        ZeroizingString::new(bs58::encode(payload.as_slice()).with_check().into_string())
    }

    /// 33-byte compressed public key.
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    /// HASH160 of the compressed public key.
    pub fn pubkey_hash(&self) -> [u8; 20] {
        hash160(&self.public_key)
    }

    /// Chain the key is bound to.
    pub fn params(&self) -> &'static ChainParams {
        self.params
    }

    /// The chain's native P2PKH address for this key.
    pub fn address(&self) -> Result<String, UtxoError> {
        address::derive_address(&self.public_key, self.params)
    }

    /// ECDSA-sign a 32-byte digest; returns the DER signature (low-S, RFC 6979 nonce).
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, UtxoError> {
        let sig: Signature = self
            .inner
            .sign_prehash(digest)
            .map_err(|e| UtxoError::SigningError(format!("ECDSA signing failed: {e}")))?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Ok(sig.to_der().as_bytes().to_vec())
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("chain", &self.params.code)
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{BITCOIN, BITCOIN_CASH, LITECOIN};
    use k256::ecdsa::signature::hazmat::PrehashVerifier;

    fn key_one() -> [u8; 32] {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    }

    #[test]
    fn derives_generator_public_key() {
        let key = signing_key_from(&key_one(), &BITCOIN).unwrap();
        assert_eq!(
            hex::encode(key.public_key()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(key.address().unwrap(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            signing_key_from(&[1u8; 31], &BITCOIN),
            Err(UtxoError::InvalidPrivateKey(_))
        ));
        assert!(signing_key_from(&[1u8; 33], &BITCOIN).is_err());
        assert!(signing_key_from(&[], &BITCOIN).is_err());
    }

    #[test]
    fn rejects_zero_and_out_of_range_scalars() {
        assert!(signing_key_from(&[0u8; 32], &BITCOIN).is_err());
        assert!(signing_key_from(&[0xFF; 32], &BITCOIN).is_err());
    }

    #[test]
    fn from_hex_matches_raw_bytes() {
        let hex_key = "0000000000000000000000000000000000000000000000000000000000000001";
        let key = SigningKey::from_hex(hex_key, &LITECOIN).unwrap();
        let raw = signing_key_from(&key_one(), &LITECOIN).unwrap();
        assert_eq!(key.public_key(), raw.public_key());
        assert!(SigningKey::from_hex("not hex", &LITECOIN).is_err());
    }

    #[test]
    fn wif_test_vector() {
        let key = signing_key_from(&key_one(), &BITCOIN).unwrap();
        assert_eq!(
            &*key.to_wif(),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
    }

    #[test]
    fn wif_roundtrip_per_chain() {
        for params in [&BITCOIN, &LITECOIN, &BITCOIN_CASH] {
            let key = signing_key_from(&[0x42; 32], params).unwrap();
            let wif = key.to_wif();
            let back = SigningKey::from_wif(&wif, params).unwrap();
            assert_eq!(back.public_key(), key.public_key());
        }
    }

    #[test]
    fn wif_from_other_chain_rejected() {
        let btc = signing_key_from(&[0x42; 32], &BITCOIN).unwrap();
        let result = SigningKey::from_wif(&btc.to_wif(), &LITECOIN);
        assert!(matches!(result, Err(UtxoError::InvalidPrivateKey(_))));
    }

    #[test]
    fn uncompressed_wif_rejected() {
        // Uncompressed WIF for private key = 1.
        let result = SigningKey::from_wif(
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf",
            &BITCOIN,
        );
        assert!(result.is_err());
    }

    #[test]
    fn signature_verifies_and_is_low_s() {
        let key = signing_key_from(&[0x42; 32], &BITCOIN_CASH).unwrap();
        let digest = [0xAB; 32];
        let der = key.sign_digest(&digest).unwrap();

        let sig = Signature::from_der(&der).unwrap();
        assert!(sig.normalize_s().is_none(), "signature must already be low-S");

        let vk = k256::ecdsa::VerifyingKey::from_sec1_bytes(key.public_key()).unwrap();
        vk.verify_prehash(&digest, &sig).unwrap();
    }

    #[test]
    fn signing_is_deterministic() {
        let key = signing_key_from(&[0x42; 32], &BITCOIN).unwrap();
        assert_eq!(key.sign_digest(&[7; 32]).unwrap(), key.sign_digest(&[7; 32]).unwrap());
    }

    #[test]
    fn debug_hides_secret() {
        let key = signing_key_from(&key_one(), &BITCOIN).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("btc"));
        assert!(!debug.contains("KwDi"));
        assert!(!debug.contains(&"0".repeat(63)));
    }
}
