use chain_utxo::keys::{signing_key_from, SigningKey};
use chain_utxo::network::{self, ChainParams, BITCOIN, BITCOIN_CASH, LITECOIN};
use chain_utxo::TransferRequest;
use log::debug;
use secrecy::ExposeSecret;

use crate::error::WalletError;
use crate::hd_derivation::{Bip44Deriver, KeyDeriver};
use crate::types::Secret;

/// A signer for one UTXO chain, opened from a private key or a mnemonic.
///
/// The address is computed once when the currency is opened and is shown in
/// the chain's native encoding (CashAddr for Bitcoin Cash).
#[derive(Debug)]
pub struct UtxoCurrency {
    params: &'static ChainParams,
    key: SigningKey,
    address: String,
}

impl UtxoCurrency {
    /// Open a currency, deriving mnemonic secrets along the BIP-44 path.
    pub fn new(secret: &Secret, params: &'static ChainParams) -> Result<Self, WalletError> {
        Self::with_deriver(secret, params, &Bip44Deriver)
    }

    /// Open a currency with a caller-supplied mnemonic deriver.
    pub fn with_deriver(
        secret: &Secret,
        params: &'static ChainParams,
        deriver: &dyn KeyDeriver,
    ) -> Result<Self, WalletError> {
        let key = match secret {
            Secret::PrivateKeyHex(hex) => SigningKey::from_hex(hex.expose_secret(), params)?,
            Secret::Mnemonic(descriptor) => {
                let raw = deriver.derive_private_key(
                    descriptor.phrase.expose_secret(),
                    descriptor.index,
                    descriptor.passphrase.expose_secret(),
                    params,
                )?;
                signing_key_from(&raw, params)?
            }
        };
        let address = key.address()?;
        debug!("opened {} signer", params.code);

        Ok(Self {
            params,
            key,
            address,
        })
    }

    /// Open a currency by registry code (`"btc"`, `"ltc"`, `"bch"`).
    pub fn for_code(code: &str, secret: &Secret) -> Result<Self, WalletError> {
        let params = network::lookup(code)?;
        Self::new(secret, params)
    }

    /// The address in the chain's native encoding.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The chain this currency signs for.
    pub fn params(&self) -> &'static ChainParams {
        self.params
    }

    /// Build and sign `request`; returns the raw transaction as lowercase hex.
    pub fn sign_transaction(&self, request: &TransferRequest) -> Result<String, WalletError> {
        Ok(chain_utxo::sign_transfer(&self.key, self.params, request)?)
    }
}

/// Open a Bitcoin currency.
pub fn bitcoin(secret: &Secret) -> Result<UtxoCurrency, WalletError> {
    UtxoCurrency::new(secret, &BITCOIN)
}

/// Open a Litecoin currency.
pub fn litecoin(secret: &Secret) -> Result<UtxoCurrency, WalletError> {
    UtxoCurrency::new(secret, &LITECOIN)
}

/// Open a Bitcoin Cash currency.
pub fn bitcoin_cash(secret: &Secret) -> Result<UtxoCurrency, WalletError> {
    UtxoCurrency::new(secret, &BITCOIN_CASH)
}
