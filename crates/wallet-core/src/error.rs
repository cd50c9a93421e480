use chain_utxo::UtxoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Malformed UTXO at input {index}: {reason}")]
    MalformedUtxo { index: usize, reason: String },

    #[error("Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Transaction build failed: {0}")]
    TransactionFailed(String),
}

impl From<UtxoError> for WalletError {
    fn from(e: UtxoError) -> Self {
        match e {
            UtxoError::UnsupportedChain(code) => WalletError::UnsupportedChain(code),
            UtxoError::InvalidPrivateKey(msg) => WalletError::InvalidPrivateKey(msg),
            UtxoError::AddressDerivation(msg) => WalletError::DerivationFailed(msg),
            UtxoError::InvalidAddress(msg) => WalletError::InvalidAddress(msg),
            UtxoError::InvalidAmount(msg) => WalletError::InvalidAmount(msg),
            UtxoError::MalformedUtxo { index, reason } => WalletError::MalformedUtxo { index, reason },
            UtxoError::InsufficientFunds { needed, available } => {
                WalletError::InsufficientFunds { needed, available }
            }
            UtxoError::TransactionBuildError(msg) => WalletError::TransactionFailed(msg),
            UtxoError::SigningError(msg) => WalletError::SigningFailed(msg),
        }
    }
}
