use thiserror::Error;

/// UTXO chain operation errors.
#[derive(Debug, Error)]
pub enum UtxoError {
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("address derivation failed: {0}")]
    AddressDerivation(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("malformed utxo at input {index}: {reason}")]
    MalformedUtxo { index: usize, reason: String },

    #[error("insufficient funds: need {needed} base units, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("transaction build error: {0}")]
    TransactionBuildError(String),

    #[error("signing error: {0}")]
    SigningError(String),
}

impl UtxoError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        UtxoError::MalformedUtxo {
            index,
            reason: reason.into(),
        }
    }
}
