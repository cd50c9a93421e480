//! Wallet-facing entry point for UTXO transfers.
//!
//! Opens a [`UtxoCurrency`] for Bitcoin, Litecoin or Bitcoin Cash from a hex
//! private key or a BIP-39 mnemonic, exposes its address and signs
//! [`TransferRequest`]s into broadcast-ready hex.

pub mod currency;
pub mod error;
pub mod hd_derivation;
pub mod mnemonic;
pub mod types;

pub use chain_utxo::{ChainParams, TransferRequest, Utxo};
pub use currency::{bitcoin, bitcoin_cash, litecoin, UtxoCurrency};
pub use error::WalletError;
pub use hd_derivation::{Bip44Deriver, KeyDeriver};
pub use mnemonic::{mnemonic_to_seed, validate_mnemonic};
pub use types::{MnemonicDescriptor, Secret};
