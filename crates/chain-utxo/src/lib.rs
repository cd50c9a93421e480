//! UTXO chain support for the wallet: Bitcoin, Litecoin and Bitcoin Cash.
//!
//! Provides the chain parameter registry, P2PKH address derivation (Base58Check
//! and CashAddr), key handling, largest-first input ordering, and transaction
//! building and signing with legacy or BIP-143/FORKID signature hashes.

pub mod address;
pub mod amount;
pub mod cashaddr;
pub mod error;
pub mod keys;
pub mod network;
pub mod sighash;
pub mod transaction;
pub mod utxo;

pub use error::UtxoError;
pub use keys::SigningKey;
pub use network::ChainParams;
pub use transaction::sign_transfer;
pub use utxo::{TransferRequest, Utxo};
