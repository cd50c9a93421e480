//! # crypto-utils
//!
//! Hash primitives shared by the UTXO chains and zeroize-on-drop containers
//! for key material.

pub mod hash;
pub mod zeroizing;

pub use hash::{hash160, sha256d};
pub use zeroizing::{ZeroizingBytes, ZeroizingString};
