use serde::Serialize;

use crate::amount;
use crate::error::UtxoError;

/// Network parameters of one supported UTXO chain.
///
/// The engine is data-driven: chains differ only in these values and the two
/// behaviour switches `alternate_encoding` and `fork_sighash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainParams {
    /// Lowercase ticker used for lookups.
    pub code: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    /// Base58Check version byte of P2PKH addresses.
    pub pubkey_hash_version: u8,
    /// Base58Check version byte of P2SH addresses.
    pub script_hash_version: u8,
    /// WIF version byte of private keys.
    pub wif_version: u8,
    /// SLIP-44 coin type used in the BIP-44 path.
    pub coin_type: u32,
    /// Addresses are presented in CashAddr form.
    pub alternate_encoding: bool,
    /// Inputs are signed with the BIP-143 digest and `SIGHASH_FORKID`.
    pub fork_sighash: bool,
}

/// Bitcoin mainnet.
pub const BITCOIN: ChainParams = ChainParams {
    code: "btc",
    name: "Bitcoin",
    decimals: 8,
    pubkey_hash_version: 0x00,
    script_hash_version: 0x05,
    wif_version: 0x80,
    coin_type: 0,
    alternate_encoding: false,
    fork_sighash: false,
};

/// Litecoin mainnet.
pub const LITECOIN: ChainParams = ChainParams {
    code: "ltc",
    name: "Litecoin",
    decimals: 8,
    pubkey_hash_version: 0x30,
    script_hash_version: 0x32,
    wif_version: 0xB0,
    coin_type: 2,
    alternate_encoding: false,
    fork_sighash: false,
};

/// Bitcoin Cash mainnet. Shares Bitcoin's legacy version bytes.
pub const BITCOIN_CASH: ChainParams = ChainParams {
    code: "bch",
    name: "Bitcoin Cash",
    decimals: 8,
    pubkey_hash_version: 0x00,
    script_hash_version: 0x05,
    wif_version: 0x80,
    coin_type: 145,
    alternate_encoding: true,
    fork_sighash: true,
};

const ALL_CHAINS: &[&ChainParams] = &[&BITCOIN, &LITECOIN, &BITCOIN_CASH];

/// Look up a chain by its short code (case-insensitive).
pub fn lookup(code: &str) -> Result<&'static ChainParams, UtxoError> {
    let code = code.trim();
    ALL_CHAINS
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .copied()
        .ok_or_else(|| UtxoError::UnsupportedChain(code.to_string()))
}

/// Returns all supported chain definitions.
pub fn supported_chains() -> Vec<&'static ChainParams> {
    ALL_CHAINS.to_vec()
}

impl ChainParams {
    /// Convert a decimal display amount to this chain's smallest unit.
    pub fn to_base_units(&self, value: &str) -> Result<u64, UtxoError> {
        amount::to_base_units(value, self.decimals)
    }

    /// Render base units as a decimal display amount.
    pub fn format_base_units(&self, units: u64) -> String {
        amount::format_base_units(units, self.decimals)
    }
}

impl std::fmt::Display for ChainParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
