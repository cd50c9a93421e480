use serde::{Deserialize, Deserializer, Serialize};

use crate::network::ChainParams;

/// A spendable output as reported by a block explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    /// Funding transaction id, hex in display (big-endian) order.
    pub txid: String,
    pub vout: u32,
    #[serde(default)]
    pub confirmations: u64,
    /// Hex-encoded locking script of the output.
    #[serde(rename = "scriptPubKey")]
    pub script_pub_key: String,
    /// Value in display units; must agree with `satoshis`.
    #[serde(deserialize_with = "decimal_text")]
    pub amount: String,
    /// Value in the chain's smallest unit.
    pub satoshis: u64,
}

impl Utxo {
    /// Build an output whose display amount is derived from `satoshis`.
    pub fn new(
        txid: impl Into<String>,
        vout: u32,
        script_pub_key: impl Into<String>,
        satoshis: u64,
        params: &ChainParams,
    ) -> Self {
        Utxo {
            txid: txid.into(),
            vout,
            confirmations: 0,
            script_pub_key: script_pub_key.into(),
            amount: params.format_base_units(satoshis),
            satoshis,
        }
    }
}

/// A transfer to sign: candidate inputs, destination, amount and fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub inputs: Vec<Utxo>,
    pub to_address: String,
    /// Amount to send in display units.
    #[serde(deserialize_with = "decimal_text")]
    pub amount: String,
    /// Fee in the chain's smallest unit.
    pub fee: u64,
}

/// Explorers disagree on whether decimal amounts are JSON numbers or strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Text(String),
    Integer(u64),
    Float(f64),
}

fn decimal_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match DecimalRepr::deserialize(deserializer)? {
        DecimalRepr::Text(s) => s,
        DecimalRepr::Integer(n) => n.to_string(),
        // f64 Display never uses exponent notation.
        DecimalRepr::Float(f) => f.to_string(),
    })
}
