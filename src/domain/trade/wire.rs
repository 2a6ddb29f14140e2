//! Wire types for trade documents as stored in the `trades` collection.

use serde::{Deserialize, Serialize};

/// A raw trade document. Every field is optional; validation happens in `convert`.
///
/// Amounts and prices are decimal strings. The quote amount was historically
/// stored as `ethAmount` and the hash as `transactionHash`; both are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDocument {
    #[serde(default)]
    pub price_per_token: Option<String>,
    #[serde(default)]
    pub token_amount: Option<String>,
    #[serde(default, alias = "ethAmount")]
    pub quote_amount: Option<String>,
    /// ISO-8601 execution time.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// `"buy"` or `"sell"`.
    #[serde(default, rename = "type")]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub trader: Option<String>,
    #[serde(default, alias = "transactionHash")]
    pub tx_hash: Option<String>,
}
