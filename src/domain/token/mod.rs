//! Token domain: the descriptor a chart needs (address, names, creation time).

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::TokenAddress;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bonding-curve token, as far as charting is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub address: TokenAddress,
    pub name: Option<String>,
    pub symbol: Option<String>,
    /// Creation time; drives the genesis point. `None` means no genesis point.
    pub created_at: Option<DateTime<Utc>>,
    pub last_price: Option<Decimal>,
}

impl Token {
    /// A token known only by its address.
    pub fn new(address: TokenAddress) -> Self {
        Self {
            address,
            name: None,
            symbol: None,
            created_at: None,
            last_price: None,
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// `symbol`, falling back to `name`, then the address.
    pub fn display_name(&self) -> &str {
        self.symbol
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_else(|| self.address.as_str())
    }
}
