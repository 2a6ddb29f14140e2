//! Trade domain: trade documents, validation and sequenced snapshots.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::{scale_base_units, TokenAddress, TradeType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::{is_valid_trade, validate_trade, validate_trades};
pub use state::{SnapshotSequence, TradeSnapshot};

/// Accepted clock skew for trades stamped slightly in the future.
pub const MAX_FUTURE_SKEW_SECS: i64 = 60;

/// Trades older than this many days are treated as bad data.
pub const MAX_TRADE_AGE_DAYS: i64 = 365;

/// A validated trade, safe to feed into candle aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trade {
    pub token: Option<TokenAddress>,
    pub trader: Option<String>,
    pub tx_hash: Option<String>,
    pub trade_type: Option<TradeType>,
    pub timestamp: DateTime<Utc>,
    /// Price of one token in the quote currency.
    pub price: Decimal,
    /// Raw token amount in base units, as stored.
    pub token_amount: Option<Decimal>,
    /// Raw quote amount in base units (wei), as stored.
    pub quote_amount: Option<Decimal>,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.trade_type == Some(TradeType::Buy)
    }

    /// Quote amount scaled to display units, if present, positive and representable.
    ///
    /// Zero and negative amounts never count toward volume.
    pub fn quote_volume(&self, quote_decimals: u32) -> Option<Decimal> {
        let raw = self.quote_amount.filter(|a| *a > Decimal::ZERO)?;
        scale_base_units(raw, quote_decimals)
    }
}
