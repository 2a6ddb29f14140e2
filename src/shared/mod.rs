//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the document store holds, so they can be used directly in wire
//! types without conversion overhead.

pub mod fmt;
pub mod price;
pub mod time;

pub use price::{numeric_sign, parse_base_units, parse_decimal, parse_positive, scale_base_units};
pub use time::parse_timestamp;

use crate::error::TokenError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── TokenAddress ────────────────────────────────────────────────────────────

/// Newtype for a token contract address (`0x` + 40 hex chars), stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenAddress(String);

impl TokenAddress {
    /// Parse and normalize an address. Rejects anything that is not 20 bytes of hex.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| TokenError::InvalidAddress(s.to_string()))?;

        match hex::decode(body) {
            Ok(bytes) if bytes.len() == 20 => Ok(Self(format!("0x{}", body.to_lowercase()))),
            _ => Err(TokenError::InvalidAddress(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenAddress {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TokenAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TokenAddress::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── TradeType ───────────────────────────────────────────────────────────────

/// Trade direction against the bonding curve. Display only; never used in price math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TradeType::Buy => write!(f, "Buy"),
            TradeType::Sell => write!(f, "Sell"),
        }
    }
}

// ─── TimeFrame ───────────────────────────────────────────────────────────────

/// Selectable chart window. Controls the filter predicate, candle width and label format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "30d")]
    Day30,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 6] = [
        Self::Hour1,
        Self::Hour4,
        Self::Day1,
        Self::Day7,
        Self::Day30,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour1 => "1h",
            Self::Hour4 => "4h",
            Self::Day1 => "1d",
            Self::Day7 => "7d",
            Self::Day30 => "30d",
            Self::All => "all",
        }
    }

    /// Lookback window, `None` for the all-time view.
    pub fn window(&self) -> Option<TimeDelta> {
        match self {
            Self::Hour1 => Some(TimeDelta::hours(1)),
            Self::Hour4 => Some(TimeDelta::hours(4)),
            Self::Day1 => Some(TimeDelta::days(1)),
            Self::Day7 => Some(TimeDelta::days(7)),
            Self::Day30 => Some(TimeDelta::days(30)),
            Self::All => None,
        }
    }

    /// Whether `timestamp` falls inside this window. The lower edge is exclusive.
    pub fn contains(&self, now: DateTime<Utc>, timestamp: DateTime<Utc>) -> bool {
        match self.window() {
            Some(window) => timestamp > now - window,
            None => true,
        }
    }

    /// Default width of one candle in seconds.
    pub fn default_bucket_seconds(&self) -> i64 {
        match self {
            Self::Hour1 => 60,
            Self::Hour4 => 300,
            Self::Day1 => 900,
            Self::Day7 => 3600,
            Self::Day30 => 14_400,
            Self::All => 3600,
        }
    }

    /// `chrono` format string for axis labels.
    pub fn label_format(&self) -> &'static str {
        match self {
            Self::Hour1 | Self::Hour4 | Self::Day1 => "%H:%M",
            Self::Day7 => "%b %-d, %H:%M",
            Self::Day30 => "%b %-d",
            Self::All => "%b %-d, %-I:%M %p",
        }
    }
}

impl std::fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| format!("unknown time frame: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ADDR: &str = "0xAbCdEf0123456789abcdef0123456789ABCDEF01";

    #[test]
    fn test_token_address_normalizes_case() {
        let addr = TokenAddress::parse(ADDR).unwrap();
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_token_address_rejects_bad_input() {
        assert!(TokenAddress::parse("abcdef").is_err());
        assert!(TokenAddress::parse("0x1234").is_err());
        assert!(TokenAddress::parse("0xzz23456789abcdef0123456789abcdef01234567").is_err());
    }

    #[test]
    fn test_token_address_serde() {
        let addr = TokenAddress::parse(ADDR).unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xabcdef0123456789abcdef0123456789abcdef01\"");
        let back: TokenAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
        assert!(serde_json::from_str::<TokenAddress>("\"nope\"").is_err());
    }

    #[test]
    fn test_trade_type_serde() {
        let buy: TradeType = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(buy, TradeType::Buy);
        let sell: TradeType = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(sell, TradeType::Sell);
    }

    #[test]
    fn test_time_frame_serde_and_parse() {
        let tf: TimeFrame = serde_json::from_str("\"30d\"").unwrap();
        assert_eq!(tf, TimeFrame::Day30);
        assert_eq!("4h".parse::<TimeFrame>().unwrap(), TimeFrame::Hour4);
        assert!("2h".parse::<TimeFrame>().is_err());
        assert_eq!(TimeFrame::default(), TimeFrame::All);
    }

    #[test]
    fn test_time_frame_window_edge_is_exclusive() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let edge = now - TimeDelta::hours(1);
        assert!(!TimeFrame::Hour1.contains(now, edge));
        assert!(TimeFrame::Hour1.contains(now, edge + TimeDelta::milliseconds(1)));
        assert!(TimeFrame::All.contains(now, edge - TimeDelta::days(3650)));
    }
}
