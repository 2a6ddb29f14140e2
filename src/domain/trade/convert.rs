//! Conversion: TradeDocument → Trade (TryFrom + validation).
//!
//! A document that fails any check is dropped whole; nothing is partially used.

use super::wire::TradeDocument;
use super::{Trade, MAX_FUTURE_SKEW_SECS, MAX_TRADE_AGE_DAYS};
use crate::error::TradeRejection;
use crate::shared::{
    numeric_sign, parse_decimal, parse_positive, parse_timestamp, TokenAddress, TradeType,
};
use chrono::{DateTime, TimeDelta, Utc};
use std::cmp::Ordering;

/// Treats empty strings the same as absent fields.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn parse_trade_type(raw: Option<&str>) -> Option<TradeType> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "buy" => Some(TradeType::Buy),
        "sell" => Some(TradeType::Sell),
        _ => None,
    }
}

impl TryFrom<(&TradeDocument, DateTime<Utc>)> for Trade {
    type Error = TradeRejection;

    fn try_from((doc, now): (&TradeDocument, DateTime<Utc>)) -> Result<Self, Self::Error> {
        let raw_price = present(&doc.price_per_token).ok_or(TradeRejection::MissingPrice)?;
        let raw_timestamp = present(&doc.timestamp).ok_or(TradeRejection::MissingTimestamp)?;

        // Positive prices below `Decimal`'s precision saturate and get clamped to the floor later.
        let price = parse_positive(raw_price)
            .ok_or_else(|| TradeRejection::InvalidPrice(raw_price.to_string()))?;

        let (token_amount, quote_amount) =
            match (present(&doc.token_amount), present(&doc.quote_amount)) {
                (Some(raw_token), Some(raw_quote)) => {
                    let positive = |raw: &str| numeric_sign(raw) == Some(Ordering::Greater);
                    if !positive(raw_token) || !positive(raw_quote) {
                        return Err(TradeRejection::NonPositiveAmounts {
                            token_amount: raw_token.to_string(),
                            quote_amount: raw_quote.to_string(),
                        });
                    }
                    // Raw wei beyond `Decimal`'s range is valid but kept as unknown.
                    (parse_decimal(raw_token), parse_decimal(raw_quote))
                }
                (token, quote) => (
                    token.and_then(parse_decimal),
                    quote.and_then(parse_decimal),
                ),
            };

        let timestamp = parse_timestamp(raw_timestamp)
            .ok_or_else(|| TradeRejection::InvalidTimestamp(raw_timestamp.to_string()))?;

        let oldest = now - TimeDelta::days(MAX_TRADE_AGE_DAYS);
        let newest = now + TimeDelta::seconds(MAX_FUTURE_SKEW_SECS);
        if timestamp < oldest || timestamp > newest {
            return Err(TradeRejection::TimestampOutOfRange(raw_timestamp.to_string()));
        }

        Ok(Trade {
            token: present(&doc.token).and_then(|a| TokenAddress::parse(a).ok()),
            trader: present(&doc.trader).map(str::to_string),
            tx_hash: present(&doc.tx_hash).map(str::to_string),
            trade_type: parse_trade_type(present(&doc.trade_type)),
            timestamp,
            price,
            token_amount,
            quote_amount,
        })
    }
}

/// Validate one document, logging a warning when it is rejected.
pub fn validate_trade(doc: &TradeDocument, now: DateTime<Utc>) -> Result<Trade, TradeRejection> {
    Trade::try_from((doc, now)).inspect_err(|reason| {
        tracing::warn!(
            tx_hash = doc.tx_hash.as_deref().unwrap_or("-"),
            timestamp = doc.timestamp.as_deref().unwrap_or("-"),
            "Dropping trade: {}",
            reason
        );
    })
}

/// Whether a document is usable for aggregation.
pub fn is_valid_trade(doc: &TradeDocument, now: DateTime<Utc>) -> bool {
    validate_trade(doc, now).is_ok()
}

/// Validate a batch, keeping input order and dropping every rejected document.
pub fn validate_trades(docs: &[TradeDocument], now: DateTime<Utc>) -> Vec<Trade> {
    let trades: Vec<Trade> = docs
        .iter()
        .filter_map(|doc| validate_trade(doc, now).ok())
        .collect();

    if trades.len() < docs.len() {
        tracing::debug!(
            total = docs.len(),
            kept = trades.len(),
            "Validated trade batch"
        );
    }
    trades
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn doc(price: &str, timestamp: &str) -> TradeDocument {
        TradeDocument {
            price_per_token: Some(price.to_string()),
            timestamp: Some(timestamp.to_string()),
            trade_type: Some("buy".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_trade_converts() {
        let mut d = doc("0.0000123", "2025-06-01T11:00:00Z");
        d.token = Some("0xABCDEF0123456789abcdef0123456789abcdef01".to_string());
        d.token_amount = Some("1000".to_string());
        d.quote_amount = Some("5".to_string());
        d.trade_type = Some("Sell".to_string());

        let trade = validate_trade(&d, now()).unwrap();
        assert_eq!(trade.price, Decimal::from_str("0.0000123").unwrap());
        assert_eq!(trade.trade_type, Some(TradeType::Sell));
        assert_eq!(trade.token_amount, Some(Decimal::from(1000)));
        assert_eq!(
            trade.token.unwrap().as_str(),
            "0xabcdef0123456789abcdef0123456789abcdef01"
        );
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut d = doc("1", "2025-06-01T11:00:00Z");
        d.price_per_token = None;
        assert_eq!(validate_trade(&d, now()), Err(TradeRejection::MissingPrice));

        let mut d = doc("1", "2025-06-01T11:00:00Z");
        d.timestamp = Some(String::new());
        assert_eq!(
            validate_trade(&d, now()),
            Err(TradeRejection::MissingTimestamp)
        );
    }

    #[test]
    fn test_bad_prices_rejected() {
        for price in ["0", "-0.5", "NaN", "abc"] {
            let d = doc(price, "2025-06-01T11:00:00Z");
            assert!(
                matches!(validate_trade(&d, now()), Err(TradeRejection::InvalidPrice(_))),
                "price {price} should be rejected"
            );
        }
    }

    #[test]
    fn test_amounts_checked_only_when_both_present() {
        let mut d = doc("1", "2025-06-01T11:00:00Z");
        d.token_amount = Some("0".to_string());
        assert!(is_valid_trade(&d, now()));

        d.quote_amount = Some("10".to_string());
        assert!(matches!(
            validate_trade(&d, now()),
            Err(TradeRejection::NonPositiveAmounts { .. })
        ));

        d.token_amount = Some("garbage".to_string());
        assert!(!is_valid_trade(&d, now()));
    }

    #[test]
    fn test_wei_amounts_beyond_decimal_range_accepted() {
        let mut d = doc("0.00002", "2025-06-01T11:00:00Z");
        d.token_amount = Some("100000000000000000000000000000".to_string());
        d.quote_amount = Some("2000000000000000000".to_string());
        let trade = validate_trade(&d, now()).unwrap();
        assert_eq!(trade.token_amount, None);
        assert_eq!(trade.quote_amount, Some(Decimal::from_str("2000000000000000000").unwrap()));

        d.token_amount = Some("-100000000000000000000000000000".to_string());
        assert!(matches!(
            validate_trade(&d, now()),
            Err(TradeRejection::NonPositiveAmounts { .. })
        ));
    }

    #[test]
    fn test_tiny_positive_prices_kept() {
        for price in ["1e-30", "0.00000000000000000000000000000123"] {
            let trade = validate_trade(&doc(price, "2025-06-01T11:00:00Z"), now()).unwrap();
            assert!(trade.price > Decimal::ZERO, "price {price}");
            assert!(trade.price < Decimal::from_str("0.00001").unwrap());
        }
    }

    #[test]
    fn test_transaction_hash_alias() {
        let d: TradeDocument = serde_json::from_str(
            r#"{"pricePerToken": "0.1", "timestamp": "2025-06-01T11:00:00Z", "transactionHash": "0xfeed"}"#,
        )
        .unwrap();
        assert_eq!(validate_trade(&d, now()).unwrap().tx_hash.as_deref(), Some("0xfeed"));
    }

    #[test]
    fn test_timestamp_range() {
        assert!(is_valid_trade(&doc("1", "2025-06-01T12:00:59Z"), now()));
        assert!(!is_valid_trade(&doc("1", "2025-06-01T12:01:01Z"), now()));
        assert!(is_valid_trade(&doc("1", "2024-06-02T12:00:00Z"), now()));
        assert!(!is_valid_trade(&doc("1", "2024-05-31T12:00:00Z"), now()));
        assert!(matches!(
            validate_trade(&doc("1", "not a date"), now()),
            Err(TradeRejection::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_validate_trades_keeps_order() {
        let docs = vec![
            doc("2", "2025-06-01T11:30:00Z"),
            doc("0", "2025-06-01T11:00:00Z"),
            doc("1", "2025-06-01T10:00:00Z"),
        ];
        let trades = validate_trades(&docs, now());
        let prices: Vec<_> = trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![Decimal::from(2), Decimal::from(1)]);
    }
}
