//! Candle aggregation: fixed-width time buckets reduced to OHLC.

use super::Candle;
use crate::domain::trade::Trade;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Parameters fixed for the duration of one aggregation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucketing {
    /// Candle width in seconds, always ≥ 1.
    pub width_secs: i64,
    /// Every OHLC value is clamped to at least this price.
    pub floor: Decimal,
    /// Base-unit decimals of quote amounts.
    pub quote_decimals: u32,
}

impl Bucketing {
    pub fn new(width_secs: i64, floor: Decimal, quote_decimals: u32) -> Self {
        Self {
            width_secs: width_secs.max(1),
            floor,
            quote_decimals,
        }
    }

    /// Start of the bucket containing `secs` (floor division, also for pre-epoch times).
    pub fn bucket_start(&self, secs: i64) -> i64 {
        secs.div_euclid(self.width_secs) * self.width_secs
    }
}

/// Aggregate trades into candles, ascending by bucket time.
///
/// Trades may come in any order; ties on timestamp keep their input order, so
/// the earlier one opens and the later one closes. With no trades the result is
/// a single flat candle at `now` priced at the floor.
pub fn aggregate_candles(trades: &[Trade], bucketing: &Bucketing, now: DateTime<Utc>) -> Vec<Candle> {
    if trades.is_empty() {
        return vec![Candle::flat(now.timestamp(), bucketing.floor)];
    }

    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.timestamp);

    let mut candles: Vec<Candle> = Vec::new();
    for trade in sorted {
        let bucket = bucketing.bucket_start(trade.timestamp.timestamp());
        let price = trade.price.max(bucketing.floor);
        let volume = trade
            .quote_volume(bucketing.quote_decimals)
            .unwrap_or_default();

        match candles.last_mut() {
            Some(candle) if candle.time == bucket => {
                candle.high = candle.high.max(price);
                candle.low = candle.low.min(price);
                candle.close = price;
                candle.volume = candle.volume.saturating_add(volume);
                candle.trade_count += 1;
            }
            _ => candles.push(Candle {
                time: bucket,
                open: price,
                high: price,
                low: price,
                close: price,
                volume,
                trade_count: 1,
            }),
        }
    }

    candles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn trade(offset_secs: i64, price: &str) -> Trade {
        Trade {
            token: None,
            trader: None,
            tx_hash: None,
            trade_type: None,
            timestamp: base() + TimeDelta::seconds(offset_secs),
            price: dec(price),
            token_amount: None,
            quote_amount: None,
        }
    }

    fn bucketing(width: i64) -> Bucketing {
        Bucketing::new(width, dec("0.00001"), 18)
    }

    #[test]
    fn test_empty_yields_single_floor_candle() {
        let now = base();
        let candles = aggregate_candles(&[], &bucketing(60), now);
        assert_eq!(candles, vec![Candle::flat(now.timestamp(), dec("0.00001"))]);
    }

    #[test]
    fn test_single_trade_is_flat() {
        let candles = aggregate_candles(&[trade(5, "0.002")], &bucketing(60), base());
        assert_eq!(candles.len(), 1);
        let c = &candles[0];
        assert_eq!(c.time, base().timestamp());
        assert!(c.open == dec("0.002") && c.high == c.open && c.low == c.open && c.close == c.open);
        assert_eq!(c.trade_count, 1);
    }

    #[test]
    fn test_ohlc_within_bucket_uses_time_order() {
        // Input deliberately out of order.
        let trades = vec![
            trade(50, "0.004"),
            trade(10, "0.002"),
            trade(30, "0.005"),
            trade(20, "0.001"),
        ];
        let candles = aggregate_candles(&trades, &bucketing(60), base());
        assert_eq!(candles.len(), 1);
        let c = &candles[0];
        assert_eq!(c.open, dec("0.002"));
        assert_eq!(c.close, dec("0.004"));
        assert_eq!(c.high, dec("0.005"));
        assert_eq!(c.low, dec("0.001"));
        assert_eq!(c.trade_count, 4);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let trades = vec![trade(10, "0.003"), trade(10, "0.007")];
        let c = &aggregate_candles(&trades, &bucketing(60), base())[0];
        assert_eq!(c.open, dec("0.003"));
        assert_eq!(c.close, dec("0.007"));
    }

    #[test]
    fn test_buckets_split_and_ascend() {
        let trades = vec![trade(125, "0.3"), trade(0, "0.1"), trade(61, "0.2")];
        let candles = aggregate_candles(&trades, &bucketing(60), base());
        let times: Vec<i64> = candles.iter().map(|c| c.time - base().timestamp()).collect();
        assert_eq!(times, vec![0, 60, 120]);
    }

    #[test]
    fn test_prices_below_floor_are_clamped() {
        let trades = vec![trade(0, "0.000001"), trade(1, "0.00002")];
        let c = &aggregate_candles(&trades, &bucketing(60), base())[0];
        assert_eq!(c.open, dec("0.00001"));
        assert_eq!(c.low, dec("0.00001"));
        assert_eq!(c.high, dec("0.00002"));
    }

    #[test]
    fn test_volume_in_display_units() {
        let mut a = trade(0, "0.1");
        a.quote_amount = Some(dec("500000000000000000"));
        let mut b = trade(1, "0.1");
        b.quote_amount = Some(dec("250000000000000000"));
        let c = &aggregate_candles(&[a, b], &bucketing(60), base())[0];
        assert_eq!(c.volume, dec("0.75"));
    }

    #[test]
    fn test_non_positive_amounts_add_no_volume() {
        let mut a = trade(0, "0.1");
        a.quote_amount = Some(dec("500000000000000000"));
        let mut b = trade(1, "0.1");
        b.quote_amount = Some(dec("-900000000000000000"));
        let mut c = trade(2, "0.1");
        c.quote_amount = Some(Decimal::ZERO);
        let candle = &aggregate_candles(&[a, b, c], &bucketing(60), base())[0];
        assert_eq!(candle.volume, dec("0.5"));
        assert_eq!(candle.trade_count, 3);
    }

    #[test]
    fn test_bucket_start_floors_negative_times() {
        let b = bucketing(60);
        assert_eq!(b.bucket_start(-1), -60);
        assert_eq!(b.bucket_start(59), 0);
        assert_eq!(Bucketing::new(0, Decimal::ZERO, 18).width_secs, 1);
    }

    #[test]
    fn test_idempotent() {
        let trades = vec![trade(10, "0.2"), trade(100, "0.1"), trade(400, "0.3")];
        let first = aggregate_candles(&trades, &bucketing(300), base());
        let second = aggregate_candles(&trades, &bucketing(300), base());
        assert_eq!(first, second);
    }
}
