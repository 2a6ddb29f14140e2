//! Chart domain: OHLC candles and chart points built from a token's trade log.
//!
//! The pipeline is pure: validated trades → time-frame window → candles →
//! genesis point → tick spacing. See [`build_chart`].

pub mod aggregate;
pub mod analytics;
mod build;
#[cfg(feature = "http")]
pub mod client;
pub mod feed;
pub mod genesis;
pub mod state;
pub mod ticks;

use crate::shared::fmt::{format_chart_price, format_token_price};
use crate::shared::TimeFrame;
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use aggregate::{aggregate_candles, Bucketing};
pub use analytics::{ChartAnalytics, PriceDirection};
pub use build::{build_chart, chart_from_documents};
pub use feed::{chart_stream, DiscardStale};
pub use genesis::{genesis_point, merge_genesis};
pub use state::{ChartState, SequencedChart};
pub use ticks::tick_interval;

/// Open/high/low/close summary of one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    /// Bucket start, Unix seconds.
    pub time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Quote-currency volume in display units.
    pub volume: Decimal,
    pub trade_count: u32,
}

impl Candle {
    /// A candle with every price field equal to `price` and no volume.
    pub fn flat(time: i64, price: Decimal) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            volume: Decimal::ZERO,
            trade_count: 0,
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.time.saturating_mul(1000)
    }
}

/// One point on the price line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub price: Decimal,
    pub formatted_price: String,
    pub time_label: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    /// Synthesized creation-price point, not backed by a trade.
    pub is_genesis: bool,
}

impl ChartPoint {
    pub fn new(price: Decimal, timestamp: i64, is_genesis: bool, labels: &TimeLabeler) -> Self {
        Self {
            price,
            formatted_price: format_token_price(&price),
            time_label: labels.label(timestamp),
            timestamp,
            is_genesis,
        }
    }
}

/// Everything a charting widget needs for one token and time frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub points: Vec<ChartPoint>,
    pub candles: Vec<Candle>,
    pub time_frame: TimeFrame,
    /// Axis label thinning: render every `tick_interval + 1`-th label.
    pub tick_interval: usize,
    pub series_color: String,
}

impl ChartData {
    pub fn genesis(&self) -> Option<&ChartPoint> {
        self.points.iter().find(|p| p.is_genesis)
    }

    /// The most recent point backed by trades (or the placeholder).
    pub fn latest_trade_point(&self) -> Option<&ChartPoint> {
        self.points.iter().rev().find(|p| !p.is_genesis)
    }

    /// Lowest and highest point price.
    pub fn price_bounds(&self) -> Option<(Decimal, Decimal)> {
        let mut prices = self.points.iter().map(|p| p.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// `count` evenly spaced Y-axis labels from the lowest to the highest price.
    ///
    /// A flat series yields a single label.
    pub fn axis_ticks(&self, count: usize) -> Vec<String> {
        let Some((lo, hi)) = self.price_bounds() else {
            return Vec::new();
        };
        if lo == hi || count < 2 {
            return vec![format_chart_price(&lo)];
        }
        let step = (hi - lo) / Decimal::from(count - 1);
        (0..count)
            .map(|i| format_chart_price(&(lo + step * Decimal::from(i))))
            .collect()
    }
}

/// Formats point timestamps with the time frame's label format.
#[derive(Debug, Clone, Copy)]
pub struct TimeLabeler {
    format: &'static str,
    offset: FixedOffset,
}

impl TimeLabeler {
    pub fn new(time_frame: TimeFrame, offset: FixedOffset) -> Self {
        Self {
            format: time_frame.label_format(),
            offset,
        }
    }

    /// Label for a Unix-millis timestamp; empty if the timestamp is out of range.
    pub fn label(&self, timestamp_ms: i64) -> String {
        DateTime::from_timestamp_millis(timestamp_ms)
            .map(|dt| dt.with_timezone(&self.offset).format(self.format).to_string())
            .unwrap_or_default()
    }
}
