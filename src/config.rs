//! Chart configuration: price constants, candle widths, label offset, series color.
//!
//! Everything the pipeline would otherwise read from ambient state is passed in
//! through [`ChartConfig`].

use crate::domain::chart::aggregate::Bucketing;
use crate::shared::TimeFrame;
use chrono::{FixedOffset, Offset, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The factory's initial bonding-curve price (`0.00001` of the quote currency).
pub const INITIAL_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 5);

/// Decimals of the quote currency's base unit (wei).
pub const QUOTE_DECIMALS: u32 = 18;

/// Fallback series color when the app does not supply a theme color.
pub const DEFAULT_SERIES_COLOR: &str = "#8b5cf6";

/// Configuration for one chart pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// No candle value is rendered below this price.
    pub floor_price: Decimal,
    /// Price of the synthesized genesis point.
    pub initial_price: Decimal,
    /// Base-unit decimals of quote amounts, for volume.
    pub quote_decimals: u32,
    /// Offset used to render axis labels.
    pub label_offset: FixedOffset,
    /// Line/candle color handed to the renderer.
    pub series_color: String,
    bucket_overrides: HashMap<TimeFrame, i64>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            floor_price: INITIAL_PRICE,
            initial_price: INITIAL_PRICE,
            quote_decimals: QUOTE_DECIMALS,
            label_offset: Utc.fix(),
            series_color: DEFAULT_SERIES_COLOR.to_string(),
            bucket_overrides: HashMap::new(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floor_price(mut self, price: Decimal) -> Self {
        self.floor_price = price;
        self
    }

    pub fn initial_price(mut self, price: Decimal) -> Self {
        self.initial_price = price;
        self
    }

    pub fn quote_decimals(mut self, decimals: u32) -> Self {
        self.quote_decimals = decimals;
        self
    }

    pub fn label_offset(mut self, offset: FixedOffset) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn series_color(mut self, color: impl Into<String>) -> Self {
        self.series_color = color.into();
        self
    }

    /// Override the candle width for one time frame. Widths below one second are raised to one.
    pub fn bucket_seconds(mut self, time_frame: TimeFrame, seconds: i64) -> Self {
        self.bucket_overrides.insert(time_frame, seconds.max(1));
        self
    }

    /// Effective candle width for a time frame.
    pub fn bucket_seconds_for(&self, time_frame: TimeFrame) -> i64 {
        self.bucket_overrides
            .get(&time_frame)
            .copied()
            .unwrap_or_else(|| time_frame.default_bucket_seconds())
    }

    /// Bucketing parameters for one aggregation call.
    pub fn bucketing(&self, time_frame: TimeFrame) -> Bucketing {
        Bucketing::new(
            self.bucket_seconds_for(time_frame),
            self.floor_price,
            self.quote_decimals,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_initial_price_constant() {
        assert_eq!(INITIAL_PRICE, Decimal::from_str("0.00001").unwrap());
    }

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.floor_price, INITIAL_PRICE);
        assert_eq!(config.quote_decimals, 18);
        assert_eq!(config.bucket_seconds_for(TimeFrame::Hour4), 300);
        assert_eq!(config.series_color, DEFAULT_SERIES_COLOR);
    }

    #[test]
    fn test_bucket_override_is_clamped_positive() {
        let config = ChartConfig::new()
            .bucket_seconds(TimeFrame::Day1, 1800)
            .bucket_seconds(TimeFrame::Hour1, 0);
        assert_eq!(config.bucket_seconds_for(TimeFrame::Day1), 1800);
        assert_eq!(config.bucket_seconds_for(TimeFrame::Hour1), 1);
        assert_eq!(config.bucket_seconds_for(TimeFrame::Day7), 3600);
    }
}
