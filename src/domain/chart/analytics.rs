//! Header statistics shown above a chart.

use super::ChartData;
use crate::domain::trade::Trade;
use crate::shared::fmt::format_volume;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    Neutral,
}

impl PriceDirection {
    fn of(change: Option<Decimal>) -> Self {
        match change {
            Some(c) if c > Decimal::ZERO => Self::Up,
            Some(c) if c < Decimal::ZERO => Self::Down,
            _ => Self::Neutral,
        }
    }
}

/// Summary of the trades behind a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAnalytics {
    pub trade_count: usize,
    /// Sum of quote amounts in display units.
    pub total_volume: Decimal,
    /// Share of buys among trades, `0.0..=1.0`.
    pub buy_pressure: f64,
    /// Percent change from the genesis price to the latest point.
    pub price_change_pct: Option<Decimal>,
    pub direction: PriceDirection,
}

impl ChartAnalytics {
    pub fn compute(trades: &[Trade], chart: &ChartData, quote_decimals: u32) -> Self {
        let trade_count = trades.len();
        let total_volume = trades
            .iter()
            .filter_map(|t| t.quote_volume(quote_decimals))
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v));
        let buys = trades.iter().filter(|t| t.is_buy()).count();
        let buy_pressure = if trade_count == 0 {
            0.0
        } else {
            buys as f64 / trade_count as f64
        };

        let price_change_pct = match (chart.genesis(), chart.latest_trade_point()) {
            (Some(genesis), Some(latest)) if genesis.price > Decimal::ZERO => latest
                .price
                .checked_sub(genesis.price)
                .and_then(|delta| delta.checked_div(genesis.price))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
            _ => None,
        };

        Self {
            trade_count,
            total_volume,
            buy_pressure,
            price_change_pct,
            direction: PriceDirection::of(price_change_pct),
        }
    }

    pub fn formatted_volume(&self) -> String {
        format_volume(&self.total_volume)
    }
}
