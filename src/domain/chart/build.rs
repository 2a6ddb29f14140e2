//! Pipeline entry points: trades (or raw documents) in, [`ChartData`] out.

use super::aggregate::aggregate_candles;
use super::genesis::{genesis_point, merge_genesis};
use super::ticks::tick_interval;
use super::{ChartData, ChartPoint, TimeLabeler};
use crate::config::ChartConfig;
use crate::domain::token::Token;
use crate::domain::trade::wire::TradeDocument;
use crate::domain::trade::{validate_trades, Trade};
use crate::shared::TimeFrame;
use chrono::{DateTime, Utc};

/// Build chart data for one token and time frame from validated trades.
///
/// Pure and deterministic for a fixed `now`; calling it twice with the same
/// input yields identical output.
pub fn build_chart(
    trades: &[Trade],
    token: &Token,
    time_frame: TimeFrame,
    config: &ChartConfig,
    now: DateTime<Utc>,
) -> ChartData {
    let in_window: Vec<Trade> = trades
        .iter()
        .filter(|t| time_frame.contains(now, t.timestamp))
        .cloned()
        .collect();

    let candles = aggregate_candles(&in_window, &config.bucketing(time_frame), now);
    let labels = TimeLabeler::new(time_frame, config.label_offset);

    let points: Vec<ChartPoint> = candles
        .iter()
        .map(|c| ChartPoint::new(c.close, c.timestamp_ms(), false, &labels))
        .collect();
    let genesis = genesis_point(token, time_frame, config.initial_price, now, &labels);
    let points = merge_genesis(points, genesis);

    tracing::debug!(
        token = %token.address,
        time_frame = %time_frame,
        trades = in_window.len(),
        candles = candles.len(),
        points = points.len(),
        "built chart"
    );

    ChartData {
        tick_interval: tick_interval(points.len()),
        points,
        candles,
        time_frame,
        series_color: config.series_color.clone(),
    }
}

/// Validate raw trade documents, then [`build_chart`].
pub fn chart_from_documents(
    documents: &[TradeDocument],
    token: &Token,
    time_frame: TimeFrame,
    config: &ChartConfig,
    now: DateTime<Utc>,
) -> ChartData {
    let trades = validate_trades(documents, now);
    build_chart(&trades, token, time_frame, config, now)
}
