//! Genesis point: the token's creation price, pinned at its creation time.

use super::{ChartPoint, TimeLabeler};
use crate::domain::token::Token;
use crate::shared::TimeFrame;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// The genesis point for `token`, if its creation time lies inside `time_frame`.
pub fn genesis_point(
    token: &Token,
    time_frame: TimeFrame,
    initial_price: Decimal,
    now: DateTime<Utc>,
    labels: &TimeLabeler,
) -> Option<ChartPoint> {
    let created_at = token.created_at?;
    if !time_frame.contains(now, created_at) {
        return None;
    }
    Some(ChartPoint::new(
        initial_price,
        created_at.timestamp_millis(),
        true,
        labels,
    ))
}

/// Merge an optional genesis point into a series and re-sort by timestamp.
///
/// On a timestamp tie the genesis point comes first.
pub fn merge_genesis(mut points: Vec<ChartPoint>, genesis: Option<ChartPoint>) -> Vec<ChartPoint> {
    if let Some(point) = genesis {
        points.insert(0, point);
        points.sort_by_key(|p| p.timestamp);
    }
    points
}
