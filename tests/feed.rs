//! Snapshot stream → chart stream, including out-of-order delivery.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use futures_util::{stream, StreamExt};

use curve_charts::config::ChartConfig;
use curve_charts::domain::chart::{chart_stream, ChartState, DiscardStale};
use curve_charts::domain::token::Token;
use curve_charts::domain::trade::wire::TradeDocument;
use curve_charts::domain::trade::{SnapshotSequence, TradeSnapshot};
use curve_charts::shared::{TimeFrame, TokenAddress};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn address() -> TokenAddress {
    TokenAddress::parse("0x2222222222222222222222222222222222222222").unwrap()
}

fn snapshot(seq: &SnapshotSequence, trade_count: usize) -> TradeSnapshot {
    let documents = (0..trade_count)
        .map(|i| TradeDocument {
            price_per_token: Some("0.001".to_string()),
            timestamp: Some((now() - TimeDelta::seconds(i as i64 * 10 + 1)).to_rfc3339()),
            ..Default::default()
        })
        .collect();
    seq.stamp(address(), documents, now())
}

#[tokio::test]
async fn test_discard_stale_snapshots() {
    let seq = SnapshotSequence::new();
    let first = snapshot(&seq, 1);
    let second = snapshot(&seq, 2);
    let third = snapshot(&seq, 3);

    // Deliver 2, then the late 1, then 3.
    let delivered = stream::iter(vec![second, first, third]);
    let seqs: Vec<u64> = DiscardStale::new(delivered).map(|s| s.seq).collect().await;
    assert_eq!(seqs, vec![2, 3]);
}

#[tokio::test]
async fn test_chart_stream_builds_each_fresh_snapshot() {
    let seq = SnapshotSequence::new();
    let snapshots = vec![snapshot(&seq, 1), snapshot(&seq, 4)];

    let charts: Vec<_> = chart_stream(
        stream::iter(snapshots),
        Token::new(address()),
        TimeFrame::Hour1,
        ChartConfig::default(),
    )
    .collect()
    .await;

    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].seq, 1);
    assert_eq!(charts[1].seq, 2);
    let total: u32 = charts[1].chart.candles.iter().map(|c| c.trade_count).sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_state_keeps_newest_when_results_finish_out_of_order() {
    let seq = SnapshotSequence::new();
    let old = snapshot(&seq, 1);
    let new = snapshot(&seq, 5);

    // Build each snapshot through its own stream, as two racing fetches would.
    let build = |s: TradeSnapshot| {
        chart_stream(
            stream::iter(vec![s]),
            Token::new(address()),
            TimeFrame::Hour1,
            ChartConfig::default(),
        )
        .collect::<Vec<_>>()
    };
    let new_chart = build(new).await.remove(0);
    let old_chart = build(old).await.remove(0);

    let mut state = ChartState::new();
    assert!(state.apply(new_chart));
    assert!(!state.apply(old_chart));
    assert_eq!(state.seq(&address(), TimeFrame::Hour1), Some(2));
}

#[test]
fn test_empty_snapshot_stream_yields_nothing() {
    let charts: Vec<_> = tokio_test::block_on(
        chart_stream(
            stream::iter(Vec::<TradeSnapshot>::new()),
            Token::new(address()),
            TimeFrame::All,
            ChartConfig::default(),
        )
        .collect(),
    );
    assert!(charts.is_empty());
}

#[test]
fn test_empty_snapshot_still_charts_placeholder() {
    let seq = SnapshotSequence::new();
    let mut charts = tokio_test::block_on(
        chart_stream(
            stream::iter(vec![snapshot(&seq, 0)]),
            Token::new(address()),
            TimeFrame::Day1,
            ChartConfig::default(),
        )
        .collect::<Vec<_>>(),
    );
    let update = charts.remove(0);
    assert_eq!(update.chart.candles.len(), 1);
    assert_eq!(update.chart.candles[0].trade_count, 0);
    assert_eq!(update.chart.candles[0].time, now().timestamp());
}
