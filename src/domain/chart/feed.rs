//! Snapshot streams → chart streams.

use super::build::chart_from_documents;
use super::state::SequencedChart;
use crate::config::ChartConfig;
use crate::domain::token::Token;
use crate::domain::trade::TradeSnapshot;
use crate::shared::TimeFrame;

use futures_util::{Stream, StreamExt};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Drops snapshots whose sequence number is not newer than the last one yielded.
    pub struct DiscardStale<S> {
        #[pin]
        inner: S,
        last_seq: u64,
    }
}

impl<S> DiscardStale<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, last_seq: 0 }
    }

    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }
}

impl<S> Stream for DiscardStale<S>
where
    S: Stream<Item = TradeSnapshot>,
{
    type Item = TradeSnapshot;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(snapshot)) => {
                    if snapshot.seq <= *this.last_seq {
                        tracing::debug!(
                            stale = snapshot.seq,
                            current = *this.last_seq,
                            "discarding stale trade snapshot"
                        );
                        continue;
                    }
                    *this.last_seq = snapshot.seq;
                    return Poll::Ready(Some(snapshot));
                }
                other => return other,
            }
        }
    }
}

/// Rebuild the chart for every fresh snapshot.
///
/// Snapshots arriving out of order are skipped, so the output sequence numbers
/// strictly increase. Each snapshot's `received_at` is used as "now".
pub fn chart_stream<S>(
    snapshots: S,
    token: Token,
    time_frame: TimeFrame,
    config: ChartConfig,
) -> impl Stream<Item = SequencedChart>
where
    S: Stream<Item = TradeSnapshot>,
{
    async_stream::stream! {
        let snapshots = DiscardStale::new(snapshots);
        futures_util::pin_mut!(snapshots);
        while let Some(snapshot) = snapshots.next().await {
            let chart = chart_from_documents(
                &snapshot.documents,
                &token,
                time_frame,
                &config,
                snapshot.received_at,
            );
            yield SequencedChart {
                seq: snapshot.seq,
                token: snapshot.token,
                time_frame,
                chart,
            };
        }
    }
}
