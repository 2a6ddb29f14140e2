//! Trade snapshot containers: every fetch or push is stamped with a sequence number.

use super::wire::TradeDocument;
use crate::shared::TokenAddress;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// The full trade log for one token as of one fetch.
///
/// Snapshots replace each other; there is no incremental merge.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSnapshot {
    /// Monotonic per-[`SnapshotSequence`]; a higher value is always newer.
    pub seq: u64,
    pub token: TokenAddress,
    pub documents: Vec<TradeDocument>,
    pub received_at: DateTime<Utc>,
}

impl TradeSnapshot {
    /// Snapshot under a sequence number reserved with [`SnapshotSequence::next`].
    ///
    /// Reserve the number when the fetch is issued, not when it completes, so a
    /// slow response can never outrank a request sent after it.
    pub fn new(
        seq: u64,
        token: TokenAddress,
        documents: Vec<TradeDocument>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seq,
            token,
            documents,
            received_at,
        }
    }
}

/// Hands out strictly increasing sequence numbers. Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSequence {
    last: Arc<AtomicU64>,
}

impl SnapshotSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence number. The first call returns `1`.
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last number handed out, `0` if none yet.
    pub fn current(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }

    /// Wrap a freshly received document set in a sequenced snapshot.
    pub fn stamp(
        &self,
        token: TokenAddress,
        documents: Vec<TradeDocument>,
        received_at: DateTime<Utc>,
    ) -> TradeSnapshot {
        TradeSnapshot::new(self.next(), token, documents, received_at)
    }
}
