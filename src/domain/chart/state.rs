//! Latest chart per `(token, time frame)`, guarded by snapshot sequence numbers.

use super::ChartData;
use crate::shared::{TimeFrame, TokenAddress};
use std::collections::HashMap;

/// A chart tagged with the sequence number of the snapshot it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedChart {
    pub seq: u64,
    pub token: TokenAddress,
    pub time_frame: TimeFrame,
    pub chart: ChartData,
}

/// Holds the newest chart for each key. Results built from older snapshots are
/// discarded even if they finish computing later.
#[derive(Debug, Default)]
pub struct ChartState {
    charts: HashMap<(TokenAddress, TimeFrame), SequencedChart>,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `update` unless a chart from the same or a newer snapshot is already held.
    ///
    /// Returns `true` if the update was applied.
    pub fn apply(&mut self, update: SequencedChart) -> bool {
        let key = (update.token.clone(), update.time_frame);
        if let Some(current) = self.charts.get(&key) {
            if update.seq <= current.seq {
                tracing::debug!(
                    token = %update.token,
                    time_frame = %update.time_frame,
                    stale = update.seq,
                    current = current.seq,
                    "discarding stale chart"
                );
                return false;
            }
        }
        self.charts.insert(key, update);
        true
    }

    pub fn get(&self, token: &TokenAddress, time_frame: TimeFrame) -> Option<&ChartData> {
        self.charts
            .get(&(token.clone(), time_frame))
            .map(|entry| &entry.chart)
    }

    /// Sequence number of the stored chart, `None` if nothing is stored.
    pub fn seq(&self, token: &TokenAddress, time_frame: TimeFrame) -> Option<u64> {
        self.charts
            .get(&(token.clone(), time_frame))
            .map(|entry| entry.seq)
    }

    pub fn remove(&mut self, token: &TokenAddress, time_frame: TimeFrame) -> Option<SequencedChart> {
        self.charts.remove(&(token.clone(), time_frame))
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn clear(&mut self) {
        self.charts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> TokenAddress {
        TokenAddress::parse("0x00000000000000000000000000000000000000aa").unwrap()
    }

    fn update(seq: u64, time_frame: TimeFrame, color: &str) -> SequencedChart {
        SequencedChart {
            seq,
            token: token(),
            time_frame,
            chart: ChartData {
                points: vec![],
                candles: vec![],
                time_frame,
                tick_interval: 0,
                series_color: color.to_string(),
            },
        }
    }

    #[test]
    fn test_newer_replaces_older() {
        let mut state = ChartState::new();
        assert!(state.apply(update(1, TimeFrame::Hour1, "a")));
        assert!(state.apply(update(2, TimeFrame::Hour1, "b")));
        assert_eq!(state.get(&token(), TimeFrame::Hour1).unwrap().series_color, "b");
        assert_eq!(state.seq(&token(), TimeFrame::Hour1), Some(2));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut state = ChartState::new();
        assert!(state.apply(update(5, TimeFrame::Hour1, "new")));
        assert!(!state.apply(update(3, TimeFrame::Hour1, "old")));
        assert!(!state.apply(update(5, TimeFrame::Hour1, "dup")));
        assert_eq!(state.get(&token(), TimeFrame::Hour1).unwrap().series_color, "new");
    }

    #[test]
    fn test_keys_are_independent() {
        let mut state = ChartState::new();
        assert!(state.apply(update(5, TimeFrame::Hour1, "a")));
        assert!(state.apply(update(1, TimeFrame::Day7, "b")));
        assert_eq!(state.len(), 2);
        assert!(state.remove(&token(), TimeFrame::Hour1).is_some());
        assert!(state.get(&token(), TimeFrame::Hour1).is_none());
        state.clear();
        assert!(state.is_empty());
    }
}
