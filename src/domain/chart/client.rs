//! Charts sub-client: fetch, build and track charts.

use crate::client::ChartClient;
use crate::domain::chart::{chart_from_documents, chart_stream, ChartData, SequencedChart};
use crate::domain::token::Token;
use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::shared::{TimeFrame, TokenAddress};

use futures_util::{Stream, StreamExt};
use std::time::Duration;

pub struct Charts<'a> {
    pub(crate) client: &'a ChartClient,
}

impl<'a> Charts<'a> {
    /// Fetch the token and its trade log, then build a chart.
    pub async fn get(
        &self,
        address: &TokenAddress,
        time_frame: TimeFrame,
    ) -> Result<ChartData, SdkError> {
        Ok(self.refresh_inner(address, time_frame).await?.chart)
    }

    /// Fetch, build, and store in the client's chart state.
    ///
    /// Returns the chart that is current after the update. If a newer snapshot
    /// was applied while this one was in flight, that newer chart is returned.
    pub async fn refresh(
        &self,
        address: &TokenAddress,
        time_frame: TimeFrame,
    ) -> Result<ChartData, SdkError> {
        let update = self.refresh_inner(address, time_frame).await?;
        let mut state = self.client.charts.write().await;
        state.apply(update);
        state
            .get(address, time_frame)
            .cloned()
            .ok_or_else(|| SdkError::Other(format!("no chart stored for {}", address)))
    }

    /// Last chart stored by [`Charts::refresh`].
    pub async fn cached(&self, address: &TokenAddress, time_frame: TimeFrame) -> Option<ChartData> {
        self.client
            .charts
            .read()
            .await
            .get(address, time_frame)
            .cloned()
    }

    /// Poll the trade log and yield a rebuilt chart for every fresh snapshot.
    ///
    /// Fetch errors are logged and skipped.
    pub fn watch(
        &self,
        token: Token,
        time_frame: TimeFrame,
        interval: Duration,
    ) -> impl Stream<Item = SequencedChart> + 'a {
        let trades = Trades {
            client: self.client,
        };
        let snapshots = trades
            .watch(token.address.clone(), interval)
            .filter_map(|result| async move {
                result
                    .inspect_err(|e| tracing::warn!(error = %e, "trade poll failed"))
                    .ok()
            });
        chart_stream(snapshots, token, time_frame, self.client.config.clone())
    }

    async fn refresh_inner(
        &self,
        address: &TokenAddress,
        time_frame: TimeFrame,
    ) -> Result<SequencedChart, SdkError> {
        let token = self.client.tokens().get(address).await?;
        let snapshot = self.client.trades().snapshot(address).await?;
        let chart = chart_from_documents(
            &snapshot.documents,
            &token,
            time_frame,
            &self.client.config,
            snapshot.received_at,
        );
        Ok(SequencedChart {
            seq: snapshot.seq,
            token: snapshot.token,
            time_frame,
            chart,
        })
    }
}
