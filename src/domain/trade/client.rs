//! Trades sub-client: trade log queries and polling.

use crate::client::ChartClient;
use crate::domain::trade::wire::TradeDocument;
use crate::domain::trade::{validate_trades, Trade, TradeSnapshot};
use crate::error::SdkError;
use crate::http::firestore::{collect_documents, RunQueryRequest};
use crate::network::TRADES_COLLECTION;
use crate::shared::TokenAddress;

use chrono::{DateTime, Utc};
use futures_util::Stream;
use std::time::Duration;

pub struct Trades<'a> {
    pub(crate) client: &'a ChartClient,
}

impl<'a> Trades<'a> {
    /// Raw trade documents for a token, newest first.
    ///
    /// Documents that cannot be decoded are skipped with a warning.
    pub async fn get(
        &self,
        address: &TokenAddress,
        limit: Option<u32>,
    ) -> Result<Vec<TradeDocument>, SdkError> {
        let query = RunQueryRequest::equal_ordered_desc(
            TRADES_COLLECTION,
            "token",
            address.as_str(),
            "timestamp",
            limit,
        );
        let items = self.client.http.run_query(&query).await?;
        let documents = collect_documents(items)?;

        let decoded = documents
            .iter()
            .filter_map(|doc| {
                doc.decode::<TradeDocument>()
                    .inspect_err(|e| {
                        tracing::warn!(document = doc.id(), error = %e, "skipping undecodable trade document")
                    })
                    .ok()
            })
            .collect();
        Ok(decoded)
    }

    /// Fetch and validate the trade log as of `now`.
    pub async fn validated(
        &self,
        address: &TokenAddress,
        now: DateTime<Utc>,
    ) -> Result<Vec<Trade>, SdkError> {
        let documents = self.get(address, self.client.trade_limit).await?;
        Ok(validate_trades(&documents, now))
    }

    /// Fetch the trade log as a sequenced snapshot.
    ///
    /// The sequence number is taken before the query is sent, so snapshots rank
    /// by issue order even when responses arrive out of order.
    pub async fn snapshot(&self, address: &TokenAddress) -> Result<TradeSnapshot, SdkError> {
        let seq = self.client.sequence.next();
        let documents = self.get(address, self.client.trade_limit).await?;
        Ok(TradeSnapshot::new(seq, address.clone(), documents, Utc::now()))
    }

    /// Poll the trade log every `interval`, yielding one sequenced snapshot per poll.
    ///
    /// The first snapshot is fetched immediately. Errors are yielded and polling continues.
    pub fn watch(
        &self,
        address: TokenAddress,
        interval: Duration,
    ) -> impl Stream<Item = Result<TradeSnapshot, SdkError>> + 'a {
        let trades = Trades {
            client: self.client,
        };
        async_stream::stream! {
            loop {
                yield trades.snapshot(&address).await;
                futures_timer::Delay::new(interval).await;
            }
        }
    }
}
