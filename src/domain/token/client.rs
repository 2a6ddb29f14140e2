//! Tokens sub-client: token descriptors, cached with a TTL.

use crate::client::ChartClient;
use crate::domain::token::wire::TokenDocument;
use crate::domain::token::Token;
use crate::error::SdkError;
use crate::network::TOKENS_COLLECTION;
use crate::shared::TokenAddress;
use std::time::Instant;

pub struct Tokens<'a> {
    pub(crate) client: &'a ChartClient,
}

impl<'a> Tokens<'a> {
    /// Get a token by address. Uses TTL cache.
    pub async fn get(&self, address: &TokenAddress) -> Result<Token, SdkError> {
        {
            let cache = self.client.token_cache.read().await;
            if let Some((token, fetched_at)) = cache.get(address) {
                if fetched_at.elapsed() < self.client.token_cache_ttl {
                    return Ok(token.clone());
                }
            }
        }

        let doc = self
            .client
            .http
            .get_document(TOKENS_COLLECTION, address.as_str())
            .await?;
        let mut wire: TokenDocument = doc.decode()?;
        // Documents are keyed by address; older ones omit the field.
        if wire.address.is_none() {
            wire.address = Some(address.to_string());
        }
        let token = Token::try_from(wire)?;

        self.client
            .token_cache
            .write()
            .await
            .insert(address.clone(), (token.clone(), Instant::now()));
        Ok(token)
    }

    pub async fn invalidate(&self, address: &TokenAddress) {
        self.client.token_cache.write().await.remove(address);
    }
}
