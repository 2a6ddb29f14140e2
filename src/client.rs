//! High-level client: `ChartClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::config::ChartConfig;
use crate::domain::chart::client::Charts;
use crate::domain::chart::ChartState;
use crate::domain::token::client::Tokens;
use crate::domain::token::Token;
use crate::domain::trade::client::Trades;
use crate::domain::trade::SnapshotSequence;
use crate::error::SdkError;
use crate::http::{FirestoreHttp, RetryPolicy};
use crate::shared::TokenAddress;

use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::chart::client::Charts as ChartsClient;
pub use crate::domain::token::client::Tokens as TokensClient;
pub use crate::domain::trade::client::Trades as TradesClient;

/// The primary entry point for fetching and charting trades.
///
/// Provides nested sub-client accessors for each domain:
/// `client.trades()`, `client.tokens()`, `client.charts()`.
pub struct ChartClient {
    pub(crate) http: FirestoreHttp,
    pub(crate) config: ChartConfig,
    /// Shared across clones so every snapshot gets a unique, increasing number.
    pub(crate) sequence: SnapshotSequence,
    /// Maximum trades fetched per query; `None` fetches the full log.
    pub(crate) trade_limit: Option<u32>,
    /// Token cache: address → (Token, fetched_at)
    pub(crate) token_cache: Arc<RwLock<HashMap<TokenAddress, (Token, Instant)>>>,
    pub(crate) token_cache_ttl: Duration,
    /// Latest chart per (token, time frame).
    pub(crate) charts: Arc<RwLock<ChartState>>,
}

impl ChartClient {
    pub fn builder() -> ChartClientBuilder {
        ChartClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { client: self }
    }

    pub fn charts(&self) -> Charts<'_> {
        Charts { client: self }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Set (or clear) the Firebase ID token sent with every request.
    pub async fn set_auth_token(&self, token: Option<String>) {
        self.http.set_auth_token(token).await;
    }

    /// Clear the token cache and stored charts.
    pub async fn clear_all_caches(&self) {
        self.token_cache.write().await.clear();
        self.charts.write().await.clear();
    }
}

impl Clone for ChartClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            sequence: self.sequence.clone(),
            trade_limit: self.trade_limit,
            token_cache: self.token_cache.clone(),
            token_cache_ttl: self.token_cache_ttl,
            charts: self.charts.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ChartClientBuilder {
    base_url: String,
    project_id: Option<String>,
    database: String,
    api_key: Option<String>,
    retry: RetryPolicy,
    config: ChartConfig,
    trade_limit: Option<u32>,
    token_cache_ttl: Duration,
}

impl Default for ChartClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_FIRESTORE_URL.to_string(),
            project_id: None,
            database: crate::network::DEFAULT_DATABASE.to_string(),
            api_key: None,
            retry: RetryPolicy::Idempotent,
            config: ChartConfig::default(),
            trade_limit: None,
            token_cache_ttl: Duration::from_secs(60),
        }
    }
}

impl ChartClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn project_id(mut self, project_id: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self
    }

    pub fn database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn chart_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn trade_limit(mut self, limit: u32) -> Self {
        self.trade_limit = Some(limit);
        self
    }

    pub fn token_cache_ttl(mut self, ttl: Duration) -> Self {
        self.token_cache_ttl = ttl;
        self
    }

    pub fn build(self) -> Result<ChartClient, SdkError> {
        let project_id = self
            .project_id
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| SdkError::Validation("project_id is required".to_string()))?;

        Ok(ChartClient {
            http: FirestoreHttp::new(
                &self.base_url,
                &project_id,
                &self.database,
                self.api_key,
                self.retry,
            )?,
            config: self.config,
            sequence: SnapshotSequence::new(),
            trade_limit: self.trade_limit,
            token_cache: Arc::new(RwLock::new(HashMap::new())),
            token_cache_ttl: self.token_cache_ttl,
            charts: Arc::new(RwLock::new(ChartState::new())),
        })
    }
}
