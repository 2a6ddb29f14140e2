//! # Curve Charts
//!
//! Price charts for bonding-curve tokens, built client-side from the raw trade log.
//! Runs on both native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Shared newtypes, formatting, and the pure chart pipeline (always available, WASM-safe)
//! 2. **Streams**: Sequenced trade snapshots → charts, with stale results dropped
//! 3. **HTTP API**: `FirestoreHttp` with retry policies
//! 4. **High-Level Client**: `ChartClient` with nested sub-clients and caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use curve_charts::prelude::*;
//!
//! let client = ChartClient::builder()
//!     .project_id("curve-dex")
//!     .build()?;
//!
//! let token = TokenAddress::parse("0x...")?;
//! let chart = client.charts().get(&token, TimeFrame::Day1).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, parsing and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Chart pipeline configuration.
pub mod config;

/// Unified error types.
pub mod error;

/// Network URL and collection constants.
pub mod network;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Firestore REST client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `ChartClient`, the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{TimeFrame, TokenAddress, TradeType};

    // Formatting
    pub use crate::shared::fmt::{format_chart_price, format_token_price, format_volume};

    // Domain types: chart
    pub use crate::domain::chart::{
        build_chart, chart_from_documents, chart_stream, Candle, ChartAnalytics, ChartData,
        ChartPoint, ChartState, PriceDirection, SequencedChart,
    };

    // Domain types: token, trade
    pub use crate::domain::token::wire::TokenDocument;
    pub use crate::domain::token::Token;
    pub use crate::domain::trade::wire::TradeDocument;
    pub use crate::domain::trade::{validate_trades, SnapshotSequence, Trade, TradeSnapshot};

    // Config
    pub use crate::config::{ChartConfig, INITIAL_PRICE};

    // Errors
    pub use crate::error::{SdkError, TradeRejection};

    // Network
    pub use crate::network::DEFAULT_FIRESTORE_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        ChartClient, ChartClientBuilder, ChartsClient, TokensClient, TradesClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
