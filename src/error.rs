//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Firestore error: {0}")]
    Firestore(#[from] FirestoreError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Errors decoding Firestore REST documents into wire types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FirestoreError {
    #[error("Document has no fields: {0}")]
    MissingFields(String),

    #[error("Query returned an error entry: {0}")]
    QueryFailed(String),
}

/// Token descriptor errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    #[error("Invalid creation time: {0}")]
    InvalidCreatedAt(String),
}

/// Why a trade record was excluded from aggregation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeRejection {
    #[error("missing pricePerToken")]
    MissingPrice,

    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("non-positive amounts: token={token_amount} quote={quote_amount}")]
    NonPositiveAmounts {
        token_amount: String,
        quote_amount: String,
    },

    #[error("unparseable timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("timestamp outside the accepted range: {0}")]
    TimestampOutOfRange(String),
}
