//! Network URL constants for the Firestore REST API.

/// Default Firestore REST base URL (v1).
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Default Firestore database id.
pub const DEFAULT_DATABASE: &str = "(default)";

/// Collection holding one document per executed trade.
pub const TRADES_COLLECTION: &str = "trades";

/// Collection holding one document per launched token, keyed by address.
pub const TOKENS_COLLECTION: &str = "tokens";
