//! HTTP client layer: `FirestoreHttp` with retry policies and the Firestore wire format.

pub mod client;
pub mod firestore;
pub mod retry;

pub use client::FirestoreHttp;
pub use retry::{RetryConfig, RetryPolicy};
