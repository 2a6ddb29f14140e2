//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, aggregation-ready)
//! - `wire.rs`: Raw serde structs matching the stored documents
//! - `convert.rs`: `TryFrom`/`From` conversions with validation
//! - `state.rs`: State containers with update methods (for feed-driven data)
//! - `client.rs`: Sub-client with HTTP methods

pub mod chart;
pub mod token;
pub mod trade;
