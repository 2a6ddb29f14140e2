//! Human-readable formatting for prices, volumes and axis ticks.

pub mod decimal;
pub mod num;

pub use decimal::{format_chart_price, format_token_price, format_volume};
