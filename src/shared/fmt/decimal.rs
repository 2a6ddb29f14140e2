//! Decimal formatting utilities for human-readable display.
//!
//! Token prices on a bonding curve span many orders of magnitude (the curve
//! starts at `0.00001`), so precision is picked from the magnitude: scientific
//! notation below one millionth, then progressively fewer decimals, and
//! thousands separators above `1000`.

use rust_decimal::prelude::*;
use std::sync::OnceLock;

static ONE_MILLIONTH: OnceLock<Decimal> = OnceLock::new();
static ONE_THOUSANDTH: OnceLock<Decimal> = OnceLock::new();
static THOUSAND: OnceLock<Decimal> = OnceLock::new();

fn get_one_millionth() -> &'static Decimal {
    ONE_MILLIONTH.get_or_init(|| Decimal::new(1, 6))
}

fn get_one_thousandth() -> &'static Decimal {
    ONE_THOUSANDTH.get_or_init(|| Decimal::new(1, 3))
}

fn get_thousand() -> &'static Decimal {
    THOUSAND.get_or_init(|| Decimal::from(1000))
}

fn fixed(value: &Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
}

fn exponential(value: &Decimal, digits: usize) -> String {
    format!("{:.*e}", digits, value.to_f64().unwrap_or(0.0))
}

/// Format a token price for labels and tooltips.
pub fn format_token_price(price: &Decimal) -> String {
    if price.is_zero() {
        return "0.000000".to_string();
    }

    if price < get_one_millionth() {
        exponential(price, 2)
    } else if price < get_one_thousandth() {
        fixed(price, 8)
    } else if price < &Decimal::ONE {
        fixed(price, 6)
    } else if price < get_thousand() {
        fixed(price, 4)
    } else {
        super::num::display_formatted_string(&fixed(price, 4), 2)
    }
}

/// Format a price for Y-axis ticks (shorter than [`format_token_price`]).
pub fn format_chart_price(value: &Decimal) -> String {
    if value.is_zero() {
        return "0".to_string();
    }

    if value < get_one_millionth() {
        exponential(value, 1)
    } else if value < get_one_thousandth() {
        fixed(value, 6)
    } else if value < &Decimal::ONE {
        fixed(value, 4)
    } else if value < get_thousand() {
        fixed(value, 3)
    } else {
        super::num::display_formatted_string(&fixed(value, 2), 0)
    }
}

/// Format a quote-currency volume with four decimals.
pub fn format_volume(volume: &Decimal) -> String {
    fixed(volume, 4)
}
