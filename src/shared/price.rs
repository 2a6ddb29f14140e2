//! Decimal parsing for prices and amounts stored as strings.
//!
//! Trade documents carry prices as plain decimal strings (`"0.0000123"`), and a
//! few older documents use scientific notation (`"1.2e-5"`). Anything else is
//! treated as unparseable.
//!
//! Raw wei amounts and extreme prices can fall outside `Decimal`'s range
//! (about 1e-28 to 7.9e28); [`numeric_sign`] still classifies those.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// Smallest positive `Decimal`, `1e-28`.
const MIN_POSITIVE: Decimal = Decimal::from_parts(1, 0, 0, false, 28);

/// Parse a decimal string. Returns `None` for empty, non-numeric, NaN or infinite input.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Sign of a finite numeric string relative to zero, whether or not it fits in a `Decimal`.
///
/// `None` for empty, non-numeric, NaN or infinite input.
pub fn numeric_sign(s: &str) -> Option<Ordering> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(d) = parse_decimal(trimmed).filter(|d| !d.is_zero()) {
        return Some(d.cmp(&Decimal::ZERO));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .and_then(|v| v.partial_cmp(&0.0))
}

/// Parse a strictly positive value, saturating into `Decimal`'s range.
///
/// Positive values too small to represent become `1e-28`; too large become
/// `Decimal::MAX`. Zero, negative and unparseable input yield `None`.
pub fn parse_positive(s: &str) -> Option<Decimal> {
    if numeric_sign(s)? != Ordering::Greater {
        return None;
    }
    match parse_decimal(s).filter(|d| *d > Decimal::ZERO) {
        Some(d) => Some(d),
        None if s.trim().parse::<f64>().ok()? < 1.0 => Some(MIN_POSITIVE),
        None => Some(Decimal::MAX),
    }
}

/// Scale an amount in base units (e.g. wei) to display units.
pub fn scale_base_units(raw: Decimal, decimals: u32) -> Option<Decimal> {
    let scale = 10u64.checked_pow(decimals)?;
    raw.checked_div(Decimal::from(scale))
}

/// Parse an amount given in base units and scale it to display units.
pub fn parse_base_units(s: &str, decimals: u32) -> Option<Decimal> {
    scale_base_units(parse_decimal(s)?, decimals)
}
