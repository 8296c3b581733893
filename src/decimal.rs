//! Canonical decimal strings for signed payloads and the venue's price/size
//! precision rules.
//!
//! Everything that ends up inside a signed action goes through this module, so
//! every conversion here is deterministic and never rounds up. Arithmetic runs on
//! [`rust_decimal::Decimal`]; floats are only ever rendered, never computed with.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    market::{MarketType, Side},
    prelude::*,
    Error,
};

/// Maximum significant figures the venue accepts in a non-integer price.
pub const PRICE_SIGNIFICANT_FIGURES: u32 = 5;
const MAX_PERP_PRICE_DECIMALS: u32 = 6;
const MAX_SPOT_PRICE_DECIMALS: u32 = 8;
/// Digits a `Decimal` mantissa holds without rounding.
const MAX_DECIMAL_DIGITS: usize = 28;

/// A number as callers hand it to the SDK: float, integer, or decimal string.
#[derive(Debug, Clone, PartialEq)]
pub enum DecimalInput {
    Number(f64),
    Integer(i128),
    Text(String),
}

impl From<f64> for DecimalInput {
    fn from(value: f64) -> Self {
        DecimalInput::Number(value)
    }
}

impl From<u64> for DecimalInput {
    fn from(value: u64) -> Self {
        DecimalInput::Integer(value as i128)
    }
}

impl From<i64> for DecimalInput {
    fn from(value: i64) -> Self {
        DecimalInput::Integer(value as i128)
    }
}

impl From<u32> for DecimalInput {
    fn from(value: u32) -> Self {
        DecimalInput::Integer(value as i128)
    }
}

impl From<i128> for DecimalInput {
    fn from(value: i128) -> Self {
        DecimalInput::Integer(value)
    }
}

impl From<&str> for DecimalInput {
    fn from(value: &str) -> Self {
        DecimalInput::Text(value.to_string())
    }
}

impl From<String> for DecimalInput {
    fn from(value: String) -> Self {
        DecimalInput::Text(value)
    }
}

impl From<&String> for DecimalInput {
    fn from(value: &String) -> Self {
        DecimalInput::Text(value.clone())
    }
}

impl From<Decimal> for DecimalInput {
    fn from(value: Decimal) -> Self {
        DecimalInput::Text(value.normalize().to_string())
    }
}

/// Venue tick expressed as an integer count of `10^-tick_decimals` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSize {
    pub tick_size_int: u64,
    pub tick_decimals: u32,
}

/// Render a value as the canonical decimal string used on the wire.
///
/// Integers are stringified, strings pass through untouched, and finite floats
/// are expanded without exponent notation with trailing zeros trimmed.
pub fn to_api_decimal(value: impl Into<DecimalInput>) -> Result<String> {
    match value.into() {
        DecimalInput::Integer(i) => Ok(i.to_string()),
        DecimalInput::Text(s) => Ok(s),
        DecimalInput::Number(f) => render_float(f),
    }
}

fn render_float(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(Error::Numeric(format!("{f} is not a finite number")));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    // f64's Display is the shortest round-trip expansion and never uses an exponent.
    let rendered = f.to_string();
    Ok(trim_fraction(&rendered))
}

fn trim_fraction(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `^(?:\d+\.?\d*|\.\d+)$`
fn is_plain_decimal(s: &str) -> bool {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    match frac_part {
        None => !int_part.is_empty() && all_digits(int_part),
        Some(frac) if int_part.is_empty() => !frac.is_empty() && all_digits(frac),
        Some(frac) => all_digits(int_part) && all_digits(frac),
    }
}

/// Validate a strictly positive amount and return its canonical wire string.
pub fn positive_decimal(field: &'static str, value: impl Into<DecimalInput>) -> Result<String> {
    match value.into() {
        DecimalInput::Integer(i) => {
            if i <= 0 {
                return Err(Error::validation(field, format!("{i} must be positive")));
            }
            Ok(i.to_string())
        }
        DecimalInput::Number(f) => {
            if !f.is_finite() || f <= 0.0 {
                return Err(Error::validation(field, format!("{f} must be a positive finite number")));
            }
            render_float(f)
        }
        DecimalInput::Text(s) => {
            let trimmed = s.trim();
            if !is_plain_decimal(trimmed) {
                return Err(Error::validation(field, format!("{s:?} is not a decimal string")));
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.is_finite() && f > 0.0 => Ok(trimmed.to_string()),
                _ => Err(Error::validation(field, format!("{s:?} must be positive"))),
            }
        }
    }
}

/// Parse any accepted input into an exact decimal.
///
/// Digits beyond what a [`Decimal`] can hold are dropped, never rounded.
pub fn parse_decimal(value: impl Into<DecimalInput>) -> Result<Decimal> {
    parse_truncated(value).map(|(value, _)| value)
}

/// Like [`parse_decimal`], also reporting whether non-zero digits were dropped.
fn parse_truncated(value: impl Into<DecimalInput>) -> Result<(Decimal, bool)> {
    let canonical = to_api_decimal(value)?;
    let s = canonical.trim();
    let s = match (s.strip_prefix('.'), s.strip_suffix('.')) {
        (Some(frac), _) => format!("0.{frac}"),
        (None, Some(int)) => int.to_string(),
        (None, None) => s.to_string(),
    };
    let (parsed, lossy) = if s.contains(['e', 'E']) {
        (Decimal::from_scientific(&s), false)
    } else {
        let (digits, lossy) = truncate_digits(&s);
        (Decimal::from_str(&digits), lossy)
    };
    parsed
        .map(|value| (value, lossy))
        .map_err(|e| Error::Numeric(format!("{canonical:?} is not representable: {e}")))
}

/// Cut the fraction so the whole string fits in [`MAX_DECIMAL_DIGITS`] digits.
/// `Decimal::from_str` rounds anything longer.
fn truncate_digits(s: &str) -> (String, bool) {
    let (sign, body) = match s.strip_prefix('-') {
        Some(body) => ("-", body),
        None => ("", s),
    };
    let Some((int_part, frac_part)) = body.split_once('.') else {
        return (s.to_string(), false);
    };
    let int_digits = int_part.trim_start_matches('0').len();
    let keep = MAX_DECIMAL_DIGITS
        .saturating_sub(int_digits)
        .min(frac_part.len());
    let (kept, dropped) = frac_part.split_at(keep);
    let lossy = dropped.bytes().any(|b| b != b'0');
    let digits = if kept.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{kept}")
    };
    (digits, lossy)
}

/// Truncate (toward zero) to `figures` significant figures without touching the
/// integer part.
fn truncate_significant(value: Decimal, figures: u32) -> Decimal {
    if value.is_zero() {
        return value;
    }
    let mut probe = value.abs();
    let decimals = if probe >= Decimal::ONE {
        let mut int_digits = 0u32;
        while probe >= Decimal::ONE {
            probe /= Decimal::TEN;
            int_digits += 1;
        }
        figures.saturating_sub(int_digits)
    } else {
        let mut leading = 0u32;
        while probe < Decimal::ONE {
            probe *= Decimal::TEN;
            leading += 1;
        }
        figures + leading - 1
    };
    value.round_dp_with_strategy(decimals, RoundingStrategy::ToZero)
}

/// Format a limit price to the venue's precision rules.
///
/// Integer prices are returned normalized. Otherwise the price is truncated to
/// `max(0, 6|8 - sz_decimals)` fraction digits (perp|spot), then to five
/// significant figures. Truncating to zero is an error.
pub fn format_price(
    price: impl Into<DecimalInput>,
    sz_decimals: u32,
    market_type: MarketType,
) -> Result<String> {
    let canonical = to_api_decimal(price)?;
    let value = parse_decimal(canonical.as_str())?;
    if value.is_sign_negative() {
        return Err(Error::Numeric(format!("price {canonical} is negative")));
    }
    if !canonical.contains('.') && !canonical.contains(['e', 'E']) {
        if value.is_zero() {
            return Err(Error::Numeric("price is zero".to_string()));
        }
        return Ok(value.normalize().to_string());
    }

    let base = match market_type {
        MarketType::Perp => MAX_PERP_PRICE_DECIMALS,
        MarketType::Spot => MAX_SPOT_PRICE_DECIMALS,
    };
    let max_decimals = base.saturating_sub(sz_decimals);
    let truncated = value.round_dp_with_strategy(max_decimals, RoundingStrategy::ToZero);
    let truncated = truncate_significant(truncated, PRICE_SIGNIFICANT_FIGURES);
    if truncated.is_zero() {
        return Err(Error::Numeric(format!(
            "price {canonical} truncates to zero at {max_decimals} decimals"
        )));
    }
    Ok(truncated.normalize().to_string())
}

/// Truncate a size to `sz_decimals` fraction digits. Truncating to zero is an error.
pub fn format_size(size: impl Into<DecimalInput>, sz_decimals: u32) -> Result<String> {
    let canonical = to_api_decimal(size)?;
    let value = parse_decimal(canonical.as_str())?;
    if value.is_sign_negative() {
        return Err(Error::Numeric(format!("size {canonical} is negative")));
    }
    let truncated = value.round_dp_with_strategy(sz_decimals, RoundingStrategy::ToZero);
    if truncated.is_zero() {
        return Err(Error::Numeric(format!(
            "size {canonical} truncates to zero at {sz_decimals} decimals"
        )));
    }
    Ok(truncated.normalize().to_string())
}

/// Snap a price onto the tick grid: buys round up, sells round down.
pub fn round_price_to_tick(
    price: impl Into<DecimalInput>,
    tick: TickSize,
    side: Side,
) -> Result<String> {
    if tick.tick_size_int == 0 {
        return Err(Error::validation("tick", "tick size must be positive"));
    }
    if tick.tick_decimals > 18 {
        return Err(Error::validation("tick", "tick decimals out of range"));
    }
    let (value, lossy) = parse_truncated(price)?;
    if value <= Decimal::ZERO {
        return Err(Error::validation("price", format!("{value} must be positive")));
    }
    if lossy && value.scale() < tick.tick_decimals {
        return Err(Error::Numeric(format!(
            "price {value} has too many digits for {} tick decimals",
            tick.tick_decimals
        )));
    }

    let factor = Decimal::from(10u64.pow(tick.tick_decimals));
    let scaled = value
        .checked_mul(factor)
        .ok_or_else(|| Error::Numeric(format!("price {value} overflows at tick scale")))?;
    // Dropped digits sit below the tick grid, so the true price is off-grid.
    let units = match side {
        Side::Buy if lossy => scaled
            .floor()
            .checked_add(Decimal::ONE)
            .ok_or_else(|| Error::Numeric(format!("price {value} overflows at tick scale")))?,
        Side::Buy => scaled.ceil(),
        Side::Sell => scaled.floor(),
    };
    let units: i128 = units
        .mantissa()
        .checked_div(10i128.pow(units.scale()))
        .ok_or_else(|| Error::Numeric("tick scaling failed".to_string()))?;

    let step = tick.tick_size_int as i128;
    let mut steps = units / step;
    if side == Side::Buy && units % step != 0 {
        steps += 1;
    }
    let rounded = Decimal::try_from_i128_with_scale(steps * step, tick.tick_decimals)
        .map_err(|e| Error::Numeric(e.to_string()))?;
    if rounded.is_zero() {
        return Err(Error::Numeric(format!("price {value} rounds to zero on tick grid")));
    }
    Ok(rounded.normalize().to_string())
}

/// Convert a positive decimal amount to integer base units (`amount * 10^decimals`).
/// Amounts with more precision than the token carries are rejected.
pub fn to_base_units(
    field: &'static str,
    amount: impl Into<DecimalInput>,
    decimals: u32,
) -> Result<u128> {
    let canonical = positive_decimal(field, amount)?;
    let (value, lossy) = parse_truncated(canonical.as_str())?;
    if lossy {
        return Err(Error::validation(
            field,
            format!("{canonical} has more than {decimals} decimals"),
        ));
    }
    let factor = Decimal::from(10u64.pow(decimals));
    let scaled = value
        .checked_mul(factor)
        .ok_or_else(|| Error::Numeric(format!("{field} {canonical} overflows")))?
        .normalize();
    if scaled.scale() != 0 {
        return Err(Error::validation(
            field,
            format!("{canonical} has more than {decimals} decimals"),
        ));
    }
    u128::try_from(scaled.mantissa())
        .map_err(|_| Error::validation(field, format!("{canonical} must be positive")))
}
