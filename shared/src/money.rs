//! Money formatting between integer minor units and display strings
//!
//! All arithmetic in the sale flow stays in integer minor units (cents).
//! This module is only used at the edges: rendering an amount for the
//! operator and reading back a price the operator typed in. Parsing goes
//! through `Decimal` so that `"0,29"` never turns into `28` cents the way
//! a float multiplication would.

use rust_decimal::prelude::*;
use thiserror::Error;

/// Separator between the whole and fractional part of a displayed amount
pub const DECIMAL_SEPARATOR: char = ',';

/// Minor units in one major currency unit
pub const MINOR_UNITS: i64 = 100;

/// Errors raised while reading an amount typed by the operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("invalid amount: '{0}'")]
    Invalid(String),

    #[error("amount must be non-negative, got {0}")]
    Negative(String),

    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

/// Render an amount in minor units, e.g. `12345` → `"123,45"`
///
/// The fractional part is always two digits. Negative amounts get a
/// leading `-`, although the sale flow never produces one.
pub fn to_display(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    let unit = MINOR_UNITS as u64;
    format!(
        "{}{}{}{:02}",
        sign,
        abs / unit,
        DECIMAL_SEPARATOR,
        abs % unit
    )
}

/// Parse a displayed amount back into minor units, truncating extra digits
///
/// Both `,` and `.` are accepted as decimal separator; `"12,349"` gives
/// `1234`.
pub fn to_cents(display: &str) -> Result<i64, MoneyError> {
    let normalized = display.trim().replace(DECIMAL_SEPARATOR, ".");
    if normalized.is_empty() {
        return Err(MoneyError::Invalid(display.to_string()));
    }
    let value =
        Decimal::from_str(&normalized).map_err(|_| MoneyError::Invalid(display.to_string()))?;
    decimal_to_cents(value)
}

fn decimal_to_cents(value: Decimal) -> Result<i64, MoneyError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::Negative(value.to_string()));
    }
    value
        .checked_mul(Decimal::from(MINOR_UNITS))
        .map(|cents| cents.trunc())
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| MoneyError::OutOfRange(value.to_string()))
}
