//! Exact conversion between human decimal amounts and smallest units.
//!
//! `decimal = smallest_unit / 10^decimals`. All arithmetic goes through
//! [`BigUint`]; token amounts routinely exceed `u64`.
//!
//! Fractional digits beyond `decimals` are truncated, not rounded: `"1.1234567"`
//! at 6 decimals is `1123456`.

use crate::error::{Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serializer;
use tracing::debug;

/// Decimals used by TRX and the TRC-20 stablecoins.
pub const DEFAULT_DECIMALS: u32 = 6;

/// Convert a decimal string into a smallest-unit integer string.
///
/// # Errors
///
/// Returns [`Error::MalformedAmount`] on more than one decimal point, any
/// non-digit character, or an input with no digits at all.
pub fn to_smallest_unit(decimal: &str, decimals: u32) -> Result<String> {
    parse_decimal(decimal, decimals).map(|value| value.to_string())
}

/// Convert a smallest-unit integer string into a decimal string.
///
/// Trailing fractional zeros are stripped; a zero fraction drops the point.
///
/// # Errors
///
/// Returns [`Error::MalformedAmount`] if `integer` is empty or contains
/// anything other than ASCII digits.
pub fn to_decimal(integer: &str, decimals: u32) -> Result<String> {
    let value = parse_integer(integer)?;
    Ok(format_smallest_unit(&value, decimals))
}

/// Parse a decimal string into smallest units.
///
/// # Errors
///
/// See [`to_smallest_unit`].
pub fn parse_decimal(decimal: &str, decimals: u32) -> Result<BigUint> {
    let mut parts = decimal.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    if parts.next().is_some() {
        return Err(Error::MalformedAmount(format!(
            "'{decimal}' has more than one decimal point"
        )));
    }
    if whole.is_empty() && fraction.is_empty() {
        return Err(Error::MalformedAmount(format!("'{decimal}' has no digits")));
    }
    if !is_digits(whole) || !is_digits(fraction) {
        return Err(Error::MalformedAmount(format!(
            "'{decimal}' contains a non-digit character"
        )));
    }

    let scale = usize::try_from(decimals)
        .map_err(|_| Error::MalformedAmount(format!("unsupported decimals {decimals}")))?;
    let kept = fraction.get(..scale).unwrap_or(fraction);
    if kept.len() < fraction.len() {
        debug!(
            "Truncating '{}' to {} fractional digits",
            decimal, decimals
        );
    }
    let padded = format!("{kept:0<scale$}");

    Ok(digits_value(whole) * pow10(decimals) + digits_value(&padded))
}

/// Parse a smallest-unit integer string.
///
/// # Errors
///
/// Returns [`Error::MalformedAmount`] unless `integer` is a non-empty run of
/// ASCII digits.
pub fn parse_integer(integer: &str) -> Result<BigUint> {
    if integer.is_empty() || !is_digits(integer) {
        return Err(Error::MalformedAmount(format!(
            "'{integer}' is not an unsigned integer"
        )));
    }
    Ok(digits_value(integer))
}

/// Format a smallest-unit value as a decimal string.
#[must_use]
pub fn format_smallest_unit(value: &BigUint, decimals: u32) -> String {
    let divisor = pow10(decimals);
    let whole = value / &divisor;
    let fraction = value % &divisor;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let width = usize::try_from(decimals).unwrap_or(usize::MAX);
    let digits = format!("{:0>width$}", fraction.to_string());
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Serialize a [`BigUint`] as its decimal string.
pub(crate) fn serialize_as_string<S: Serializer>(
    value: &BigUint,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Value of an ASCII digit run; empty is zero.
fn digits_value(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
}

fn pow10(exponent: u32) -> BigUint {
    BigUint::from(10u32).pow(exponent)
}
