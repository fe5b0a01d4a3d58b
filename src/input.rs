//! Parsing of numeric field values supplied as text.

use crate::{Error, Field, Result};

/// Parses a decimal field value such as a clock sequence or a local id.
///
/// Fails with [`Error::InvalidNumber`] if `input` is not a decimal number and with
/// [`Error::ValueOutOfRange`] if it does not fit in 64 bits.
pub fn parse_decimal(field: Field, input: &str) -> Result<u64> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(field, input));
    }
    let value = digits
        .bytes()
        .fold(0u128, |acc, b| acc.saturating_mul(10).saturating_add(u128::from(b - b'0')));
    narrow(field, value)
}

/// Parses a hexadecimal field value such as a node or a custom field.
///
/// Colons are ignored so that MAC addresses like `9f:6b:de:ce:d8:46` are accepted, as is an
/// optional `0x` prefix. Fails like [`parse_decimal`].
///
/// # Examples
///
/// ```rust
/// use uuidtool::{input::parse_hex, Error, Field};
///
/// assert_eq!(parse_hex(Field::Node, "9f:6b:de:ce:d8:46")?, 0x9f6bdeced846);
/// assert_eq!(parse_hex(Field::CustomB, "0xfff")?, 0xfff);
/// assert!(matches!(
///     parse_hex(Field::CustomA, "1_0000_0000_0000_0000"),
///     Err(Error::InvalidNumber { .. })
/// ));
/// # Ok::<(), uuidtool::Error>(())
/// ```
pub fn parse_hex(field: Field, input: &str) -> Result<u64> {
    let digits: String = input.trim().chars().filter(|&c| c != ':').collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(field, input));
    }
    let value = digits.chars().fold(0u128, |acc, c| {
        let digit = c.to_digit(16).map_or(0, u128::from);
        acc.saturating_mul(16).saturating_add(digit)
    });
    narrow(field, value)
}

/// Narrows a parsed value to 64 bits, reporting values beyond `i128` as `i128::MAX`.
fn narrow(field: Field, value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::ValueOutOfRange {
        field,
        value: i128::try_from(value).unwrap_or(i128::MAX),
        width: u64::BITS,
    })
}

fn invalid(field: Field, input: &str) -> Error {
    Error::InvalidNumber {
        field: field.name(),
        input: input.to_owned(),
    }
}
