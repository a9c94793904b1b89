//! Conversion of untyped input values into field elements.
//!
//! Conversion happens in two steps. First the value is interpreted as an exact
//! integer ([`integral_value`]); anything that is not exactly an integer is
//! reported as a [`MismatchKind`]. The integer is then mapped into the field
//! with the field's own arithmetic ([`to_field`]).

use std::fmt;

use ff::PrimeField;
use field_witness_input::RawValue;
use num_bigint::{BigInt, BigUint, Sign};

/// Largest decimal exponent accepted in a number such as `1e300`. Anything
/// bigger is rejected rather than expanded.
pub const MAX_DECIMAL_EXPONENT: u32 = 4096;

/// Why a value could not be read as an integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MismatchKind {
    /// A number (or numeric string) with a non-zero fractional part.
    Fractional,
    /// A number whose decimal exponent exceeds [`MAX_DECIMAL_EXPONENT`].
    OversizedNumber,
    /// A string that is not a decimal or `0x`-prefixed hex number.
    NonNumericString,
    Null,
    Array,
    Object,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MismatchKind::Fractional => "fractional number",
            MismatchKind::OversizedNumber => "number exponent too large",
            MismatchKind::NonNumericString => "non-numeric string",
            MismatchKind::Null => "null",
            MismatchKind::Array => "array",
            MismatchKind::Object => "object",
        };
        f.write_str(s)
    }
}

/// Interprets `value` as an exact integer.
///
/// Booleans are 0 and 1. Numbers and strings are accepted when they denote an
/// integer exactly, so `5.0` and `"2.5e1"` are integers while `5.5` is not.
pub fn integral_value(value: &RawValue) -> Result<BigInt, MismatchKind> {
    match value {
        RawValue::Integer(n) => Ok(n.clone()),
        RawValue::Fractional(lexeme) => parse_integral(lexeme).map_err(|kind| match kind {
            MismatchKind::NonNumericString => MismatchKind::Fractional,
            other => other,
        }),
        RawValue::Boolean(b) => Ok(BigInt::from(u8::from(*b))),
        RawValue::String(s) => parse_integral(s),
        RawValue::Null => Err(MismatchKind::Null),
        RawValue::Array(_) => Err(MismatchKind::Array),
        RawValue::Object(_) => Err(MismatchKind::Object),
    }
}

/// Parses a decimal (`-12`, `1.20e2`) or hex (`0x1f`, `-0x1f`) integer.
pub fn parse_integral(s: &str) -> Result<BigInt, MismatchKind> {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, s),
    };

    let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => parse_hex(hex)?,
        None => parse_decimal(body)?,
    };

    Ok(BigInt::from_biguint(sign, magnitude))
}

fn parse_hex(digits: &str) -> Result<BigUint, MismatchKind> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MismatchKind::NonNumericString);
    }
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or(MismatchKind::NonNumericString)
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_exponent(s: &str) -> Result<i64, MismatchKind> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !all_digits(digits) {
        return Err(MismatchKind::NonNumericString);
    }
    // Saturate: anything this large is out of bounds either way.
    let exponent = digits.parse::<i64>().unwrap_or(i64::MAX / 4).min(i64::MAX / 4);
    Ok(if negative { -exponent } else { exponent })
}

fn parse_decimal(body: &str) -> Result<BigUint, MismatchKind> {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], parse_exponent(&body[i + 1..])?),
        None => (body, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return Err(MismatchKind::NonNumericString);
    }

    let joined = format!("{}{}", int_part, frac_part);
    let mut digits = joined.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(BigUint::default());
    }

    // value = digits * 10^scale
    let mut scale = exponent - frac_part.len() as i64;
    while scale < 0 {
        match digits.strip_suffix('0') {
            Some(rest) => {
                digits = rest;
                scale += 1;
            }
            None => return Err(MismatchKind::Fractional),
        }
    }
    if scale > i64::from(MAX_DECIMAL_EXPONENT) {
        return Err(MismatchKind::OversizedNumber);
    }

    let mantissa =
        BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(MismatchKind::NonNumericString)?;
    Ok(mantissa * BigUint::from(10u32).pow(scale as u32))
}

/// Maps `value` into `F`, reducing modulo the field's prime. Negative values
/// map to their additive inverse.
pub fn to_field<F: PrimeField>(value: &BigInt) -> F {
    // 2^64
    let shift = F::from(u64::MAX) + F::ONE;

    let limbs = value.magnitude().to_u64_digits();
    let magnitude = limbs
        .iter()
        .rev()
        .fold(F::ZERO, |acc, limb| acc * shift + F::from(*limb));

    match value.sign() {
        Sign::Minus => -magnitude,
        _ => magnitude,
    }
}

/// Returns `true` if `value` is already a canonical element, i.e. in `[0, modulus)`.
pub fn is_canonical(value: &BigInt, modulus: &BigUint) -> bool {
    value.sign() != Sign::Minus && value.magnitude() < modulus
}
