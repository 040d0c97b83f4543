// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decimal rounding and fixed-point rendering of exact rationals.
//!
//! Round half away from zero is the only rounding mode used by the crate:
//! `2.5 → 3`, `-2.5 → -3`, `2.4999 → 2`. Ties never round to even.

use num::{BigInt, BigRational, Integer, Signed, Zero};

/// `10^digits` as a big integer.
#[inline]
pub(crate) fn pow10(digits: u32) -> BigInt {
    num::pow(BigInt::from(10u8), digits as usize)
}

/// `value · 10^decimal_places`, rounded half away from zero to an integer.
fn scaled_integer(value: &BigRational, decimal_places: u32) -> BigInt {
    let numer = value.numer().abs() * pow10(decimal_places);
    let denom = value.denom();
    let (mut quotient, remainder) = numer.div_rem(denom);
    if remainder * BigInt::from(2u8) >= *denom {
        quotient += 1u32;
    }
    if value.is_negative() {
        -quotient
    } else {
        quotient
    }
}

/// Rounds `value` to `decimal_places` decimals, ties away from zero.
///
/// ```
/// use juliancal::round_half_away_from_zero;
/// use num::BigRational;
///
/// let v = BigRational::new((-25).into(), 10.into()); // -2.5
/// assert_eq!(round_half_away_from_zero(&v, 0), BigRational::from_integer((-3).into()));
/// ```
pub fn round_half_away_from_zero(value: &BigRational, decimal_places: u32) -> BigRational {
    BigRational::new(scaled_integer(value, decimal_places), pow10(decimal_places))
}

/// Nearest integer, ties away from zero.
#[inline]
pub(crate) fn round_to_integer(value: &BigRational) -> BigInt {
    scaled_integer(value, 0)
}

/// Renders `value` in fixed-point notation with exactly `decimal_places`
/// digits after the decimal point. No exponent is ever produced.
///
/// With `decimal_places == 0` the result has no decimal point.
pub(crate) fn render_fixed(value: &BigRational, decimal_places: u32) -> String {
    let scaled = scaled_integer(value, decimal_places);
    let negative = scaled.is_negative();
    let mut digits = scaled.abs().to_string();

    let places = decimal_places as usize;
    if places > 0 {
        if digits.len() <= places {
            let pad = places + 1 - digits.len();
            digits.insert_str(0, &"0".repeat(pad));
        }
        digits.insert(digits.len() - places, '.');
    }
    if negative && !scaled.is_zero() {
        digits.insert(0, '-');
    }
    digits
}
