// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exact Julian Day Number/Time values.
//!
//! A [`JulianDayNumber`] stores an instant on the Julian Day axis as an
//! unsigned whole-day count, an unsigned fraction in `[0, 1)` and a sign
//! applying to their sum:
//!
//! ```text
//! value = sign · (day_number + day_fraction)
//! ```
//!
//! All arithmetic is done on [`BigRational`]s, so sub-nanosecond
//! information is never lost to floating point, whatever the year.
//!
//! Next to the exact value the instant keeps its UTC time of day:
//!
//! * `net_gregorian_nanoseconds`: nanoseconds since civil midnight, `< 24h`.
//!   An inserted leap second (`23:59:60.x`) is folded onto the first second
//!   of the following civil day and remembered by `has_leap_second`.
//! * `total_julian_nanoseconds`: the same instant counted from the noon
//!   that precedes civil midnight, i.e. `net_gregorian + 12h`, `< 36h`.
//!
//! Julian days start at noon, so civil midnight is fraction `0.5`.

use crate::error::ConversionError;
use crate::rounding::{render_fixed, round_half_away_from_zero, round_to_integer};
use crate::validator::{NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use num::{BigInt, BigRational};
use num_traits::{One, Signed, ToPrimitive, Zero};
use qtty::Days;
use std::cmp::Ordering;
use std::fmt;

/// Fractional digits accepted by the rendering methods unless configured
/// otherwise.
pub const DEFAULT_MAX_FRACTION_DIGITS: u32 = 30;

const HALF_DAY_NANOS: i64 = NANOS_PER_DAY / 2;

/// Sign of a Julian Day value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    #[inline]
    pub const fn signum(self) -> i8 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

/// A Julian Day Number/Time.
///
/// Built by [`JulianDayEngine`](crate::JulianDayEngine) or one of the
/// `from_*` constructors. The [`Default`] value is an uninitialised
/// placeholder: every accessor on it returns
/// [`ConversionError::NotInitialized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JulianDayNumber {
    day_number: BigInt,
    day_fraction: BigRational,
    sign: Sign,
    total_julian_nanoseconds: i64,
    net_gregorian_nanoseconds: i64,
    has_leap_second: bool,
    hours: i32,
    minutes: i32,
    seconds: i32,
    nanoseconds: i32,
    max_fraction_digits: u32,
    is_valid: bool,
}

impl Default for JulianDayNumber {
    fn default() -> Self {
        Self {
            day_number: BigInt::zero(),
            day_fraction: BigRational::zero(),
            sign: Sign::Positive,
            total_julian_nanoseconds: 0,
            net_gregorian_nanoseconds: 0,
            has_leap_second: false,
            hours: 0,
            minutes: 0,
            seconds: 0,
            nanoseconds: 0,
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
            is_valid: false,
        }
    }
}

impl JulianDayNumber {
    // ── constructors ──────────────────────────────────────────────────

    /// Builds the instant at `net_gregorian_nanoseconds` past civil
    /// midnight of the civil day whose Julian Day Number is `civil_jdn`.
    pub(crate) fn from_civil(
        civil_jdn: BigInt,
        net_gregorian_nanoseconds: i64,
        has_leap_second: bool,
        max_fraction_digits: u32,
    ) -> Self {
        debug_assert!((0..NANOS_PER_DAY).contains(&net_gregorian_nanoseconds));
        debug_assert!(!has_leap_second || net_gregorian_nanoseconds < NANOS_PER_SECOND);

        // Signed floor of the value and the nanoseconds past its noon.
        let (floor, into_julian_day) = if net_gregorian_nanoseconds >= HALF_DAY_NANOS {
            (civil_jdn, net_gregorian_nanoseconds - HALF_DAY_NANOS)
        } else {
            (civil_jdn - 1, net_gregorian_nanoseconds + HALF_DAY_NANOS)
        };
        let fraction = BigRational::new(
            BigInt::from(into_julian_day),
            BigInt::from(NANOS_PER_DAY),
        );

        let (sign, day_number, day_fraction) = if !floor.is_negative() {
            (Sign::Positive, floor, fraction)
        } else if fraction.is_zero() {
            (Sign::Negative, -floor, fraction)
        } else {
            (Sign::Negative, -floor - 1, BigRational::one() - fraction)
        };

        let net = net_gregorian_nanoseconds;
        Self {
            day_number,
            day_fraction,
            sign,
            total_julian_nanoseconds: net + HALF_DAY_NANOS,
            net_gregorian_nanoseconds: net,
            has_leap_second,
            hours: (net / NANOS_PER_HOUR) as i32,
            minutes: (net % NANOS_PER_HOUR / NANOS_PER_MINUTE) as i32,
            seconds: (net % NANOS_PER_MINUTE / NANOS_PER_SECOND) as i32,
            nanoseconds: (net % NANOS_PER_SECOND) as i32,
            max_fraction_digits,
            is_valid: true,
        }
    }

    /// Builds an instant from an exact signed Julian Day value.
    ///
    /// The time of day is rounded half away from zero to the nearest
    /// nanosecond. With `has_leap_second` the value must lie within the
    /// first second of a civil day: it then denotes `23:59:60.x` of the
    /// preceding day.
    pub fn from_rational(
        value: &BigRational,
        has_leap_second: bool,
    ) -> Result<Self, ConversionError> {
        let day = BigInt::from(NANOS_PER_DAY);
        let mut floor = value.floor().to_integer();
        let fraction = value - BigRational::from_integer(floor.clone());
        let mut into_julian_day = round_to_integer(&(fraction * BigRational::from_integer(day.clone())));
        if into_julian_day >= day {
            floor += 1u32;
            into_julian_day -= &day;
        }
        let into_julian_day = into_julian_day
            .to_i64()
            .ok_or_else(|| ConversionError::out_of_range("day fraction", &into_julian_day))?;

        let (civil_jdn, net) = if into_julian_day >= HALF_DAY_NANOS {
            (floor + 1u32, into_julian_day - HALF_DAY_NANOS)
        } else {
            (floor, into_julian_day + HALF_DAY_NANOS)
        };
        if has_leap_second && net >= NANOS_PER_SECOND {
            return Err(ConversionError::out_of_range(
                "leap second instant",
                render_fixed(value, 9),
            ));
        }
        Ok(Self::from_civil(
            civil_jdn,
            net,
            has_leap_second,
            DEFAULT_MAX_FRACTION_DIGITS,
        ))
    }

    /// Builds an instant from a machine float.
    pub fn from_f64(value: f64, has_leap_second: bool) -> Result<Self, ConversionError> {
        if !value.is_finite() {
            return Err(ConversionError::NonFinite {
                what: "julian day",
            });
        }
        let exact = BigRational::from_float(value)
            .ok_or_else(|| ConversionError::out_of_range("julian day", value))?;
        Self::from_rational(&exact, has_leap_second)
    }

    /// The noon that starts Julian day `day_number`.
    pub fn from_day_number(day_number: impl Into<BigInt>) -> Self {
        Self::from_civil(
            day_number.into(),
            HALF_DAY_NANOS,
            false,
            DEFAULT_MAX_FRACTION_DIGITS,
        )
    }

    /// Same instant with a different rendering bound.
    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// The instant `delta` nanoseconds later (earlier if negative).
    ///
    /// The result never carries the leap-second flag.
    pub fn shifted_by_nanoseconds(&self, delta: i64) -> Result<Self, ConversionError> {
        let value = self.to_rational()?
            + BigRational::new(BigInt::from(delta), BigInt::from(NANOS_PER_DAY));
        Ok(Self::from_rational(&value, false)?.with_max_fraction_digits(self.max_fraction_digits))
    }

    // ── validity ──────────────────────────────────────────────────────

    #[inline]
    fn ensure_initialized(&self) -> Result<(), ConversionError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(ConversionError::NotInitialized)
        }
    }

    /// Checks every stored invariant.
    pub fn validate(&self) -> Result<(), ConversionError> {
        self.ensure_initialized()?;
        let net = self.net_gregorian_nanoseconds;
        if self.day_number.is_negative() {
            return Err(ConversionError::out_of_range("day number", &self.day_number));
        }
        if self.day_fraction.is_negative() || self.day_fraction >= BigRational::one() {
            return Err(ConversionError::out_of_range(
                "day fraction",
                &self.day_fraction,
            ));
        }
        if !(0..NANOS_PER_DAY).contains(&net)
            || self.total_julian_nanoseconds != net + HALF_DAY_NANOS
        {
            return Err(ConversionError::out_of_range("time of day", net));
        }
        if self.has_leap_second && net >= NANOS_PER_SECOND {
            return Err(ConversionError::out_of_range("leap second instant", net));
        }
        let clock = i64::from(self.hours) * NANOS_PER_HOUR
            + i64::from(self.minutes) * NANOS_PER_MINUTE
            + i64::from(self.seconds) * NANOS_PER_SECOND
            + i64::from(self.nanoseconds);
        if clock != net {
            return Err(ConversionError::out_of_range("clock components", clock));
        }

        let unsigned = self.julian_fraction_unchecked();
        let expected = match self.sign {
            Sign::Positive => unsigned,
            Sign::Negative if unsigned.is_zero() => unsigned,
            Sign::Negative => BigRational::one() - unsigned,
        };
        if expected != self.day_fraction {
            return Err(ConversionError::out_of_range(
                "day fraction",
                &self.day_fraction,
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // ── raw state ─────────────────────────────────────────────────────

    pub fn sign(&self) -> Result<Sign, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.sign)
    }

    /// Unsigned whole days.
    pub fn day_number(&self) -> Result<&BigInt, ConversionError> {
        self.ensure_initialized()?;
        Ok(&self.day_number)
    }

    /// Unsigned fraction of the magnitude, in `[0, 1)`.
    pub fn day_fraction(&self) -> Result<&BigRational, ConversionError> {
        self.ensure_initialized()?;
        Ok(&self.day_fraction)
    }

    /// Whether this instant lies inside an inserted leap second.
    #[inline]
    pub fn has_leap_second(&self) -> bool {
        self.has_leap_second
    }

    #[inline]
    pub fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    // ── exact and rounded values ──────────────────────────────────────

    /// The signed value, unrounded.
    pub fn to_rational(&self) -> Result<BigRational, ConversionError> {
        self.ensure_initialized()?;
        let magnitude = BigRational::from_integer(self.day_number.clone()) + &self.day_fraction;
        Ok(match self.sign {
            Sign::Positive => magnitude,
            Sign::Negative => -magnitude,
        })
    }

    fn check_digits(&self, digits: u32) -> Result<(), ConversionError> {
        if digits > self.max_fraction_digits {
            return Err(ConversionError::PrecisionExceeded {
                requested: digits,
                max: self.max_fraction_digits,
            });
        }
        Ok(())
    }

    /// The signed value rounded half away from zero.
    pub fn round_half_away_from_zero(
        &self,
        decimal_places: u32,
    ) -> Result<BigRational, ConversionError> {
        self.check_digits(decimal_places)?;
        Ok(round_half_away_from_zero(&self.to_rational()?, decimal_places))
    }

    /// Fixed-point rendering: `(text, total_width, integer_part_width)`.
    ///
    /// The integer part width is the position of the decimal point, so it
    /// includes a leading minus sign. `digits_after_decimal == 0` renders no
    /// decimal point and is rejected.
    pub fn julian_day_no_time_str(
        &self,
        digits_after_decimal: u32,
    ) -> Result<(String, usize, usize), ConversionError> {
        self.check_digits(digits_after_decimal)?;
        let text = render_fixed(&self.to_rational()?, digits_after_decimal);
        let integer_width = text
            .find('.')
            .ok_or_else(|| ConversionError::MissingDecimalPoint(text.clone()))?;
        let total_width = text.len();
        Ok((text, total_width, integer_width))
    }

    fn render(&self, digits: u32) -> Result<String, ConversionError> {
        self.check_digits(digits)?;
        Ok(render_fixed(&self.to_rational()?, digits))
    }

    /// The value as `f64`, via a fixed-point rendering with `digits`
    /// decimals.
    ///
    /// An `f64` carries about 15 significant digits: for present-day dates
    /// (7 integer digits) that is roughly one-second resolution at best.
    pub fn to_f64(&self, digits: u32) -> Result<f64, ConversionError> {
        let text = self.render(digits)?;
        text.parse::<f64>().map_err(|_| ConversionError::Parse(text))
    }

    /// The value as `f32`. Only about 6 significant digits survive, so a
    /// present-day JD is resolved to a few days.
    pub fn to_f32(&self, digits: u32) -> Result<f32, ConversionError> {
        let text = self.render(digits)?;
        text.parse::<f32>().map_err(|_| ConversionError::Parse(text))
    }

    /// The value as a `qtty` day quantity.
    pub fn to_days(&self) -> Result<Days, ConversionError> {
        Ok(Days::new(self.to_f64(9)?))
    }

    // ── time of day ───────────────────────────────────────────────────

    fn julian_fraction_unchecked(&self) -> BigRational {
        BigRational::new(
            BigInt::from(self.total_julian_nanoseconds % NANOS_PER_DAY),
            BigInt::from(NANOS_PER_DAY),
        )
    }

    /// Hour of the UTC civil day, `0..=23`.
    pub fn gregorian_hours(&self) -> Result<i32, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.hours)
    }

    /// Hours since the preceding noon, `12..=35`.
    pub fn julian_hours(&self) -> Result<i32, ConversionError> {
        self.ensure_initialized()?;
        Ok((self.total_julian_nanoseconds / NANOS_PER_HOUR) as i32)
    }

    /// Unsigned fraction of the Julian day elapsed since its noon.
    pub fn julian_time_fraction(&self) -> Result<BigRational, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.julian_fraction_unchecked())
    }

    pub fn total_julian_nanoseconds(&self) -> Result<i64, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.total_julian_nanoseconds)
    }

    pub fn net_gregorian_nanoseconds(&self) -> Result<i64, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.net_gregorian_nanoseconds)
    }

    pub fn hours(&self) -> Result<i32, ConversionError> {
        self.gregorian_hours()
    }

    pub fn minutes(&self) -> Result<i32, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.minutes)
    }

    pub fn seconds(&self) -> Result<i32, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.seconds)
    }

    pub fn nanoseconds(&self) -> Result<i32, ConversionError> {
        self.ensure_initialized()?;
        Ok(self.nanoseconds)
    }

    /// Julian Day Number of the UTC civil day containing this instant
    /// (after leap-second folding).
    pub fn civil_julian_day_number(&self) -> Result<BigInt, ConversionError> {
        self.ensure_initialized()?;
        let floor = match self.sign {
            Sign::Positive => self.day_number.clone(),
            Sign::Negative if self.day_fraction.is_zero() => -self.day_number.clone(),
            Sign::Negative => -self.day_number.clone() - 1u32,
        };
        Ok(if self.net_gregorian_nanoseconds < HALF_DAY_NANOS {
            floor + 1u32
        } else {
            floor
        })
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// Chronological order.
    ///
    /// A leap-second instant `23:59:60.x` shares its Julian value with
    /// `00:00:00.x` of the next day, yet it precedes every instant from that
    /// midnight on and follows every instant before it.
    pub fn compare(&self, other: &Self) -> Result<Ordering, ConversionError> {
        match (self.has_leap_second, other.has_leap_second) {
            (true, false) => self.leap_compare_regular(other),
            (false, true) => Ok(other.leap_compare_regular(self)?.reverse()),
            _ => Ok(self.to_rational()?.cmp(&other.to_rational()?)),
        }
    }

    /// Order of the leap instant `self` relative to the regular `other`.
    fn leap_compare_regular(&self, other: &Self) -> Result<Ordering, ConversionError> {
        let midnight = self.to_rational()?
            - BigRational::new(
                BigInt::from(self.net_gregorian_nanoseconds),
                BigInt::from(NANOS_PER_DAY),
            );
        Ok(if other.to_rational()? >= midnight {
            Ordering::Less
        } else {
            Ordering::Greater
        })
    }
}

impl fmt::Display for JulianDayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rational() {
            Ok(value) => write!(f, "JD {}", render_fixed(&value, 9)),
            Err(_) => f.write_str("JD <uninitialized>"),
        }
    }
}
