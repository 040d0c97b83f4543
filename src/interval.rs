// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Spans between two Julian Day Numbers.
//!
//! Durations are measured on the Julian Day axis, where every day has
//! exactly 86 400 seconds. An inserted leap second shares its Julian value
//! with the following second, so it does not lengthen a span.

use crate::error::ConversionError;
use crate::julian_day::JulianDayNumber;
use crate::rounding::round_to_integer;
use crate::validator::NANOS_PER_DAY;
use num::{BigInt, BigRational};
use num_traits::ToPrimitive;
use qtty::Days;
use std::cmp::Ordering;
use std::fmt;

/// Interval between two instants.
///
/// # Examples
///
/// ```
/// use juliancal::{Interval, JulianDayNumber};
/// use num::BigInt;
///
/// let start = JulianDayNumber::from_day_number(2_451_545);
/// let end = JulianDayNumber::from_f64(2_451_546.5, false).unwrap();
/// let span = Interval::new(start, end).unwrap();
///
/// assert_eq!(span.duration_days().unwrap().value(), 1.5);
/// assert_eq!(span.whole_days().unwrap(), BigInt::from(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub start: JulianDayNumber,
    pub end: JulianDayNumber,
}

impl Interval {
    /// Creates an interval; both endpoints must be initialised.
    pub fn new(start: JulianDayNumber, end: JulianDayNumber) -> Result<Self, ConversionError> {
        start.validate()?;
        end.validate()?;
        Ok(Self { start, end })
    }

    /// Exact length in days, negative when `end` precedes `start`.
    pub fn duration(&self) -> Result<BigRational, ConversionError> {
        Ok(self.end.to_rational()? - self.start.to_rational()?)
    }

    pub fn duration_days(&self) -> Result<Days, ConversionError> {
        let days = self.duration()?;
        days.to_f64()
            .map(Days::new)
            .ok_or_else(|| ConversionError::out_of_range("interval duration", &days))
    }

    pub fn duration_nanoseconds(&self) -> Result<BigInt, ConversionError> {
        let nanos = self.duration()? * BigRational::from_integer(BigInt::from(NANOS_PER_DAY));
        Ok(round_to_integer(&nanos))
    }

    /// Completed days, truncated toward zero.
    pub fn whole_days(&self) -> Result<BigInt, ConversionError> {
        Ok(self.duration()?.trunc().to_integer())
    }

    /// Half-open membership: `start <= instant < end`.
    pub fn contains(&self, instant: &JulianDayNumber) -> Result<bool, ConversionError> {
        Ok(self.start.compare(instant)? != Ordering::Greater
            && instant.compare(&self.end)? == Ordering::Less)
    }

    /// Overlap of two intervals treated as `[start, end)`.
    ///
    /// Touching intervals do not intersect.
    pub fn intersection(&self, other: &Self) -> Result<Option<Self>, ConversionError> {
        let start = if self.start.compare(&other.start)? == Ordering::Less {
            &other.start
        } else {
            &self.start
        };
        let end = if self.end.compare(&other.end)? == Ordering::Greater {
            &other.end
        } else {
            &self.end
        };

        Ok(if start.compare(end)? == Ordering::Less {
            Some(Self {
                start: start.clone(),
                end: end.clone(),
            })
        } else {
            None
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::JulianDayEngine;

    fn day(n: i64) -> JulianDayNumber {
        JulianDayNumber::from_day_number(n)
    }

    #[test]
    fn uninitialized_endpoints_are_rejected() {
        assert_eq!(
            Interval::new(JulianDayNumber::default(), day(1)),
            Err(ConversionError::NotInitialized)
        );
    }

    #[test]
    fn duration_in_several_units() {
        let engine = JulianDayEngine::default();
        let start = engine.from_gregorian(2000, 1, 1, 0, 0, 0, 0, false).unwrap();
        let end = engine.from_gregorian(2000, 1, 3, 6, 0, 0, 1, false).unwrap();
        let span = Interval::new(start, end).unwrap();

        assert_eq!(span.whole_days().unwrap(), BigInt::from(2));
        assert_eq!(
            span.duration_nanoseconds().unwrap(),
            BigInt::from(2 * NANOS_PER_DAY + NANOS_PER_DAY / 4 + 1)
        );
        assert!((span.duration_days().unwrap().value() - 2.25).abs() < 1e-9);
    }

    #[test]
    fn reversed_interval_has_negative_duration() {
        let span = Interval::new(day(10), day(7)).unwrap();
        assert_eq!(span.whole_days().unwrap(), BigInt::from(-3));
    }

    #[test]
    fn leap_second_does_not_lengthen_a_span() {
        let engine = JulianDayEngine::default();
        let start = engine.from_gregorian(2016, 12, 31, 23, 59, 59, 0, false).unwrap();
        let end = engine.from_gregorian(2017, 1, 1, 0, 0, 1, 0, false).unwrap();
        let span = Interval::new(start, end).unwrap();
        assert_eq!(span.duration_nanoseconds().unwrap(), BigInt::from(2_000_000_000));

        let leap = engine.from_gregorian(2016, 12, 31, 23, 59, 60, 0, true).unwrap();
        assert!(span.contains(&leap).unwrap());
    }

    #[test]
    fn intersection_is_half_open() {
        let a = Interval::new(day(0), day(10)).unwrap();
        let b = Interval::new(day(5), day(15)).unwrap();
        let c = Interval::new(day(10), day(20)).unwrap();

        let overlap = a.intersection(&b).unwrap().unwrap();
        assert_eq!(overlap, Interval::new(day(5), day(10)).unwrap());
        assert_eq!(a.intersection(&c).unwrap(), None);

        assert!(a.contains(&day(0)).unwrap());
        assert!(!a.contains(&day(10)).unwrap());
    }

    #[test]
    fn display_joins_endpoints() {
        let span = Interval::new(day(1), day(2)).unwrap();
        assert_eq!(span.to_string(), "JD 1.000000000 to JD 2.000000000");
    }
}
