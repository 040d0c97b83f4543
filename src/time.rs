// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Validated time of day.

use crate::error::ValidationError;
use crate::validator;
use crate::zone::TimeZoneDefinition;
use std::cmp::Ordering;
use std::fmt;

/// A local time of day in a fixed-offset zone.
///
/// Second 60 marks an inserted leap second; [`has_leap_second`] is derived
/// from it and cannot be set on its own. Hour 24 is accepted only as the
/// end-of-day instant `24:00:00.000000000`.
///
/// [`has_leap_second`]: TimeValue::has_leap_second
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeValue {
    hour: i32,
    minute: i32,
    second: i32,
    nanosecond: i32,
    has_leap_second: bool,
    time_zone: TimeZoneDefinition,
    tag: String,
    total_nanoseconds: i64,
}

impl Default for TimeValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl TimeValue {
    pub fn new(
        hour: i32,
        minute: i32,
        second: i32,
        nanosecond: i32,
        time_zone: TimeZoneDefinition,
        tag: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let has_leap_second = second == 60;
        validator::validate_clock(hour, minute, second, nanosecond, has_leap_second)?;
        time_zone.validate()?;
        Ok(Self {
            hour,
            minute,
            second,
            nanosecond,
            has_leap_second,
            time_zone,
            tag: tag.into(),
            total_nanoseconds: validator::total_nanoseconds(hour, minute, second, nanosecond),
        })
    }

    /// Midnight UTC.
    pub fn midnight() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            has_leap_second: false,
            time_zone: TimeZoneDefinition::utc(),
            tag: String::new(),
            total_nanoseconds: 0,
        }
    }

    /// The invalid placeholder.
    pub fn empty() -> Self {
        Self {
            hour: -1,
            minute: -1,
            second: -1,
            nanosecond: -1,
            ..Self::midnight()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validator::validate_clock(
            self.hour,
            self.minute,
            self.second,
            self.nanosecond,
            self.has_leap_second,
        )?;
        self.time_zone.validate()?;
        let expected =
            validator::total_nanoseconds(self.hour, self.minute, self.second, self.nanosecond);
        if self.total_nanoseconds != expected {
            return Err(ValidationError::new(
                "total_nanoseconds",
                self.total_nanoseconds,
                "does not match the clock fields",
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // ── raw accessors ─────────────────────────────────────────────────

    #[inline]
    pub const fn hour(&self) -> i32 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> i32 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> i32 {
        self.second
    }

    #[inline]
    pub const fn nanosecond(&self) -> i32 {
        self.nanosecond
    }

    #[inline]
    pub const fn has_leap_second(&self) -> bool {
        self.has_leap_second
    }

    #[inline]
    pub fn time_zone(&self) -> &TimeZoneDefinition {
        &self.time_zone
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    // ── derived ───────────────────────────────────────────────────────

    /// Nanoseconds since local midnight.
    pub fn total_nanoseconds(&self) -> Result<i64, ValidationError> {
        self.validate()?;
        Ok(self.total_nanoseconds)
    }

    /// Orders two times of day by their local clock reading.
    pub fn compare(&self, other: &Self) -> Result<Ordering, ValidationError> {
        Ok(self.total_nanoseconds()?.cmp(&other.total_nanoseconds()?))
    }

    // ── mutation ──────────────────────────────────────────────────────

    /// Replaces `self` with a copy of a valid `source`.
    pub fn copy_from(&mut self, source: &Self) -> Result<(), ValidationError> {
        source.validate()?;
        self.clone_from(source);
        Ok(())
    }

    /// Swaps two valid times. Nothing changes if either is invalid.
    pub fn exchange(&mut self, other: &mut Self) -> Result<(), ValidationError> {
        self.validate()?;
        other.validate()?;
        std::mem::swap(self, other);
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::empty();
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:09} {}",
            self.hour, self.minute, self.second, self.nanosecond, self.time_zone
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(h: i32, m: i32, s: i32, ns: i32) -> TimeValue {
        TimeValue::new(h, m, s, ns, TimeZoneDefinition::utc(), "").unwrap()
    }

    #[test]
    fn leap_flag_is_derived_from_second_sixty() {
        let leap = utc(23, 59, 60, 5);
        assert!(leap.has_leap_second());
        assert!(!utc(23, 59, 59, 5).has_leap_second());
        assert_eq!(leap.total_nanoseconds(), Ok(86_400_000_000_005));
    }

    #[test]
    fn out_of_range_fields_name_the_field() {
        let tz = TimeZoneDefinition::utc;
        assert_eq!(TimeValue::new(25, 0, 0, 0, tz(), "").unwrap_err().field, "hour");
        assert_eq!(TimeValue::new(24, 0, 0, 1, tz(), "").unwrap_err().field, "hour");
        assert_eq!(TimeValue::new(1, 60, 0, 0, tz(), "").unwrap_err().field, "minute");
        assert_eq!(TimeValue::new(1, 0, 61, 0, tz(), "").unwrap_err().field, "second");
    }

    #[test]
    fn empty_is_invalid_and_propagates() {
        let empty = TimeValue::empty();
        assert!(!empty.is_valid());
        assert!(empty.total_nanoseconds().is_err());
        assert!(utc(1, 0, 0, 0).compare(&empty).is_err());
    }

    #[test]
    fn compare_orders_by_clock() {
        let a = utc(9, 7, 2, 0);
        let b = utc(9, 7, 2, 1);
        assert_eq!(a.compare(&b), Ok(Ordering::Less));
        assert_eq!(b.compare(&a), Ok(Ordering::Greater));
        assert_eq!(a.compare(&a.clone()), Ok(Ordering::Equal));
        assert_eq!(utc(23, 59, 59, 999_999_999).compare(&utc(23, 59, 60, 0)), Ok(Ordering::Less));
    }

    #[test]
    fn failed_copy_and_exchange_leave_operands_untouched() {
        let mut a = utc(1, 2, 3, 4);
        let mut empty = TimeValue::empty();

        assert!(a.copy_from(&empty).is_err());
        assert_eq!(a, utc(1, 2, 3, 4));

        assert!(a.exchange(&mut empty).is_err());
        assert_eq!(a, utc(1, 2, 3, 4));
        assert_eq!(empty, TimeValue::empty());

        let mut b = utc(5, 6, 7, 8);
        a.exchange(&mut b).unwrap();
        assert_eq!((a.hour(), b.hour()), (5, 1));

        empty.copy_from(&a).unwrap();
        assert_eq!(empty, a);
        empty.reset();
        assert!(!empty.is_valid());
    }

    #[test]
    fn display_includes_zone() {
        let tz = TimeZoneDefinition::from_location("-0700").unwrap();
        let t = TimeValue::new(15, 4, 5, 0, tz, "x").unwrap();
        assert_eq!(t.to_string(), "15:04:05.000000000 -07:00");
        assert_eq!(t.tag(), "x");
    }
}
