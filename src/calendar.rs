// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Pluggable calendar day-count rules.
//!
//! A [`CalendarEpoch`] answers every calendar-specific question the rest of
//! the crate needs: whether a year is a leap year, whether a civil date is
//! valid, its ordinal day, and its Julian Day Number. Everything else
//! (year numbering, time of day, Julian fractions) is calendar independent
//! and lives elsewhere.
//!
//! Implementors only supply three primitives:
//!
//! 1. [`is_leap_year`](CalendarEpoch::is_leap_year),
//! 2. [`leap_years_before`](CalendarEpoch::leap_years_before), a signed count
//!    of leap years in `[0, year)` (negative for negative years),
//! 3. [`year_zero_julian_day_number`](CalendarEpoch::year_zero_julian_day_number),
//!    the JDN of 1 January of astronomical year 0,
//!
//! plus the mean year length used to seed the inverse conversion. All
//! other methods are provided.
//!
//! All years on this interface are **astronomical** years. Numbering-mode
//! bookkeeping (BCE/CE) happens in [`crate::year`].

use crate::epochs::{Gregorian, Julian, RevisedGoucherParker, RevisedJulian};
use crate::error::ValidationError;
use crate::validator;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cumulative days before each month in a common year.
const DAYS_BEFORE_MONTH: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Month lengths in a common year.
const DAYS_IN_MONTH: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Signed count of integers `n` in `[0, year)` with `n ≡ residue (mod modulus)`.
///
/// For negative `year` the result is minus the count in `[year, 0)`, so that
/// `count_residue(y + 1, ..) - count_residue(y, ..)` is 1 exactly when `y`
/// matches, for every `y`.
#[inline]
pub(crate) const fn count_residue(year: i64, residue: i64, modulus: i64) -> i64 {
    -(residue - year).div_euclid(modulus)
}

/// Days from 1 January of year 0 to 1 January of `year`, unchecked.
///
/// `|year|` must stay within a few times the supported year range, which
/// every civil JDN within the supported day range satisfies.
#[inline]
fn days_before<C: CalendarEpoch + ?Sized>(calendar: &C, year: i64) -> i64 {
    365 * year + calendar.leap_years_before(year)
}

/// Day-count answer for one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    /// 1-based day of the year.
    pub ordinal_day: i64,
    /// Length of the year in days.
    pub days_in_year: i64,
    /// Julian Day Number of the date (the noon that starts inside it).
    pub julian_day_number: i64,
}

/// Day-count rules of one calendar system.
///
/// The trait is object safe; implementors are zero-sized and stateless, so
/// a single instance can be shared freely across threads.
pub trait CalendarEpoch: fmt::Debug + Send + Sync {
    /// Human-readable calendar name.
    fn name(&self) -> &'static str;

    /// Whether astronomical `year` has an intercalary day.
    fn is_leap_year(&self, year: i64) -> bool;

    /// Signed number of leap years in `[0, year)`.
    fn leap_years_before(&self, year: i64) -> i64;

    /// Julian Day Number of 1 January, astronomical year 0.
    fn year_zero_julian_day_number(&self) -> i64;

    /// Mean year length as an exact fraction `(days, years)`.
    fn mean_year(&self) -> (i64, i64);

    // ── provided ──────────────────────────────────────────────────────

    /// Number of days in `year` (365 or 366).
    #[inline]
    fn days_in_year(&self, year: i64) -> i64 {
        if self.is_leap_year(year) {
            366
        } else {
            365
        }
    }

    /// Number of days in `month` of `year`, or `None` for an invalid month.
    fn days_in_month(&self, year: i64, month: i32) -> Option<i32> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let base = DAYS_IN_MONTH[(month - 1) as usize];
        Some(if month == 2 && self.is_leap_year(year) {
            base + 1
        } else {
            base
        })
    }

    /// Whether `year-month-day` exists in this calendar.
    fn is_valid_date(&self, year: i64, month: i32, day: i32) -> bool {
        match self.days_in_month(year, month) {
            Some(len) => (1..=len).contains(&day),
            None => false,
        }
    }

    /// Days elapsed from 1 January of year 0 to 1 January of `year`, or
    /// `None` outside the supported year range.
    fn days_before_year(&self, year: i64) -> Option<i64> {
        validator::validate_astronomical_year(year).ok()?;
        Some(days_before(self, year))
    }

    /// 1-based ordinal day of a valid date.
    fn ordinal_day(&self, year: i64, month: i32, day: i32) -> Option<i64> {
        if !self.is_valid_date(year, month, day) {
            return None;
        }
        let mut before = DAYS_BEFORE_MONTH[(month - 1) as usize];
        if month > 2 && self.is_leap_year(year) {
            before += 1;
        }
        Some(before + i64::from(day))
    }

    /// Julian Day Number of a valid date in the supported year range.
    fn julian_day_number(&self, year: i64, month: i32, day: i32) -> Option<i64> {
        let ordinal = self.ordinal_day(year, month, day)?;
        Some(self.year_zero_julian_day_number() + self.days_before_year(year)? + ordinal - 1)
    }

    /// Civil `(year, month, day)` of a Julian Day Number, or `None` when
    /// `|jdn|` exceeds [`MAX_CIVIL_JULIAN_DAY_NUMBER`].
    ///
    /// The year is first estimated from the mean year length and then
    /// corrected by at most a few steps. Near the bound the year may lie
    /// outside the supported year range; callers validate it.
    ///
    /// [`MAX_CIVIL_JULIAN_DAY_NUMBER`]: crate::validator::MAX_CIVIL_JULIAN_DAY_NUMBER
    fn date_from_julian_day_number(&self, jdn: i64) -> Option<(i64, i32, i32)> {
        validator::validate_civil_julian_day_number(jdn).ok()?;
        let days = jdn - self.year_zero_julian_day_number();
        let (cycle_days, cycle_years) = self.mean_year();
        let mut year = (days * cycle_years).div_euclid(cycle_days);
        while days_before(self, year) > days {
            year -= 1;
        }
        while days_before(self, year + 1) <= days {
            year += 1;
        }

        let mut remaining = days - days_before(self, year);
        let mut month = 1;
        while month < 12 {
            let len = i64::from(self.days_in_month(year, month).unwrap_or(31));
            if remaining < len {
                break;
            }
            remaining -= len;
            month += 1;
        }
        Some((year, month, remaining as i32 + 1))
    }

    /// Validity, ordinal day, year length and JDN of a date, in one call.
    fn day_count(&self, year: i64, month: i32, day: i32) -> Result<DayCount, ValidationError> {
        validator::validate_astronomical_year(year)?;
        validator::validate_month(month)?;
        let ordinal_day = self
            .ordinal_day(year, month, day)
            .ok_or_else(|| ValidationError::new("day", day, "not a day of this month"))?;
        Ok(DayCount {
            ordinal_day,
            days_in_year: self.days_in_year(year),
            julian_day_number: self.year_zero_julian_day_number()
                + days_before(self, year)
                + ordinal_day
                - 1,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarSystem — runtime selector
// ═══════════════════════════════════════════════════════════════════════════

/// Runtime choice of calendar, delegating to the zero-sized rule markers in
/// [`crate::epochs`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CalendarSystem {
    #[default]
    Gregorian,
    Julian,
    RevisedJulian,
    RevisedGoucherParker,
}

impl CalendarSystem {
    /// All supported calendars.
    pub const ALL: [CalendarSystem; 4] = [
        CalendarSystem::Gregorian,
        CalendarSystem::Julian,
        CalendarSystem::RevisedJulian,
        CalendarSystem::RevisedGoucherParker,
    ];

    /// The rule set behind this selector.
    pub fn epoch(self) -> &'static dyn CalendarEpoch {
        match self {
            CalendarSystem::Gregorian => &Gregorian,
            CalendarSystem::Julian => &Julian,
            CalendarSystem::RevisedJulian => &RevisedJulian,
            CalendarSystem::RevisedGoucherParker => &RevisedGoucherParker,
        }
    }
}

impl CalendarEpoch for CalendarSystem {
    fn name(&self) -> &'static str {
        self.epoch().name()
    }

    fn is_leap_year(&self, year: i64) -> bool {
        self.epoch().is_leap_year(year)
    }

    fn leap_years_before(&self, year: i64) -> i64 {
        self.epoch().leap_years_before(year)
    }

    fn year_zero_julian_day_number(&self) -> i64 {
        self.epoch().year_zero_julian_day_number()
    }

    fn mean_year(&self) -> (i64, i64) {
        self.epoch().mean_year()
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarSystem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "gregorian" => Ok(CalendarSystem::Gregorian),
            "julian" => Ok(CalendarSystem::Julian),
            "revisedjulian" => Ok(CalendarSystem::RevisedJulian),
            "revisedgoucherparker" | "goucherparker" => Ok(CalendarSystem::RevisedGoucherParker),
            _ => Err(ValidationError::new(
                "calendar",
                s,
                "unknown calendar system",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_residue_is_signed() {
        assert_eq!(count_residue(0, 0, 4), 0);
        assert_eq!(count_residue(1, 0, 4), 1);
        assert_eq!(count_residue(5, 0, 4), 2);
        assert_eq!(count_residue(-1, 0, 4), 0);
        assert_eq!(count_residue(-4, 0, 4), -1);
        assert_eq!(count_residue(-5, 0, 4), -2);
        assert_eq!(count_residue(2000, 200, 900), 2);
        assert_eq!(count_residue(-700, 200, 900), -1);
    }

    #[test]
    fn leap_count_steps_match_leap_years() {
        for cal in CalendarSystem::ALL {
            for y in -2_000..2_000 {
                let step = cal.leap_years_before(y + 1) - cal.leap_years_before(y);
                assert_eq!(step == 1, cal.is_leap_year(y), "{cal} year {y}");
            }
        }
    }

    #[test]
    fn julian_day_number_round_trips_in_every_calendar() {
        for cal in CalendarSystem::ALL {
            for jdn in (-1_000_000..4_000_000).step_by(997) {
                let (y, m, d) = cal.date_from_julian_day_number(jdn).unwrap();
                assert_eq!(cal.julian_day_number(y, m, d), Some(jdn), "{cal} {y}-{m}-{d}");
            }
        }
    }

    #[test]
    fn day_counts_outside_the_supported_range_are_none() {
        use crate::validator::{MAX_ASTRONOMICAL_YEAR, MAX_CIVIL_JULIAN_DAY_NUMBER};

        for cal in CalendarSystem::ALL {
            assert_eq!(cal.julian_day_number(i64::MAX / 100, 1, 1), None, "{cal}");
            assert_eq!(cal.julian_day_number(i64::MIN, 1, 1), None, "{cal}");
            assert_eq!(cal.days_before_year(MAX_ASTRONOMICAL_YEAR + 1), None, "{cal}");
            assert!(cal.days_before_year(MAX_ASTRONOMICAL_YEAR).is_some(), "{cal}");

            for jdn in [3_000_000_000_000_000, i64::MAX / 100, i64::MAX, i64::MIN] {
                assert_eq!(cal.date_from_julian_day_number(jdn), None, "{cal} {jdn}");
            }
            for jdn in [MAX_CIVIL_JULIAN_DAY_NUMBER, -MAX_CIVIL_JULIAN_DAY_NUMBER] {
                let (y, m, d) = cal.date_from_julian_day_number(jdn).unwrap();
                assert!(cal.is_valid_date(y, m, d), "{cal} {y}-{m}-{d}");
            }
        }
    }

    #[test]
    fn day_count_reports_all_fields() {
        let dc = CalendarSystem::Gregorian.day_count(2024, 3, 1).unwrap();
        assert_eq!(dc.ordinal_day, 61);
        assert_eq!(dc.days_in_year, 366);
        assert_eq!(dc.julian_day_number, 2_460_371);

        assert!(CalendarSystem::Gregorian.day_count(2023, 2, 29).is_err());
        assert!(CalendarSystem::Gregorian.day_count(2023, 13, 1).is_err());
    }

    #[test]
    fn calendar_names_parse() {
        assert_eq!("Gregorian".parse::<CalendarSystem>(), Ok(CalendarSystem::Gregorian));
        assert_eq!("revised julian".parse::<CalendarSystem>(), Ok(CalendarSystem::RevisedJulian));
        assert_eq!(
            "Revised Goucher-Parker".parse::<CalendarSystem>(),
            Ok(CalendarSystem::RevisedGoucherParker)
        );
        assert!("Hebrew".parse::<CalendarSystem>().is_err());
    }
}
