// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar rule markers.
//!
//! Each zero-sized type encodes the leap-year rule of one calendar and
//! anchors it on the Julian Day Number axis.
//!
//! | Marker | Leap years | JDN of 0000-01-01 |
//! |--------|------------|-------------------|
//! | [`Gregorian`] | ÷4, except ÷100 unless ÷400 | 1 721 060 |
//! | [`Julian`] | ÷4 | 1 721 058 |
//! | [`RevisedJulian`] | ÷4, except ÷100 unless `year mod 900 ∈ {200, 600}` | 1 721 061 |
//! | [`RevisedGoucherParker`] | Gregorian, except ÷4000 | 1 721 061 |
//!
//! The anchors place every calendar so that 2000-01-01 is JDN 2 451 545
//! except the Julian calendar, which is the proleptic Julian calendar
//! (JDN 0 = 1 January 4713 BCE).

use crate::calendar::{count_residue, CalendarEpoch};

// ---------------------------------------------------------------------------
// Gregorian family
// ---------------------------------------------------------------------------

/// Proleptic Gregorian calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Gregorian;

impl Gregorian {
    #[inline]
    const fn leap(year: i64) -> bool {
        year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
    }

    #[inline]
    const fn leaps_before(year: i64) -> i64 {
        count_residue(year, 0, 4) - count_residue(year, 0, 100) + count_residue(year, 0, 400)
    }
}

impl CalendarEpoch for Gregorian {
    fn name(&self) -> &'static str {
        "Gregorian"
    }

    #[inline]
    fn is_leap_year(&self, year: i64) -> bool {
        Self::leap(year)
    }

    #[inline]
    fn leap_years_before(&self, year: i64) -> i64 {
        Self::leaps_before(year)
    }

    fn year_zero_julian_day_number(&self) -> i64 {
        1_721_060
    }

    fn mean_year(&self) -> (i64, i64) {
        (146_097, 400)
    }
}

/// Gregorian calendar with the additional rule that years divisible by
/// 4000 are common years.
///
/// Agrees with [`Gregorian`] from 0001-03-01 through 4000-02-28.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RevisedGoucherParker;

impl CalendarEpoch for RevisedGoucherParker {
    fn name(&self) -> &'static str {
        "Revised Goucher-Parker"
    }

    #[inline]
    fn is_leap_year(&self, year: i64) -> bool {
        Gregorian::leap(year) && year.rem_euclid(4_000) != 0
    }

    #[inline]
    fn leap_years_before(&self, year: i64) -> i64 {
        Gregorian::leaps_before(year) - count_residue(year, 0, 4_000)
    }

    fn year_zero_julian_day_number(&self) -> i64 {
        1_721_061
    }

    fn mean_year(&self) -> (i64, i64) {
        (1_460_969, 4_000)
    }
}

// ---------------------------------------------------------------------------
// Julian family
// ---------------------------------------------------------------------------

/// Proleptic Julian calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Julian;

impl CalendarEpoch for Julian {
    fn name(&self) -> &'static str {
        "Julian"
    }

    #[inline]
    fn is_leap_year(&self, year: i64) -> bool {
        year.rem_euclid(4) == 0
    }

    #[inline]
    fn leap_years_before(&self, year: i64) -> i64 {
        count_residue(year, 0, 4)
    }

    fn year_zero_julian_day_number(&self) -> i64 {
        1_721_058
    }

    fn mean_year(&self) -> (i64, i64) {
        (1_461, 4)
    }
}

/// Revised Julian (Milanković) calendar.
///
/// Agrees with [`Gregorian`] from 1600-03-01 through 2800-02-28.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RevisedJulian;

impl CalendarEpoch for RevisedJulian {
    fn name(&self) -> &'static str {
        "Revised Julian"
    }

    #[inline]
    fn is_leap_year(&self, year: i64) -> bool {
        year.rem_euclid(4) == 0
            && (year.rem_euclid(100) != 0 || matches!(year.rem_euclid(900), 200 | 600))
    }

    #[inline]
    fn leap_years_before(&self, year: i64) -> i64 {
        count_residue(year, 0, 4) - count_residue(year, 0, 100)
            + count_residue(year, 200, 900)
            + count_residue(year, 600, 900)
    }

    fn year_zero_julian_day_number(&self) -> i64 {
        1_721_061
    }

    fn mean_year(&self) -> (i64, i64) {
        (328_718, 900)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2000, 1, 1, 2_451_545)]
    #[case(2020, 1, 1, 2_458_850)]
    #[case(1969, 7, 20, 2_440_423)]
    #[case(1900, 1, 1, 2_415_021)]
    #[case(1858, 11, 17, 2_400_001)]
    #[case(-4713, 11, 24, 0)]
    fn gregorian_julian_day_numbers(
        #[case] y: i64,
        #[case] m: i32,
        #[case] d: i32,
        #[case] jdn: i64,
    ) {
        assert_eq!(Gregorian.julian_day_number(y, m, d), Some(jdn));
        assert_eq!(Gregorian.date_from_julian_day_number(jdn), Some((y, m, d)));
    }

    #[rstest]
    #[case(-4712, 1, 1, 0)]
    #[case(2000, 1, 1, 2_451_558)]
    #[case(1582, 10, 4, 2_299_160)]
    fn julian_julian_day_numbers(
        #[case] y: i64,
        #[case] m: i32,
        #[case] d: i32,
        #[case] jdn: i64,
    ) {
        assert_eq!(Julian.julian_day_number(y, m, d), Some(jdn));
        assert_eq!(Julian.date_from_julian_day_number(jdn), Some((y, m, d)));
    }

    #[test]
    fn gregorian_reform_is_contiguous() {
        let last_julian = Julian.julian_day_number(1582, 10, 4).unwrap();
        let first_gregorian = Gregorian.julian_day_number(1582, 10, 15).unwrap();
        assert_eq!(first_gregorian - last_julian, 1);
    }

    #[test]
    fn revised_julian_agrees_with_gregorian_until_2800() {
        for (y, m, d) in [(1600, 3, 1), (2000, 2, 29), (2024, 7, 14), (2800, 2, 28)] {
            assert_eq!(
                RevisedJulian.julian_day_number(y, m, d),
                Gregorian.julian_day_number(y, m, d),
                "{y}-{m}-{d}"
            );
        }
        assert!(Gregorian.is_leap_year(2800));
        assert!(!RevisedJulian.is_leap_year(2800));
        assert_eq!(
            RevisedJulian.julian_day_number(2800, 3, 1).unwrap(),
            Gregorian.julian_day_number(2800, 3, 1).unwrap() - 1
        );
        assert!(RevisedJulian.is_leap_year(2000));
        assert!(RevisedJulian.is_leap_year(2400));
        assert!(!RevisedJulian.is_leap_year(2100));
    }

    #[test]
    fn goucher_parker_drops_leap_day_every_four_millennia() {
        assert!(Gregorian.is_leap_year(4000));
        assert!(!RevisedGoucherParker.is_leap_year(4000));
        assert!(RevisedGoucherParker.is_leap_year(2000));
        assert_eq!(
            RevisedGoucherParker.julian_day_number(2000, 1, 1),
            Gregorian.julian_day_number(2000, 1, 1)
        );
        assert_eq!(
            RevisedGoucherParker.julian_day_number(4000, 3, 1).unwrap(),
            Gregorian.julian_day_number(4000, 3, 1).unwrap() - 1
        );
    }

    #[test]
    fn negative_years_follow_the_leap_rule() {
        // Astronomical year 0 (1 BCE) and -4 (5 BCE) are leap years.
        assert!(Gregorian.is_leap_year(0));
        assert!(Gregorian.is_leap_year(-4));
        assert!(!Gregorian.is_leap_year(-100));
        assert!(Gregorian.is_leap_year(-400));
        assert_eq!(Gregorian.days_in_month(-4, 2), Some(29));
        assert_eq!(Julian.days_in_month(-100, 2), Some(29));
    }
}
