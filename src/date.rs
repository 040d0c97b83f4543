// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Validated calendar dates.
//!
//! A [`DateValue`] keeps its year three ways: the astronomical year used for
//! arithmetic, the numbering mode the caller works in, and the BCE/CE label
//! of the year in that mode. Construction normalises all three through
//! [`convert_year`]; [`DateValue::validate`] checks they still agree.

use crate::calendar::{CalendarEpoch, CalendarSystem};
use crate::error::ValidationError;
use crate::validator;
use crate::year::{convert_year, Year, YearNumberType, YearNumberingMode};
use chrono::Weekday;
use std::cmp::Ordering;
use std::fmt;

/// Day of week indexed from Sunday.
const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// A civil date in a given calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateValue {
    astronomical_year: i64,
    numbering_mode: YearNumberingMode,
    year_type: YearNumberType,
    month: i32,
    day: i32,
    has_leap_second: bool,
    calendar: Option<CalendarSystem>,
    tag: String,
}

impl Default for DateValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl DateValue {
    /// Builds a date from a year labelled `year_type`.
    ///
    /// `has_leap_second` marks a day that ends with an inserted leap second.
    pub fn new(
        calendar: Option<CalendarSystem>,
        year: i64,
        year_type: YearNumberType,
        month: i32,
        day: i32,
        has_leap_second: bool,
        tag: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let calendar = validator::validate_calendar(calendar)?;
        let (astronomical_year, _) =
            convert_year(year, year_type, YearNumberingMode::Astronomical)?;
        validator::validate_day(&calendar, astronomical_year, month, day)?;
        Ok(Self {
            astronomical_year,
            numbering_mode: year_type.numbering_mode(),
            year_type,
            month,
            day,
            has_leap_second,
            calendar: Some(calendar),
            tag: tag.into(),
        })
    }

    /// The civil date of Julian Day Number `jdn`.
    pub fn from_julian_day_number(
        jdn: i64,
        calendar: CalendarSystem,
        mode: YearNumberingMode,
        tag: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        validator::validate_civil_julian_day_number(jdn)?;
        let (year, month, day) = calendar.date_from_julian_day_number(jdn).ok_or_else(|| {
            ValidationError::new("julian_day_number", jdn, "outside the supported day range")
        })?;
        validator::validate_astronomical_year(year)?;
        let (value, kind) = convert_year(year, YearNumberType::Astronomical, mode)?;
        Self::new(Some(calendar), value, kind, month, day, false, tag)
    }

    /// The invalid placeholder: no calendar, month and day `-1`.
    pub fn empty() -> Self {
        Self {
            astronomical_year: 0,
            numbering_mode: YearNumberingMode::Astronomical,
            year_type: YearNumberType::Astronomical,
            month: -1,
            day: -1,
            has_leap_second: false,
            calendar: None,
            tag: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let calendar = validator::validate_calendar(self.calendar)?;
        validator::validate_numbering(self.numbering_mode, self.year_type)?;
        validator::validate_astronomical_year(self.astronomical_year)?;
        let (_, expected) = convert_year(
            self.astronomical_year,
            YearNumberType::Astronomical,
            self.numbering_mode,
        )?;
        if expected != self.year_type {
            return Err(ValidationError::new(
                "year_type",
                format!("{:?}", self.year_type),
                "does not match the astronomical year",
            ));
        }
        validator::validate_day(&calendar, self.astronomical_year, self.month, self.day)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validated calendar.
    fn checked_calendar(&self) -> Result<CalendarSystem, ValidationError> {
        self.validate()?;
        validator::validate_calendar(self.calendar)
    }

    // ── raw accessors ─────────────────────────────────────────────────

    #[inline]
    pub const fn astronomical_year(&self) -> i64 {
        self.astronomical_year
    }

    #[inline]
    pub const fn numbering_mode(&self) -> YearNumberingMode {
        self.numbering_mode
    }

    #[inline]
    pub const fn year_type(&self) -> YearNumberType {
        self.year_type
    }

    #[inline]
    pub const fn month(&self) -> i32 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> i32 {
        self.day
    }

    #[inline]
    pub const fn has_leap_second(&self) -> bool {
        self.has_leap_second
    }

    #[inline]
    pub const fn calendar(&self) -> Option<CalendarSystem> {
        self.calendar
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    // ── derived ───────────────────────────────────────────────────────

    /// The year in this date's numbering mode.
    pub fn year(&self) -> Result<Year, ValidationError> {
        self.validate()?;
        let (value, kind) = convert_year(
            self.astronomical_year,
            YearNumberType::Astronomical,
            self.numbering_mode,
        )?;
        Year::new(value, kind)
    }

    pub fn ordinal_day_number(&self) -> Result<i64, ValidationError> {
        let calendar = self.checked_calendar()?;
        Ok(calendar
            .day_count(self.astronomical_year, self.month, self.day)?
            .ordinal_day)
    }

    pub fn days_in_year(&self) -> Result<i64, ValidationError> {
        Ok(self.checked_calendar()?.days_in_year(self.astronomical_year))
    }

    /// Days left in the year after this date.
    pub fn remaining_days_in_year(&self) -> Result<i64, ValidationError> {
        Ok(self.days_in_year()? - self.ordinal_day_number()?)
    }

    /// Julian Day Number of this date (the noon inside it).
    pub fn julian_day_number(&self) -> Result<i64, ValidationError> {
        let calendar = self.checked_calendar()?;
        Ok(calendar
            .day_count(self.astronomical_year, self.month, self.day)?
            .julian_day_number)
    }

    pub fn day_of_week(&self) -> Result<Weekday, ValidationError> {
        let jdn = self.julian_day_number()?;
        Ok(WEEKDAYS_FROM_SUNDAY[(jdn + 1).rem_euclid(7) as usize])
    }

    /// The same date labelled in `mode`.
    pub fn with_numbering_mode(&self, mode: YearNumberingMode) -> Result<Self, ValidationError> {
        self.validate()?;
        let (_, year_type) =
            convert_year(self.astronomical_year, YearNumberType::Astronomical, mode)?;
        Ok(Self {
            numbering_mode: mode,
            year_type,
            ..self.clone()
        })
    }

    /// Orders dates by astronomical year, then day of the year.
    pub fn compare(&self, other: &Self) -> Result<Ordering, ValidationError> {
        let mine = (self.astronomical_year, self.ordinal_day_number()?);
        let theirs = (other.astronomical_year, other.ordinal_day_number()?);
        Ok(mine.cmp(&theirs))
    }

    // ── mutation ──────────────────────────────────────────────────────

    pub fn copy_from(&mut self, source: &Self) -> Result<(), ValidationError> {
        source.validate()?;
        self.clone_from(source);
        Ok(())
    }

    /// Swaps two valid dates. Nothing changes if either is invalid.
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

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, kind) = convert_year(
            self.astronomical_year,
            YearNumberType::Astronomical,
            self.numbering_mode,
        )
        .unwrap_or((self.astronomical_year, YearNumberType::Astronomical));
        if value < 0 {
            write!(f, "-{:04}", value.unsigned_abs())?;
        } else {
            write!(f, "{value:04}")?;
        }
        write!(f, "-{:02}-{:02}{}", self.month, self.day, kind.suffix())
    }
}
