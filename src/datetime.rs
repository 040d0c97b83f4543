// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date, time of day and zone as one validated value.
//!
//! A [`DateTimeValue`] caches the UTC-normalised [`JulianDayNumber`] of the
//! instant it denotes, so ordering by instant and Julian Day rendering never
//! recompute the calendar arithmetic.
//!
//! ## Leap seconds in local time
//!
//! A leap second is inserted at `23:59:60` UTC, which is a different local
//! clock reading in zones away from UTC (`00:59:60` at `+01:00`). Local
//! second 60 is accepted wherever it lands on 23:59:60 UTC, and the date
//! must then carry the leap-second flag too.

use crate::calendar::CalendarSystem;
use crate::date::DateValue;
use crate::engine::JulianDayEngine;
use crate::error::{ConversionError, Error, InvalidArgument, ValidationError};
use crate::format::{FormatComponents, FormatRenderer, DEFAULT_FORMAT};
use crate::julian_day::JulianDayNumber;
use crate::time::TimeValue;
use crate::validator::NANOS_PER_SECOND;
use crate::year::{convert_year, YearNumberType, YearNumberingMode};
use crate::zone::TimeZoneDefinition;
use chrono::{DateTime, FixedOffset};
use std::cmp::Ordering;
use std::fmt;

/// A zoned civil date-time with its Julian Day Number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeValue {
    date: DateValue,
    time: TimeValue,
    julian_day: Option<JulianDayNumber>,
    format: String,
    tag: String,
}

impl Default for DateTimeValue {
    fn default() -> Self {
        Self::empty()
    }
}

fn conversion_to_validation(err: ConversionError) -> ValidationError {
    match err {
        ConversionError::InvalidDate(inner) => inner,
        other => ValidationError::new("julian_day", other, "instant cannot be converted"),
    }
}

impl DateTimeValue {
    /// Builds and validates a date-time from its fields.
    ///
    /// `year` is labelled by `year_type`. `time_zone_location` is resolved
    /// with [`TimeZoneDefinition::from_location`]; an empty template selects
    /// [`DEFAULT_FORMAT`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        calendar: Option<CalendarSystem>,
        year: i64,
        year_type: YearNumberType,
        month: i32,
        day: i32,
        has_leap_second: bool,
        hour: i32,
        minute: i32,
        second: i32,
        nanosecond: i32,
        time_zone_location: &str,
        format_template: &str,
        tag: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let tag = tag.into();
        let time_zone = TimeZoneDefinition::from_location(time_zone_location)?;
        let date = DateValue::new(
            calendar,
            year,
            year_type,
            month,
            day,
            has_leap_second,
            tag.clone(),
        )?;
        let time = TimeValue::new(hour, minute, second, nanosecond, time_zone, tag.clone())?;
        Self::from_parts(date, time, format_template, tag)
    }

    /// Combines a validated date and time.
    pub fn from_parts(
        date: DateValue,
        time: TimeValue,
        format_template: &str,
        tag: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        date.validate()?;
        time.validate()?;
        check_leap_flags(&date, &time)?;
        let julian_day = utc_julian_day(&date, &time)?;
        Ok(Self {
            date,
            time,
            julian_day: Some(julian_day),
            format: template_or_default(format_template),
            tag: tag.into(),
        })
    }

    /// Like [`from_parts`](Self::from_parts) for callers holding optional
    /// parts; a missing part is an [`InvalidArgument`].
    pub fn new_from_parts(
        date: Option<DateValue>,
        time: Option<TimeValue>,
        format_template: &str,
        tag: impl Into<String>,
    ) -> Result<Self, Error> {
        let date = date.ok_or(InvalidArgument("date"))?;
        let time = time.ok_or(InvalidArgument("time"))?;
        Ok(Self::from_parts(date, time, format_template, tag)?)
    }

    /// Reconstructs the civil date-time of `jd` as seen in a zone.
    pub fn from_julian_day_number(
        jd: &JulianDayNumber,
        calendar: CalendarSystem,
        mode: YearNumberingMode,
        time_zone_location: &str,
        format_template: &str,
        tag: impl Into<String>,
    ) -> Result<Self, Error> {
        let time_zone = TimeZoneDefinition::from_location(time_zone_location)?;
        let engine = JulianDayEngine::new(calendar);
        let offset_nanos = i64::from(time_zone.utc_offset_seconds()) * NANOS_PER_SECOND;

        let leap = jd.has_leap_second();
        let local = if leap {
            // Shift the preceding second, then relabel it as second 60.
            let utc = engine.to_gregorian_utc(jd)?;
            engine
                .from_gregorian(utc.year, utc.month, utc.day, 23, 59, 59, utc.nanosecond, false)?
                .shifted_by_nanoseconds(offset_nanos)?
        } else {
            jd.shifted_by_nanoseconds(offset_nanos)?
        };
        let fields = engine.to_gregorian_utc(&local)?;
        let (year, year_type) = convert_year(fields.year, YearNumberType::Astronomical, mode)?;
        let second = if leap { 60 } else { fields.second };

        Ok(Self::new(
            Some(calendar),
            year,
            year_type,
            fields.month,
            fields.day,
            leap,
            fields.hour,
            fields.minute,
            second,
            fields.nanosecond,
            time_zone_location,
            format_template,
            tag,
        )?)
    }

    /// The invalid placeholder.
    pub fn empty() -> Self {
        Self {
            date: DateValue::empty(),
            time: TimeValue::empty(),
            julian_day: None,
            format: DEFAULT_FORMAT.to_owned(),
            tag: String::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.date.validate()?;
        self.time.validate()?;
        check_leap_flags(&self.date, &self.time)?;
        match &self.julian_day {
            Some(jd) => jd.validate().map_err(conversion_to_validation),
            None => Err(ValidationError::new(
                "julian_day",
                "none",
                "Julian Day Number has not been computed",
            )),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // ── raw accessors ─────────────────────────────────────────────────

    #[inline]
    pub fn date(&self) -> &DateValue {
        &self.date
    }

    #[inline]
    pub fn time(&self) -> &TimeValue {
        &self.time
    }

    #[inline]
    pub fn format_template(&self) -> &str {
        &self.format
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Replaces the display template; an empty one selects the default.
    pub fn set_format(&mut self, template: &str) {
        self.format = template_or_default(template);
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    // ── derived ───────────────────────────────────────────────────────

    /// UTC-normalised Julian Day Number/Time.
    pub fn julian_day_number(&self) -> Result<&JulianDayNumber, ValidationError> {
        self.validate()?;
        self.julian_day
            .as_ref()
            .ok_or_else(|| ValidationError::new("julian_day", "none", "not computed"))
    }

    /// Orders by local date, then local time of day.
    pub fn compare(&self, other: &Self) -> Result<Ordering, ValidationError> {
        self.validate()?;
        other.validate()?;
        Ok(match self.date.compare(&other.date)? {
            Ordering::Equal => self.time.compare(&other.time)?,
            unequal => unequal,
        })
    }

    /// Orders by the instant denoted, whatever the zones.
    pub fn compare_instant(&self, other: &Self) -> Result<Ordering, Error> {
        let mine = self.julian_day_number()?;
        let theirs = other.julian_day_number()?;
        Ok(mine.compare(theirs)?)
    }

    pub fn format_components(&self) -> Result<FormatComponents, ValidationError> {
        self.validate()?;
        let zone = self.time.time_zone();
        Ok(FormatComponents {
            year: self.date.year()?.value(),
            month: self.date.month(),
            day: self.date.day(),
            ordinal_day: self.date.ordinal_day_number()? as i32,
            weekday: self.date.day_of_week()?.num_days_from_sunday() as i32,
            hour: self.time.hour(),
            minute: self.time.minute(),
            second: self.time.second(),
            nanosecond: self.time.nanosecond(),
            utc_offset_seconds: zone.utc_offset_seconds(),
            zone_abbreviation: zone.abbreviation().to_owned(),
        })
    }

    /// Renders through the stored template.
    pub fn format(&self) -> Result<String, Error> {
        self.format_with(&self.format)
    }

    pub fn format_with(&self, template: &str) -> Result<String, Error> {
        Ok(FormatRenderer::render(template, &self.format_components()?)?)
    }

    /// The instant as a chrono timestamp in this value's zone.
    pub fn to_chrono(&self) -> Result<DateTime<FixedOffset>, Error> {
        let jd = self.julian_day_number()?;
        let zone = self.time.time_zone();
        let offset = zone.utc_offset().ok_or_else(|| {
            ConversionError::out_of_range("chrono utc offset", zone.utc_offset_seconds())
        })?;
        Ok(JulianDayEngine::default().to_chrono(jd)?.with_timezone(&offset))
    }

    // ── mutation ──────────────────────────────────────────────────────

    pub fn copy_from(&mut self, source: &Self) -> Result<(), ValidationError> {
        source.validate()?;
        self.clone_from(source);
        Ok(())
    }

    /// Swaps two valid date-times. Nothing changes if either is invalid.
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

fn template_or_default(template: &str) -> String {
    if template.is_empty() {
        DEFAULT_FORMAT.to_owned()
    } else {
        template.to_owned()
    }
}

fn check_leap_flags(date: &DateValue, time: &TimeValue) -> Result<(), ValidationError> {
    if time.has_leap_second() && !date.has_leap_second() {
        return Err(ValidationError::new(
            "has_leap_second",
            false,
            "a leap second time requires a leap second date",
        ));
    }
    Ok(())
}

/// Julian Day of a validated local date and time, normalised to UTC.
fn utc_julian_day(date: &DateValue, time: &TimeValue) -> Result<JulianDayNumber, ValidationError> {
    let calendar = date
        .calendar()
        .ok_or_else(|| ValidationError::new("calendar", "none", "calendar epoch is missing"))?;
    let engine = JulianDayEngine::new(calendar);
    let leap = time.has_leap_second();
    let offset_nanos = i64::from(time.time_zone().utc_offset_seconds()) * NANOS_PER_SECOND;

    // Second 60 is computed as second 59 and restored once in UTC.
    let second = if leap { 59 } else { time.second() };
    let local = engine
        .from_gregorian(
            date.astronomical_year(),
            date.month(),
            date.day(),
            time.hour(),
            time.minute(),
            second,
            time.nanosecond(),
            false,
        )
        .map_err(conversion_to_validation)?;
    let utc = local
        .shifted_by_nanoseconds(-offset_nanos)
        .map_err(conversion_to_validation)?;
    if !leap {
        return Ok(utc);
    }

    let fields = engine
        .to_gregorian_utc(&utc)
        .map_err(conversion_to_validation)?;
    if (fields.hour, fields.minute, fields.second) != (23, 59, 59) {
        return Err(ValidationError::new(
            "second",
            time.to_string(),
            "a leap second must fall on 23:59:60 UTC",
        ));
    }
    engine
        .from_gregorian(
            fields.year,
            fields.month,
            fields.day,
            23,
            59,
            60,
            fields.nanosecond,
            true,
        )
        .map_err(conversion_to_validation)
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{} {}", self.date, self.time),
        }
    }
}
