// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil date/time ⇄ Julian Day Number/Time conversion.
//!
//! [`JulianDayEngine`] pairs a [`CalendarSystem`] with a rendering bound and
//! converts UTC civil fields to a [`JulianDayNumber`] and back:
//!
//! ```text
//! JD = JDN(date) − ½ + time_of_day / 24h
//! ```
//!
//! The integer JDN comes from the calendar's day-count rule; the time of day
//! is exact to the nanosecond. Days begin at noon, so civil midnight has
//! fraction `0.5`.
//!
//! ## Leap seconds
//!
//! An inserted leap second `23:59:60.x` has no Julian value of its own. It
//! maps onto the value of `00:00:00.x` of the next civil day and the result
//! carries [`JulianDayNumber::has_leap_second`]. The inverse conversion
//! restores second 60 from that flag.
//!
//! ## chrono interop
//!
//! [`JulianDayEngine::from_chrono`] and [`JulianDayEngine::to_chrono`] always
//! use the proleptic Gregorian calendar, as chrono does. chrono encodes a
//! leap second as second 59 with `nanosecond ≥ 1_000_000_000`.

use crate::calendar::{CalendarEpoch, CalendarSystem};
use crate::epochs::Gregorian;
use crate::error::{ConversionError, ValidationError};
use crate::julian_day::{JulianDayNumber, DEFAULT_MAX_FRACTION_DIGITS};
use crate::validator::{
    self, MAX_CIVIL_JULIAN_DAY_NUMBER, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE,
    NANOS_PER_SECOND,
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use num::BigInt;
use num_traits::ToPrimitive;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UTC civil fields of a Julian Day Number/Time.
///
/// `year` is astronomical. `second == 60` exactly when `has_leap_second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GregorianUtc {
    pub year: i64,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub nanosecond: i32,
    pub has_leap_second: bool,
}

impl fmt::Display for GregorianUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(
            f,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
            self.month, self.day, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}

/// Converts UTC civil date/times to Julian Day Numbers under one calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JulianDayEngine {
    calendar: CalendarSystem,
    max_fraction_digits: u32,
}

impl Default for JulianDayEngine {
    fn default() -> Self {
        Self::new(CalendarSystem::Gregorian)
    }
}

impl JulianDayEngine {
    pub const fn new(calendar: CalendarSystem) -> Self {
        Self {
            calendar,
            max_fraction_digits: DEFAULT_MAX_FRACTION_DIGITS,
        }
    }

    /// Bounds the fractional digits any produced value may be rendered with.
    pub const fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    #[inline]
    pub const fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    #[inline]
    pub const fn max_fraction_digits(&self) -> u32 {
        self.max_fraction_digits
    }

    // ── civil → Julian ────────────────────────────────────────────────

    /// Julian Day Number/Time of a UTC civil instant.
    ///
    /// `year` is astronomical. `second == 60` requires `has_leap_second`
    /// and is only accepted as `23:59:60`. `24:00:00` denotes the start of
    /// the next day.
    #[allow(clippy::too_many_arguments)]
    pub fn from_gregorian(
        &self,
        year: i64,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        nanosecond: i32,
        has_leap_second: bool,
    ) -> Result<JulianDayNumber, ConversionError> {
        let jd = build(
            self.calendar.epoch(),
            (year, month, day),
            (hour, minute, second, nanosecond),
            has_leap_second,
        )?
        .with_max_fraction_digits(self.max_fraction_digits);
        log::trace!(
            "{} {year}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{nanosecond:09} UTC -> {jd}",
            self.calendar
        );
        Ok(jd)
    }

    /// Julian Day Number/Time of a chrono UTC timestamp.
    pub fn from_chrono(&self, datetime: &DateTime<Utc>) -> Result<JulianDayNumber, ConversionError> {
        let naive = datetime.naive_utc();
        let (date, time) = (naive.date(), naive.time());
        let raw_nanos = time.nanosecond();
        let leap = raw_nanos >= NANOS_PER_SECOND as u32;
        let second = if leap { 60 } else { time.second() as i32 };
        let nanosecond = (raw_nanos % NANOS_PER_SECOND as u32) as i32;

        Ok(build(
            &Gregorian,
            (i64::from(date.year()), date.month() as i32, date.day() as i32),
            (time.hour() as i32, time.minute() as i32, second, nanosecond),
            leap,
        )?
        .with_max_fraction_digits(self.max_fraction_digits))
    }

    // ── Julian → civil ────────────────────────────────────────────────

    /// UTC civil fields of `jd` in this engine's calendar.
    pub fn to_gregorian_utc(&self, jd: &JulianDayNumber) -> Result<GregorianUtc, ConversionError> {
        civil_fields(self.calendar.epoch(), jd)
    }

    /// `jd` as a chrono UTC timestamp (proleptic Gregorian).
    pub fn to_chrono(&self, jd: &JulianDayNumber) -> Result<DateTime<Utc>, ConversionError> {
        let fields = civil_fields(&Gregorian, jd)?;
        let year = i32::try_from(fields.year)
            .map_err(|_| ConversionError::out_of_range("chrono year", fields.year))?;
        let date = NaiveDate::from_ymd_opt(year, fields.month as u32, fields.day as u32)
            .ok_or_else(|| ConversionError::out_of_range("chrono date", fields))?;
        let time = if fields.has_leap_second {
            NaiveTime::from_hms_nano_opt(23, 59, 59, NANOS_PER_SECOND as u32 + fields.nanosecond as u32)
        } else {
            NaiveTime::from_hms_nano_opt(
                fields.hour as u32,
                fields.minute as u32,
                fields.second as u32,
                fields.nanosecond as u32,
            )
        }
        .ok_or_else(|| ConversionError::out_of_range("chrono time", fields))?;
        Ok(NaiveDateTime::new(date, time).and_utc())
    }
}

fn build(
    epoch: &dyn CalendarEpoch,
    (year, month, day): (i64, i32, i32),
    (hour, minute, second, nanosecond): (i32, i32, i32, i32),
    has_leap_second: bool,
) -> Result<JulianDayNumber, ConversionError> {
    validator::validate_clock(hour, minute, second, nanosecond, has_leap_second)?;
    if has_leap_second && (hour, minute) != (23, 59) {
        return Err(ValidationError::new(
            "second",
            format!("{hour:02}:{minute:02}:{second:02}"),
            "a UTC leap second is only inserted at 23:59:60",
        )
        .into());
    }
    let count = epoch.day_count(year, month, day)?;

    let mut civil = count.julian_day_number;
    let mut net = validator::total_nanoseconds(hour, minute, second, nanosecond);
    if net >= NANOS_PER_DAY {
        civil += 1;
        net -= NANOS_PER_DAY;
    }
    Ok(JulianDayNumber::from_civil(
        BigInt::from(civil),
        net,
        has_leap_second,
        DEFAULT_MAX_FRACTION_DIGITS,
    ))
}

fn civil_fields(
    epoch: &dyn CalendarEpoch,
    jd: &JulianDayNumber,
) -> Result<GregorianUtc, ConversionError> {
    jd.validate()?;
    let civil = jd.civil_julian_day_number()?;
    let mut civil = civil
        .to_i64()
        .filter(|n| n.unsigned_abs() <= MAX_CIVIL_JULIAN_DAY_NUMBER.unsigned_abs())
        .ok_or_else(|| ConversionError::out_of_range("julian day number", &civil))?;
    let net = jd.net_gregorian_nanoseconds()?;

    let (hour, minute, second, nanosecond) = if jd.has_leap_second() {
        civil -= 1;
        (23, 59, 60, net as i32)
    } else {
        (
            (net / NANOS_PER_HOUR) as i32,
            (net % NANOS_PER_HOUR / NANOS_PER_MINUTE) as i32,
            (net % NANOS_PER_MINUTE / NANOS_PER_SECOND) as i32,
            (net % NANOS_PER_SECOND) as i32,
        )
    };

    let (year, month, day) = epoch.date_from_julian_day_number(civil).ok_or_else(|| {
        ValidationError::new("julian_day_number", civil, "outside the supported day range")
    })?;
    validator::validate_astronomical_year(year)?;
    Ok(GregorianUtc {
        year,
        month,
        day,
        hour,
        minute,
        second,
        nanosecond,
        has_leap_second: jd.has_leap_second(),
    })
}
