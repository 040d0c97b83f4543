// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day Number/Time and calendar year numbering.
//!
//! This crate converts civil dates and times to exact Julian Day
//! Numbers/Times and back, translates years between Astronomical and
//! BCE/CE numbering, keeps track of inserted leap seconds, and renders
//! date-times through reference-layout templates.
//!
//! # Core types
//!
//! - [`JulianDayEngine`]: civil UTC fields ⇄ [`JulianDayNumber`] under one calendar.
//! - [`JulianDayNumber`]: exact signed Julian Day value with its UTC time of day.
//! - [`DateValue`], [`TimeValue`], [`DateTimeValue`]: validated value objects.
//! - [`YearNumberConverter`] and [`convert_year`]: year numbering.
//! - [`FormatRenderer`]: reference-layout templating (see [`DEFAULT_FORMAT`]).
//! - [`Interval`]: span between two Julian Day Numbers.
//! - [`TimeZoneDefinition`]: fixed-offset zones.
//!
//! # Calendars
//!
//! Day-count rules are pluggable through [`CalendarEpoch`]. The following
//! are built in and selectable at runtime through [`CalendarSystem`]:
//!
//! | Marker | Calendar |
//! |--------|----------|
//! | [`Gregorian`] | proleptic Gregorian |
//! | [`Julian`] | proleptic Julian |
//! | [`RevisedJulian`] | Revised Julian (Milanković) |
//! | [`RevisedGoucherParker`] | Gregorian without the leap day of years ÷4000 |
//!
//! # Errors
//!
//! Every fallible operation returns a [`Result`]; [`Error`] lists the four
//! error kinds. Rejections are reported through the `log`
//! facade at `debug` level.
//!
//! # Example
//!
//! ```
//! use juliancal::{CalendarSystem, DateTimeValue, YearNumberType};
//!
//! let dt = DateTimeValue::new(
//!     Some(CalendarSystem::Gregorian),
//!     2021, YearNumberType::Ce, 3, 5, false,
//!     9, 7, 2, 0,
//!     "UTC", "2006-01-02 15:04:05", "",
//! )
//! .unwrap();
//! assert_eq!(dt.format().unwrap(), "2021-03-05 09:07:02");
//!
//! let jd = dt.julian_day_number().unwrap();
//! assert_eq!(jd.julian_day_no_time_str(5).unwrap().0, "2459278.87988");
//! ```

mod calendar;
mod date;
mod datetime;
mod engine;
mod epochs;
mod error;
mod format;
mod interval;
mod julian_day;
mod julian_day_ext;
mod rounding;
mod time;
pub mod validator;
mod year;
mod zone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{CalendarEpoch, CalendarSystem, DayCount};
pub use date::DateValue;
pub use datetime::DateTimeValue;
pub use engine::{GregorianUtc, JulianDayEngine};
pub use epochs::{Gregorian, Julian, RevisedGoucherParker, RevisedJulian};
pub use error::{ConversionError, Error, FormatError, InvalidArgument, Result, ValidationError};
pub use format::{FormatComponents, FormatRenderer, DEFAULT_FORMAT};
pub use interval::Interval;
pub use julian_day::{JulianDayNumber, Sign, DEFAULT_MAX_FRACTION_DIGITS};
pub use rounding::round_half_away_from_zero;
pub use time::TimeValue;
pub use year::{
    are_years_adjacent, compare_years, convert_year, Year, YearAdjacency, YearNumberConverter,
    YearNumberType, YearNumberingMode,
};
pub use zone::TimeZoneDefinition;
