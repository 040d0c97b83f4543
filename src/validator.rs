// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Invariant checks shared by every value object.
//!
//! Each invariant is written exactly once here; [`DateValue`], [`TimeValue`],
//! [`DateTimeValue`] and the format renderer call into this module instead
//! of re-checking ranges inline.
//!
//! [`DateValue`]: crate::DateValue
//! [`TimeValue`]: crate::TimeValue
//! [`DateTimeValue`]: crate::DateTimeValue

use crate::calendar::{CalendarEpoch, CalendarSystem};
use crate::error::ValidationError;
use crate::year::{YearNumberType, YearNumberingMode};

pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;

/// Smallest supported astronomical year.
pub const MIN_ASTRONOMICAL_YEAR: i64 = -1_000_000_000_000;
/// Largest supported astronomical year.
pub const MAX_ASTRONOMICAL_YEAR: i64 = 1_000_000_000_000;

/// Largest civil Julian Day Number magnitude handed to the inverse day-count
/// rule.
///
/// Covers the supported year range in every calendar with margin while
/// keeping the mean-year estimate inside `i64`.
pub const MAX_CIVIL_JULIAN_DAY_NUMBER: i64 = 400_000_000_000_000;

/// Largest accepted UTC offset magnitude (26 hours).
pub const MAX_UTC_OFFSET_SECONDS: i32 = 26 * 3_600;

pub fn validate_astronomical_year(year: i64) -> Result<(), ValidationError> {
    if (MIN_ASTRONOMICAL_YEAR..=MAX_ASTRONOMICAL_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "year",
            year,
            "outside the supported astronomical year range",
        ))
    }
}

pub fn validate_civil_julian_day_number(jdn: i64) -> Result<(), ValidationError> {
    if jdn.unsigned_abs() <= MAX_CIVIL_JULIAN_DAY_NUMBER.unsigned_abs() {
        Ok(())
    } else {
        Err(ValidationError::new(
            "julian_day_number",
            jdn,
            "outside the supported day range",
        ))
    }
}

/// Numbering mode and year type must describe the same convention.
pub fn validate_numbering(
    mode: YearNumberingMode,
    kind: YearNumberType,
) -> Result<(), ValidationError> {
    let consistent = match mode {
        YearNumberingMode::Astronomical => kind == YearNumberType::Astronomical,
        YearNumberingMode::CommonEra => matches!(kind, YearNumberType::Bce | YearNumberType::Ce),
    };
    if consistent {
        Ok(())
    } else {
        Err(ValidationError::new(
            "year_type",
            format!("{kind:?} under {mode:?}"),
            "year type does not match numbering mode",
        ))
    }
}

/// A BCE or CE year value starts at 1; astronomical years may be any
/// supported value.
pub fn validate_year_value(value: i64, kind: YearNumberType) -> Result<(), ValidationError> {
    match kind {
        YearNumberType::Astronomical => validate_astronomical_year(value),
        YearNumberType::Bce | YearNumberType::Ce => {
            let max = if kind == YearNumberType::Bce {
                1 - MIN_ASTRONOMICAL_YEAR
            } else {
                MAX_ASTRONOMICAL_YEAR
            };
            if value < 1 {
                Err(ValidationError::new(
                    "year",
                    value,
                    "BCE/CE years start at 1, there is no year 0",
                ))
            } else if value > max {
                Err(ValidationError::new(
                    "year",
                    value,
                    "outside the supported year range",
                ))
            } else {
                Ok(())
            }
        }
    }
}

pub fn validate_month(month: i32) -> Result<(), ValidationError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ValidationError::new("month", month, "must be within 1..=12"))
    }
}

/// `(year, month, day)` must exist under `calendar`.
pub fn validate_day(
    calendar: &dyn CalendarEpoch,
    year: i64,
    month: i32,
    day: i32,
) -> Result<(), ValidationError> {
    validate_month(month)?;
    if calendar.is_valid_date(year, month, day) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "day",
            day,
            "not a day of this month in the selected calendar",
        ))
    }
}

pub fn validate_calendar(
    calendar: Option<CalendarSystem>,
) -> Result<CalendarSystem, ValidationError> {
    calendar.ok_or_else(|| ValidationError::new("calendar", "none", "calendar epoch is missing"))
}

/// Clock fields of a time of day.
///
/// `second == 60` is accepted only together with `has_leap_second`, and the
/// flag may only be set for that second. `hour == 24` is accepted only as
/// the end-of-day instant `24:00:00.000000000`.
pub fn validate_clock(
    hour: i32,
    minute: i32,
    second: i32,
    nanosecond: i32,
    has_leap_second: bool,
) -> Result<(), ValidationError> {
    if !(0..=24).contains(&hour) {
        return Err(ValidationError::new("hour", hour, "must be within 0..=24"));
    }
    if !(0..=59).contains(&minute) {
        return Err(ValidationError::new("minute", minute, "must be within 0..=59"));
    }
    if !(0..=60).contains(&second) {
        return Err(ValidationError::new("second", second, "must be within 0..=60"));
    }
    if !(0..NANOS_PER_SECOND).contains(&i64::from(nanosecond)) {
        return Err(ValidationError::new(
            "nanosecond",
            nanosecond,
            "must be within 0..=999999999",
        ));
    }
    if second == 60 && !has_leap_second {
        return Err(ValidationError::new(
            "second",
            second,
            "second 60 requires a leap second",
        ));
    }
    if second != 60 && has_leap_second {
        return Err(ValidationError::new(
            "has_leap_second",
            has_leap_second,
            "only second 60 can be a leap second",
        ));
    }
    if hour == 24 && (minute != 0 || second != 0 || nanosecond != 0) {
        return Err(ValidationError::new(
            "hour",
            hour,
            "hour 24 is only valid as 24:00:00.000000000",
        ));
    }
    Ok(())
}

/// Nanoseconds since midnight for validated clock fields.
#[inline]
pub const fn total_nanoseconds(hour: i32, minute: i32, second: i32, nanosecond: i32) -> i64 {
    hour as i64 * NANOS_PER_HOUR
        + minute as i64 * NANOS_PER_MINUTE
        + second as i64 * NANOS_PER_SECOND
        + nanosecond as i64
}

pub fn validate_utc_offset(seconds: i32) -> Result<(), ValidationError> {
    if (-MAX_UTC_OFFSET_SECONDS..=MAX_UTC_OFFSET_SECONDS).contains(&seconds) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "utc_offset",
            seconds,
            "offset magnitude exceeds 26 hours",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_pairs() {
        use YearNumberType as T;
        use YearNumberingMode as M;
        assert!(validate_numbering(M::Astronomical, T::Astronomical).is_ok());
        assert!(validate_numbering(M::CommonEra, T::Bce).is_ok());
        assert!(validate_numbering(M::CommonEra, T::Ce).is_ok());
        assert!(validate_numbering(M::Astronomical, T::Ce).is_err());
        assert!(validate_numbering(M::CommonEra, T::Astronomical).is_err());
    }

    #[test]
    fn common_era_years_have_no_zero() {
        assert!(validate_year_value(0, YearNumberType::Astronomical).is_ok());
        let err = validate_year_value(0, YearNumberType::Bce).unwrap_err();
        assert_eq!(err.field, "year");
        assert!(validate_year_value(1, YearNumberType::Ce).is_ok());
    }

    #[test]
    fn leap_second_requires_flag() {
        assert!(validate_clock(23, 59, 60, 0, true).is_ok());
        let err = validate_clock(23, 59, 60, 0, false).unwrap_err();
        assert_eq!(err.field, "second");
        assert_eq!(err.value, "60");
        let err = validate_clock(23, 59, 59, 0, true).unwrap_err();
        assert_eq!(err.field, "has_leap_second");
    }

    #[test]
    fn clock_ranges() {
        assert!(validate_clock(24, 0, 0, 0, false).is_ok());
        assert_eq!(validate_clock(24, 0, 1, 0, false).unwrap_err().field, "hour");
        assert_eq!(validate_clock(25, 0, 0, 0, false).unwrap_err().field, "hour");
        assert_eq!(validate_clock(1, 60, 0, 0, false).unwrap_err().field, "minute");
        assert_eq!(validate_clock(1, 1, -1, 0, false).unwrap_err().field, "second");
        assert_eq!(
            validate_clock(1, 1, 1, 1_000_000_000, false).unwrap_err().field,
            "nanosecond"
        );
    }

    #[test]
    fn civil_day_range_is_symmetric() {
        assert!(validate_civil_julian_day_number(MAX_CIVIL_JULIAN_DAY_NUMBER).is_ok());
        assert!(validate_civil_julian_day_number(-MAX_CIVIL_JULIAN_DAY_NUMBER).is_ok());
        let err = validate_civil_julian_day_number(MAX_CIVIL_JULIAN_DAY_NUMBER + 1).unwrap_err();
        assert_eq!(err.field, "julian_day_number");
        assert!(validate_civil_julian_day_number(i64::MIN).is_err());
        assert!(validate_civil_julian_day_number(i64::MAX).is_err());
    }

    #[test]
    fn day_must_exist_in_calendar() {
        let greg = CalendarSystem::Gregorian;
        let jul = CalendarSystem::Julian;
        assert!(validate_day(&greg, 1900, 2, 29).is_err());
        assert!(validate_day(&jul, 1900, 2, 29).is_ok());
        assert_eq!(validate_day(&greg, 1900, 0, 1).unwrap_err().field, "month");
    }

    #[test]
    fn total_nanoseconds_sums_fields() {
        assert_eq!(total_nanoseconds(0, 0, 0, 0), 0);
        assert_eq!(total_nanoseconds(24, 0, 0, 0), NANOS_PER_DAY);
        assert_eq!(
            total_nanoseconds(23, 59, 60, 5),
            NANOS_PER_DAY + 5
        );
    }

    #[test]
    fn missing_calendar_is_rejected() {
        assert_eq!(validate_calendar(None).unwrap_err().field, "calendar");
        assert_eq!(
            validate_calendar(Some(CalendarSystem::Julian)),
            Ok(CalendarSystem::Julian)
        );
    }
}
