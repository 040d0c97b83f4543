// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! J2000-relative and Modified Julian Date views of [`JulianDayNumber`].

use num::{BigInt, BigRational};
use num_traits::ToPrimitive;
use qtty::*;

use crate::error::ConversionError;
use crate::julian_day::JulianDayNumber;

/// Offset between JD and MJD: `MJD = JD − 2 400 000.5`.
const MJD_OFFSET_HALF_DAYS: i64 = 4_800_001;

impl JulianDayNumber {
    /// Julian day of the J2000.0 epoch.
    pub const J2000_DAY_NUMBER: i64 = 2_451_545;

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// One Julian millennium expressed in days.
    pub const JULIAN_MILLENNIUM: Days = Days::new(365_250.0);

    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub fn j2000() -> Self {
        Self::from_day_number(Self::J2000_DAY_NUMBER)
    }

    /// Exact days elapsed since J2000.0 (negative before it).
    pub fn days_since_j2000(&self) -> Result<BigRational, ConversionError> {
        Ok(self.to_rational()? - BigRational::from_integer(BigInt::from(Self::J2000_DAY_NUMBER)))
    }

    fn days_since_j2000_f64(&self) -> Result<f64, ConversionError> {
        let days = self.days_since_j2000()?;
        days.to_f64()
            .filter(|d| d.is_finite())
            .ok_or_else(|| ConversionError::out_of_range("days since J2000", &days))
    }

    /// Julian millennia since J2000.0.
    #[inline]
    pub fn julian_millennias(&self) -> Result<Millennia, ConversionError> {
        Ok(Millennia::new(
            self.days_since_j2000_f64()? / Self::JULIAN_MILLENNIUM.value(),
        ))
    }

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Result<Centuries, ConversionError> {
        Ok(Centuries::new(
            self.days_since_j2000_f64()? / Self::JULIAN_CENTURY.value(),
        ))
    }

    /// Julian years since J2000.0.
    #[inline]
    pub fn julian_years(&self) -> Result<JulianYears, ConversionError> {
        Ok(JulianYears::new(
            self.days_since_j2000_f64()? / Self::JULIAN_YEAR.value(),
        ))
    }

    /// Exact Modified Julian Date.
    pub fn modified_julian_date(&self) -> Result<BigRational, ConversionError> {
        Ok(self.to_rational()? - mjd_offset())
    }

    /// Instant of an exact Modified Julian Date.
    pub fn from_modified_julian_date(
        mjd: &BigRational,
        has_leap_second: bool,
    ) -> Result<Self, ConversionError> {
        Self::from_rational(&(mjd + mjd_offset()), has_leap_second)
    }

    /// Instant `centuries` Julian centuries after J2000.0.
    pub fn from_julian_centuries(centuries: Centuries) -> Result<Self, ConversionError> {
        let days = Days::new(centuries.value() * Self::JULIAN_CENTURY.value());
        Self::from_f64(Self::J2000_DAY_NUMBER as f64 + days.value(), false)
    }
}

fn mjd_offset() -> BigRational {
    BigRational::new(BigInt::from(MJD_OFFSET_HALF_DAYS), BigInt::from(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::JulianDayEngine;
    use approx::assert_abs_diff_eq;

    #[test]
    fn j2000_is_noon_on_new_year_2000() {
        let engine = JulianDayEngine::default();
        let civil = engine.from_gregorian(2000, 1, 1, 12, 0, 0, 0, false).unwrap();
        assert_eq!(JulianDayNumber::j2000(), civil);
        assert_abs_diff_eq!(civil.julian_centuries().unwrap().value(), 0.0);
    }

    #[test]
    fn modified_julian_date_starts_at_midnight() {
        let engine = JulianDayEngine::default();
        let epoch = engine.from_gregorian(1858, 11, 17, 0, 0, 0, 0, false).unwrap();
        assert_eq!(
            epoch.modified_julian_date().unwrap(),
            BigRational::from_integer(0.into())
        );

        let mjd = BigRational::from_integer(51_544.into());
        let jd = JulianDayNumber::from_modified_julian_date(&mjd, false).unwrap();
        assert_eq!(engine.to_gregorian_utc(&jd).unwrap().to_string(), "2000-01-01T00:00:00.000000000Z");
    }

    #[test]
    fn julian_periods_since_j2000() {
        let jd = JulianDayNumber::from_day_number(JulianDayNumber::J2000_DAY_NUMBER + 36_525);
        assert_abs_diff_eq!(jd.julian_centuries().unwrap().value(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(jd.julian_years().unwrap().value(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(jd.julian_millennias().unwrap().value(), 0.1, epsilon = 1e-12);

        let back = JulianDayNumber::from_julian_centuries(Centuries::new(1.0)).unwrap();
        assert_eq!(back, jd);
    }

    #[test]
    fn uninitialized_has_no_epoch_offsets() {
        let jd = JulianDayNumber::default();
        assert_eq!(jd.days_since_j2000(), Err(ConversionError::NotInitialized));
        assert!(jd.julian_centuries().is_err());
    }
}
