// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Year numbering: Astronomical, Common Era and Before Common Era.
//!
//! Astronomical numbering has a year 0 and negative years; CE/BCE numbering
//! has neither, 1 BCE is immediately followed by 1 CE:
//!
//! | Astronomical | CE/BCE |
//! |--------------|--------|
//! | 2 | 2 CE |
//! | 1 | 1 CE |
//! | 0 | 1 BCE |
//! | −1 | 2 BCE |
//! | −n | n+1 BCE |
//!
//! [`convert_year`] is the only place in the crate that applies this
//! rule; every other component converts through it.

use crate::calendar::{CalendarEpoch, CalendarSystem};
use crate::error::ValidationError;
use crate::validator;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How years are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum YearNumberingMode {
    /// Year 0 exists, earlier years are negative.
    #[default]
    Astronomical,
    /// Years are labelled BCE or CE and never zero.
    CommonEra,
}

/// The label attached to a year value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum YearNumberType {
    #[default]
    Astronomical,
    Bce,
    Ce,
}

impl YearNumberType {
    /// The numbering mode this label belongs to.
    pub const fn numbering_mode(self) -> YearNumberingMode {
        match self {
            YearNumberType::Astronomical => YearNumberingMode::Astronomical,
            YearNumberType::Bce | YearNumberType::Ce => YearNumberingMode::CommonEra,
        }
    }

    /// Suffix used when displaying a year.
    pub const fn suffix(self) -> &'static str {
        match self {
            YearNumberType::Astronomical => "",
            YearNumberType::Bce => " BCE",
            YearNumberType::Ce => " CE",
        }
    }
}

/// Converts `value`, labelled `from`, to the numbering mode `to`.
///
/// # Examples
///
/// ```
/// use juliancal::{convert_year, YearNumberType, YearNumberingMode};
///
/// assert_eq!(
///     convert_year(0, YearNumberType::Astronomical, YearNumberingMode::CommonEra),
///     Ok((1, YearNumberType::Bce))
/// );
/// assert_eq!(
///     convert_year(44, YearNumberType::Bce, YearNumberingMode::Astronomical),
///     Ok((-43, YearNumberType::Astronomical))
/// );
/// ```
pub fn convert_year(
    value: i64,
    from: YearNumberType,
    to: YearNumberingMode,
) -> Result<(i64, YearNumberType), ValidationError> {
    validator::validate_year_value(value, from)?;

    let astronomical = match from {
        YearNumberType::Astronomical | YearNumberType::Ce => value,
        YearNumberType::Bce => 1 - value,
    };

    Ok(match to {
        YearNumberingMode::Astronomical => (astronomical, YearNumberType::Astronomical),
        YearNumberingMode::CommonEra if astronomical >= 1 => (astronomical, YearNumberType::Ce),
        YearNumberingMode::CommonEra => (1 - astronomical, YearNumberType::Bce),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Year — a labelled year value
// ═══════════════════════════════════════════════════════════════════════════

/// A year value together with its numbering label.
///
/// Construction validates the pair; ordering and equality compare the
/// astronomical year, so `Year::astronomical(0) == Year::bce(1)`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Year {
    value: i64,
    kind: YearNumberType,
}

impl Year {
    pub fn new(value: i64, kind: YearNumberType) -> Result<Self, ValidationError> {
        validator::validate_year_value(value, kind)?;
        Ok(Self { value, kind })
    }

    pub fn astronomical(value: i64) -> Result<Self, ValidationError> {
        Self::new(value, YearNumberType::Astronomical)
    }

    pub fn ce(value: i64) -> Result<Self, ValidationError> {
        Self::new(value, YearNumberType::Ce)
    }

    pub fn bce(value: i64) -> Result<Self, ValidationError> {
        Self::new(value, YearNumberType::Bce)
    }

    /// The stored value, in its own numbering.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.value
    }

    #[inline]
    pub const fn kind(&self) -> YearNumberType {
        self.kind
    }

    #[inline]
    pub const fn numbering_mode(&self) -> YearNumberingMode {
        self.kind.numbering_mode()
    }

    /// The astronomical year number.
    pub fn to_astronomical(&self) -> i64 {
        match self.kind {
            YearNumberType::Astronomical | YearNumberType::Ce => self.value,
            YearNumberType::Bce => 1 - self.value,
        }
    }

    /// The same year expressed in `mode`.
    pub fn to_mode(&self, mode: YearNumberingMode) -> Result<Self, ValidationError> {
        let (value, kind) = convert_year(self.value, self.kind, mode)?;
        Ok(Self { value, kind })
    }

    /// Adjacency of `self` relative to `other`.
    pub fn adjacency(&self, other: &Year) -> YearAdjacency {
        are_years_adjacent(self.to_astronomical(), other.to_astronomical())
    }
}

impl PartialEq for Year {
    fn eq(&self, other: &Self) -> bool {
        self.to_astronomical() == other.to_astronomical()
    }
}

impl Eq for Year {}

impl PartialOrd for Year {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Year {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_astronomical().cmp(&other.to_astronomical())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.kind.suffix())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Adjacency and ordering
// ═══════════════════════════════════════════════════════════════════════════

/// Whether two years are consecutive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum YearAdjacency {
    /// The first year immediately follows the second (`a − b = +1`).
    Following,
    /// The first year immediately precedes the second (`a − b = −1`).
    Preceding,
    NotAdjacent,
}

impl YearAdjacency {
    #[inline]
    pub const fn is_adjacent(self) -> bool {
        !matches!(self, YearAdjacency::NotAdjacent)
    }

    /// `Some(+1)` or `Some(-1)` for adjacent years, `None` otherwise.
    pub const fn difference(self) -> Option<i8> {
        match self {
            YearAdjacency::Following => Some(1),
            YearAdjacency::Preceding => Some(-1),
            YearAdjacency::NotAdjacent => None,
        }
    }
}

/// Adjacency of two astronomical years.
pub fn are_years_adjacent(year_a: i64, year_b: i64) -> YearAdjacency {
    match year_a.checked_sub(year_b) {
        Some(1) => YearAdjacency::Following,
        Some(-1) => YearAdjacency::Preceding,
        _ => YearAdjacency::NotAdjacent,
    }
}

/// Orders two labelled years on the astronomical axis.
#[inline]
pub fn compare_years(a: &Year, b: &Year) -> Ordering {
    a.cmp(b)
}

// ═══════════════════════════════════════════════════════════════════════════
// YearNumberConverter — numbering bookkeeping over a calendar
// ═══════════════════════════════════════════════════════════════════════════

/// Day-count questions about labelled years, answered by a calendar.
///
/// The converter translates years to astronomical numbering and delegates
/// the leap-year rules to its [`CalendarSystem`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearNumberConverter {
    calendar: CalendarSystem,
}

impl YearNumberConverter {
    pub const fn new(calendar: CalendarSystem) -> Self {
        Self { calendar }
    }

    #[inline]
    pub const fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    pub fn convert_year(
        &self,
        value: i64,
        from: YearNumberType,
        to: YearNumberingMode,
    ) -> Result<(i64, YearNumberType), ValidationError> {
        convert_year(value, from, to)
    }

    pub fn are_years_adjacent(&self, a: &Year, b: &Year) -> YearAdjacency {
        a.adjacency(b)
    }

    pub fn compare_years(&self, a: &Year, b: &Year) -> Ordering {
        compare_years(a, b)
    }

    pub fn is_leap_year(&self, year: &Year) -> bool {
        self.calendar.is_leap_year(year.to_astronomical())
    }

    pub fn days_in_year(&self, year: &Year) -> i64 {
        self.calendar.days_in_year(year.to_astronomical())
    }

    /// 1-based day of the year.
    pub fn ordinal_day_number(
        &self,
        year: &Year,
        month: i32,
        day: i32,
    ) -> Result<i64, ValidationError> {
        let astronomical = year.to_astronomical();
        validator::validate_day(&self.calendar, astronomical, month, day)?;
        self.calendar
            .ordinal_day(astronomical, month, day)
            .ok_or_else(|| ValidationError::new("day", day, "not a day of this month"))
    }

    /// Days left in the year after the given date.
    pub fn remaining_days_in_year(
        &self,
        year: &Year,
        month: i32,
        day: i32,
    ) -> Result<i64, ValidationError> {
        let ordinal = self.ordinal_day_number(year, month, day)?;
        Ok(self.days_in_year(year) - ordinal)
    }
}
