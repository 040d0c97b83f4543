// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-offset time zones.
//!
//! A [`TimeZoneDefinition`] names a location and carries its UTC offset and
//! display abbreviation. [`TimeZoneDefinition::from_location`] resolves the
//! names below; IANA database names are not resolved.
//!
//! | Location | Offset | Abbreviation |
//! |----------|--------|--------------|
//! | `""`, `UTC`, `GMT` | 0 | `UTC` / `GMT` |
//! | `A`–`I`, `K`–`M` (`Alpha`…`Mike`) | +1 h … +12 h | letter |
//! | `N`–`Y` (`November`…`Yankee`) | −1 h … −12 h | letter |
//! | `Z` (`Zulu`) | 0 | `Z` |
//! | `±hh`, `±hhmm`, `±hh:mm`, optionally after `UTC`/`GMT` | as written | empty |

use crate::error::ValidationError;
use crate::validator;
use chrono::FixedOffset;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Military zone letters with their NATO names and offsets in hours.
const MILITARY_ZONES: [(char, &str, i32); 25] = [
    ('A', "alpha", 1),
    ('B', "bravo", 2),
    ('C', "charlie", 3),
    ('D', "delta", 4),
    ('E', "echo", 5),
    ('F', "foxtrot", 6),
    ('G', "golf", 7),
    ('H', "hotel", 8),
    ('I', "india", 9),
    ('K', "kilo", 10),
    ('L', "lima", 11),
    ('M', "mike", 12),
    ('N', "november", -1),
    ('O', "oscar", -2),
    ('P', "papa", -3),
    ('Q', "quebec", -4),
    ('R', "romeo", -5),
    ('S', "sierra", -6),
    ('T', "tango", -7),
    ('U', "uniform", -8),
    ('V', "victor", -9),
    ('W', "whiskey", -10),
    ('X', "xray", -11),
    ('Y', "yankee", -12),
    ('Z', "zulu", 0),
];

/// A named fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeZoneDefinition {
    location: String,
    abbreviation: String,
    utc_offset_seconds: i32,
}

impl Default for TimeZoneDefinition {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeZoneDefinition {
    pub fn utc() -> Self {
        Self {
            location: "UTC".into(),
            abbreviation: "UTC".into(),
            utc_offset_seconds: 0,
        }
    }

    /// A zone with an explicit offset (seconds east of Greenwich).
    pub fn fixed(
        location: impl Into<String>,
        abbreviation: impl Into<String>,
        utc_offset_seconds: i32,
    ) -> Result<Self, ValidationError> {
        validator::validate_utc_offset(utc_offset_seconds)?;
        Ok(Self {
            location: location.into(),
            abbreviation: abbreviation.into(),
            utc_offset_seconds,
        })
    }

    /// Resolves a location name or numeric offset.
    pub fn from_location(location: &str) -> Result<Self, ValidationError> {
        let trimmed = location.trim();
        let upper = trimmed.to_ascii_uppercase();

        match upper.as_str() {
            "" | "UTC" => return Ok(Self::utc()),
            "GMT" => return Self::fixed("GMT", "GMT", 0),
            _ => {}
        }

        let key: String = upper
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let military = MILITARY_ZONES.iter().find(|(letter, name, _)| {
            (upper.len() == 1 && upper.starts_with(*letter)) || (key.len() > 1 && key == *name)
        });
        if let Some((letter, _, hours)) = military {
            return Self::fixed(trimmed, letter.to_string(), hours * 3_600);
        }

        let numeric = upper
            .strip_prefix("UTC")
            .or_else(|| upper.strip_prefix("GMT"))
            .unwrap_or(&upper);
        let seconds = parse_numeric_offset(numeric).ok_or_else(|| {
            ValidationError::new("time_zone", trimmed, "unknown time zone location")
        })?;
        Self::fixed(trimmed, "", seconds)
    }

    /// The zone of a chrono fixed offset.
    pub fn from_fixed_offset(offset: FixedOffset) -> Self {
        Self {
            location: offset.to_string(),
            abbreviation: String::new(),
            utc_offset_seconds: offset.local_minus_utc(),
        }
    }

    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Display abbreviation; empty for purely numeric zones.
    #[inline]
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Seconds east of Greenwich.
    #[inline]
    pub const fn utc_offset_seconds(&self) -> i32 {
        self.utc_offset_seconds
    }

    #[inline]
    pub const fn is_utc(&self) -> bool {
        self.utc_offset_seconds == 0
    }

    /// The offset as chrono sees it, or `None` if it is a day or more.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validator::validate_utc_offset(self.utc_offset_seconds)
    }
}

/// `±hh`, `±hhmm` or `±hh:mm` in seconds.
fn parse_numeric_offset(text: &str) -> Option<i32> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let colon_ok = match rest.find(':') {
        None => true,
        Some(at) => at == 2 && rest.len() == 5,
    };
    if !colon_ok {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    Some(sign * (hours * 3_600 + minutes * 60))
}

impl fmt::Display for TimeZoneDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.abbreviation.is_empty() {
            return f.write_str(&self.abbreviation);
        }
        let sign = if self.utc_offset_seconds < 0 { '-' } else { '+' };
        let abs = self.utc_offset_seconds.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 3_600, abs % 3_600 / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("UTC", 0, "UTC")]
    #[case("", 0, "UTC")]
    #[case("gmt", 0, "GMT")]
    #[case("Z", 0, "Z")]
    #[case("A", 3_600, "A")]
    #[case("M", 12 * 3_600, "M")]
    #[case("N", -3_600, "N")]
    #[case("Y", -12 * 3_600, "Y")]
    #[case("Kilo", 10 * 3_600, "K")]
    #[case("X-ray", -11 * 3_600, "X")]
    #[case("+05", 5 * 3_600, "")]
    #[case("-0330", -(3 * 3_600 + 30 * 60), "")]
    #[case("+05:45", 5 * 3_600 + 45 * 60, "")]
    #[case("UTC-07:00", -7 * 3_600, "")]
    fn resolves_locations(#[case] location: &str, #[case] seconds: i32, #[case] abbr: &str) {
        let tz = TimeZoneDefinition::from_location(location).unwrap();
        assert_eq!(tz.utc_offset_seconds(), seconds);
        assert_eq!(tz.abbreviation(), abbr);
    }

    #[rstest]
    #[case("J")]
    #[case("Europe/Madrid")]
    #[case("+5")]
    #[case("+05:60")]
    #[case("+0:530")]
    #[case("+27")]
    fn rejects_unknown_locations(#[case] location: &str) {
        assert!(TimeZoneDefinition::from_location(location).is_err());
    }

    #[test]
    fn display_falls_back_to_numeric_offset() {
        let tz = TimeZoneDefinition::from_location("-0330").unwrap();
        assert_eq!(tz.to_string(), "-03:30");
        assert_eq!(TimeZoneDefinition::utc().to_string(), "UTC");
    }

    #[test]
    fn chrono_offsets() {
        let tz = TimeZoneDefinition::from_location("+02:00").unwrap();
        assert_eq!(tz.utc_offset(), FixedOffset::east_opt(7_200));
        let back = TimeZoneDefinition::from_fixed_offset(FixedOffset::west_opt(3_600).unwrap());
        assert_eq!(back.utc_offset_seconds(), -3_600);

        let wide = TimeZoneDefinition::fixed("far", "", 25 * 3_600).unwrap();
        assert_eq!(wide.utc_offset(), None);
        assert!(TimeZoneDefinition::fixed("too far", "", 27 * 3_600).is_err());
    }
}
