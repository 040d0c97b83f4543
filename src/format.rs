// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reference-layout templating.
//!
//! A template is written as the reference instant
//! `Monday, January 2 15:04:05.000000000 2006 -0700 MST` would look. The
//! renderer recognises the following tokens, class by class in this order:
//!
//! | Class | Tokens (first match wins) |
//! |-------|---------------------------|
//! | weekday | `Monday`, `Mon` |
//! | year | `2006`, `06` |
//! | month | `January`, `Jan`, `01`, `1` |
//! | day | `002` (day of year), `_2` (space padded), `02`, `2` |
//! | hour | `15`, `03`, `3` (12-hour) |
//! | minute | `04`, `4` |
//! | second | `05`, `5` |
//! | fraction | `.` or `,` then a run of `0`s (padded) or `9`s (trimmed) |
//! | AM/PM | `PM`, `pm` |
//! | offset | `-07:00:00`, `-070000`, `-07:00`, `-0700`, `-07`, and the same with `Z` (`Z` at UTC) |
//! | zone | `MST` |
//!
//! Each class replaces only the **first** occurrence of its first matching
//! literal, wherever that literal sits in the template. Other literals of
//! the same class are then plain text: `Jan 01` renders as `Mar 01` and
//! `06 2006` as `06 2021`. Single-digit tokens (`1`, `2`, `3`, `4`, `5`) only match where
//! they do not touch another digit, so the `1` of `15` is never a month.
//! Matches are swapped for private-use placeholder characters before the
//! next class is searched, so a later token never matches text produced by
//! an earlier one. Everything else is copied verbatim.
//!
//! Every component is checked before anything is rendered.

use crate::error::FormatError;
use crate::validator::MAX_UTC_OFFSET_SECONDS;

/// Template used when none is given.
pub const DEFAULT_FORMAT: &str = "2006-01-02 15:04:05.000000000 -0700 MST";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Everything a template can print.
///
/// `year` is in the numbering the caller wants to show; `weekday` counts
/// from Sunday (`0`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatComponents {
    pub year: i64,
    pub month: i32,
    pub day: i32,
    pub ordinal_day: i32,
    pub weekday: i32,
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
    pub nanosecond: i32,
    pub utc_offset_seconds: i32,
    pub zone_abbreviation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetStyle {
    Hours,
    HoursMinutes { colon: bool },
    HoursMinutesSeconds { colon: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    LongWeekday,
    ShortWeekday,
    LongYear,
    ShortYear,
    LongMonth,
    ShortMonth,
    ZeroMonth,
    NumMonth,
    OrdinalDay,
    SpaceDay,
    ZeroDay,
    NumDay,
    Hour24,
    ZeroHour12,
    Hour12,
    ZeroMinute,
    Minute,
    ZeroSecond,
    Second,
    Fraction {
        separator: char,
        digits: usize,
        trim: bool,
    },
    UpperPm,
    LowerPm,
    Offset {
        style: OffsetStyle,
        utc_as_z: bool,
    },
    Zone,
}

enum TokenClass {
    Literals(&'static [(&'static str, Token)]),
    Fraction,
}

const fn offset(style: OffsetStyle, utc_as_z: bool) -> Token {
    Token::Offset { style, utc_as_z }
}

const TOKEN_CLASSES: [TokenClass; 11] = [
    TokenClass::Literals(&[("Monday", Token::LongWeekday), ("Mon", Token::ShortWeekday)]),
    TokenClass::Literals(&[("2006", Token::LongYear), ("06", Token::ShortYear)]),
    TokenClass::Literals(&[
        ("January", Token::LongMonth),
        ("Jan", Token::ShortMonth),
        ("01", Token::ZeroMonth),
        ("1", Token::NumMonth),
    ]),
    TokenClass::Literals(&[
        ("002", Token::OrdinalDay),
        ("_2", Token::SpaceDay),
        ("02", Token::ZeroDay),
        ("2", Token::NumDay),
    ]),
    TokenClass::Literals(&[
        ("15", Token::Hour24),
        ("03", Token::ZeroHour12),
        ("3", Token::Hour12),
    ]),
    TokenClass::Literals(&[("04", Token::ZeroMinute), ("4", Token::Minute)]),
    TokenClass::Literals(&[("05", Token::ZeroSecond), ("5", Token::Second)]),
    TokenClass::Fraction,
    TokenClass::Literals(&[("PM", Token::UpperPm), ("pm", Token::LowerPm)]),
    TokenClass::Literals(&[
        ("-07:00:00", offset(OffsetStyle::HoursMinutesSeconds { colon: true }, false)),
        ("-070000", offset(OffsetStyle::HoursMinutesSeconds { colon: false }, false)),
        ("-07:00", offset(OffsetStyle::HoursMinutes { colon: true }, false)),
        ("-0700", offset(OffsetStyle::HoursMinutes { colon: false }, false)),
        ("-07", offset(OffsetStyle::Hours, false)),
        ("Z07:00:00", offset(OffsetStyle::HoursMinutesSeconds { colon: true }, true)),
        ("Z070000", offset(OffsetStyle::HoursMinutesSeconds { colon: false }, true)),
        ("Z07:00", offset(OffsetStyle::HoursMinutes { colon: true }, true)),
        ("Z0700", offset(OffsetStyle::HoursMinutes { colon: false }, true)),
        ("Z07", offset(OffsetStyle::Hours, true)),
    ]),
    TokenClass::Literals(&[("MST", Token::Zone)]),
];

/// A token located in a template.
#[derive(Debug)]
struct Placed {
    placeholder: char,
    literal: String,
    token: Token,
}

/// Renders [`FormatComponents`] through a reference-layout template.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatRenderer;

impl FormatRenderer {
    /// Renders `components` through `template`.
    ///
    /// # Examples
    ///
    /// ```
    /// use juliancal::{FormatComponents, FormatRenderer};
    ///
    /// let c = FormatComponents {
    ///     year: 2021, month: 3, day: 5, hour: 9, minute: 7, second: 2,
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     FormatRenderer::render("2006-01-02 15:04:05", &c).unwrap(),
    ///     "2021-03-05 09:07:02"
    /// );
    /// ```
    pub fn render(template: &str, components: &FormatComponents) -> Result<String, FormatError> {
        let (skeleton, placed) = tokenize(template);
        for p in &placed {
            check(p, components)?;
        }

        let mut out = String::with_capacity(skeleton.len() + 16);
        for ch in skeleton.chars() {
            match placed.iter().find(|p| p.placeholder == ch) {
                Some(p) => out.push_str(&render_token(p.token, components)),
                None => out.push(ch),
            }
        }
        log::trace!("rendered {template:?} as {out:?}");
        Ok(out)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tokenisation
// ═══════════════════════════════════════════════════════════════════════════

fn tokenize(template: &str) -> (String, Vec<Placed>) {
    let mut placeholders = ('\u{E000}'..='\u{F8FF}').filter(|c| !template.contains(*c));
    let mut skeleton = template.to_owned();
    let mut placed = Vec::new();

    for class in &TOKEN_CLASSES {
        let hit = match class {
            TokenClass::Literals(literals) => literals.iter().find_map(|(literal, token)| {
                find_literal(&skeleton, literal).map(|at| (at, literal.len(), *token))
            }),
            TokenClass::Fraction => find_fraction(&skeleton),
        };
        let Some((at, len, token)) = hit else {
            continue;
        };
        let Some(placeholder) = placeholders.next() else {
            break;
        };
        let literal = skeleton[at..at + len].to_owned();
        let mut buf = [0u8; 4];
        skeleton.replace_range(at..at + len, placeholder.encode_utf8(&mut buf));
        placed.push(Placed {
            placeholder,
            literal,
            token,
        });
    }
    (skeleton, placed)
}

fn find_literal(text: &str, literal: &str) -> Option<usize> {
    if literal.len() > 1 {
        return text.find(literal);
    }
    let bytes = text.as_bytes();
    let is_digit_at = |i: Option<usize>| i.and_then(|i| bytes.get(i)).is_some_and(u8::is_ascii_digit);
    text.match_indices(literal)
        .map(|(at, _)| at)
        .find(|&at| !is_digit_at(at.checked_sub(1)) && !is_digit_at(Some(at + 1)))
}

/// First `.000…`/`,999…` run that is not followed by another digit.
fn find_fraction(text: &str) -> Option<(usize, usize, Token)> {
    let bytes = text.as_bytes();
    for (at, &separator) in bytes.iter().enumerate() {
        if separator != b'.' && separator != b',' {
            continue;
        }
        let digit = match bytes.get(at + 1) {
            Some(&d @ (b'0' | b'9')) => d,
            _ => continue,
        };
        let mut end = at + 1;
        while bytes.get(end) == Some(&digit) {
            end += 1;
        }
        if bytes.get(end).is_some_and(u8::is_ascii_digit) {
            continue;
        }
        return Some((
            at,
            end - at,
            Token::Fraction {
                separator: separator as char,
                digits: end - at - 1,
                trim: digit == b'9',
            },
        ));
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Domain checks
// ═══════════════════════════════════════════════════════════════════════════

fn check(placed: &Placed, c: &FormatComponents) -> Result<(), FormatError> {
    let in_range = |field: &'static str, value: i64, lo: i64, hi: i64| {
        if (lo..=hi).contains(&value) {
            Ok(())
        } else {
            let err = FormatError {
                token: placed.literal.clone(),
                field,
                value,
            };
            log::debug!("format rejected: {err}");
            Err(err)
        }
    };
    let offset_limit = i64::from(MAX_UTC_OFFSET_SECONDS);

    match placed.token {
        Token::LongWeekday | Token::ShortWeekday => in_range("weekday", c.weekday.into(), 0, 6),
        Token::LongYear | Token::ShortYear => Ok(()),
        Token::LongMonth | Token::ShortMonth | Token::ZeroMonth | Token::NumMonth => {
            in_range("month", c.month.into(), 1, 12)
        }
        Token::OrdinalDay => in_range("ordinal_day", c.ordinal_day.into(), 1, 366),
        Token::SpaceDay | Token::ZeroDay | Token::NumDay => in_range("day", c.day.into(), 1, 31),
        Token::Hour24 => in_range("hour", c.hour.into(), 0, 24),
        Token::ZeroHour12 | Token::Hour12 | Token::UpperPm | Token::LowerPm => {
            in_range("hour", c.hour.into(), 0, 23)
        }
        Token::ZeroMinute | Token::Minute => in_range("minute", c.minute.into(), 0, 59),
        Token::ZeroSecond | Token::Second => in_range("second", c.second.into(), 0, 60),
        Token::Fraction { .. } => in_range("nanosecond", c.nanosecond.into(), 0, 999_999_999),
        Token::Offset { .. } | Token::Zone => in_range(
            "utc_offset",
            c.utc_offset_seconds.into(),
            -offset_limit,
            offset_limit,
        ),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════

fn render_token(token: Token, c: &FormatComponents) -> String {
    let hour12 = match c.hour % 12 {
        0 => 12,
        h => h,
    };
    match token {
        Token::LongWeekday => WEEKDAY_NAMES[c.weekday as usize].to_owned(),
        Token::ShortWeekday => WEEKDAY_NAMES[c.weekday as usize][..3].to_owned(),
        Token::LongYear if c.year < 0 => format!("-{:04}", c.year.unsigned_abs()),
        Token::LongYear => format!("{:04}", c.year),
        Token::ShortYear => format!("{:02}", c.year.rem_euclid(100)),
        Token::LongMonth => MONTH_NAMES[(c.month - 1) as usize].to_owned(),
        Token::ShortMonth => MONTH_NAMES[(c.month - 1) as usize][..3].to_owned(),
        Token::ZeroMonth => format!("{:02}", c.month),
        Token::NumMonth => c.month.to_string(),
        Token::OrdinalDay => format!("{:03}", c.ordinal_day),
        Token::SpaceDay => format!("{:>2}", c.day),
        Token::ZeroDay => format!("{:02}", c.day),
        Token::NumDay => c.day.to_string(),
        Token::Hour24 => format!("{:02}", c.hour),
        Token::ZeroHour12 => format!("{hour12:02}"),
        Token::Hour12 => hour12.to_string(),
        Token::ZeroMinute => format!("{:02}", c.minute),
        Token::Minute => c.minute.to_string(),
        Token::ZeroSecond => format!("{:02}", c.second),
        Token::Second => c.second.to_string(),
        Token::Fraction {
            separator,
            digits,
            trim,
        } => render_fraction(c.nanosecond, separator, digits, trim),
        Token::UpperPm => (if c.hour < 12 { "AM" } else { "PM" }).to_owned(),
        Token::LowerPm => (if c.hour < 12 { "am" } else { "pm" }).to_owned(),
        Token::Offset { style, utc_as_z } => {
            if utc_as_z && c.utc_offset_seconds == 0 {
                "Z".to_owned()
            } else {
                render_offset(c.utc_offset_seconds, style)
            }
        }
        Token::Zone if c.zone_abbreviation.is_empty() => render_offset(
            c.utc_offset_seconds,
            OffsetStyle::HoursMinutes { colon: false },
        ),
        Token::Zone => c.zone_abbreviation.clone(),
    }
}

fn render_fraction(nanosecond: i32, separator: char, digits: usize, trim: bool) -> String {
    let mut text = format!("{nanosecond:09}");
    if digits > text.len() {
        text.push_str(&"0".repeat(digits - text.len()));
    }
    text.truncate(digits);
    if trim {
        let kept = text.trim_end_matches('0');
        if kept.is_empty() {
            return String::new();
        }
        return format!("{separator}{kept}");
    }
    format!("{separator}{text}")
}

fn render_offset(seconds: i32, style: OffsetStyle) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (h, m, s) = (abs / 3_600, abs % 3_600 / 60, abs % 60);
    match style {
        OffsetStyle::Hours => format!("{sign}{h:02}"),
        OffsetStyle::HoursMinutes { colon: true } => format!("{sign}{h:02}:{m:02}"),
        OffsetStyle::HoursMinutes { colon: false } => format!("{sign}{h:02}{m:02}"),
        OffsetStyle::HoursMinutesSeconds { colon: true } => format!("{sign}{h:02}:{m:02}:{s:02}"),
        OffsetStyle::HoursMinutesSeconds { colon: false } => format!("{sign}{h:02}{m:02}{s:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn components() -> FormatComponents {
        FormatComponents {
            year: 2021,
            month: 3,
            day: 5,
            ordinal_day: 64,
            weekday: 5,
            hour: 9,
            minute: 7,
            second: 2,
            nanosecond: 123_450_000,
            utc_offset_seconds: -7 * 3_600,
            zone_abbreviation: "MST".into(),
        }
    }

    #[rstest]
    #[case("2006-01-02 15:04:05", "2021-03-05 09:07:02")]
    #[case(DEFAULT_FORMAT, "2021-03-05 09:07:02.123450000 -0700 MST")]
    #[case("Monday, January _2 2006", "Friday, March  5 2021")]
    #[case("Mon Jan 2 3:4:5 PM", "Fri Mar 5 9:7:2 AM")]
    #[case("02/01/06 03pm", "05/03/21 09am")]
    #[case("2006.002", "2021.064")]
    #[case("15:04:05.999", "09:07:02.123")]
    #[case("15:04:05,000000", "09:07:02,123450")]
    #[case("-07:00:00|Z07:00", "-07:00:00|Z07:00")]
    #[case("Z07:00:00", "-07:00:00")]
    #[case("20060102150405", "20210305090702")]
    #[case("2006-1-2", "2021-3-5")]
    #[case("-07", "-07")]
    #[case("year 2006!", "year 2021!")]
    #[case("no tokens here", "no tokens here")]
    fn renders_reference_layouts(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(FormatRenderer::render(template, &components()).unwrap(), expected);
    }

    #[test]
    fn only_first_occurrence_of_a_class_is_replaced() {
        assert_eq!(
            FormatRenderer::render("2006 2006", &components()).unwrap(),
            "2021 2006"
        );
    }

    #[rstest]
    #[case("Jan 01", "Mar 01")]
    #[case("January 01", "March 01")]
    #[case("01 Jan", "01 Mar")]
    #[case("2006 06", "2021 06")]
    #[case("06 2006", "06 2021")]
    #[case("05 5", "02 5")]
    fn one_literal_per_class(#[case] template: &str, #[case] expected: &str) {
        assert_eq!(FormatRenderer::render(template, &components()).unwrap(), expected);
    }

    #[test]
    fn nine_form_drops_empty_fraction() {
        let c = FormatComponents {
            nanosecond: 0,
            ..components()
        };
        assert_eq!(FormatRenderer::render("15:04:05.999", &c).unwrap(), "09:07:02");
        assert_eq!(render_fraction(500_000_000, '.', 3, true), ".5");
        assert_eq!(render_fraction(7, '.', 12, false), ".000000007000");
    }

    #[test]
    fn utc_offsets_render_z_only_for_z_tokens() {
        let c = FormatComponents {
            utc_offset_seconds: 0,
            zone_abbreviation: String::new(),
            ..components()
        };
        assert_eq!(FormatRenderer::render("Z07:00", &c).unwrap(), "Z");
        assert_eq!(
            FormatRenderer::render("-0700 MST", &c).unwrap(),
            "+0000 +0000"
        );
        let c = FormatComponents {
            utc_offset_seconds: 5 * 3_600 + 45 * 60,
            ..c
        };
        assert_eq!(FormatRenderer::render("Z0700", &c).unwrap(), "+0545");
    }

    #[test]
    fn afternoon_and_midnight_in_twelve_hour_clock() {
        let pm = FormatComponents {
            hour: 15,
            ..components()
        };
        assert_eq!(FormatRenderer::render("3:04 PM", &pm).unwrap(), "3:07 PM");
        let midnight = FormatComponents {
            hour: 0,
            ..components()
        };
        assert_eq!(FormatRenderer::render("03 pm", &midnight).unwrap(), "12 am");
    }

    #[test]
    fn negative_and_short_years() {
        let c = FormatComponents {
            year: -43,
            ..components()
        };
        assert_eq!(FormatRenderer::render("2006", &c).unwrap(), "-0043");
        let c = FormatComponents {
            year: -1,
            ..components()
        };
        assert_eq!(FormatRenderer::render("06", &c).unwrap(), "99");
    }

    #[test]
    fn out_of_domain_components_fail_before_rendering() {
        let c = FormatComponents {
            month: 13,
            ..components()
        };
        let err = FormatRenderer::render("Jan", &c).unwrap_err();
        assert_eq!(err.token, "Jan");
        assert_eq!(err.field, "month");
        assert_eq!(err.value, 13);
        // A template that never prints the month still renders.
        assert!(FormatRenderer::render("2006", &c).is_ok());

        let c = FormatComponents {
            hour: 24,
            minute: 0,
            second: 0,
            ..components()
        };
        assert!(FormatRenderer::render("15:04", &c).is_ok());
        assert_eq!(FormatRenderer::render("3 PM", &c).unwrap_err().field, "hour");
    }

    #[test]
    fn placeholders_avoid_characters_in_the_template() {
        let template = "\u{E000} 2006";
        assert_eq!(
            FormatRenderer::render(template, &components()).unwrap(),
            "\u{E000} 2021"
        );
    }
}
