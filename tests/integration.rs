use juliancal::{
    are_years_adjacent, convert_year, CalendarSystem, ConversionError, DateTimeValue, DateValue,
    Interval, JulianDayEngine, JulianDayNumber, TimeValue, TimeZoneDefinition, YearAdjacency,
    YearNumberType, YearNumberingMode,
};
use num::BigInt;
use std::cmp::Ordering;

#[test]
fn civil_round_trip_is_exact_to_the_nanosecond() {
    for calendar in CalendarSystem::ALL {
        let engine = JulianDayEngine::new(calendar);
        let mut nanos: i32 = 1;
        for year in (-5_000_i64..5_000).step_by(173) {
            let (month, day) = (1 + (year.rem_euclid(12)) as i32, 1 + (year.rem_euclid(28)) as i32);
            nanos = ((i64::from(nanos) * 7 + 13) % 1_000_000_000) as i32;
            let jd = engine
                .from_gregorian(year, month, day, 17, 41, 29, nanos, false)
                .unwrap();
            let back = engine.to_gregorian_utc(&jd).unwrap();
            assert_eq!(
                (back.year, back.month, back.day, back.hour, back.minute, back.second, back.nanosecond),
                (year, month, day, 17, 41, 29, nanos),
                "{calendar}"
            );
        }
    }
}

#[test]
fn later_instants_have_larger_julian_values() {
    let engine = JulianDayEngine::default();
    let instants = [
        (-4713, 11, 24, 0, 0, 0, 0, false),
        (-4713, 11, 24, 12, 0, 0, 0, false),
        (1858, 11, 17, 0, 0, 0, 0, false),
        (2016, 12, 31, 23, 59, 59, 999_999_999, false),
        (2016, 12, 31, 23, 59, 60, 0, true),
        (2016, 12, 31, 23, 59, 60, 999_999_999, true),
        (2017, 1, 1, 0, 0, 0, 0, false),
        (2017, 1, 1, 0, 0, 0, 1, false),
    ];
    let values: Vec<JulianDayNumber> = instants
        .iter()
        .map(|&(y, m, d, h, mi, s, ns, leap)| engine.from_gregorian(y, m, d, h, mi, s, ns, leap).unwrap())
        .collect();
    for pair in values.windows(2) {
        assert_eq!(pair[0].compare(&pair[1]), Ok(Ordering::Less), "{} vs {}", pair[0], pair[1]);
    }
}

#[test]
fn year_numbering_bijection() {
    let to_ce = |y| convert_year(y, YearNumberType::Astronomical, YearNumberingMode::CommonEra);
    assert_eq!(to_ce(0), Ok((1, YearNumberType::Bce)));
    assert_eq!(to_ce(-1), Ok((2, YearNumberType::Bce)));
    assert_eq!(to_ce(1), Ok((1, YearNumberType::Ce)));

    for y in -10_000..10_000 {
        let (v, k) = to_ce(y).unwrap();
        assert_eq!(
            convert_year(v, k, YearNumberingMode::Astronomical),
            Ok((y, YearNumberType::Astronomical))
        );
    }
}

#[test]
fn year_adjacency() {
    assert_eq!(are_years_adjacent(5, 4), YearAdjacency::Following);
    assert_eq!(are_years_adjacent(4, 5), YearAdjacency::Preceding);
    assert_eq!(are_years_adjacent(10, 4), YearAdjacency::NotAdjacent);
    assert_eq!(are_years_adjacent(5, 4).difference(), Some(1));
    assert_eq!(are_years_adjacent(4, 5).difference(), Some(-1));
}

#[test]
fn reference_layout_example() {
    let dt = DateTimeValue::new(
        Some(CalendarSystem::Gregorian),
        2021,
        YearNumberType::Ce,
        3,
        5,
        false,
        9,
        7,
        2,
        0,
        "UTC",
        "2006-01-02 15:04:05",
        "example",
    )
    .unwrap();
    assert_eq!(dt.format().unwrap(), "2021-03-05 09:07:02");
    assert_eq!(
        dt.format_with("Monday 002 3:04PM Z07:00").unwrap(),
        "Friday 064 9:07AM Z"
    );
}

#[test]
fn leap_second_boundary() {
    let engine = JulianDayEngine::default();
    let last_regular = engine.from_gregorian(2016, 12, 31, 23, 59, 59, 0, false).unwrap();
    let leap = engine.from_gregorian(2016, 12, 31, 23, 59, 60, 0, true).unwrap();
    let new_year = engine.from_gregorian(2017, 1, 1, 0, 0, 0, 0, false).unwrap();

    assert_eq!(last_regular.compare(&leap), Ok(Ordering::Less));
    assert_eq!(leap.compare(&new_year), Ok(Ordering::Less));
    assert_eq!(leap.to_rational(), new_year.to_rational());

    let fields = engine.to_gregorian_utc(&leap).unwrap();
    assert_eq!((fields.day, fields.hour, fields.minute, fields.second), (31, 23, 59, 60));

    let span = Interval::new(last_regular, new_year).unwrap();
    assert_eq!(span.duration_nanoseconds().unwrap(), BigInt::from(1_000_000_000));
}

#[test]
fn invalid_sentinels_propagate() {
    let jd = JulianDayNumber::default();
    assert_eq!(jd.to_f64(6), Err(ConversionError::NotInitialized));
    assert_eq!(jd.julian_hours(), Err(ConversionError::NotInitialized));

    assert!(DateValue::empty().julian_day_number().is_err());
    assert!(TimeValue::empty().total_nanoseconds().is_err());

    let empty = DateTimeValue::empty();
    assert!(empty.format().is_err());
    assert!(empty.julian_day_number().is_err());
    assert!(empty.to_chrono().is_err());
}

#[test]
fn parts_compose_into_a_date_time() {
    let date = DateValue::new(
        Some(CalendarSystem::Julian),
        44,
        YearNumberType::Bce,
        3,
        15,
        false,
        "ides",
    )
    .unwrap();
    let time = TimeValue::new(
        11,
        0,
        0,
        0,
        TimeZoneDefinition::from_location("+02:00").unwrap(),
        "ides",
    )
    .unwrap();
    let dt = DateTimeValue::from_parts(date, time, "2006-01-02 15:04 -07:00", "ides").unwrap();
    assert_eq!(dt.format().unwrap(), "0044-03-15 11:00 +02:00");

    let utc = dt.julian_day_number().unwrap();
    let engine = JulianDayEngine::new(CalendarSystem::Julian);
    let fields = engine.to_gregorian_utc(utc).unwrap();
    assert_eq!((fields.year, fields.month, fields.day, fields.hour), (-43, 3, 15, 9));
}

#[test]
fn julian_day_rendering_and_floats() {
    let jd = JulianDayEngine::default()
        .from_gregorian(1969, 7, 20, 20, 17, 40, 0, false)
        .unwrap();
    let (text, total, int_width) = jd.julian_day_no_time_str(6).unwrap();
    assert_eq!(text, "2440423.345602");
    assert_eq!((total, int_width), (14, 7));
    assert!((jd.to_f64(6).unwrap() - 2_440_423.345_602).abs() < 1e-6);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_configuration_types() {
    use juliancal::{GregorianUtc, Year};

    let zone = TimeZoneDefinition::from_location("-0330").unwrap();
    let json = serde_json::to_string(&zone).unwrap();
    assert!(json.contains("utc_offset_seconds"));
    let back: TimeZoneDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, zone);

    let calendar: CalendarSystem = serde_json::from_str("\"RevisedJulian\"").unwrap();
    assert_eq!(calendar, CalendarSystem::RevisedJulian);

    let year = Year::bce(44).unwrap();
    let back: Year = serde_json::from_str(&serde_json::to_string(&year).unwrap()).unwrap();
    assert_eq!(back.to_string(), "44 BCE");

    let fields = GregorianUtc {
        year: 2016,
        month: 12,
        day: 31,
        hour: 23,
        minute: 59,
        second: 60,
        nanosecond: 0,
        has_leap_second: true,
    };
    let back: GregorianUtc = serde_json::from_str(&serde_json::to_string(&fields).unwrap()).unwrap();
    assert_eq!(back, fields);
}
