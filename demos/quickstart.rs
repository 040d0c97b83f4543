// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use chrono::Utc;
use juliancal::{CalendarSystem, DateTimeValue, JulianDayEngine, YearNumberingMode};

fn main() -> Result<(), juliancal::Error> {
    let engine = JulianDayEngine::default();
    let now_jd = engine.from_chrono(&Utc::now())?;

    let (jd_text, _, _) = now_jd.julian_day_no_time_str(9)?;
    println!("JD: {jd_text}");
    println!("MJD: {}", now_jd.modified_julian_date()?);
    println!("T (J2000): {}", now_jd.julian_centuries()?);

    for calendar in CalendarSystem::ALL {
        let local = DateTimeValue::from_julian_day_number(
            &now_jd,
            calendar,
            YearNumberingMode::CommonEra,
            "-05:00",
            "Monday, 02-Jan-06 15:04:05.000 MST",
            "quickstart",
        )?;
        println!("{calendar}: {}", local.format()?);
    }
    Ok(())
}
