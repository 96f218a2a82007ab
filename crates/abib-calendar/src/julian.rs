//! Gregorian <-> Julian Day conversion (Meeus, Astronomical Algorithms 2nd ed.,
//! formula 7.1 and its inverse).
//!
//! The forward conversion carries this system's historical convention: the raw
//! Meeus value (a half-integer, noon-anchored) is floored and incremented by
//! one. Every consumer of Julian Days in this workspace assumes that offset.

use abib_types::CivilDate;
use chrono::Weekday;

/// Converts a Gregorian date to a Julian Day number.
///
/// Months 1 and 2 count as months 13 and 14 of the prior year. Years <= 0 are
/// bumped by one so that 1 BCE maps to astronomical year 0; there is no year 0
/// at this boundary.
pub fn to_julian_day(month: u32, day: f64, year: i32) -> f64 {
    let mut y = if year <= 0 { year + 1 } else { year } as f64;
    let mut m = month as f64;
    if m < 3.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = (2.0 - a + (a / 4.0).floor()).floor();
    let raw =
        (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5;
    raw.floor() + 1.0
}

/// Converts a Julian Day number back to a civil date.
///
/// The day carries the input's fractional part, rounded to two decimals.
/// Years below 1 are decremented once more so the year sequence skips 0.
pub fn to_civil_date(jd: f64) -> CivilDate {
    let z = jd.floor();
    let f = jd - z;

    let alpha = ((z - 1867216.25) / 36524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();
    let day = ((b - d - (30.6001 * e).floor() + f) * 100.0).round() / 100.0;

    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let mut year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    if year < 1.0 {
        year -= 1.0;
    }

    CivilDate { month: month as u32, day, year: year as i32 }
}

/// Day of week as `floor(jd) mod 7`, zero point fixed so that 0 is Sunday.
///
/// The feast predicates depend on this convention: Passover on remainder 3 is
/// the Wednesday test, remainder 6 the Sabbath test.
pub fn weekday_number(jd: f64) -> i64 {
    (jd.floor() as i64).rem_euclid(7)
}

/// [`weekday_number`] surfaced as a `chrono::Weekday`.
pub fn weekday_of(jd: f64) -> Weekday {
    match weekday_number(jd) {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// Year count since Creation: 4004 BCE epoch, no year 0.
pub fn year_after_creation(year: i32) -> i32 {
    if year < 0 { year + 4005 } else { year + 4004 }
}
