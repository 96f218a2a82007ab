//! Hebrew (Rabbinic) calendar calculator.
//!
//! The 1st-of-Tishri epoch follows Meeus, Astronomical Algorithms 2nd ed.,
//! pages 71-72: a Metonic-cycle position, a four-year leap-day cycle, a linear
//! correction `Q`, and four postponement rules that keep the epoch off Sunday,
//! Wednesday and Friday.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hebrew month names. Index 0 is Nisan; index 12 is the intercalary Vedar.
pub static HEBREW_MONTH_NAMES: [&str; 13] = [
    "Nisan", "Iyar", "Sivan", "Tammuz", "Av", "Elul", "Tishri", "Heshvan", "Kislev", "Tevet",
    "Shevat", "Adar", "Vedar",
];

/// Month lengths for a common deficient year plus the 13th month.
///
/// Heshvan and Kislev vary with the year type; that variability is absorbed
/// into [`year_length`], not tracked per month here.
pub static HEBREW_MONTH_LENGTHS: [u32; 13] = [30, 29, 30, 29, 30, 29, 30, 29, 29, 29, 30, 29, 29];

/// Leap-year flags for positions 1-19 of the Metonic cycle (index 0 = position 1).
pub static METONIC_LEAP: [bool; 19] = [
    false, false, true, false, false, true, false, true, false, false, true, false, false, true,
    false, false, true, false, true,
];

/// The six canonical Hebrew year types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HebrewYearType {
    CommonDeficient,
    CommonRegular,
    CommonComplete,
    EmbolismicDeficient,
    EmbolismicRegular,
    EmbolismicComplete,
}

impl HebrewYearType {
    /// Maps a year length in days to its type.
    pub fn from_length(days: i64) -> Option<Self> {
        match days {
            353 => Some(Self::CommonDeficient),
            354 => Some(Self::CommonRegular),
            355 => Some(Self::CommonComplete),
            383 => Some(Self::EmbolismicDeficient),
            384 => Some(Self::EmbolismicRegular),
            385 => Some(Self::EmbolismicComplete),
            _ => None,
        }
    }

    pub fn length_days(&self) -> i64 {
        match self {
            Self::CommonDeficient => 353,
            Self::CommonRegular => 354,
            Self::CommonComplete => 355,
            Self::EmbolismicDeficient => 383,
            Self::EmbolismicRegular => 384,
            Self::EmbolismicComplete => 385,
        }
    }

    pub fn is_embolismic(&self) -> bool {
        self.length_days() > 360
    }
}

impl fmt::Display for HebrewYearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CommonDeficient => "Common Deficient (353 days)",
            Self::CommonRegular => "Common Regular (354 days)",
            Self::CommonComplete => "Common Complete (355 days)",
            Self::EmbolismicDeficient => "Embolismic Deficient (383 days)",
            Self::EmbolismicRegular => "Embolismic Regular (384 days)",
            Self::EmbolismicComplete => "Embolismic Complete (385 days)",
        };
        write!(f, "{}", s)
    }
}

/// Raw Meeus 7.1 conversion, half-integer result, year-zero bump applied.
/// Internal to the Tishri epoch; the public conversion in `julian` adds the
/// system's floor+1 convention on top of the same formula.
fn raw_julian(month: u32, day: f64, year: i32) -> f64 {
    let mut y = if year <= 0 { year + 1 } else { year } as f64;
    let mut m = month as f64;
    if m < 3.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = (2.0 - a + (a / 4.0).floor()).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}

/// Julian Day of the 1st of Tishri for the Hebrew year beginning in the given
/// Gregorian year.
pub fn tishri_julian_day(gregorian_year: i32) -> f64 {
    let xi = if gregorian_year <= 0 { gregorian_year as i64 + 1 } else { gregorian_year as i64 };
    let x = xi as f64;

    let c = (x / 100.0).floor();
    let s = ((3.0 * c - 5.0) / 4.0).floor();

    let lca = (12 * xi + 12).rem_euclid(19) as f64;
    let lcb = xi.rem_euclid(4) as f64;

    let q = -1.904412361576 + 1.554241796621 * lca + 0.25 * lcb - 0.003177794022 * x + s;
    let j = ((q.floor() + 3.0 * x + 5.0 * lcb + 2.0 - s).floor() as i64).rem_euclid(7);
    let r = q - q.floor();

    // Postponement rules, in documented order. The weekday checks are mutually
    // exclusive; the last two override the default +22.
    let mut d = q.floor() + 22.0;
    if j == 2 || j == 4 || j == 6 {
        d = q.floor() + 23.0; // Wed, Fri or Sun
    }
    if j == 1 && lca > 6.0 && r >= 0.63287037 {
        d = q.floor() + 24.0; // Tue, common year, molad at or past 9h 204p
    }
    if j == 0 && lca > 11.0 && r >= 0.897723765 {
        d = q.floor() + 23.0; // Mon, leap year, molad at or past 15h 589p
    }

    // D counts from March; roll into April/May when it overflows.
    let mut month = 3u32;
    if d > 31.0 {
        d -= 31.0;
        month += 1;
        if d > 30.0 {
            d -= 30.0;
            month += 1;
        }
    }

    raw_julian(month, d, gregorian_year) + 163.0
}

/// Length of the Hebrew year beginning in the given Gregorian year, always one
/// of {353, 354, 355, 383, 384, 385}.
pub fn year_length(gregorian_year: i32) -> i64 {
    (tishri_julian_day(gregorian_year + 1) - tishri_julian_day(gregorian_year)) as i64
}

/// The named type of the Hebrew year beginning in the given Gregorian year.
pub fn year_type(gregorian_year: i32) -> Option<HebrewYearType> {
    HebrewYearType::from_length(year_length(gregorian_year))
}

/// Metonic leap-year test on a Hebrew year number (Gregorian year + 3760).
pub fn is_leap_year(hebrew_year: i64) -> bool {
    (7 * hebrew_year + 1).rem_euclid(19) < 7
}

/// Position of a Hebrew year within the 19-year Metonic cycle, 1-19.
pub fn metonic_position(hebrew_year: i64) -> usize {
    ((hebrew_year - 1).rem_euclid(19) + 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tishri_2024() {
        // Rosh Hashanah 5785 fell on October 3, 2024.
        assert_eq!(tishri_julian_day(2024), 2460586.5);
    }

    #[test]
    fn test_year_length_2024() {
        assert_eq!(year_length(2024), 355);
        assert_eq!(year_type(2024), Some(HebrewYearType::CommonComplete));
    }

    #[test]
    fn test_leap_pattern_matches_metonic_table() {
        for position in 1..=19i64 {
            assert_eq!(
                is_leap_year(position),
                METONIC_LEAP[position as usize - 1],
                "cycle position {position}"
            );
        }
    }

    #[test]
    fn test_leap_year_2024_scenario() {
        // Hebrew year 2024 + 3760 = 5784, Metonic position 8, a leap year.
        let h = 2024 + 3760;
        assert_eq!(metonic_position(h), 8);
        assert!(is_leap_year(h));
        assert!(!is_leap_year(h + 1));
    }

    #[test]
    fn test_negative_years_normalize() {
        // BCE years must not panic and must still produce canonical lengths.
        for y in [-3761, -1000, -5, -1] {
            let len = year_length(y);
            assert!(
                HebrewYearType::from_length(len).is_some(),
                "year {y} produced length {len}"
            );
        }
    }

    #[test]
    fn test_embolismic_lengths_only_for_leap_years() {
        for y in 1990..2030 {
            let len = year_length(y);
            let embolismic = len >= 383;
            // The Hebrew year beginning at Tishri of y is y + 3761.
            assert_eq!(embolismic, is_leap_year(y as i64 + 3761), "gregorian {y}");
        }
    }
}
