use abib_core::prelude::*;
use abib_core::{
    tishri_julian_day, to_civil_date, to_julian_day, weekday_number, year_length, HebrewYearType,
};
use proptest::prelude::*;

proptest! {
    /// Invariant: converting a Julian Day to a civil date and back is the
    /// identity over the historical range.
    #[test]
    fn julian_civil_round_trip(jd in 350_000i64..3_200_000) {
        let jd = jd as f64;
        let d = to_civil_date(jd);
        prop_assert_eq!(to_julian_day(d.month, d.day.floor(), d.year), jd);
    }

    /// Invariant: the civil readout never yields year 0 or a month outside 1-12.
    #[test]
    fn civil_date_well_formed(jd in 350_000i64..3_200_000) {
        let d = to_civil_date(jd as f64);
        prop_assert_ne!(d.year, 0);
        prop_assert!((1..=12).contains(&d.month));
        prop_assert!(d.day >= 1.0 && d.day < 32.0);
    }

    /// Invariant: consecutive days step the weekday by exactly one, mod 7.
    #[test]
    fn weekday_steps_daily(jd in 350_000i64..3_200_000) {
        let today = weekday_number(jd as f64);
        let tomorrow = weekday_number(jd as f64 + 1.0);
        prop_assert_eq!((today + 1).rem_euclid(7), tomorrow);
    }

    /// Invariant: every Hebrew year has one of the six canonical lengths.
    #[test]
    fn hebrew_year_lengths_canonical(year in -4000i32..9000) {
        let year = if year == 0 { 1 } else { year };
        let len = year_length(year);
        prop_assert!(HebrewYearType::from_length(len).is_some(), "year {} length {}", year, len);
    }

    /// Invariant: Tishri epochs are strictly increasing and a Hebrew year
    /// apart.
    #[test]
    fn tishri_monotone(year in -4000i32..9000) {
        let year = if year == 0 { 1 } else { year };
        let a = tishri_julian_day(year);
        let b = tishri_julian_day(year + 1);
        prop_assert!(b > a);
        prop_assert!((353.0..=385.0).contains(&(b - a)));
    }

    /// Invariant: the location validator accepts exactly the documented box.
    #[test]
    fn location_bounds(lat in -120.0f64..120.0, lon in -220.0f64..220.0) {
        let result = Location::new(lat, lon, 0.0);
        let inside = lat.abs() <= 90.0 && lon.abs() <= 180.0;
        prop_assert_eq!(result.is_ok(), inside);
    }

    /// Invariant: the visibility tiers partition the index line.
    #[test]
    fn tier_partition(index in -500.0f64..500.0) {
        let tier = VisibilityTier::from_index(index);
        let expected = if index <= 88.0 {
            VisibilityTier::NotVisible
        } else if index <= 100.0 {
            VisibilityTier::ProbablyNotVisible
        } else if index <= 112.0 {
            VisibilityTier::ProbablyVisible
        } else {
            VisibilityTier::Visible
        };
        prop_assert_eq!(tier, expected);
    }

    /// Invariant: a Hebrew year is 383-385 days long exactly when the Metonic
    /// cycle marks it embolismic.
    #[test]
    fn embolismic_length_iff_leap(year in -4000i32..9000) {
        let year = if year == 0 { 1 } else { year };
        let len = year_length(year);
        // No year 0: BCE years sit one Hebrew year later than the CE offset.
        let hebrew_year = i64::from(year) + if year <= 0 { 3762 } else { 3761 };
        prop_assert_eq!(len >= 383, abib_core::is_leap_year(hebrew_year),
            "year {} length {}", year, len);
    }

    /// Invariant: the feast scans are pure; repeating one yields the same
    /// candidates.
    #[test]
    fn crucifixion_scan_idempotent(start in -50i32..2200) {
        let end = Some(start + 9);
        let first = abib_core::crucifixion_candidates(start, end, &CivilAbib1)
            .expect("scan completed");
        let second = abib_core::crucifixion_candidates(start, end, &CivilAbib1)
            .expect("scan completed");
        prop_assert_eq!(first, second);
    }

    /// Invariant: the wave offering is a Sunday strictly after the feast
    /// opens, at most a week out.
    #[test]
    fn wave_offering_is_next_sunday(jd in 1_500_000i64..2_500_000) {
        let passover = jd as f64;
        let wave = abib_core::wave_offering_jd(passover);
        prop_assert_eq!(weekday_number(wave), 0);
        prop_assert!(wave > passover + 1.0);
        prop_assert!(wave <= passover + 8.0);
    }
}
