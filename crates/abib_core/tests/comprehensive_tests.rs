use abib_core::prelude::*;
use abib_core::{
    calculate_crucifixion_dates, calculate_flood_dates, calculate_new_moons, creation_candidates,
    crucifixion_candidates, flood_table, is_leap_year, jordan_candidates, metonic_position,
    tishri_julian_day, to_civil_date, to_julian_day, weekday_of, year_after_creation, year_length,
    HebrewYearType,
};
use chrono::Weekday;

#[test]
fn test_known_epoch_conversions() {
    // 2000-01-01 under the floor(...)+1 convention.
    assert_eq!(to_julian_day(1, 1.0, 2000), 2451545.0);
    let d = to_civil_date(2451545.0);
    assert_eq!((d.month, d.day as i64, d.year), (1, 1, 2000));

    // There is no year 0: it collapses onto year 1.
    assert_eq!(to_julian_day(3, 1.0, 0), to_julian_day(3, 1.0, 1));
    assert_eq!(year_after_creation(-4004), 1);
}

#[test]
fn test_rosh_hashanah_2024_and_2025() {
    // Published dates: October 3, 2024 and September 23, 2025.
    assert_eq!(tishri_julian_day(2024), 2460586.5);
    assert_eq!(tishri_julian_day(2025), 2460941.5);
    assert_eq!(year_length(2024), 355);
}

#[test]
fn test_metonic_cycle_2024() {
    // Hebrew year 5784 sits at cycle position 8, a leap year.
    let hebrew = 2024 + 3760;
    assert_eq!(metonic_position(hebrew), 8);
    assert!(is_leap_year(hebrew));
    // 5784 ran 383 days, September 16, 2023 to October 3, 2024.
    assert_eq!(
        abib_core::year_type(2023),
        Some(HebrewYearType::EmbolismicDeficient)
    );
}

#[test]
fn test_jerusalem_2024_observation_season() {
    let engine = VisibilityEngine::new(Location::jerusalem());
    let observed = engine.observe_year(2024).expect("year observed");
    assert_eq!(observed.months.len(), 14);

    // Every lunation concluded with a recorded month start, and the decisive
    // evening sits a day or two before it.
    for month in &observed.months {
        let start = month.month_start_jd.expect("recorded start");
        let decisive = month.decisive().expect("decisive evening");
        let offset = start - decisive.day_jd;
        assert!(offset == 1.0 || offset == 2.0, "offset {offset}");
        assert!(decisive.visibility_index > 88.0);
    }
}

#[test]
fn test_crescent_anchor_lands_in_spring() {
    let finder = CrescentAbib1::new(Location::jerusalem());
    let abib1 = finder.abib1_jd(2024).expect("anchor");
    let d = to_civil_date(abib1);
    assert_eq!(d.year, 2024);
    // The first observed month of the seed window opens in early spring.
    assert!((2..=4).contains(&d.month), "month {}", d.month);
}

#[test]
fn test_crucifixion_scan_includes_30_ce() {
    let found = crucifixion_candidates(25, Some(35), &CivilAbib1).expect("scan");
    let years: Vec<i32> = found.iter().map(|c| c.year).collect();
    assert!(years.contains(&30), "{years:?}");
    for c in &found {
        assert_eq!(weekday_of(c.passover_jd), Weekday::Wed);
        assert_eq!(weekday_of(c.wave_offering_jd), Weekday::Sun);
        assert_eq!(c.pentecost_jd - c.wave_offering_jd, 49.0);
    }
}

#[test]
fn test_jordan_and_creation_predicates_disjoint() {
    // A Passover-on-Sabbath year and a Passover-on-Wednesday year can never
    // coincide.
    let sabbath = jordan_candidates(-1450, Some(-1350), &CivilAbib1).expect("scan");
    let wednesday = crucifixion_candidates(-1450, Some(-1350), &CivilAbib1).expect("scan");
    for s in &sabbath {
        assert!(wednesday.iter().all(|w| w.year != s.year), "year {}", s.year);
    }

    let creation = creation_candidates(-4010, Some(-3990), &CivilAbib1).expect("scan");
    for c in &creation {
        assert_eq!(weekday_of(c.abib1_jd), Weekday::Sun);
    }
}

#[test]
fn test_flood_buckets_exclusive_over_range() {
    let table = flood_table(-2400, Some(-2300), &CivilAbib1).expect("table");
    for y in &table.years {
        let matches = [
            y.days_between == 150 && y.bucket == FloodBucket::Exact150,
            y.days_between == 149 && y.bucket == FloodBucket::Plus1,
            y.days_between == 148 && y.bucket == FloodBucket::Plus2,
            ![148, 149, 150].contains(&y.days_between) && y.bucket == FloodBucket::None,
        ];
        assert_eq!(matches.iter().filter(|m| **m).count(), 1, "year {}", y.year);
    }
}

#[test]
fn test_directory_feeds_the_engine() {
    let dir = BuiltinDirectory;
    let loc = dir.get("Perth, Australia").expect("present");
    let engine = VisibilityEngine::new(loc);
    let lunation = VisibilityEngine::starting_lunation(2024);
    let month = engine.observe_lunation(lunation).expect("search concluded");
    assert!(month.month_start_jd.is_some());
}

#[test]
fn test_facade_report_round_trip() {
    let mut w = BufferWriter::new();
    let observed = calculate_new_moons(&mut w, 2024, Location::jerusalem(), "Jerusalem, Israel")
        .expect("observed");
    let text = w.contents().to_string();
    assert!(text.contains("CALCULATED NEW MOONS"));
    // One header pair per lunation.
    assert_eq!(text.matches("Visible?").count(), observed.months.len());
    // Every decisive evening's tier label appears.
    assert!(text.contains("Visible"));

    w.clear();
    let table = calculate_flood_dates(&mut w, -2350, Some(-2340)).expect("table");
    assert_eq!(table.years.len(), 11);
    assert!(w.contents().contains("150 days"));
}

#[test]
fn test_bce_scan_handles_year_zero_boundary() {
    let mut w = BufferWriter::new();
    let found = calculate_crucifixion_dates(&mut w, -3, Some(3)).expect("scan");
    for c in &found {
        assert_ne!(c.year, 0);
    }
}
