//! Biblical calendar calculation engine.
//!
//! Ties the workspace together: calendar conversion (`abib-calendar`), the
//! crescent-visibility engine (`abib-astronomy`), feast derivations
//! (`abib-feasts`) and the report/directory layers defined here.
//!
//! The facade functions mirror the operations the application historically
//! exposed: calculated new moons for a year and location, Crucifixion /
//! Jordan-crossing / Creation candidate scans, the Flood-duration table and
//! a sunset listing. Each renders through an [`OutputWriter`] and returns the
//! structured results for callers that want data instead of text.

pub mod directory;
pub mod report;

pub use directory::{BuiltinDirectory, LocationDirectory};
pub use report::{format_field, BufferWriter, OutputWriter};

pub use abib_astronomy::{LunarYear, NewMoonEpoch, SolarSeries, VisibilityEngine};
pub use abib_calendar::{
    is_leap_year, metonic_position, tishri_julian_day, to_civil_date, to_julian_day,
    weekday_number, weekday_of, year_after_creation, year_length, year_type, HebrewYearType,
};
pub use abib_feasts::{
    creation_candidates, crucifixion_candidates, flood_table, jordan_candidates, wave_offering_jd,
    Abib1Finder, CivilAbib1, CrescentAbib1, FloodTable,
};
pub use abib_types::{
    format_year, normalize_year, AbibError, CivilDate, CreationCandidate, EveningObservation,
    FeastCandidate, FloodBucket, FloodYear, Location, LunarMonthObservation, VisibilityTier,
};

use chrono::NaiveTime;

/// Common imports for downstream users.
pub mod prelude {
    pub use crate::directory::{BuiltinDirectory, LocationDirectory};
    pub use crate::report::{BufferWriter, OutputWriter};
    pub use abib_astronomy::{LunarYear, VisibilityEngine};
    pub use abib_feasts::{Abib1Finder, CivilAbib1, CrescentAbib1};
    pub use abib_types::{
        AbibError, CivilDate, FeastCandidate, FloodBucket, Location, VisibilityTier,
    };
}

/// Observes a year's lunations at a location and renders the new-moon table.
pub fn calculate_new_moons(
    writer: &mut dyn OutputWriter,
    year: i32,
    location: Location,
    location_name: &str,
) -> Result<LunarYear, AbibError> {
    let engine = VisibilityEngine::new(location);
    let observed = engine.observe_year(year)?;
    report::new_moons_report(writer, &observed, location_name, &location);
    Ok(observed)
}

/// Scans for years with the Passover sacrifice on Wednesday and renders the
/// Crucifixion report.
pub fn calculate_crucifixion_dates(
    writer: &mut dyn OutputWriter,
    start: i32,
    end: Option<i32>,
) -> Result<Vec<FeastCandidate>, AbibError> {
    let found = crucifixion_candidates(start, end, &CivilAbib1)?;
    report::crucifixion_report(writer, start, end.unwrap_or(start), &found);
    Ok(found)
}

/// Scans for years with the Passover sacrifice on the Sabbath.
pub fn calculate_jordan_dates(
    writer: &mut dyn OutputWriter,
    start: i32,
    end: Option<i32>,
) -> Result<Vec<FeastCandidate>, AbibError> {
    let found = jordan_candidates(start, end, &CivilAbib1)?;
    report::jordan_report(writer, start, end.unwrap_or(start), &found);
    Ok(found)
}

/// Scans for years with Abib 1 on Sunday.
pub fn calculate_creation_dates(
    writer: &mut dyn OutputWriter,
    start: i32,
    end: Option<i32>,
) -> Result<Vec<CreationCandidate>, AbibError> {
    let found = creation_candidates(start, end, &CivilAbib1)?;
    report::creation_report(writer, start, end.unwrap_or(start), &found);
    Ok(found)
}

/// Builds and renders the Flood-duration table.
pub fn calculate_flood_dates(
    writer: &mut dyn OutputWriter,
    start: i32,
    end: Option<i32>,
) -> Result<FloodTable, AbibError> {
    let table = flood_table(start, end, &CivilAbib1)?;
    report::flood_report(writer, &table);
    Ok(table)
}

/// Days covered by the sunset listing (January through mid-April).
const SUNSET_LISTING_DAYS: i64 = 107;

/// Renders local sunsets for the opening months of a year.
pub fn calculate_sunsets(
    writer: &mut dyn OutputWriter,
    year: i32,
    location: Location,
) -> Result<Vec<(CivilDate, NaiveTime)>, AbibError> {
    let year = normalize_year(year);
    let engine = VisibilityEngine::new(location);
    let start = to_julian_day(1, 1.0, year);

    let mut days = Vec::with_capacity(SUNSET_LISTING_DAYS as usize);
    for offset in 0..SUNSET_LISTING_DAYS {
        let jd = start + offset as f64;
        days.push((to_civil_date(jd), engine.sunset_time(jd)));
    }

    report::sunsets_report(writer, year, &location, &days);
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_moons_facade_renders_header() {
        let mut w = BufferWriter::new();
        let observed =
            calculate_new_moons(&mut w, 2024, Location::jerusalem(), "Jerusalem, Israel")
                .expect("observed");
        assert_eq!(observed.months.len(), 14);
        let text = w.contents();
        assert!(text.contains("2024 CE"), "{text}");
        assert!(text.contains("CALCULATED NEW MOONS"));
        assert!(text.contains("Jerusalem, Israel"));
    }

    #[test]
    fn test_sunsets_facade_counts_days() {
        let mut w = BufferWriter::new();
        let days = calculate_sunsets(&mut w, 2024, Location::jerusalem()).expect("sunsets");
        assert_eq!(days.len(), 107);
        assert_eq!(days[0].0.month, 1);
        assert_eq!(days[0].0.day.floor() as i64, 1);
        assert!(w.contents().contains("CALCULATED SUNSETS"));
    }

    #[test]
    fn test_flood_facade_single_year() {
        let mut w = BufferWriter::new();
        let table = calculate_flood_dates(&mut w, -2348, None).expect("table");
        assert_eq!(table.years.len(), 1);
        assert_eq!(table.years[0].days_between, 150);
    }
}
