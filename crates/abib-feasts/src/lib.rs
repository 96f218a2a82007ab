//! Feast-date derivations.
//!
//! Year-range scans over the Biblical religious year: Crucifixion candidates
//! (Passover on Wednesday), Jordan-crossing candidates (Passover on the
//! Sabbath), Creation candidates (Abib 1 on Sunday) and the Flood-duration
//! table. Each scan is a pure function of the year and an [`Abib1Finder`],
//! the injected seam that anchors Abib 1 either to a fixed civil formula or
//! to the full crescent-visibility search.

pub mod flood;

pub use flood::{flood_table, FloodTable};

use abib_astronomy::VisibilityEngine;
use abib_calendar::{to_julian_day, weekday_number};
use abib_types::{normalize_year, AbibError, CreationCandidate, FeastCandidate, Location};

/// Days from Abib 1 to the Passover sacrifice (Abib 14).
pub const PASSOVER_OFFSET: f64 = 13.0;

/// Anchors Abib 1 for a Gregorian year.
///
/// The scans never look past this seam, so the anchor can be swapped between
/// the fixed-formula approximation and the observed crescent without touching
/// any predicate.
pub trait Abib1Finder {
    /// Julian Day of Abib 1 in the given year.
    fn abib1_jd(&self, year: i32) -> Result<f64, AbibError>;

    /// Julian Day of day 17 of the given Biblical month (1-based).
    ///
    /// The default assumes alternating 30-day months from Abib 1; crescent-
    /// backed finders override it with observed month starts.
    fn month_day_17(&self, year: i32, month: u32) -> Result<f64, AbibError> {
        Ok(self.abib1_jd(year)? + (month as f64 - 1.0) * 30.0 + 16.0)
    }
}

/// The fixed-formula anchor: Abib 1 approximated as March 1 of the civil year.
#[derive(Debug, Clone, Copy, Default)]
pub struct CivilAbib1;

impl Abib1Finder for CivilAbib1 {
    fn abib1_jd(&self, year: i32) -> Result<f64, AbibError> {
        Ok(to_julian_day(3, 1.0, normalize_year(year)))
    }
}

/// Abib 1 anchored to the first recorded crescent month of the year.
#[derive(Debug, Clone, Copy)]
pub struct CrescentAbib1 {
    engine: VisibilityEngine,
}

impl CrescentAbib1 {
    pub fn new(location: Location) -> Self {
        Self { engine: VisibilityEngine::new(location) }
    }
}

impl Abib1Finder for CrescentAbib1 {
    fn abib1_jd(&self, year: i32) -> Result<f64, AbibError> {
        let observed = self.engine.observe_year(year)?;
        observed.first_month_jd.ok_or(AbibError::NoVisibleCrescent {
            lunation: VisibilityEngine::starting_lunation(year),
        })
    }

    fn month_day_17(&self, year: i32, month: u32) -> Result<f64, AbibError> {
        let observed = self.engine.observe_year(year)?;
        let idx = month.saturating_sub(1) as usize;
        observed
            .months
            .get(idx)
            .and_then(|m| m.month_start_jd)
            .map(|start| start + 16.0)
            .ok_or(AbibError::NoVisibleCrescent {
                lunation: VisibilityEngine::starting_lunation(year) + idx as i64,
            })
    }
}

/// The day after the weekly Sabbath that falls within the Feast of Unleavened
/// Bread: the first Sunday strictly after the feast's opening day.
pub fn wave_offering_jd(passover_jd: f64) -> f64 {
    let feast_start = passover_jd + 1.0;
    let mut days_to_sunday = (7 - weekday_number(feast_start)).rem_euclid(7);
    if days_to_sunday == 0 {
        days_to_sunday = 7;
    }
    feast_start + days_to_sunday as f64
}

fn feast_candidate(year: i32, abib1_jd: f64) -> FeastCandidate {
    let passover_jd = abib1_jd + PASSOVER_OFFSET;
    let wave = wave_offering_jd(passover_jd);
    FeastCandidate {
        year,
        abib1_jd,
        passover_jd,
        unleavened_start_jd: passover_jd + 1.0,
        unleavened_end_jd: passover_jd + 7.0,
        wave_offering_jd: wave,
        pentecost_jd: wave + 49.0,
    }
}

/// Runs `emit` for each year of the inclusive range, skipping year 0.
fn scan_years(start: i32, end: Option<i32>, mut emit: impl FnMut(i32) -> Result<(), AbibError>) -> Result<(), AbibError> {
    let end = end.unwrap_or(start);
    let mut y = start;
    while y <= end {
        let year = normalize_year(y);
        emit(year)?;
        y = year + 1;
    }
    Ok(())
}

/// Years whose Passover sacrifice falls on Wednesday, with the full feast
/// sequence derived for each.
pub fn crucifixion_candidates(
    start: i32,
    end: Option<i32>,
    finder: &impl Abib1Finder,
) -> Result<Vec<FeastCandidate>, AbibError> {
    let mut out = Vec::new();
    scan_years(start, end, |year| {
        let abib1 = finder.abib1_jd(year)?;
        if weekday_number(abib1 + PASSOVER_OFFSET) == 3 {
            out.push(feast_candidate(year, abib1));
        }
        Ok(())
    })?;
    Ok(out)
}

/// Years whose Passover sacrifice falls on the Sabbath.
pub fn jordan_candidates(
    start: i32,
    end: Option<i32>,
    finder: &impl Abib1Finder,
) -> Result<Vec<FeastCandidate>, AbibError> {
    let mut out = Vec::new();
    scan_years(start, end, |year| {
        let abib1 = finder.abib1_jd(year)?;
        if weekday_number(abib1 + PASSOVER_OFFSET) == 6 {
            out.push(feast_candidate(year, abib1));
        }
        Ok(())
    })?;
    Ok(out)
}

/// Years whose Abib 1 falls on Sunday.
pub fn creation_candidates(
    start: i32,
    end: Option<i32>,
    finder: &impl Abib1Finder,
) -> Result<Vec<CreationCandidate>, AbibError> {
    let mut out = Vec::new();
    scan_years(start, end, |year| {
        let abib1 = finder.abib1_jd(year)?;
        if weekday_number(abib1) == 0 {
            out.push(CreationCandidate { year, abib1_jd: abib1 });
        }
        Ok(())
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use abib_calendar::weekday_of;
    use chrono::Weekday;

    #[test]
    fn test_crucifixion_30_ce() {
        let found = crucifixion_candidates(26, Some(36), &CivilAbib1).expect("scan");
        let c = found.iter().find(|c| c.year == 30).expect("30 CE qualifies");
        assert_eq!(c.passover_jd, 1732090.0);
        assert_eq!(weekday_of(c.passover_jd), Weekday::Wed);
        assert_eq!(c.unleavened_start_jd, c.passover_jd + 1.0);
        assert_eq!(c.unleavened_end_jd, c.passover_jd + 7.0);
        // Thursday feast start; the next Sunday is three days on.
        assert_eq!(c.wave_offering_jd, c.passover_jd + 4.0);
        assert_eq!(weekday_of(c.wave_offering_jd), Weekday::Sun);
        assert_eq!(c.pentecost_jd, c.wave_offering_jd + 49.0);
    }

    #[test]
    fn test_jordan_candidates_are_sabbath_passovers() {
        let found = jordan_candidates(-1410, Some(-1390), &CivilAbib1).expect("scan");
        assert!(!found.is_empty());
        for c in &found {
            assert_eq!(weekday_of(c.passover_jd), Weekday::Sat);
            // Sunday opens the feast, so the wave offering is a full week out.
            assert_eq!(c.wave_offering_jd, c.passover_jd + 8.0);
            assert_eq!(weekday_of(c.wave_offering_jd), Weekday::Sun);
        }
    }

    #[test]
    fn test_creation_candidates_are_sunday_abib1() {
        let found = creation_candidates(-4010, Some(-3990), &CivilAbib1).expect("scan");
        assert!(!found.is_empty());
        for c in &found {
            assert_eq!(weekday_of(c.abib1_jd), Weekday::Sun);
        }
    }

    #[test]
    fn test_scan_skips_year_zero() {
        let mut seen = Vec::new();
        scan_years(-2, Some(2), |y| {
            seen.push(y);
            Ok(())
        })
        .expect("scan");
        assert_eq!(seen, vec![-2, -1, 1, 2]);
    }

    #[test]
    fn test_wave_offering_always_sunday_after_feast_start() {
        for offset in 0..7 {
            let passover = 1732090.0 + offset as f64;
            let wave = wave_offering_jd(passover);
            assert_eq!(weekday_of(wave), Weekday::Sun, "offset {offset}");
            assert!(wave > passover + 1.0);
            assert!(wave <= passover + 8.0);
        }
    }

    #[test]
    fn test_default_month_day_17_offsets() {
        let abib1 = CivilAbib1.abib1_jd(2024).expect("anchor");
        assert_eq!(CivilAbib1.month_day_17(2024, 2).expect("m2"), abib1 + 46.0);
        assert_eq!(CivilAbib1.month_day_17(2024, 7).expect("m7"), abib1 + 196.0);
    }
}
