//! Flood-duration table.
//!
//! Genesis gives 150 days between the 17th of the 2nd month and the 17th of
//! the 7th month. For each year of a range this scan computes both dates,
//! takes the difference, and buckets the year: an exact 150, a 149 that
//! reaches 150 with one extra day, a 148 that needs two, or none.

use abib_types::{normalize_year, AbibError, FloodBucket, FloodYear};

use crate::Abib1Finder;

/// Earliest year the table accepts.
pub const FLOOD_YEAR_FLOOR: i32 = -4004;
/// Latest year the table accepts.
pub const FLOOD_YEAR_CEIL: i32 = 9999;

/// The bucketed scan result for a year range.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodTable {
    pub start_year: i32,
    pub end_year: i32,
    pub years: Vec<FloodYear>,
}

impl FloodTable {
    pub fn exact_150(&self) -> impl Iterator<Item = &FloodYear> {
        self.years.iter().filter(|y| y.bucket == FloodBucket::Exact150)
    }

    pub fn plus_one(&self) -> impl Iterator<Item = &FloodYear> {
        self.years.iter().filter(|y| y.bucket == FloodBucket::Plus1)
    }

    pub fn plus_two(&self) -> impl Iterator<Item = &FloodYear> {
        self.years.iter().filter(|y| y.bucket == FloodBucket::Plus2)
    }
}

fn bucket_for(days: i64) -> FloodBucket {
    match days {
        150 => FloodBucket::Exact150,
        149 => FloodBucket::Plus1,
        148 => FloodBucket::Plus2,
        _ => FloodBucket::None,
    }
}

/// Builds the Flood table over an inclusive year range.
///
/// The range is clamped to [-4004, 9999], an end of 0 becomes -1, and a
/// reversed range is swapped before scanning.
pub fn flood_table(
    start: i32,
    end: Option<i32>,
    finder: &impl Abib1Finder,
) -> Result<FloodTable, AbibError> {
    let mut start = start;
    let mut end = end.unwrap_or(start);
    if end < FLOOD_YEAR_FLOOR {
        end = FLOOD_YEAR_FLOOR;
    }
    if end == 0 {
        end = -1;
    }
    if end > FLOOD_YEAR_CEIL {
        end = FLOOD_YEAR_CEIL;
    }
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }

    let mut years = Vec::new();
    let mut y = start;
    while y <= end {
        let year = normalize_year(y);
        let second = finder.month_day_17(year, 2)?;
        let seventh = finder.month_day_17(year, 7)?;
        let days = (seventh - second) as i64;
        years.push(FloodYear {
            year,
            second_month_17_jd: second,
            seventh_month_17_jd: seventh,
            days_between: days,
            bucket: bucket_for(days),
        });
        y = year + 1;
    }

    Ok(FloodTable { start_year: start, end_year: end, years })
}
