use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// Errors from abib operations.
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum AbibError {
    /// Year input rejected at the boundary (non-finite or otherwise unusable).
    #[error("Invalid year {value}: {reason}")]
    InvalidYear { value: f64, reason: String },

    /// Latitude/longitude/offset outside their valid ranges.
    #[error("Invalid location: {reason}")]
    InvalidLocation { reason: String },

    /// The bounded moonset search did not converge for this lunation.
    #[error("No moonset found within the iteration bound for lunation {lunation}")]
    NoMoonset { lunation: i64 },

    /// No evening of this lunation produced a recordable crescent.
    #[error("No visible crescent found within the evening bound for lunation {lunation}")]
    NoVisibleCrescent { lunation: i64 },

    /// Named location not present in the directory.
    #[error("Unknown location: {name}")]
    UnknownLocation { name: String },
}

impl AbibError {
    /// Creates an `InvalidLocation` error.
    pub fn invalid_location(reason: impl Into<String>) -> Self {
        Self::InvalidLocation { reason: reason.into() }
    }

    /// Creates an `InvalidYear` error.
    pub fn invalid_year(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidYear { value, reason: reason.into() }
    }
}

/// There is no year 0 in this system: callers supplying it get year 1.
pub fn normalize_year(year: i32) -> i32 {
    if year == 0 { 1 } else { year }
}

/// Formats a year with its era suffix ("30 CE", "5 BCE").
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", -year)
    } else {
        format!("{} CE", year)
    }
}

/// A civil (Gregorian) calendar date recovered from a Julian Day number.
///
/// `day` may carry a fractional part from the conversion. There is no year 0:
/// the year before 1 CE is -1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilDate {
    pub month: u32,
    pub day: f64,
    pub year: i32,
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.month, self.day.floor() as i64, self.year)
    }
}

/// Abbreviated civil month names, indexed 1-12.
pub static MONTH_ABBREV: [&str; 13] = [
    "", "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// An observer location.
///
/// Sign convention is fixed here and nowhere else: positive latitude is North,
/// positive longitude is East, `utc_offset_hours` is the signed zone offset
/// (Jerusalem is +2, New York is -5). The historical engine frame (west-positive
/// degrees, date-line hour) is derived in [`Location::engine_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
}

/// Location constants precomputed into the calculation engine's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineFrame {
    /// Latitude in radians.
    pub lat_rad: f64,
    /// West-positive longitude as a fraction of a full day.
    pub lon_frac: f64,
    /// Local clock adjustment in hours (longitude residual past the zone meridian).
    pub clock_adjust: f64,
}

const DEG_TO_RAD: f64 = 0.01745329251993;

impl Location {
    /// Validates and constructs a location.
    ///
    /// # Errors
    /// Returns `InvalidLocation` for non-finite values, |latitude| > 90,
    /// |longitude| > 180, or |offset| > 14.
    pub fn new(latitude: f64, longitude: f64, utc_offset_hours: f64) -> Result<Self, AbibError> {
        if !latitude.is_finite() || !longitude.is_finite() || !utc_offset_hours.is_finite() {
            return Err(AbibError::invalid_location("coordinates must be finite"));
        }
        if latitude.abs() > 90.0 {
            return Err(AbibError::invalid_location(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if longitude.abs() > 180.0 {
            return Err(AbibError::invalid_location(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        if utc_offset_hours.abs() > 14.0 {
            return Err(AbibError::invalid_location(format!(
                "UTC offset {utc_offset_hours} outside [-14, 14]"
            )));
        }
        Ok(Self { latitude, longitude, utc_offset_hours })
    }

    /// Jerusalem, the documented default for feast calculations.
    pub fn jerusalem() -> Self {
        Self { latitude: 31.78, longitude: 35.244, utc_offset_hours: 2.0 }
    }

    /// The Eden seed location used by Creation candidate scans.
    pub fn eden() -> Self {
        Self { latitude: 38.5, longitude: 42.0, utc_offset_hours: 2.0 }
    }

    /// Mount Ararat, the seed location for the Flood table.
    pub fn ararat() -> Self {
        Self { latitude: 39.69, longitude: 44.32, utc_offset_hours: 2.0 }
    }

    /// Converts into the engine's historical frame.
    ///
    /// The calculation series use west-positive longitude and a "date line
    /// hour" of `12 + offset`; this is the single place that conversion
    /// happens.
    pub fn engine_frame(&self) -> EngineFrame {
        let west_deg = -self.longitude;
        let dateline_hour = 12.0 - (12.0 + self.utc_offset_hours);
        EngineFrame {
            lat_rad: self.latitude * DEG_TO_RAD,
            lon_frac: west_deg / 360.0,
            clock_adjust: (west_deg - dateline_hour * 15.0) * 0.066667,
        }
    }
}

/// Crescent visibility confidence, classified from the visibility index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisibilityTier {
    NotVisible,
    ProbablyNotVisible,
    ProbablyVisible,
    Visible,
}

impl VisibilityTier {
    /// Classifies a visibility index. Boundaries are exact: 88, 100 and 112
    /// each belong to the lower tier.
    pub fn from_index(index: f64) -> Self {
        if index <= 88.0 {
            Self::NotVisible
        } else if index <= 100.0 {
            Self::ProbablyNotVisible
        } else if index <= 112.0 {
            Self::ProbablyVisible
        } else {
            Self::Visible
        }
    }

    /// Days from the observed evening to the recorded month start, or `None`
    /// when the search must retry the next evening.
    pub fn month_start_offset(&self) -> Option<i64> {
        match self {
            Self::NotVisible => None,
            Self::ProbablyNotVisible => Some(2),
            Self::ProbablyVisible | Self::Visible => Some(1),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible)
    }

    /// True when this evening ends the search for the lunation.
    pub fn records_month_start(&self) -> bool {
        self.month_start_offset().is_some()
    }
}

impl fmt::Display for VisibilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NotVisible => "Not Visible",
            Self::ProbablyNotVisible => "Prob Not Visible",
            Self::ProbablyVisible => "Prob Visible",
            Self::Visible => "Visible",
        };
        write!(f, "{}", s)
    }
}

/// One evening's crescent observation at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EveningObservation {
    /// Integer Julian Day under search.
    pub day_jd: f64,
    pub date: CivilDate,
    /// Local sunset clock time.
    pub sunset: NaiveTime,
    /// Local moonset clock time.
    pub moonset: NaiveTime,
    /// Moonset minus sunset, minutes.
    pub lag_minutes: f64,
    /// Illuminated fraction of the disc, percent.
    pub illumination_pct: f64,
    /// Sun azimuth at sunset, degrees.
    pub sun_azimuth: f64,
    /// Moon azimuth at sunset, degrees in [0, 360).
    pub moon_azimuth: f64,
    /// Moon altitude at sunset, degrees.
    pub moon_altitude: f64,
    /// Sun altitude at moonset, degrees.
    pub sun_altitude_at_moonset: f64,
    pub visibility_index: f64,
    pub tier: VisibilityTier,
}

/// The search record for one lunation: the new-moon estimate, every evening
/// examined, and the month start once an evening classifies above the
/// Not Visible tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarMonthObservation {
    /// Sequential lunation count since the fixed 1900 epoch.
    pub lunation: i64,
    pub estimated_new_moon_jd: f64,
    pub evenings: SmallVec<[EveningObservation; 4]>,
    pub month_start_jd: Option<f64>,
}

impl LunarMonthObservation {
    /// The evening whose classification ended the search, if any.
    pub fn decisive(&self) -> Option<&EveningObservation> {
        self.evenings.iter().find(|e| e.tier.records_month_start())
    }
}

/// A qualifying year from a Crucifixion or Jordan-crossing scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeastCandidate {
    pub year: i32,
    pub abib1_jd: f64,
    pub passover_jd: f64,
    /// Feast of Unleavened Bread, inclusive span.
    pub unleavened_start_jd: f64,
    pub unleavened_end_jd: f64,
    pub wave_offering_jd: f64,
    pub pentecost_jd: f64,
}

/// A qualifying year from a Creation scan (Abib 1 on Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreationCandidate {
    pub year: i32,
    pub abib1_jd: f64,
}

/// Flood duration bucket for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloodBucket {
    /// Exactly 150 days between 2nd-month-17 and 7th-month-17.
    Exact150,
    /// 149 days, reaching 150 with one extra day.
    Plus1,
    /// 148 days, reaching 150 with two extra days.
    Plus2,
    /// No combination reaches 150 days.
    None,
}

impl fmt::Display for FloodBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Exact150 => "150 days",
            Self::Plus1 => "149(+1)",
            Self::Plus2 => "148(+2)",
            Self::None => "none",
        };
        write!(f, "{}", s)
    }
}

/// One year of the Flood table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloodYear {
    pub year: i32,
    pub second_month_17_jd: f64,
    pub seventh_month_17_jd: f64,
    pub days_between: i64,
    pub bucket: FloodBucket,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validation() {
        assert!(Location::new(31.78, 35.244, 2.0).is_ok());
        assert!(matches!(
            Location::new(95.0, 0.0, 0.0),
            Err(AbibError::InvalidLocation { .. })
        ));
        assert!(matches!(
            Location::new(0.0, 200.0, 0.0),
            Err(AbibError::InvalidLocation { .. })
        ));
        assert!(matches!(
            Location::new(f64::NAN, 0.0, 0.0),
            Err(AbibError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_engine_frame_jerusalem() {
        let frame = Location::jerusalem().engine_frame();
        // West-positive degrees past the +2 zone meridian, as hours.
        assert!((frame.clock_adjust - (-35.244 + 30.0) * 0.066667).abs() < 1e-12);
        assert!((frame.lon_frac - (-35.244 / 360.0)).abs() < 1e-12);
        assert!(frame.lat_rad > 0.5 && frame.lat_rad < 0.6);
    }

    #[test]
    fn test_tier_boundaries_exact() {
        assert_eq!(VisibilityTier::from_index(88.0), VisibilityTier::NotVisible);
        assert_eq!(VisibilityTier::from_index(88.0001), VisibilityTier::ProbablyNotVisible);
        assert_eq!(VisibilityTier::from_index(100.0), VisibilityTier::ProbablyNotVisible);
        assert_eq!(VisibilityTier::from_index(100.0001), VisibilityTier::ProbablyVisible);
        assert_eq!(VisibilityTier::from_index(112.0), VisibilityTier::ProbablyVisible);
        assert_eq!(VisibilityTier::from_index(112.0001), VisibilityTier::Visible);
    }

    #[test]
    fn test_year_normalization() {
        assert_eq!(normalize_year(0), 1);
        assert_eq!(normalize_year(-5), -5);
        assert_eq!(format_year(-5), "5 BCE");
        assert_eq!(format_year(30), "30 CE");
    }
}
