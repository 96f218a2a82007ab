//! First-crescent visibility search.
//!
//! For each lunation: estimate the new-moon instant, then walk evenings
//! forward from it. Each evening computes local sunset, a two-pass moonset
//! refinement, the illuminated fraction, the Moon's azimuth and altitude at
//! sunset and the Sun's depression at moonset, and folds them into a single
//! visibility index:
//!
//! ```text
//! index = (lag + illum * 27 + altitude * 5.5 - sun_alt * 5) / 1.7
//! ```
//!
//! An index at or below 88 means the crescent was not seen and the search
//! moves to the next evening. Above 88 the evening is decisive and the month
//! start is the evening's day plus one (plus two in the 88-100 band, where the
//! crescent probably needed an extra night).

use chrono::NaiveTime;
use smallvec::SmallVec;

use abib_types::{AbibError, CivilDate, EngineFrame, EveningObservation, Location,
    LunarMonthObservation, VisibilityTier};

use crate::math::{arc_cos, arc_sin, norm360, quadrant_correct, DR, PI, RAD_TO_HOURS};
use crate::lunar::LunarSeries;
use crate::solar::SolarSeries;

/// Gregorian-reform boundary. Below it the dynamical-time century constants
/// take their pre-reform values.
pub const CALENDAR_REFORM_JD: f64 = 1_483_746.0;

/// Moonset refinement passes before giving up on the lunation.
const MOONSET_PASS_CAP: usize = 10;

/// Evenings examined per lunation before giving up. A real crescent is seen
/// within a few days of conjunction; this bound only trips on degenerate
/// inputs (polar latitudes).
const EVENING_CAP: usize = 15;

/// New-moon instant estimated from the lunation count (epoch 1900 January,
/// lunation 0), with the day split the evening walk starts from.
#[derive(Debug, Clone, Copy)]
pub struct NewMoonEpoch {
    /// Estimated conjunction, Julian Day.
    pub jd: f64,
    /// Integer day the evening walk starts on.
    pub ji: f64,
    /// Fractional day carried into the civil-date readout.
    pub jf: f64,
    /// Dynamical-time correction, days.
    pub dt: f64,
}

impl NewMoonEpoch {
    /// Low-precision conjunction estimate for a lunation number.
    pub fn estimate(lunation: i64) -> Self {
        let ln = lunation as f64;
        let ct = ln / 1236.85;
        let ct2 = ct * ct;
        let ct3 = ct2 * ct;

        let s = norm360(166.56 + 132.87 * ct - 0.009173 * ct2);
        let mut jd = 2415020.75933 + 29.53058868 * ln + 0.0001178 * ct2 - 0.000000155 * ct3
            + 0.00033 * (s * DR).sin();

        let sa = norm360(359.2242 + 29.10535608 * ln - 0.0000333 * ct2 - 0.00000347 * ct3) * DR;
        let ma = norm360(306.0253 + 385.816918 * ln + 0.0107306 * ct2 + 0.00001236 * ct3) * DR;
        let ml = norm360(21.2964 + 390.6705065 * ln - 0.0016528 * ct2 - 0.00000239 * ct3) * DR;

        let mut ad = (0.1734 - 0.000393 * ct) * sa.sin() + 0.0021 * (2.0 * sa).sin()
            - 0.4068 * ma.sin();
        ad = ad + 0.0161 * (2.0 * ma).sin() - 0.0004 * (3.0 * ma).sin() + 0.0104 * (2.0 * ml).sin();
        ad = ad - 0.0051 * (sa + ma).sin() - 0.0074 * (sa - ma).sin()
            + 0.0004 * (2.0 * ml + sa).sin();
        ad = ad - 0.0004 * (2.0 * ml - sa).sin() - 0.0006 * (2.0 * ml + ma).sin();
        ad = ad + 0.001 * (2.0 * ml - ma).sin() + 0.0005 * (sa + 2.0 * ma).sin();
        jd += ad;

        if jd < CALENDAR_REFORM_JD {
            jd -= 0.02778;
        }

        let dt = (0.41 + 1.2053 * ct + 0.4992 * ct2) / 1440.0;
        let raw = jd - dt;
        let jf = raw - raw.floor();
        let mut ji = raw.floor();
        // A conjunction late in the day belongs to the next evening.
        if jf > 0.7 {
            ji += 1.0;
        }

        Self { jd, ji, jf, dt }
    }
}

/// A full observation year: every lunation searched, with the first recorded
/// month start kept for calendar anchoring.
#[derive(Debug, Clone, PartialEq)]
pub struct LunarYear {
    pub year: i32,
    pub months: SmallVec<[LunarMonthObservation; 14]>,
    /// Month start of the year's first lunation.
    pub first_month_jd: Option<f64>,
}

/// One moonset refinement pass: the hour angles and sidereal terms needed to
/// turn a lunar position into a local setting time.
#[derive(Debug, Clone, Copy)]
struct MoonsetPass {
    /// Moon declination, radians.
    decl: f64,
    /// Right ascension as hours, quadrant-corrected.
    ra_hours: f64,
    /// Sidereal time at the day's start, hours mod 24.
    sidereal: f64,
    /// Setting hour before the clock adjustment.
    hw: f64,
    /// Local clock hour of moonset.
    hv: f64,
    /// Moonset hour and minute, floored.
    ho: f64,
    hq: f64,
    /// Lunar terms the illumination formula needs.
    longitude: f64,
    latitude: f64,
    moon_anomaly: f64,
    sun_anomaly: f64,
}

/// Snapshot of the first moonset pass: the classification formulas read the
/// Moon where it stood at the sunset-derived estimate, not at the refined
/// setting time.
#[derive(Debug, Clone, Copy)]
struct PassSnapshot {
    longitude: f64,
    latitude: f64,
    moon_anomaly: f64,
    sun_anomaly: f64,
    decl: f64,
    ra_hours: f64,
    sidereal: f64,
}

impl PassSnapshot {
    fn capture(pass: &MoonsetPass) -> Self {
        Self {
            longitude: pass.longitude,
            latitude: pass.latitude,
            moon_anomaly: pass.moon_anomaly,
            sun_anomaly: pass.sun_anomaly,
            decl: pass.decl,
            ra_hours: pass.ra_hours,
            sidereal: pass.sidereal,
        }
    }
}

/// Crescent visibility engine for one observer location.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityEngine {
    location: Location,
    frame: EngineFrame,
}

impl VisibilityEngine {
    pub fn new(location: Location) -> Self {
        let frame = location.engine_frame();
        Self { location, frame }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// First lunation number whose conjunction falls near the start of the
    /// given year (no year 0; negative years are BCE).
    pub fn starting_lunation(year: i32) -> i64 {
        let ly = year as f64 + 0.256;
        if ly >= 0.0 {
            ((ly - 1900.0) * 12.368277).floor() as i64
        } else {
            ((ly - 1899.0) * 12.368277).floor() as i64
        }
    }

    /// Searches all fourteen lunations of a year.
    ///
    /// Years are limited to four digits, the range the new-moon polynomial is
    /// tabulated for.
    pub fn observe_year(&self, year: i32) -> Result<LunarYear, AbibError> {
        if !(-9999..=9999).contains(&year) {
            return Err(AbibError::invalid_year(year as f64, "outside [-9999, 9999]"));
        }
        let year = abib_types::normalize_year(year);
        let start = Self::starting_lunation(year);

        let mut months = SmallVec::new();
        let mut first_month_jd = None;
        for k in 0..14 {
            let month = self.observe_lunation(start + k)?;
            if first_month_jd.is_none() {
                first_month_jd = month.month_start_jd;
            }
            months.push(month);
        }

        Ok(LunarYear { year, months, first_month_jd })
    }

    /// Searches one lunation evening by evening until a decisive tier.
    pub fn observe_lunation(&self, lunation: i64) -> Result<LunarMonthObservation, AbibError> {
        let epoch = NewMoonEpoch::estimate(lunation);
        let mut ji = epoch.ji;

        let mut month = LunarMonthObservation {
            lunation,
            estimated_new_moon_jd: epoch.jd,
            evenings: SmallVec::new(),
            month_start_jd: None,
        };

        for _ in 0..EVENING_CAP {
            let obs = self.observe_evening(lunation, ji, epoch.jf, epoch.dt)?;
            let tier = obs.tier;
            month.evenings.push(obs);
            if let Some(offset) = tier.month_start_offset() {
                month.month_start_jd = Some(ji + offset as f64);
                return Ok(month);
            }
            ji += 1.0;
        }

        Err(AbibError::NoVisibleCrescent { lunation })
    }

    /// Evaluates one evening: sunset, moonset, illumination, the index.
    fn observe_evening(
        &self,
        lunation: i64,
        ji: f64,
        jf: f64,
        dt: f64,
    ) -> Result<EveningObservation, AbibError> {
        let frame = &self.frame;
        let pre_reform = ji < CALENDAR_REFORM_JD;
        let century_bias = if pre_reform { 0.2222 } else { 0.25 };
        let moonset_epoch = if pre_reform { 2415020.0278 } else { 2415020.0 };

        let date = evening_civil_date(ji, jf);

        // Sunset from the solar series at the day's noon estimate.
        let jt_sunset = (ji + frame.lon_frac + century_bias + dt - 2415020.0) / 36525.0;
        let sun = SolarSeries::at(jt_sunset);
        let decl = sun.declination;
        let h1 = (-0.01454 - frame.lat_rad.sin() * decl.sin())
            / (frame.lat_rad.cos() * decl.cos());
        let hs = arc_cos(h1) * RAD_TO_HOURS - sun.equation_of_time;
        let hl = hs + frame.clock_adjust + 0.00833333333;
        let ht = hl.floor();
        let hm = ((hl - ht) * 60.0).floor();

        let sun_azimuth = arc_cos(-(decl.sin() / frame.lat_rad.cos())) / DR;

        // Moonset: a first pass at the sunset-derived instant, whose lunar
        // terms are the classification snapshot, then a refinement at the
        // setting hour the first pass produced.
        let mut jt = (ji + hs / 24.0 + dt + frame.lon_frac - moonset_epoch) / 36525.0;
        let mut pass = self.moonset_pass(jt, ji, dt);
        let mut snapshot = PassSnapshot::capture(&pass);
        let mut refined = None;
        for _ in 0..MOONSET_PASS_CAP {
            let hour_frac = pass.hw / 24.0;
            jt = (ji + hour_frac + dt + frame.lon_frac - moonset_epoch) / 36525.0;
            let next = self.moonset_pass(jt, ji, dt);
            if hour_frac != 0.0 {
                refined = Some(next);
                break;
            }
            snapshot = PassSnapshot::capture(&next);
            pass = next;
        }
        let Some(pass) = refined else {
            return Err(AbibError::NoMoonset { lunation });
        };

        let lag_minutes = (pass.ho * 60.0 + pass.hq) - (ht * 60.0 + hm);

        // Illuminated fraction from the sunset-epoch elongation.
        let di = arc_cos((snapshot.longitude - sun.apparent_longitude).cos()
            * snapshot.latitude.cos());
        let phase = PI
            - di
            - (0.1468
                * ((1.0 - 0.0549 * snapshot.moon_anomaly.sin())
                    / (1.0 - 0.0167 * snapshot.sun_anomaly.sin()))
                * DR)
                * di.sin();
        let illumination_pct = ((1.0 + phase.cos()) / 2.0 * 10000.0).round() / 100.0;

        // Moon azimuth and altitude at sunset, from the snapshot position.
        let hour_angle = (snapshot.sidereal + (hl + 12.0) * 1.002737908
            - frame.clock_adjust
            - snapshot.ra_hours)
            / RAD_TO_HOURS;
        let az_sin = hour_angle.sin();
        let az_cos = hour_angle.cos() * frame.lat_rad.sin()
            - snapshot.decl.tan() * frame.lat_rad.cos();
        let moon_azimuth = quadrant_correct((az_sin / az_cos).atan(), az_sin, az_cos) / DR;
        let alt_sin = frame.lat_rad.sin() * snapshot.decl.sin()
            + frame.lat_rad.cos() * snapshot.decl.cos() * hour_angle.cos();
        let moon_altitude = (arc_sin(alt_sin) / DR * 10000.0).floor() / 10000.0;

        // Sun altitude at moonset, solar series re-evaluated at the refined
        // instant. The +1.75 degree bias is the engine's twilight convention.
        let sun_at_moonset = SolarSeries::at(jt);
        let has = (pass.sidereal + (pass.hv + 12.0) * 1.002737908
            - frame.clock_adjust
            - sun_at_moonset.right_ascension_hours())
            / RAD_TO_HOURS;
        let ds = sun_at_moonset.declination;
        let depth = frame.lat_rad.sin() * ds.sin()
            + frame.lat_rad.cos() * ds.cos() * has.cos();
        let sun_altitude_at_moonset =
            ((arc_sin(depth) / DR + 1.75) * 10000.0).floor() / 10000.0;

        let visibility_index = (lag_minutes + illumination_pct * 27.0 + moon_altitude * 5.5
            - sun_altitude_at_moonset * 5.0)
            / 1.7;
        let tier = VisibilityTier::from_index(visibility_index);

        Ok(EveningObservation {
            day_jd: ji,
            date,
            sunset: clock_time(ht, hm),
            moonset: clock_time(pass.ho, pass.hq),
            lag_minutes,
            illumination_pct,
            sun_azimuth,
            moon_azimuth,
            moon_altitude,
            sun_altitude_at_moonset,
            visibility_index,
            tier,
        })
    }

    /// One moonset pass: lunar position at `jt`, declination, rising/setting
    /// hour angle with the parallax-and-semidiameter horizon, sidereal hour.
    fn moonset_pass(&self, jt: f64, ji: f64, dt: f64) -> MoonsetPass {
        let frame = &self.frame;
        let moon = LunarSeries::at(jt);
        // The lunar declination reuses the solar obliquity at the same epoch.
        let obliquity = SolarSeries::at(jt).obliquity;

        let d7 = moon.latitude.sin() * obliquity.cos()
            + moon.latitude.cos() * obliquity.sin() * moon.longitude.sin();
        let decl = arc_sin(d7);

        let hz = (((0.7275 * moon.parallax - 0.5666667) * DR)
            - frame.lat_rad.sin() * decl.sin())
            / (frame.lat_rad.cos() * decl.cos());
        let mut hw = arc_cos(hz) * RAD_TO_HOURS;

        let ra_sin = moon.longitude.sin() * obliquity.cos()
            - moon.latitude.tan() * obliquity.sin();
        let ra_cos = moon.longitude.cos();
        let ra_hours =
            quadrant_correct((ra_sin / ra_cos).atan(), ra_sin, ra_cos) * RAD_TO_HOURS;

        let kt = (ji - 2415019.5) / 36525.0;
        let s4 = 6.6460656 + 2400.051262 * kt + 0.00002581 * kt * kt;
        let sidereal = s4 - (s4 / 24.0).floor() * 24.0;

        let mut transit = 12.0 + sidereal - ra_hours - 0.065712 * dt;
        transit = if transit > 0.0 { 24.0 - transit } else { -transit };

        hw = hw + transit + 0.0241666666;
        if hw > 24.0 {
            hw -= 24.0;
        }
        let mut hv = hw + frame.clock_adjust;
        if hv > 24.0 {
            hv -= 24.0;
        }
        let hq = ((hv - hv.floor()) * 60.0).floor();
        let ho = hv.floor();

        MoonsetPass {
            decl,
            ra_hours,
            sidereal,
            hw,
            hv,
            ho,
            hq,
            longitude: moon.longitude,
            latitude: moon.latitude,
            moon_anomaly: moon.moon_anomaly,
            sun_anomaly: moon.sun_anomaly,
        }
    }

    /// Local sunset clock time on a whole Julian Day, outside any lunation
    /// context (no dynamical-time correction).
    pub fn sunset_time(&self, jd: f64) -> NaiveTime {
        let frame = &self.frame;
        let ji = jd.floor();
        let century_bias = if ji < CALENDAR_REFORM_JD { 0.2222 } else { 0.25 };
        let jt = (ji + frame.lon_frac + century_bias - 2415020.0) / 36525.0;
        let sun = SolarSeries::at(jt);
        let decl = sun.declination;
        let h1 = (-0.01454 - frame.lat_rad.sin() * decl.sin())
            / (frame.lat_rad.cos() * decl.cos());
        let hs = arc_cos(h1) * RAD_TO_HOURS - sun.equation_of_time;
        let hl = hs + frame.clock_adjust + 0.00833333333;
        clock_time(hl.floor(), ((hl - hl.floor()) * 60.0).floor())
    }
}

/// Civil date of the evening under search: the Meeus inverse driven by the
/// integer day with the conjunction's fractional part folded into the day
/// field. Years before 1 CE come out negative (no year 0).
fn evening_civil_date(ji: f64, jf: f64) -> CivilDate {
    let mut h = ((ji - 1867216.25) / 36524.25).floor();
    h = ji + 1.0 + h - (h / 4.0).floor();
    let b = h + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let g = (365.25 * c).floor();
    let e = ((b - g) / 30.6001).floor();
    let day = b - g - (30.6001 * e).floor() + jf;

    let month = if e < 13.5 { e - 1.0 } else { e - 13.0 };
    let mut year = if month > 2.5 { c - 4716.0 } else { c - 4715.0 };
    if year < 1.0 {
        year -= 1.0;
    }

    CivilDate { month: month as u32, day, year: year as i32 }
}

/// The search computes hours past local noon; shift by twelve to get the
/// clock time the observation carries.
fn clock_time(hours: f64, minutes: f64) -> NaiveTime {
    let h = (hours as i64 + 12).rem_euclid(24) as u32;
    let m = (minutes as i64).rem_euclid(60) as u32;
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}
