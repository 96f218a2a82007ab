//! Apparent solar position, low-order trigonometric series.
//!
//! Evaluated once per event (sunset, then again at the moonset estimate for
//! the twilight altitude); not an observatory-grade ephemeris, the fixed
//! precision here is this application's contract.

use crate::math::{arc_sin, norm360, quadrant_correct, DR, RAD_TO_HOURS, RAD_TO_HOURS_ET};

/// Solar terms at one Julian-century fraction.
#[derive(Debug, Clone, Copy)]
pub struct SolarSeries {
    /// Ascending node of the Moon's orbit, radians (drives the nutation terms).
    pub node: f64,
    /// True obliquity of the ecliptic with its nutation term, radians.
    pub obliquity: f64,
    /// Sun's mean longitude, radians.
    pub mean_longitude: f64,
    /// Sun's mean anomaly, radians.
    pub mean_anomaly: f64,
    /// Sun's apparent longitude, radians.
    pub apparent_longitude: f64,
    /// Equation of time, hours.
    pub equation_of_time: f64,
    /// Apparent declination, radians.
    pub declination: f64,
}

impl SolarSeries {
    /// Evaluates the series at Julian-century fraction `jt` (1900.0 epoch).
    pub fn at(jt: f64) -> Self {
        let jt2 = jt * jt;
        let jt3 = jt2 * jt;

        let node = (259.18 - 1934.142 * jt) * DR;
        let obliquity = (23.452294 - 0.0130125 * jt - 0.00000164 * jt2 + 0.000000503 * jt3
            + 0.00256 * node.cos())
            * DR;

        // Perturbations by Venus, Earth-Venus, Jupiter, the Moon and a
        // long-period term.
        let a9 = norm360(153.23 + 22518.7541 * jt) * DR;
        let b9 = norm360(216.57 + 45037.5082 * jt) * DR;
        let c9 = norm360(312.69 + 32964.3577 * jt) * DR;
        let d9 = norm360(350.74 + 445267.1142 * jt - 0.00144 * jt2) * DR;
        let e9 = norm360(231.19 + 20.2 * jt) * DR;

        let mean_longitude = norm360(279.69668 + 36000.76892 * jt + 0.0003025 * jt2) * DR;
        let mean_anomaly =
            norm360(358.47583 + 35999.04975 * jt - 0.00015 * jt2 - 0.0000033 * jt3) * DR;
        let eccentricity = 0.01675104 - 0.0000418 * jt - 0.000000126 * jt2;

        let yu = (obliquity / 2.0).tan().powi(2);
        let mut et = yu * (2.0 * mean_longitude).sin() - 2.0 * eccentricity * mean_anomaly.sin()
            + 4.0 * eccentricity * yu * mean_anomaly.sin() * (2.0 * mean_longitude).cos();
        et = (et
            - 0.5 * yu * yu * (4.0 * mean_longitude).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * mean_anomaly).sin())
            * RAD_TO_HOURS_ET;

        let mut center = (1.91946 - 0.004789 * jt - 0.000014 * jt2) * mean_anomaly.sin();
        center = (center
            + (0.020094 - 0.0001 * jt) * (2.0 * mean_anomaly).sin()
            + 0.000293 * (3.0 * mean_anomaly).sin())
            * DR;

        let apparent_longitude = mean_longitude
            + center
            + (0.00134 * a9.cos() + 0.00154 * b9.cos() + 0.002 * c9.cos() + 0.00179 * d9.sin()
                + 0.00178 * e9.sin()
                - 0.00569
                - 0.00479 * node.sin())
                * DR;

        let sd = obliquity.sin() * apparent_longitude.sin();
        let declination = arc_sin(sd);

        Self {
            node,
            obliquity,
            mean_longitude,
            mean_anomaly,
            apparent_longitude,
            equation_of_time: et,
            declination,
        }
    }

    /// Apparent right ascension in hours, quadrant-corrected into [0, 24).
    pub fn right_ascension_hours(&self) -> f64 {
        let sin_term = self.obliquity.cos() * self.apparent_longitude.sin();
        let cos_term = self.apparent_longitude.cos();
        let ra = (sin_term / cos_term).atan();
        quadrant_correct(ra, sin_term, cos_term) * RAD_TO_HOURS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declination_bounded_by_obliquity() {
        // One sample per month across a year near J2000.
        for k in 0..12 {
            let jt = (36525.0 + 30.0 * k as f64) / 36525.0;
            let s = SolarSeries::at(jt);
            assert!(s.declination.abs() <= s.obliquity + 1e-6, "sample {k}");
        }
    }

    #[test]
    fn test_equation_of_time_magnitude() {
        // |EoT| never exceeds ~17 minutes (0.283 hours).
        for k in 0..24 {
            let jt = (k as f64 * 15.0) / 36525.0 + 1.0;
            let s = SolarSeries::at(jt);
            assert!(s.equation_of_time.abs() < 0.3, "sample {k}: {}", s.equation_of_time);
        }
    }

    #[test]
    fn test_right_ascension_range() {
        for k in 0..40 {
            let jt = 0.9 + k as f64 * 0.002;
            let ra = SolarSeries::at(jt).right_ascension_hours();
            assert!((0.0..24.0).contains(&ra), "sample {k}: {ra}");
        }
    }

    #[test]
    fn test_solstice_declination_sign() {
        // jt chosen near a June solstice (2000-06-21 ~ JD 2451717,
        // jt = (2451717 - 2415020) / 36525).
        let jt = (2451717.0 - 2415020.0) / 36525.0;
        let june = SolarSeries::at(jt);
        assert!(june.declination > 0.39, "june declination {}", june.declination);
        // Half a year later the sign flips.
        let dec = SolarSeries::at(jt + 182.6 / 36525.0);
        assert!(dec.declination < -0.39, "december declination {}", dec.declination);
    }
}
