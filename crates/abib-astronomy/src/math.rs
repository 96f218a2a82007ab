//! Numeric helpers shared by the position series.
//!
//! The series carry their historical constants: a truncated pi, inverse trig
//! built from `atan` identities, and the radians-to-hours factor in two
//! slightly different precisions (the equation of time uses the shorter one).

pub const PI: f64 = 3.14159265358979;
pub const DR: f64 = 0.01745329251993;
pub const HALF_PI: f64 = 1.570796326795;
/// Radians to hours (12/pi), full precision used by the hour-angle paths.
pub const RAD_TO_HOURS: f64 = 3.8197186342055;
/// Radians to hours as used by the equation-of-time term.
pub const RAD_TO_HOURS_ET: f64 = 3.819718634;

/// Reduces an angle in degrees into [0, 360).
pub fn norm360(x: f64) -> f64 {
    x - (x / 360.0).floor() * 360.0
}

/// Arcsine via the `atan(x / sqrt(1 - x^2))` identity, argument clamped so
/// floating round-off just outside [-1, 1] cannot raise a domain fault.
pub fn arc_sin(x: f64) -> f64 {
    let x = x.clamp(-1.0, 1.0);
    (x / (1.0 - x * x).sqrt()).atan()
}

/// Arccosine built on [`arc_sin`], matching the series' `-atan(...) + pi/2` form.
pub fn arc_cos(x: f64) -> f64 {
    -arc_sin(x) + HALF_PI
}

/// Quadrant correction for an angle recovered as `atan(sin_term / cos_term)`.
///
/// Required for azimuth and right ascension: the raw arctangent collapses
/// opposite quadrants, so the signs of the numerator and denominator decide
/// the +pi / +2pi adjustment that puts the result in [0, 2pi).
pub fn quadrant_correct(angle: f64, sin_term: f64, cos_term: f64) -> f64 {
    if cos_term < 0.0 {
        angle + PI
    } else if sin_term < 0.0 {
        angle + 2.0 * PI
    } else {
        angle
    }
}
