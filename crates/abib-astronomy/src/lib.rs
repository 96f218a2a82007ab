//! Solar and lunar position series and the first-crescent visibility engine.
//!
//! The series are low-order trigonometric expansions on the 1900.0 epoch,
//! evaluated per event rather than per ephemeris step. [`VisibilityEngine`]
//! drives them: for each lunation it estimates the conjunction, walks
//! evenings computing sunset, moonset and illumination, and classifies each
//! evening into a [`abib_types::VisibilityTier`].

pub mod math;
pub mod lunar;
pub mod solar;
pub mod visibility;

pub use lunar::LunarSeries;
pub use solar::SolarSeries;
pub use visibility::{
    LunarYear, NewMoonEpoch, VisibilityEngine, CALENDAR_REFORM_JD,
};
