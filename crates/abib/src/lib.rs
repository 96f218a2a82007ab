//! # Abib
//!
//! A Biblical-calendar calculation engine: exact Gregorian/Julian-Day
//! conversion, the Hebrew (Metonic) calendar with its postponement rules, a
//! first-crescent-moon visibility search, and the feast derivations built on
//! top of them (Crucifixion, Jordan crossing, Creation, the Flood table).
//!
//! This crate is a facade that re-exports the `abib` ecosystem.
//!
//! ## Modules
//!
//! - `abib-types`: core types (Location, VisibilityTier, FeastCandidate, ...)
//! - `abib-calendar`: Julian Day and Hebrew calendar conversion
//! - `abib-astronomy`: solar/lunar series and the visibility engine
//! - `abib-feasts`: feast-date scans over year ranges
//!
//! ## Usage
//!
//! ```rust
//! use abib::prelude::*;
//!
//! let engine = VisibilityEngine::new(Location::jerusalem());
//! let observed = engine.observe_year(2024); // Result<LunarYear, AbibError>
//! ```

pub use abib_core::*;
