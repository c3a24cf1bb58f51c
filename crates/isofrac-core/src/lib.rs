//! Core types and thermodynamic helpers for water isotope fractionation models
//!
//! This crate holds the pieces shared by every process component:
//!
//! - `errors`: the error type and result alias used across the workspace
//! - `constants`: physical constants (freezing point, molar masses, gravity)
//! - `species`: the closed set of isotopologues and phase transitions
//! - `isotope`: conversions between isotope ratios and delta values
//! - `interpolate`: the linear interpolation used at regime boundaries
//! - `vapor_pressure`: saturation vapour pressure and humidity conversions

pub mod constants;
pub mod errors;
pub mod interpolate;
pub mod isotope;
pub mod species;
pub mod vapor_pressure;

/// Floating point type used for every physical quantity.
pub type FloatValue = f64;
