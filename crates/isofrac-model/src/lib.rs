//! Water isotope fractionation from oceanic evaporation to polar snowfall
//!
//! This crate follows an air parcel from its oceanic moisture source to a cold
//! deposition site and tracks the stable water isotopologues H2¹⁸O and HDO
//! along the way.
//!
//! # Module Organisation
//!
//! Components are organised by process:
//! - `fractionation`: equilibrium, kinetic and effective fractionation factors
//! - `evaporation`: sea-surface evaporation and the initial vapour state
//! - `distillation`: transport profiles and the Rayleigh stepping engine
//! - `final_site`: cloud reservoir, snowfall generation and sublimation
//! - `model`: the end-to-end pipeline
//!
//! # Parameters
//!
//! Each component has an associated parameters struct in the `parameters` module
//! with defaults matching the published coefficient tables. `ModelParameters`
//! collects them all and loads from TOML.
//!
//! # Logging
//!
//! Stage results are logged at `debug` and individual Rayleigh steps at
//! `trace` through the `log` facade. No logger is installed here.

pub mod distillation;
pub mod evaporation;
pub mod final_site;
pub mod fractionation;
pub mod model;
pub mod parameters;
pub mod state;

pub use model::{IsotopeModel, ModelOutput, SpeciesSummary};
