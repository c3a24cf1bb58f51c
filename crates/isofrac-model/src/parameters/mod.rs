//! Model parameters
//!
//! This module contains the parameter structures for every process component.
//! Each struct deserialises with `#[serde(default)]`, so a TOML document only
//! needs to name the values it changes. Defaults reproduce the published
//! coefficient tables and the reference configuration of the model.

mod distillation;
mod evaporation;
mod final_site;
mod fractionation;
mod model;

pub use distillation::DistillationParameters;
pub use evaporation::{EvaporationParameters, InitialVapour};
pub use final_site::{FinalSiteParameters, SnowfallSource, SurfaceParameters};
pub use fractionation::{
    DiffusivityRatios, DiffusivityReference, EquilibriumCoefficients, EquilibriumParameters,
    FractionationParameters, KineticParameters, PhaseCoefficients, WindKineticCoefficients,
};
pub use model::ModelParameters;
