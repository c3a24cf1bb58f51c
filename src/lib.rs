//! Isotopic fractionation of water vapour from oceanic evaporation to polar snowfall
//!
//! Re-exports the core thermodynamic helpers and the process model. With the
//! `python` feature the model is also exposed as a Python extension module.

pub use isofrac_core as core;
pub use isofrac_model as model;

pub use isofrac_core::errors::{IsoFracError, IsoFracResult};
pub use isofrac_core::species::{BySpecies, IsotopeSpecies, PhaseTransition};
pub use isofrac_model::parameters::ModelParameters;
pub use isofrac_model::{IsotopeModel, ModelOutput};

#[cfg(feature = "python")]
mod python;
