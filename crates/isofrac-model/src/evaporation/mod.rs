//! Sea-surface evaporation and the initial vapour state
//!
//! - `SeaSurfaceEvaporation`: isotope ratio of the evaporation flux from the
//!   sea surface and the effective humidity it sees
//! - `InitialCondition`: assembles the first air parcel of the transport path

mod initial;
mod sea_surface;

pub use initial::InitialCondition;
pub use sea_surface::{
    closure_evaporation_ratio, evaporation_ratio, EvaporationFactors, SeaSurfaceEvaporation,
};
