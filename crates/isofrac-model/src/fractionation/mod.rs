//! Fractionation factor components
//!
//! - `EquilibriumFractionation`: temperature-dependent equilibrium factors for
//!   condensation to liquid and deposition to ice
//! - `KineticFractionation`: wind-speed dependent sea evaporation factors and
//!   supersaturation dependent ice growth factors
//! - `EffectiveFractionation`: the factor applied during condensation along the
//!   transport path, switching between liquid, mixed and ice regimes

mod effective;
mod equilibrium;
mod kinetic;

pub use effective::{EffectiveFractionation, FractionationRegime};
pub use equilibrium::EquilibriumFractionation;
pub use kinetic::KineticFractionation;
