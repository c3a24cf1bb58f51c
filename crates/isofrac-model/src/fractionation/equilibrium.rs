//! Equilibrium fractionation (Majoube 1971)
//!
//! $$\alpha_{eq} = \exp\left(\frac{a_1}{T^2} + \frac{a_2}{T} + a_3\right)$$
//!
//! with $T$ in kelvin and one coefficient triple per species and phase
//! transition.

use crate::parameters::EquilibriumParameters;
use isofrac_core::constants::celsius_to_kelvin;
use isofrac_core::species::{IsotopeSpecies, PhaseTransition};
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Equilibrium fractionation factor between vapour and condensate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquilibriumFractionation {
    parameters: EquilibriumParameters,
}

impl EquilibriumFractionation {
    pub fn new() -> Self {
        Self::from_parameters(EquilibriumParameters::default())
    }

    pub fn from_parameters(parameters: EquilibriumParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &EquilibriumParameters {
        &self.parameters
    }

    /// Equilibrium factor at `temperature_c` (°C).
    ///
    /// Total over physical temperatures; no range check is applied.
    pub fn alpha(
        &self,
        temperature_c: FloatValue,
        species: IsotopeSpecies,
        phase: PhaseTransition,
    ) -> FloatValue {
        let c = self.parameters.coefficients[species].get(phase);
        let t = celsius_to_kelvin(temperature_c);
        (c.a1 / (t * t) + c.a2 / t + c.a3).exp()
    }
}
