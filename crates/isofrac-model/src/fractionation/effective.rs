//! Effective condensation fractionation
//!
//! The factor applied at each condensation step along the transport path.
//! Three regimes are selected by temperature:
//!
//! | Regime | Temperature | Factor |
//! |--------|-------------|--------|
//! | Liquid | $T \geq 0$ °C | $\alpha_{eq}^{v \to l}(T)$ |
//! | Mixed  | $-20 < T < 0$ °C | linear in $T$ between the two boundary values |
//! | Ice    | $T \leq -20$ °C | $\alpha_{kin}^{ice}(T) \cdot \alpha_{eq}^{v \to i}(T)$ |
//!
//! The mixed regime interpolates between the ice factor evaluated at the ice
//! threshold and the liquid factor evaluated at the liquid threshold, so the
//! effective factor is continuous at both thresholds.

use super::{EquilibriumFractionation, KineticFractionation};
use crate::parameters::FractionationParameters;
use isofrac_core::constants::check_celsius;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::interpolate::linear_interpolate;
use isofrac_core::species::{IsotopeSpecies, PhaseTransition};
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Condensation regime selected by temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FractionationRegime {
    /// Condensation to liquid water
    Liquid,
    /// Mixed-phase cloud
    Mixed {
        /// Position between the ice threshold (0) and liquid threshold (1)
        weight: FloatValue,
    },
    /// Deposition to ice
    Ice,
}

/// Effective fractionation factor for condensation along the transport path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveFractionation {
    kinetic: KineticFractionation,
    ice_threshold: FloatValue,
    liquid_threshold: FloatValue,
    ice_kinetics: bool,
}

impl EffectiveFractionation {
    /// Create the component with the published coefficient tables.
    pub fn new() -> Self {
        Self {
            kinetic: KineticFractionation::new(),
            ice_threshold: -20.0,
            liquid_threshold: 0.0,
            ice_kinetics: true,
        }
    }

    /// Create the component from parameters.
    ///
    /// Fails if the ice threshold is not strictly below the liquid threshold.
    pub fn from_parameters(parameters: FractionationParameters) -> IsoFracResult<Self> {
        if !(parameters.ice_threshold < parameters.liquid_threshold) {
            return Err(IsoFracError::domain(format!(
                "ice threshold ({} °C) must be below the liquid threshold ({} °C)",
                parameters.ice_threshold, parameters.liquid_threshold
            )));
        }
        Ok(Self {
            kinetic: KineticFractionation::from_parameters(
                parameters.kinetic,
                parameters.equilibrium,
            ),
            ice_threshold: parameters.ice_threshold,
            liquid_threshold: parameters.liquid_threshold,
            ice_kinetics: parameters.ice_kinetics,
        })
    }

    pub fn kinetic(&self) -> &KineticFractionation {
        &self.kinetic
    }

    pub fn equilibrium(&self) -> &EquilibriumFractionation {
        self.kinetic.equilibrium()
    }

    pub fn ice_threshold(&self) -> FloatValue {
        self.ice_threshold
    }

    pub fn liquid_threshold(&self) -> FloatValue {
        self.liquid_threshold
    }

    pub fn regime(&self, temperature_c: FloatValue) -> FractionationRegime {
        if temperature_c >= self.liquid_threshold {
            FractionationRegime::Liquid
        } else if temperature_c <= self.ice_threshold {
            FractionationRegime::Ice
        } else {
            FractionationRegime::Mixed {
                weight: (temperature_c - self.ice_threshold)
                    / (self.liquid_threshold - self.ice_threshold),
            }
        }
    }

    /// Factor for condensation to liquid at `temperature_c`.
    pub fn liquid_alpha(&self, temperature_c: FloatValue, species: IsotopeSpecies) -> FloatValue {
        self.equilibrium()
            .alpha(temperature_c, species, PhaseTransition::VaporLiquid)
    }

    /// Factor for deposition to ice at `temperature_c`, including ice growth
    /// kinetics when enabled.
    pub fn ice_alpha(
        &self,
        temperature_c: FloatValue,
        species: IsotopeSpecies,
    ) -> IsoFracResult<FloatValue> {
        let alpha_eq = self
            .equilibrium()
            .alpha(temperature_c, species, PhaseTransition::VaporIce);
        if self.ice_kinetics {
            Ok(self.kinetic.alpha_ice(temperature_c, species)? * alpha_eq)
        } else {
            Ok(alpha_eq)
        }
    }

    /// Effective factor at `temperature_c` (°C).
    pub fn alpha(
        &self,
        temperature_c: FloatValue,
        species: IsotopeSpecies,
    ) -> IsoFracResult<FloatValue> {
        if !temperature_c.is_finite() {
            return Err(IsoFracError::domain(format!(
                "temperature must be finite, got {temperature_c}"
            )));
        }
        check_celsius(temperature_c)?;
        match self.regime(temperature_c) {
            FractionationRegime::Liquid => Ok(self.liquid_alpha(temperature_c, species)),
            FractionationRegime::Ice => self.ice_alpha(temperature_c, species),
            FractionationRegime::Mixed { .. } => {
                let ice = self.ice_alpha(self.ice_threshold, species)?;
                let liquid = self.liquid_alpha(self.liquid_threshold, species);
                Ok(linear_interpolate(
                    temperature_c,
                    self.ice_threshold,
                    self.liquid_threshold,
                    ice,
                    liquid,
                ))
            }
        }
    }
}

impl Default for EffectiveFractionation {
    fn default() -> Self {
        Self::new()
    }
}
