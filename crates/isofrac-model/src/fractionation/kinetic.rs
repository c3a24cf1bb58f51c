//! Kinetic fractionation
//!
//! # Sea evaporation (Merlivat and Jouzel 1979)
//!
//! A two-branch function of wind speed $u$ with a threshold at 7 m/s:
//!
//! $$\alpha_{kin} = \begin{cases} 1 - k_{smooth} & u < 7 \\ 1 - (k_{slope} u + k_{intercept}) & u \geq 7 \end{cases}$$
//!
//! The branches are independent fits and do not meet at the threshold.
//!
//! # Ice growth (Jouzel and Merlivat 1984)
//!
//! $$\alpha_{kin} = \frac{S}{\alpha_{eq} \frac{D}{D'} (S - 1) + 1}$$
//!
//! with the supersaturation over ice $S = 1$ for $T \geq -20$ °C and
//! $S = 1 - 0.003 T$ below.

use super::EquilibriumFractionation;
use crate::parameters::{EquilibriumParameters, KineticParameters};
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::species::{IsotopeSpecies, PhaseTransition};
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Magnitude below which the ice growth denominator is treated as zero
const DENOMINATOR_TOLERANCE: FloatValue = 1e-12;

/// Kinetic fractionation during sea evaporation and ice growth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KineticFractionation {
    parameters: KineticParameters,
    equilibrium: EquilibriumFractionation,
}

impl KineticFractionation {
    pub fn new() -> Self {
        Self::from_parameters(KineticParameters::default(), EquilibriumParameters::default())
    }

    pub fn from_parameters(
        parameters: KineticParameters,
        equilibrium: EquilibriumParameters,
    ) -> Self {
        Self {
            parameters,
            equilibrium: EquilibriumFractionation::from_parameters(equilibrium),
        }
    }

    pub fn parameters(&self) -> &KineticParameters {
        &self.parameters
    }

    pub fn equilibrium(&self) -> &EquilibriumFractionation {
        &self.equilibrium
    }

    /// Kinetic factor for evaporation from the sea surface at wind speed `wind_speed` (m/s).
    pub fn alpha_evaporation(
        &self,
        wind_speed: FloatValue,
        species: IsotopeSpecies,
    ) -> IsoFracResult<FloatValue> {
        if !(wind_speed >= 0.0) || !wind_speed.is_finite() {
            return Err(IsoFracError::domain(format!(
                "wind speed must be a non-negative finite value, got {wind_speed} m/s"
            )));
        }
        let k = &self.parameters.evaporation[species];
        if wind_speed < self.parameters.wind_speed_threshold {
            Ok(1.0 - k.smooth)
        } else {
            Ok(1.0 - (k.slope * wind_speed + k.intercept))
        }
    }

    /// Supersaturation ratio over ice at `temperature_c`.
    pub fn supersaturation(&self, temperature_c: FloatValue) -> FloatValue {
        if temperature_c >= self.parameters.supersaturation_threshold {
            1.0
        } else {
            1.0 - self.parameters.supersaturation_slope * temperature_c
        }
    }

    /// Kinetic factor for vapour deposition onto ice at `temperature_c`.
    ///
    /// Fails with a numerical error if the denominator vanishes.
    pub fn alpha_ice(
        &self,
        temperature_c: FloatValue,
        species: IsotopeSpecies,
    ) -> IsoFracResult<FloatValue> {
        let s = self.supersaturation(temperature_c);
        let diffusivity = self.parameters.diffusivity_ratio(species);
        let alpha_eq = self
            .equilibrium
            .alpha(temperature_c, species, PhaseTransition::VaporIce);

        let denominator = alpha_eq * diffusivity * (s - 1.0) + 1.0;
        if denominator.abs() < DENOMINATOR_TOLERANCE || !denominator.is_finite() {
            return Err(IsoFracError::numerical(format!(
                "ice kinetic fractionation denominator vanished at {temperature_c} °C for {species}"
            )));
        }
        Ok(s / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_smooth_regime_is_constant() {
        let kinetic = KineticFractionation::new();
        for u in [0.0, 3.0, 6.5, 6.999] {
            assert_relative_eq!(
                kinetic.alpha_evaporation(u, IsotopeSpecies::H2O18).unwrap(),
                0.994
            );
            assert_relative_eq!(
                kinetic.alpha_evaporation(u, IsotopeSpecies::HDO).unwrap(),
                0.99472
            );
        }
    }

    #[test]
    fn test_rough_regime_is_linear_in_wind_speed() {
        let kinetic = KineticFractionation::new();
        let a8 = kinetic.alpha_evaporation(8.0, IsotopeSpecies::H2O18).unwrap();
        let a10 = kinetic.alpha_evaporation(10.0, IsotopeSpecies::H2O18).unwrap();
        assert_relative_eq!(a8, 1.0 - (0.000285 * 8.0 + 0.00082), epsilon = 1e-15);
        assert_relative_eq!(a8 - a10, 2.0 * 0.000285, epsilon = 1e-15);
    }

    #[test]
    fn test_gap_at_wind_speed_threshold() {
        // The two published branches do not meet at 7 m/s; the rough branch
        // is less fractionating there.
        let kinetic = KineticFractionation::new();
        let below = kinetic.alpha_evaporation(6.999_999, IsotopeSpecies::H2O18).unwrap();
        let at = kinetic.alpha_evaporation(7.0, IsotopeSpecies::H2O18).unwrap();
        assert_relative_eq!(at - below, 0.006 - 0.002815, epsilon = 1e-12);

        let below = kinetic.alpha_evaporation(6.999_999, IsotopeSpecies::HDO).unwrap();
        let at = kinetic.alpha_evaporation(7.0, IsotopeSpecies::HDO).unwrap();
        assert_relative_eq!(at - below, 0.00528 - 0.0024772, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_wind_speed_fails() {
        let kinetic = KineticFractionation::new();
        assert!(kinetic
            .alpha_evaporation(-1.0, IsotopeSpecies::HDO)
            .unwrap_err()
            .is_domain());
        assert!(kinetic
            .alpha_evaporation(f64::NAN, IsotopeSpecies::HDO)
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn test_supersaturation() {
        let kinetic = KineticFractionation::new();
        assert_eq!(kinetic.supersaturation(0.0), 1.0);
        assert_eq!(kinetic.supersaturation(-20.0), 1.0);
        assert_relative_eq!(kinetic.supersaturation(-30.0), 1.09, epsilon = 1e-12);
    }

    #[test]
    fn test_ice_kinetics_vanish_at_saturation() {
        let kinetic = KineticFractionation::new();
        for species in IsotopeSpecies::ALL {
            assert_eq!(kinetic.alpha_ice(-10.0, species).unwrap(), 1.0);
            assert_eq!(kinetic.alpha_ice(-20.0, species).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_ice_kinetics_reduce_fractionation_when_supersaturated() {
        let kinetic = KineticFractionation::new();
        let alpha = kinetic.alpha_ice(-30.0, IsotopeSpecies::HDO).unwrap();
        assert_relative_eq!(alpha, 0.9815, epsilon = 1e-3);
        let colder = kinetic.alpha_ice(-40.0, IsotopeSpecies::HDO).unwrap();
        assert!(colder < alpha);
    }

    #[test]
    fn test_diffusion_reference_changes_ice_kinetics() {
        let mut params = KineticParameters::default();
        let m78 = KineticFractionation::from_parameters(params.clone(), Default::default())
            .alpha_ice(-30.0, IsotopeSpecies::H2O18)
            .unwrap();
        params.diffusion_reference = crate::parameters::DiffusivityReference::Cappa2003;
        let c03 = KineticFractionation::from_parameters(params, Default::default())
            .alpha_ice(-30.0, IsotopeSpecies::H2O18)
            .unwrap();
        // Larger diffusivity ratio, stronger kinetic effect
        assert!(c03 < m78);
    }

    #[test]
    fn test_vanishing_denominator_fails() {
        // A negative slope makes S < 1 below the threshold; choose it so that
        // alpha_eq * D/D' * (S - 1) = -1 exactly enough to trip the guard.
        let equilibrium = EquilibriumParameters::default();
        let probe = KineticFractionation::new();
        let t = -30.0;
        let alpha_eq = probe
            .equilibrium()
            .alpha(t, IsotopeSpecies::HDO, PhaseTransition::VaporIce);
        let d = probe.parameters().diffusivity_ratio(IsotopeSpecies::HDO);
        let slope = 1.0 / (alpha_eq * d * t);

        let params = KineticParameters {
            supersaturation_slope: slope,
            ..Default::default()
        };
        let kinetic = KineticFractionation::from_parameters(params, equilibrium);
        let err = kinetic.alpha_ice(t, IsotopeSpecies::HDO).unwrap_err();
        assert!(err.is_numerical());
    }
}
