//! Fractionation factor parameters
//!
//! Coefficient tables for the equilibrium and kinetic fractionation factors,
//! plus the temperature thresholds that select between the liquid, mixed and
//! ice regimes.
//!
//! # References
//!
//! - Majoube (1971a, 1971b): equilibrium fractionation over liquid and ice
//! - Merlivat and Jouzel (1979): kinetic fractionation during sea evaporation
//! - Jouzel and Merlivat (1984): kinetic fractionation during ice growth
//! - Merlivat (1978), Cappa et al. (2003): molecular diffusivity ratios

use isofrac_core::species::{BySpecies, IsotopeSpecies, PhaseTransition};
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Coefficients of the equilibrium fractionation fit
///
/// $$\ln \alpha_{eq} = \frac{a_1}{T^2} + \frac{a_2}{T} + a_3$$
///
/// with $T$ in kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumCoefficients {
    pub a1: FloatValue,
    pub a2: FloatValue,
    pub a3: FloatValue,
}

impl EquilibriumCoefficients {
    pub const fn new(a1: FloatValue, a2: FloatValue, a3: FloatValue) -> Self {
        Self { a1, a2, a3 }
    }
}

/// Equilibrium coefficients of one species for both phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseCoefficients {
    pub vapor_liquid: EquilibriumCoefficients,
    pub vapor_ice: EquilibriumCoefficients,
}

impl PhaseCoefficients {
    pub fn get(&self, phase: PhaseTransition) -> &EquilibriumCoefficients {
        match phase {
            PhaseTransition::VaporLiquid => &self.vapor_liquid,
            PhaseTransition::VaporIce => &self.vapor_ice,
        }
    }
}

/// Parameters for equilibrium fractionation (Majoube 1971)
///
/// The H2 18O vapour to ice fit has a zero leading coefficient. This is the
/// published value and is kept as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquilibriumParameters {
    pub coefficients: BySpecies<PhaseCoefficients>,
}

impl Default for EquilibriumParameters {
    fn default() -> Self {
        Self {
            coefficients: BySpecies::new(
                PhaseCoefficients {
                    vapor_liquid: EquilibriumCoefficients::new(1137.0, -0.4156, -0.002067),
                    vapor_ice: EquilibriumCoefficients::new(0.0, 11.839, -0.028224),
                },
                PhaseCoefficients {
                    vapor_liquid: EquilibriumCoefficients::new(24844.0, -76.248, 0.052612),
                    vapor_ice: EquilibriumCoefficients::new(16289.0, 0.0, -0.0945),
                },
            ),
        }
    }
}

/// Wind-speed dependent kinetic coefficients for sea-surface evaporation
///
/// $$\alpha_{kin} = \begin{cases} 1 - k_{smooth} & u < u_{threshold} \\ 1 - (k_{slope} u + k_{intercept}) & u \geq u_{threshold} \end{cases}$$
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindKineticCoefficients {
    /// Kinetic enrichment for the smooth (low wind) regime
    pub smooth: FloatValue,
    /// Slope of the rough (high wind) regime
    /// unit: s/m
    pub slope: FloatValue,
    /// Intercept of the rough (high wind) regime
    pub intercept: FloatValue,
}

/// Source of the molecular diffusivity ratio D/D'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiffusivityReference {
    /// Merlivat (1978)
    #[default]
    #[serde(alias = "M78")]
    Merlivat1978,
    /// Cappa et al. (2003)
    #[serde(alias = "C03")]
    Cappa2003,
}

/// Diffusivity ratio D/D' of one species for each reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffusivityRatios {
    pub merlivat_1978: FloatValue,
    pub cappa_2003: FloatValue,
}

impl DiffusivityRatios {
    pub fn get(&self, reference: DiffusivityReference) -> FloatValue {
        match reference {
            DiffusivityReference::Merlivat1978 => self.merlivat_1978,
            DiffusivityReference::Cappa2003 => self.cappa_2003,
        }
    }
}

/// Parameters for kinetic fractionation during evaporation and ice growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticParameters {
    /// Sea evaporation coefficients per species
    pub evaporation: BySpecies<WindKineticCoefficients>,

    /// Wind speed separating the smooth and rough regimes
    /// unit: m/s
    /// default: 7.0
    pub wind_speed_threshold: FloatValue,

    /// Diffusivity ratios per species
    pub diffusivity: BySpecies<DiffusivityRatios>,

    /// default: Merlivat1978
    pub diffusion_reference: DiffusivityReference,

    /// Slope of the ice supersaturation, `S = 1 - slope * T`
    /// unit: 1/°C
    /// default: 0.003
    pub supersaturation_slope: FloatValue,

    /// Temperature at and above which the air is taken as exactly saturated over ice
    /// unit: °C
    /// default: -20.0
    pub supersaturation_threshold: FloatValue,
}

impl KineticParameters {
    pub fn diffusivity_ratio(&self, species: IsotopeSpecies) -> FloatValue {
        self.diffusivity[species].get(self.diffusion_reference)
    }
}

impl Default for KineticParameters {
    fn default() -> Self {
        Self {
            evaporation: BySpecies::new(
                WindKineticCoefficients {
                    smooth: 0.006,
                    slope: 0.000285,
                    intercept: 0.00082,
                },
                WindKineticCoefficients {
                    smooth: 0.00528,
                    slope: 0.0002508,
                    intercept: 0.0007216,
                },
            ),
            wind_speed_threshold: 7.0,
            diffusivity: BySpecies::new(
                DiffusivityRatios {
                    merlivat_1978: 1.02849,
                    cappa_2003: 1.03189,
                },
                DiffusivityRatios {
                    merlivat_1978: 1.02512,
                    cappa_2003: 1.01636,
                },
            ),
            diffusion_reference: DiffusivityReference::Merlivat1978,
            supersaturation_slope: 0.003,
            supersaturation_threshold: -20.0,
        }
    }
}

/// Parameters for the effective condensation fractionation factor
///
/// Above `liquid_threshold` condensation is to liquid water in equilibrium.
/// At or below `ice_threshold` deposition is to ice, optionally including the
/// kinetic effect of supersaturation over ice. Between the two thresholds the
/// factor is interpolated linearly in temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractionationParameters {
    pub equilibrium: EquilibriumParameters,
    pub kinetic: KineticParameters,

    /// Upper temperature of the pure ice regime
    /// unit: °C
    /// default: -20.0
    pub ice_threshold: FloatValue,

    /// Lower temperature of the pure liquid regime
    /// unit: °C
    /// default: 0.0
    pub liquid_threshold: FloatValue,

    /// Include kinetic fractionation during ice growth
    /// default: true
    pub ice_kinetics: bool,
}

impl Default for FractionationParameters {
    fn default() -> Self {
        Self {
            equilibrium: EquilibriumParameters::default(),
            kinetic: KineticParameters::default(),
            ice_threshold: -20.0,
            liquid_threshold: 0.0,
            ice_kinetics: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = FractionationParameters::default();
        assert!(params.ice_threshold < params.liquid_threshold);
        assert!(params.ice_kinetics);
        assert_eq!(params.kinetic.wind_speed_threshold, 7.0);
    }

    #[test]
    fn test_zero_leading_ice_coefficient_is_kept() {
        let params = EquilibriumParameters::default();
        let ice = params.coefficients[IsotopeSpecies::H2O18].get(PhaseTransition::VaporIce);
        assert_eq!(ice.a1, 0.0);
        assert_eq!(ice.a2, 11.839);
    }

    #[test]
    fn test_diffusivity_reference_selection() {
        let mut params = KineticParameters::default();
        assert_eq!(params.diffusivity_ratio(IsotopeSpecies::HDO), 1.02512);
        params.diffusion_reference = DiffusivityReference::Cappa2003;
        assert_eq!(params.diffusivity_ratio(IsotopeSpecies::HDO), 1.01636);
        assert_eq!(params.diffusivity_ratio(IsotopeSpecies::H2O18), 1.03189);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let params: FractionationParameters = toml::from_str(
            r#"
            ice_kinetics = false

            [kinetic]
            diffusion_reference = "C03"
            "#,
        )
        .unwrap();
        assert!(!params.ice_kinetics);
        assert_eq!(
            params.kinetic.diffusion_reference,
            DiffusivityReference::Cappa2003
        );
        assert_eq!(params.kinetic.supersaturation_slope, 0.003);
        assert_eq!(params.equilibrium, EquilibriumParameters::default());
    }
}
