//! Sea-surface evaporation parameters
//!
//! Boundary conditions at the oceanic moisture source.

use isofrac_core::constants::STANDARD_PRESSURE_HPA;
use isofrac_core::species::BySpecies;
use isofrac_core::vapor_pressure::SaturationFormula;
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// How the isotopic composition of the initial vapour is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InitialVapour {
    /// Evaporation flux in isotopic steady state with the overlying air
    /// (closure assumption, `R_a = R_E`).
    #[default]
    Closure,
    /// Evaporation flux mixing into air of a known background composition.
    ///
    /// Requires `h_eff < 1`.
    Evaporation {
        /// Background atmospheric delta
        /// unit: ‰
        atmospheric_delta: BySpecies<FloatValue>,
    },
    /// Skip the evaporation calculation and start from a prescribed vapour.
    Background {
        /// unit: ‰
        delta: BySpecies<FloatValue>,
    },
}

/// Boundary conditions for sea-surface evaporation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaporationParameters {
    /// Sea-surface temperature
    /// unit: °C
    /// default: 10.0
    pub sea_temperature: FloatValue,

    /// Air temperature above the sea surface, not warmer than the sea
    /// unit: °C
    /// default: 10.0
    pub air_temperature: FloatValue,

    /// Relative humidity of the air above the sea surface
    /// unit: dimensionless, (0, 1]
    /// default: 1.0
    pub relative_humidity: FloatValue,

    /// 10 m wind speed. When absent the smooth regime value 6.5 m/s is used.
    /// unit: m/s
    /// default: 6.5
    pub wind_speed: Option<FloatValue>,

    /// Delta of sea water relative to VSMOW
    /// unit: ‰
    /// default: 0.0
    pub sea_delta: BySpecies<FloatValue>,

    /// Surface pressure used for mixing ratios
    /// unit: hPa
    /// default: 1013.25
    pub pressure: FloatValue,

    pub saturation_formula: SaturationFormula,

    pub initial_vapour: InitialVapour,
}

impl Default for EvaporationParameters {
    fn default() -> Self {
        Self {
            sea_temperature: 10.0,
            air_temperature: 10.0,
            relative_humidity: 1.0,
            wind_speed: Some(6.5),
            sea_delta: BySpecies::new(0.0, 0.0),
            pressure: STANDARD_PRESSURE_HPA,
            saturation_formula: SaturationFormula::Sonntag1990,
            initial_vapour: InitialVapour::Closure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = EvaporationParameters::default();
        assert!(params.air_temperature <= params.sea_temperature);
        assert_eq!(params.wind_speed, Some(6.5));
        assert_eq!(params.initial_vapour, InitialVapour::Closure);
    }

    #[test]
    fn test_initial_vapour_from_toml() {
        let params: EvaporationParameters = toml::from_str(
            r#"
            relative_humidity = 0.8

            [initial_vapour]
            kind = "evaporation"
            atmospheric_delta = { H218O = -12.0, HDO = -90.0 }
            "#,
        )
        .unwrap();
        assert_eq!(params.relative_humidity, 0.8);
        assert_eq!(
            params.initial_vapour,
            InitialVapour::Evaporation {
                atmospheric_delta: BySpecies::new(-12.0, -90.0)
            }
        );
    }
}
