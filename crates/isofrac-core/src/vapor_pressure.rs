//! Saturation vapour pressure and humidity conversions
//!
//! Pure functions of temperature and pressure used by the sea-surface
//! evaporation and the construction of saturated transport profiles.
//!
//! # Saturation formulas
//!
//! The default is the five-coefficient fit of Sonntag (1990):
//!
//! $$e_s = \exp\left(\frac{a_1}{T} + a_2 + a_3 T + a_4 T^2 + a_5 \ln T\right) / 100$$
//!
//! with separate coefficient sets over liquid water and over ice. The
//! Clausius-Clapeyron form with constant latent heat is kept for comparison.
//!
//! # Units
//!
//! Vapour pressure and pressure in hPa, mixing ratio and specific humidity in g/kg.

use crate::constants::{
    celsius_to_kelvin, E0_HPA, EPSILON, FREEZING_POINT_K, GAS_CONSTANT, LATENT_HEAT_VAPORISATION,
    MOLAR_MASS_WATER,
};
use crate::errors::{IsoFracError, IsoFracResult};
use crate::species::PhaseTransition;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Sonntag (1990) coefficients over liquid water
const SONNTAG_LIQUID: [FloatValue; 5] = [
    -6096.9385,
    21.2409642,
    -2.711193e-2,
    1.673952e-5,
    2.433502,
];

/// Sonntag (1990) coefficients over ice
const SONNTAG_ICE: [FloatValue; 5] = [
    -6024.5282,
    29.32707,
    1.0613868e-2,
    -1.3198825e-5,
    -0.49382577,
];

/// Saturation vapour pressure formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaturationFormula {
    /// Sonntag (1990), switching from liquid to ice coefficients below 0 °C
    #[default]
    #[serde(alias = "Sonntag", alias = "sonntag")]
    Sonntag1990,
    /// Clausius-Clapeyron with constant latent heat of vaporisation
    #[serde(alias = "CC", alias = "cc")]
    ClausiusClapeyron,
}

impl SaturationFormula {
    /// Saturation vapour pressure (hPa) at `temperature_k`.
    pub fn vapor_pressure(&self, temperature_k: FloatValue) -> IsoFracResult<FloatValue> {
        match self {
            SaturationFormula::Sonntag1990 => {
                let phase = if temperature_k >= FREEZING_POINT_K {
                    PhaseTransition::VaporLiquid
                } else {
                    PhaseTransition::VaporIce
                };
                saturation_vapor_pressure(temperature_k, phase)
            }
            SaturationFormula::ClausiusClapeyron => clausius_clapeyron_vapor_pressure(temperature_k),
        }
    }
}

fn check_kelvin(temperature_k: FloatValue) -> IsoFracResult<()> {
    if !(temperature_k > 0.0) {
        return Err(IsoFracError::BelowAbsoluteZero(
            temperature_k - FREEZING_POINT_K,
        ));
    }
    Ok(())
}

/// Saturation vapour pressure (hPa) over liquid water or ice using Sonntag (1990).
///
/// Fails with a domain error if `temperature_k <= 0`.
pub fn saturation_vapor_pressure(
    temperature_k: FloatValue,
    phase: PhaseTransition,
) -> IsoFracResult<FloatValue> {
    check_kelvin(temperature_k)?;
    let [a1, a2, a3, a4, a5] = match phase {
        PhaseTransition::VaporLiquid => SONNTAG_LIQUID,
        PhaseTransition::VaporIce => SONNTAG_ICE,
    };
    let t = temperature_k;
    Ok((a1 / t + a2 + a3 * t + a4 * t * t + a5 * t.ln()).exp() / 100.0)
}

/// Saturation vapour pressure (hPa) from the Clausius-Clapeyron relation.
pub fn clausius_clapeyron_vapor_pressure(temperature_k: FloatValue) -> IsoFracResult<FloatValue> {
    check_kelvin(temperature_k)?;
    // Specific gas constant of water vapour, J/(kg K)
    let r_vapour = GAS_CONSTANT / (MOLAR_MASS_WATER / 1000.0);
    Ok(E0_HPA
        * (LATENT_HEAT_VAPORISATION / r_vapour * (1.0 / FREEZING_POINT_K - 1.0 / temperature_k))
            .exp())
}

/// Mixing ratio (g/kg) of vapour at partial pressure `vapor_pressure` in air at `pressure` (both hPa).
pub fn mixing_ratio(vapor_pressure: FloatValue, pressure: FloatValue) -> IsoFracResult<FloatValue> {
    if !(pressure > 0.0) {
        return Err(IsoFracError::domain(format!(
            "pressure must be positive, got {pressure} hPa"
        )));
    }
    if vapor_pressure < 0.0 {
        return Err(IsoFracError::domain(format!(
            "vapour pressure must be non-negative, got {vapor_pressure} hPa"
        )));
    }
    Ok(1000.0 * EPSILON * vapor_pressure / pressure)
}

/// Specific humidity (g/kg) from a mixing ratio (g/kg): `q = w / (1 + w)`.
pub fn specific_humidity(mixing_ratio: FloatValue) -> IsoFracResult<FloatValue> {
    if mixing_ratio < 0.0 {
        return Err(IsoFracError::domain(format!(
            "mixing ratio must be non-negative, got {mixing_ratio} g/kg"
        )));
    }
    let w = mixing_ratio / 1000.0;
    Ok(1000.0 * w / (1.0 + w))
}

/// Saturation mixing ratio (g/kg) at `temperature_c` and `pressure` (hPa).
pub fn saturation_mixing_ratio(
    temperature_c: FloatValue,
    pressure: FloatValue,
    formula: SaturationFormula,
) -> IsoFracResult<FloatValue> {
    let e_s = formula.vapor_pressure(celsius_to_kelvin(temperature_c))?;
    mixing_ratio(e_s, pressure)
}

/// Saturation specific humidity (g/kg) at `temperature_c` and `pressure` (hPa).
pub fn saturation_specific_humidity(
    temperature_c: FloatValue,
    pressure: FloatValue,
    formula: SaturationFormula,
) -> IsoFracResult<FloatValue> {
    specific_humidity(saturation_mixing_ratio(temperature_c, pressure, formula)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::STANDARD_PRESSURE_HPA;
    use approx::assert_relative_eq;

    #[test]
    fn test_sonntag_at_freezing_point() {
        let e_s = saturation_vapor_pressure(FREEZING_POINT_K, PhaseTransition::VaporLiquid).unwrap();
        assert_relative_eq!(e_s, 6.11, epsilon = 0.01);
    }

    #[test]
    fn test_sonntag_over_ice() {
        // About 1.03 hPa over ice at -20 °C
        let e_s = saturation_vapor_pressure(253.15, PhaseTransition::VaporIce).unwrap();
        assert_relative_eq!(e_s, 1.03, epsilon = 0.01);

        // Vapour pressure over ice is lower than over supercooled water
        let e_l = saturation_vapor_pressure(253.15, PhaseTransition::VaporLiquid).unwrap();
        assert!(e_s < e_l);
    }

    #[test]
    fn test_clausius_clapeyron_reference_value() {
        let e_s = clausius_clapeyron_vapor_pressure(FREEZING_POINT_K).unwrap();
        assert_relative_eq!(e_s, E0_HPA, epsilon = 1e-12);
    }

    #[test]
    fn test_formulas_agree_near_freezing() {
        for formula in [SaturationFormula::Sonntag1990, SaturationFormula::ClausiusClapeyron] {
            let e_s = formula.vapor_pressure(283.15).unwrap();
            assert!((e_s - 12.3).abs() < 0.5, "{formula:?} gave {e_s}");
        }
    }

    #[test]
    fn test_vapor_pressure_increases_with_temperature() {
        let formula = SaturationFormula::default();
        let mut previous = 0.0;
        for t in [233.15, 253.15, 273.15, 293.15] {
            let e_s = formula.vapor_pressure(t).unwrap();
            assert!(e_s > previous);
            previous = e_s;
        }
    }

    #[test]
    fn test_non_positive_kelvin_fails() {
        let err = saturation_vapor_pressure(0.0, PhaseTransition::VaporLiquid).unwrap_err();
        assert!(err.is_domain());
        let err = clausius_clapeyron_vapor_pressure(-5.0).unwrap_err();
        assert!(err.is_domain());
        let err = saturation_specific_humidity(-300.0, STANDARD_PRESSURE_HPA, SaturationFormula::default())
            .unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_mixing_ratio() {
        let w = mixing_ratio(10.0, 1000.0).unwrap();
        assert_relative_eq!(w, 1000.0 * EPSILON * 0.01, epsilon = 1e-12);
        assert!(mixing_ratio(10.0, 0.0).unwrap_err().is_domain());
        assert!(mixing_ratio(-1.0, 1000.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_specific_humidity_below_mixing_ratio() {
        let q = specific_humidity(10.0).unwrap();
        assert_relative_eq!(q, 10.0 / 1.01, epsilon = 1e-12);
        assert!(specific_humidity(-0.1).unwrap_err().is_domain());
    }

    #[test]
    fn test_saturation_specific_humidity_at_ten_degrees() {
        let q = saturation_specific_humidity(10.0, STANDARD_PRESSURE_HPA, SaturationFormula::Sonntag1990)
            .unwrap();
        assert_relative_eq!(q, 7.5, epsilon = 0.2);
    }

    #[test]
    fn test_formula_aliases() {
        let formula: SaturationFormula = serde_json::from_str("\"CC\"").unwrap();
        assert_eq!(formula, SaturationFormula::ClausiusClapeyron);
        let formula: SaturationFormula = serde_json::from_str("\"Sonntag\"").unwrap();
        assert_eq!(formula, SaturationFormula::Sonntag1990);
    }
}
