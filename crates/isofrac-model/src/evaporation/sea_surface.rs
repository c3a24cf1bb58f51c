//! Sea-surface evaporation (Merlivat and Jouzel 1979)
//!
//! The isotope ratio of the evaporation flux is
//!
//! $$R_E = \alpha_{kin} \frac{R_{sea}/\alpha_{eq} - h_{eff} R_a}{1 - h_{eff}}$$
//!
//! where $\alpha_{eq}$ is the vapour-liquid equilibrium factor at the sea
//! surface temperature and $\alpha_{kin}$ the wind-speed dependent kinetic
//! factor. The humidity seen by the evaporating surface is normalised to the
//! saturation mixing ratio at the sea surface:
//!
//! $$h_{eff} = h_a \frac{w_s(T_a)}{w_s(T_{sea})}$$
//!
//! # Closure assumption
//!
//! When the overlying vapour is itself made up of evaporated sea water,
//! $R_a = R_E$ and the expression above closes to
//!
//! $$R_E = \frac{\alpha_{kin} R_{sea} / \alpha_{eq}}{1 - h_{eff} + h_{eff}\,\alpha_{kin}}$$
//!
//! which stays finite for a saturated atmosphere.

use crate::fractionation::KineticFractionation;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::species::{IsotopeSpecies, PhaseTransition};
use isofrac_core::vapor_pressure::{saturation_mixing_ratio, SaturationFormula};
use isofrac_core::FloatValue;
use log::debug;
use serde::{Deserialize, Serialize};

/// Isotope ratio of the evaporation flux mixing into air of ratio `atmospheric_ratio`.
///
/// Fails with a domain error if `effective_humidity >= 1`.
pub fn evaporation_ratio(
    sea_ratio: FloatValue,
    atmospheric_ratio: FloatValue,
    effective_humidity: FloatValue,
    factors: EvaporationFactors,
) -> IsoFracResult<FloatValue> {
    if !(effective_humidity < 1.0) {
        return Err(IsoFracError::domain(format!(
            "effective humidity must be below 1 for net evaporation, got {effective_humidity}"
        )));
    }
    Ok(factors.kinetic
        * (sea_ratio / factors.equilibrium - effective_humidity * atmospheric_ratio)
        / (1.0 - effective_humidity))
}

/// Isotope ratio of the evaporation flux under the closure assumption `R_a = R_E`.
pub fn closure_evaporation_ratio(
    sea_ratio: FloatValue,
    effective_humidity: FloatValue,
    factors: EvaporationFactors,
) -> IsoFracResult<FloatValue> {
    let denominator = 1.0 - effective_humidity + effective_humidity * factors.kinetic;
    if !(denominator > 0.0) {
        return Err(IsoFracError::numerical(format!(
            "closure denominator is not positive ({denominator}) at h_eff = {effective_humidity}"
        )));
    }
    Ok(factors.kinetic * sea_ratio / factors.equilibrium / denominator)
}

/// Fractionation factors acting on one species during sea-surface evaporation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaporationFactors {
    /// Wind-speed dependent kinetic factor
    pub kinetic: FloatValue,
    /// Vapour-liquid equilibrium factor at the sea surface temperature
    pub equilibrium: FloatValue,
}

/// Evaporation from the sea surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeaSurfaceEvaporation {
    kinetic: KineticFractionation,
    saturation_formula: SaturationFormula,
    /// unit: hPa
    pressure: FloatValue,
}

impl SeaSurfaceEvaporation {
    pub fn new(
        kinetic: KineticFractionation,
        saturation_formula: SaturationFormula,
        pressure: FloatValue,
    ) -> Self {
        Self {
            kinetic,
            saturation_formula,
            pressure,
        }
    }

    /// Relative humidity normalised to saturation at the sea surface temperature.
    pub fn effective_humidity(
        &self,
        relative_humidity: FloatValue,
        air_temperature: FloatValue,
        sea_temperature: FloatValue,
    ) -> IsoFracResult<FloatValue> {
        let w_air = saturation_mixing_ratio(air_temperature, self.pressure, self.saturation_formula)?;
        let w_sea = saturation_mixing_ratio(sea_temperature, self.pressure, self.saturation_formula)?;
        if !(w_sea > 0.0) {
            return Err(IsoFracError::numerical(format!(
                "saturation mixing ratio at the sea surface vanished at {sea_temperature} °C"
            )));
        }
        let h_eff = relative_humidity * w_air / w_sea;
        debug!("Effective humidity {h_eff:.4} (h_a = {relative_humidity}, w_a = {w_air:.3}, w_sea = {w_sea:.3} g/kg)");
        Ok(h_eff)
    }

    /// Kinetic and equilibrium factors for `species` at the given wind speed and sea temperature.
    pub fn factors(
        &self,
        wind_speed: FloatValue,
        sea_temperature: FloatValue,
        species: IsotopeSpecies,
    ) -> IsoFracResult<EvaporationFactors> {
        Ok(EvaporationFactors {
            kinetic: self.kinetic.alpha_evaporation(wind_speed, species)?,
            equilibrium: self.kinetic.equilibrium().alpha(
                sea_temperature,
                species,
                PhaseTransition::VaporLiquid,
            ),
        })
    }

    /// Evaporation flux ratio for `species` mixing into air of ratio `atmospheric_ratio`.
    pub fn evaporation_ratio(
        &self,
        sea_ratio: FloatValue,
        atmospheric_ratio: FloatValue,
        effective_humidity: FloatValue,
        species: IsotopeSpecies,
        wind_speed: FloatValue,
        sea_temperature: FloatValue,
    ) -> IsoFracResult<FloatValue> {
        let factors = self.factors(wind_speed, sea_temperature, species)?;
        evaporation_ratio(sea_ratio, atmospheric_ratio, effective_humidity, factors)
    }

    /// Evaporation flux ratio for `species` under the closure assumption.
    pub fn closure_ratio(
        &self,
        sea_ratio: FloatValue,
        effective_humidity: FloatValue,
        species: IsotopeSpecies,
        wind_speed: FloatValue,
        sea_temperature: FloatValue,
    ) -> IsoFracResult<FloatValue> {
        let factors = self.factors(wind_speed, sea_temperature, species)?;
        closure_evaporation_ratio(sea_ratio, effective_humidity, factors)
    }
}

impl Default for SeaSurfaceEvaporation {
    fn default() -> Self {
        Self::new(
            KineticFractionation::new(),
            SaturationFormula::default(),
            isofrac_core::constants::STANDARD_PRESSURE_HPA,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FACTORS: EvaporationFactors = EvaporationFactors {
        kinetic: 0.994,
        equilibrium: 1.0098,
    };

    #[test]
    fn test_effective_humidity_is_relative_humidity_for_equal_temperatures() {
        let evaporation = SeaSurfaceEvaporation::default();
        assert_relative_eq!(
            evaporation.effective_humidity(0.8, 10.0, 10.0).unwrap(),
            0.8,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_effective_humidity_drops_over_warm_sea() {
        let evaporation = SeaSurfaceEvaporation::default();
        let h_eff = evaporation.effective_humidity(1.0, 5.0, 15.0).unwrap();
        assert!(h_eff < 1.0);
        assert!(h_eff > 0.4);
    }

    #[test]
    fn test_saturated_air_is_rejected() {
        let err = evaporation_ratio(1.0, 0.99, 1.0, FACTORS).unwrap_err();
        assert!(err.is_domain());
        let err = evaporation_ratio(1.0, 0.99, 1.2, FACTORS).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_dry_air_limit() {
        // Without overlying vapour only the sea ratio and the factors matter
        let ratio = evaporation_ratio(1.0, 0.9, 0.0, FACTORS).unwrap();
        assert_relative_eq!(ratio, 0.994 / 1.0098, epsilon = 1e-15);
        let closure = closure_evaporation_ratio(1.0, 0.0, FACTORS).unwrap();
        assert_relative_eq!(closure, ratio, epsilon = 1e-15);
    }

    #[test]
    fn test_closure_is_a_fixed_point_of_the_general_form() {
        for h_eff in [0.2, 0.5, 0.75, 0.95] {
            let closure = closure_evaporation_ratio(1.0, h_eff, FACTORS).unwrap();
            let general = evaporation_ratio(1.0, closure, h_eff, FACTORS).unwrap();
            assert_relative_eq!(general, closure, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_closure_is_finite_at_saturation() {
        let closure = closure_evaporation_ratio(1.0, 1.0, FACTORS).unwrap();
        assert_relative_eq!(closure, 1.0 / 1.0098, epsilon = 1e-15);
    }

    #[test]
    fn test_evaporated_vapour_is_depleted() {
        let evaporation = SeaSurfaceEvaporation::default();
        for species in IsotopeSpecies::ALL {
            let ratio = evaporation
                .closure_ratio(1.0, 0.8, species, 6.5, 10.0)
                .unwrap();
            assert!(ratio < 1.0, "{species}: {ratio}");
        }
    }

    #[test]
    fn test_factors_follow_components() {
        let evaporation = SeaSurfaceEvaporation::default();
        let factors = evaporation
            .factors(6.5, 10.0, IsotopeSpecies::HDO)
            .unwrap();
        assert_relative_eq!(factors.kinetic, 0.99472);
        assert!(factors.equilibrium > 1.08);
    }
}
