//! Initial vapour state at the moisture source

use super::SeaSurfaceEvaporation;
use crate::fractionation::KineticFractionation;
use crate::parameters::{EvaporationParameters, FractionationParameters, InitialVapour};
use crate::state::AirParcelState;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::isotope::{delta_from_ratio, ratio_from_delta};
use isofrac_core::species::BySpecies;
use isofrac_core::vapor_pressure::saturation_specific_humidity;
use isofrac_core::FloatValue;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Wind speed used when none is supplied, inside the smooth regime
pub const DEFAULT_WIND_SPEED: FloatValue = 6.5;

/// Builds the first air parcel of the transport path from sea/atmosphere
/// boundary conditions.
///
/// The parcel sits at the air temperature above the sea with specific
/// humidity `h_a q_s(T_a)`. Its isotopic composition depends on
/// `InitialVapour`:
///
/// - `Closure`: the evaporation flux ratio under the closure assumption
/// - `Evaporation`: the evaporation flux ratio mixing into a known background
/// - `Background`: the prescribed background delta, skipping evaporation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialCondition {
    parameters: EvaporationParameters,
    evaporation: SeaSurfaceEvaporation,
}

impl InitialCondition {
    pub fn new() -> Self {
        Self::from_parameters(
            EvaporationParameters::default(),
            FractionationParameters::default(),
        )
    }

    pub fn from_parameters(
        parameters: EvaporationParameters,
        fractionation: FractionationParameters,
    ) -> Self {
        let kinetic =
            KineticFractionation::from_parameters(fractionation.kinetic, fractionation.equilibrium);
        let evaporation =
            SeaSurfaceEvaporation::new(kinetic, parameters.saturation_formula, parameters.pressure);
        Self {
            parameters,
            evaporation,
        }
    }

    pub fn parameters(&self) -> &EvaporationParameters {
        &self.parameters
    }

    pub fn evaporation(&self) -> &SeaSurfaceEvaporation {
        &self.evaporation
    }

    /// Wind speed to use, defaulting a missing value.
    fn wind_speed(&self) -> IsoFracResult<FloatValue> {
        match self.parameters.wind_speed {
            Some(u) if u >= 0.0 && u.is_finite() => Ok(u),
            Some(u) => Err(IsoFracError::domain(format!(
                "wind speed must be a non-negative finite value, got {u} m/s"
            ))),
            None => {
                warn!("No wind speed given, using {DEFAULT_WIND_SPEED} m/s");
                Ok(DEFAULT_WIND_SPEED)
            }
        }
    }

    fn validate(&self) -> IsoFracResult<()> {
        let p = &self.parameters;
        if !(p.air_temperature <= p.sea_temperature) {
            return Err(IsoFracError::domain(format!(
                "air temperature ({} °C) must not exceed the sea surface temperature ({} °C)",
                p.air_temperature, p.sea_temperature
            )));
        }
        if !(p.relative_humidity > 0.0 && p.relative_humidity <= 1.0) {
            return Err(IsoFracError::domain(format!(
                "relative humidity must be in (0, 1], got {}",
                p.relative_humidity
            )));
        }
        Ok(())
    }

    /// Effective humidity seen by the evaporating sea surface.
    pub fn effective_humidity(&self) -> IsoFracResult<FloatValue> {
        let p = &self.parameters;
        self.evaporation
            .effective_humidity(p.relative_humidity, p.air_temperature, p.sea_temperature)
    }

    /// Compute the initial air parcel.
    pub fn solve(&self) -> IsoFracResult<AirParcelState> {
        self.validate()?;
        let p = &self.parameters;
        let wind_speed = self.wind_speed()?;

        let q_sat = saturation_specific_humidity(p.air_temperature, p.pressure, p.saturation_formula)?;
        let humidity = p.relative_humidity * q_sat;
        let h_eff = self.effective_humidity()?;

        let delta = match p.initial_vapour {
            InitialVapour::Background { delta } => delta,
            InitialVapour::Closure => BySpecies::try_from_fn(|species| -> IsoFracResult<FloatValue> {
                let standard = species.vsmow_ratio();
                let sea_ratio = ratio_from_delta(p.sea_delta[species], standard);
                let ratio = self.evaporation.closure_ratio(
                    sea_ratio,
                    h_eff,
                    species,
                    wind_speed,
                    p.sea_temperature,
                )?;
                Ok(delta_from_ratio(ratio, standard))
            })?,
            InitialVapour::Evaporation { atmospheric_delta } => {
                BySpecies::try_from_fn(|species| -> IsoFracResult<FloatValue> {
                    let standard = species.vsmow_ratio();
                    let ratio = self.evaporation.evaporation_ratio(
                        ratio_from_delta(p.sea_delta[species], standard),
                        ratio_from_delta(atmospheric_delta[species], standard),
                        h_eff,
                        species,
                        wind_speed,
                        p.sea_temperature,
                    )?;
                    Ok(delta_from_ratio(ratio, standard))
                })?
            }
        };

        let state = AirParcelState::new(p.air_temperature, humidity, delta)?;
        debug!(
            "Initial vapour at {} °C: q = {:.3} g/kg, δ18O = {:.2}‰, δD = {:.2}‰",
            state.temperature, state.humidity, state.delta.h2o18, state.delta.hdo
        );
        Ok(state)
    }
}

impl Default for InitialCondition {
    fn default() -> Self {
        Self::new()
    }
}
