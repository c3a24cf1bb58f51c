//! Cloud reservoir and snow generation
//!
//! The cloud layer above the deposition site holds vapour at the humidity and
//! composition delivered by the transport path. Each time step it loses the
//! generated snowfall by Rayleigh condensation and is topped up by the same
//! amount of freshly advected vapour:
//!
//! $$\delta_{cld} \leftarrow \frac{\delta'_{cld}(q_{cld} - Sn_{gen}) + \delta_{RY} Sn_{gen}}{q_{cld}}$$
//!
//! The snow formed in a step is in equilibrium with the condensing vapour,
//! $(\delta'_{cld} + 1)\alpha - 1$, and the snowfall delta is the average over
//! all steps.

use crate::distillation::rayleigh_step;
use isofrac_core::constants::GRAVITY;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::isotope::{fraction_to_permil, permil_to_fraction};
use isofrac_core::species::BySpecies;
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Mass of the cloud layer per unit area (kg/m^2) from its base and top pressures (hPa).
pub fn cloud_air_mass(
    base_pressure: FloatValue,
    top_pressure: FloatValue,
) -> IsoFracResult<FloatValue> {
    if !(top_pressure >= 0.0 && base_pressure > top_pressure) {
        return Err(IsoFracError::domain(format!(
            "cloud base pressure ({base_pressure} hPa) must exceed the cloud top pressure ({top_pressure} hPa)"
        )));
    }
    Ok((base_pressure - top_pressure) * 100.0 / GRAVITY)
}

/// Snow generated in the cloud per unit time (g/kg/s).
///
/// The observed flux (kg/m^2/s) is what survives sublimation, so the
/// generated amount is scaled by `1 / (1 - f)`.
pub fn snow_generation_rate(
    observed_flux: FloatValue,
    sublimation_fraction: FloatValue,
    air_mass: FloatValue,
) -> IsoFracResult<FloatValue> {
    if !(observed_flux >= 0.0) {
        return Err(IsoFracError::domain(format!(
            "snowfall flux must be non-negative, got {observed_flux} kg/m^2/s"
        )));
    }
    if !(0.0..1.0).contains(&sublimation_fraction) {
        return Err(IsoFracError::domain(format!(
            "sublimation fraction must be in [0, 1) to derive snow generation, got {sublimation_fraction}"
        )));
    }
    if !(air_mass > 0.0) {
        return Err(IsoFracError::domain(format!(
            "cloud air mass must be positive, got {air_mass} kg/m^2"
        )));
    }
    Ok(observed_flux / (1.0 - sublimation_fraction) / air_mass * 1000.0)
}

/// Cloud vapour of one species over the course of a snowfall event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudReservoir {
    /// unit: g/kg
    humidity: FloatValue,
    /// Fractional delta of the vapour advected into the cloud
    advected_delta: FloatValue,
    /// Fractional delta of the cloud vapour
    delta: FloatValue,
    snow_delta_sum: FloatValue,
    /// unit: g/kg
    snow_total: FloatValue,
    steps: usize,
}

impl CloudReservoir {
    /// Fill the cloud with vapour of humidity `humidity` (g/kg) and delta `delta` (‰).
    pub fn new(humidity: FloatValue, delta: FloatValue) -> IsoFracResult<Self> {
        if !(humidity > 0.0) {
            return Err(IsoFracError::domain(format!(
                "cloud vapour humidity must be positive, got {humidity} g/kg"
            )));
        }
        let delta = permil_to_fraction(delta);
        Ok(Self {
            humidity,
            advected_delta: delta,
            delta,
            snow_delta_sum: 0.0,
            snow_total: 0.0,
            steps: 0,
        })
    }

    /// Condense `snow_generation` (g/kg) with factor `alpha`, then replace it with advected vapour.
    pub fn step(&mut self, alpha: FloatValue, snow_generation: FloatValue) -> IsoFracResult<()> {
        if snow_generation > self.humidity {
            return Err(IsoFracError::numerical(format!(
                "snow generation per step ({snow_generation} g/kg) exceeds the cloud vapour ({} g/kg)",
                self.humidity
            )));
        }
        let condensed = rayleigh_step(alpha, self.humidity, -snow_generation, self.delta)?;
        self.snow_delta_sum += (condensed + 1.0) * alpha - 1.0;
        self.delta = (condensed * (self.humidity - snow_generation)
            + self.advected_delta * snow_generation)
            / self.humidity;
        self.snow_total += snow_generation;
        self.steps += 1;
        Ok(())
    }

    /// unit: g/kg
    pub fn humidity(&self) -> FloatValue {
        self.humidity
    }

    /// Current cloud vapour delta (‰).
    pub fn delta(&self) -> FloatValue {
        fraction_to_permil(self.delta)
    }

    /// Snow generated so far (g/kg).
    pub fn snow_total(&self) -> FloatValue {
        self.snow_total
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Average delta (‰) of the snow generated so far.
    pub fn snow_delta(&self) -> IsoFracResult<FloatValue> {
        if self.steps == 0 {
            return Err(IsoFracError::domain(
                "no snow has been generated in the cloud",
            ));
        }
        Ok(fraction_to_permil(self.snow_delta_sum / self.steps as FloatValue))
    }
}

/// Diagnostics of the snowfall generated over one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowfallSummary {
    /// unit: kg/m^2
    pub air_mass: FloatValue,
    /// Snow generated per step
    /// unit: g/kg
    pub generation: FloatValue,
    /// Snow generated over the event
    /// unit: g/kg
    pub total: FloatValue,
    pub steps: usize,
    /// Effective fractionation factor at the deposition site
    pub alpha: BySpecies<FloatValue>,
    /// Cloud vapour delta at the end of the event
    /// unit: ‰
    pub cloud_delta: BySpecies<FloatValue>,
    /// unit: ‰
    pub snow_delta: BySpecies<FloatValue>,
}
