//! Processes at the deposition site
//!
//! Vapour arriving from the transport path feeds a cloud layer that generates
//! snowfall over the event duration. Part of that snow sublimates on its way
//! down and mixes into the near-surface air.
//!
//! - `cloud`: cloud air mass, snow generation and the per-step cloud reservoir
//! - `sublimation`: mass-weighted mixing of sublimated snow into surface air
//! - `FinalSiteProcess`: runs both for an arriving air parcel

mod cloud;
mod sublimation;

pub use cloud::{cloud_air_mass, snow_generation_rate, CloudReservoir, SnowfallSummary};
pub use sublimation::{sublimated_humidity, sublimation_mixing};

use crate::fractionation::EffectiveFractionation;
use crate::parameters::{FinalSiteParameters, SnowfallSource};
use crate::state::{AirParcelState, SurfaceState};
use isofrac_core::constants::STANDARD_PRESSURE_HPA;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::species::{BySpecies, IsotopeSpecies};
use isofrac_core::vapor_pressure::{saturation_specific_humidity, SaturationFormula};
use isofrac_core::FloatValue;
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of the cloud, snowfall and sublimation processes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSiteResult {
    pub snowfall: SnowfallSummary,
    /// Snow amount the sublimation fraction is applied to
    /// unit: g/kg
    pub sublimating_snow: FloatValue,
    /// Humidity added to surface air by sublimation
    /// unit: g/kg
    pub sublimated_humidity: FloatValue,
    /// Surface vapour before sublimation
    pub initial_surface: BySpecies<SurfaceState>,
    /// Surface vapour after sublimation
    pub surface: BySpecies<SurfaceState>,
}

/// Cloud, snowfall and sublimation at the deposition site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalSiteProcess {
    parameters: FinalSiteParameters,
    fractionation: EffectiveFractionation,
    saturation_formula: SaturationFormula,
    /// Surface pressure, unit: hPa
    pressure: FloatValue,
}

impl FinalSiteProcess {
    pub fn new() -> Self {
        Self::from_parameters(
            FinalSiteParameters::default(),
            EffectiveFractionation::new(),
            SaturationFormula::default(),
            STANDARD_PRESSURE_HPA,
        )
    }

    pub fn from_parameters(
        parameters: FinalSiteParameters,
        fractionation: EffectiveFractionation,
        saturation_formula: SaturationFormula,
        pressure: FloatValue,
    ) -> Self {
        Self {
            parameters,
            fractionation,
            saturation_formula,
            pressure,
        }
    }

    pub fn parameters(&self) -> &FinalSiteParameters {
        &self.parameters
    }

    /// Near-surface specific humidity before sublimation (g/kg).
    ///
    /// The observed value when given, otherwise `h_surf q_s(T_surf)`.
    pub fn surface_humidity(&self) -> IsoFracResult<FloatValue> {
        let surface = &self.parameters.surface;
        match surface.specific_humidity {
            Some(q) => Ok(q),
            None => {
                let q_sat = saturation_specific_humidity(
                    surface.temperature,
                    self.pressure,
                    self.saturation_formula,
                )?;
                Ok(surface.relative_humidity * q_sat)
            }
        }
    }

    /// Near-surface vapour of both species before sublimation.
    pub fn surface_state(&self) -> IsoFracResult<BySpecies<SurfaceState>> {
        let humidity = self.surface_humidity()?;
        BySpecies::try_from_fn(|species| {
            SurfaceState::new(humidity, self.parameters.surface.delta[species])
        })
    }

    /// Generate snowfall from the cloud fed by `arriving` vapour.
    pub fn snowfall(&self, arriving: &AirParcelState) -> IsoFracResult<SnowfallSummary> {
        let p = &self.parameters;
        let steps = p.step_count();
        if steps == 0 {
            return Err(IsoFracError::domain(format!(
                "snowfall duration ({} days) and time step ({} s) give no steps",
                p.duration, p.time_step
            )));
        }

        let air_mass = cloud_air_mass(p.cloud_base_pressure, p.cloud_top_pressure)?;
        let generation =
            snow_generation_rate(p.snowfall_flux, p.sublimation_fraction, air_mass)? * p.time_step;
        let alpha = BySpecies::try_from_fn(|species| {
            self.fractionation.alpha(arriving.temperature, species)
        })?;

        let mut clouds = BySpecies::try_from_fn(|species| {
            CloudReservoir::new(arriving.humidity, arriving.delta[species])
        })?;
        for _ in 0..steps {
            for species in IsotopeSpecies::ALL {
                clouds[species].step(alpha[species], generation)?;
            }
        }

        let summary = SnowfallSummary {
            air_mass,
            generation,
            total: generation * steps as FloatValue,
            steps,
            alpha,
            cloud_delta: clouds.map(|_, cloud| cloud.delta()),
            snow_delta: BySpecies::try_from_fn(|species| clouds[species].snow_delta())?,
        };
        debug!(
            "Snowfall over {steps} steps: Sn_gen = {:.3e} g/kg per step, Sn_tot = {:.4} g/kg, δ18O_Sn = {:.2}‰, δD_Sn = {:.2}‰",
            summary.generation, summary.total, summary.snow_delta.h2o18, summary.snow_delta.hdo
        );
        Ok(summary)
    }

    /// Snow amount (g/kg) the sublimation fraction applies to.
    fn sublimating_snow(
        &self,
        snowfall: &SnowfallSummary,
        surface_humidity: FloatValue,
    ) -> IsoFracResult<FloatValue> {
        let p = &self.parameters;
        match p.snowfall_source {
            SnowfallSource::Observed => Ok(snowfall.total),
            SnowfallSource::HumidityIncrement => {
                if !(p.sublimation_fraction > 0.0) {
                    return Err(IsoFracError::domain(
                        "the humidity increment snowfall source needs a positive sublimation fraction",
                    ));
                }
                if !(p.surface.relative_humidity > 0.0) {
                    return Err(IsoFracError::domain(format!(
                        "surface relative humidity must be positive, got {}",
                        p.surface.relative_humidity
                    )));
                }
                Ok(surface_humidity * p.surface.humidity_increment
                    / p.surface.relative_humidity
                    / p.sublimation_fraction)
            }
        }
    }

    /// Run the cloud, snowfall and sublimation processes for `arriving` vapour.
    pub fn run(&self, arriving: &AirParcelState) -> IsoFracResult<FinalSiteResult> {
        let initial_surface = self.surface_state()?;
        let snowfall = self.snowfall(arriving)?;
        let sublimating_snow = self.sublimating_snow(&snowfall, initial_surface.h2o18.humidity)?;
        let fraction = self.parameters.sublimation_fraction;

        let surface = BySpecies::try_from_fn(|species| {
            sublimation_mixing(
                &initial_surface[species],
                sublimating_snow,
                fraction,
                snowfall.snow_delta[species],
            )
        })?;
        let sublimated = sublimated_humidity(sublimating_snow, fraction)?;
        debug!(
            "Sublimation adds {sublimated:.4} g/kg: surface δ18O {:.2}‰ -> {:.2}‰, δD {:.2}‰ -> {:.2}‰",
            initial_surface.h2o18.delta,
            surface.h2o18.delta,
            initial_surface.hdo.delta,
            surface.hdo.delta
        );

        Ok(FinalSiteResult {
            snowfall,
            sublimating_snow,
            sublimated_humidity: sublimated,
            initial_surface,
            surface,
        })
    }
}

impl Default for FinalSiteProcess {
    fn default() -> Self {
        Self::new()
    }
}
