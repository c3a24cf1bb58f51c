//! Final-site parameters
//!
//! Parameters for the cloud layer above the deposition site, the snowfall it
//! generates and the sublimation of that snow into near-surface air.
//!
//! # Snow generation
//!
//! The mass of the cloud layer per unit area follows from its pressure
//! thickness:
//!
//! $$M = \frac{p_{btm} - p_{top}}{g}$$
//!
//! and the snowfall generated in the cloud is the observed flux scaled up by
//! the fraction lost to sublimation before reaching the ground:
//!
//! $$Sn_{gen} = \frac{Sn_{obs}}{(1 - f) M}$$

use isofrac_core::constants::SECONDS_PER_DAY;
use isofrac_core::species::BySpecies;
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// How the amount of snow available for sublimation is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowfallSource {
    /// Total generated snowfall from the observed flux over the event duration
    #[default]
    Observed,
    /// Virtual snowfall sized so that sublimation raises the surface relative
    /// humidity by `humidity_increment`
    HumidityIncrement,
}

/// Near-surface conditions at the deposition site before sublimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParameters {
    /// unit: °C
    /// default: 0.0
    pub temperature: FloatValue,

    /// unit: dimensionless
    /// default: 0.75
    pub relative_humidity: FloatValue,

    /// Observed specific humidity. Derived from temperature and relative
    /// humidity when absent.
    /// unit: g/kg
    pub specific_humidity: Option<FloatValue>,

    /// Change in surface relative humidity caused by sublimation, used by
    /// `SnowfallSource::HumidityIncrement`
    /// unit: dimensionless
    /// default: 0.2
    pub humidity_increment: FloatValue,

    /// Delta of near-surface vapour
    /// unit: ‰
    /// default: -15.0 (H218O), -120.0 (HDO)
    pub delta: BySpecies<FloatValue>,
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            relative_humidity: 0.75,
            specific_humidity: None,
            humidity_increment: 0.2,
            delta: BySpecies::new(-15.0, -120.0),
        }
    }
}

/// Parameters for cloud, snowfall and sublimation at the deposition site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalSiteParameters {
    /// unit: hPa
    /// default: 700.0
    pub cloud_base_pressure: FloatValue,

    /// unit: hPa
    /// default: 400.0
    pub cloud_top_pressure: FloatValue,

    /// Observed snowfall reaching the surface
    /// unit: kg/m^2/s
    /// default: 2 mm/day water equivalent
    pub snowfall_flux: FloatValue,

    /// Duration of the snowfall event
    /// unit: days
    /// default: 1.0
    pub duration: FloatValue,

    /// Length of one cloud/snowfall step
    /// unit: s
    /// default: 1.0
    pub time_step: FloatValue,

    /// Fraction of snowfall mass that sublimates into near-surface air
    /// unit: dimensionless, [0, 1]
    /// default: 0.5
    pub sublimation_fraction: FloatValue,

    pub snowfall_source: SnowfallSource,

    pub surface: SurfaceParameters,
}

impl FinalSiteParameters {
    /// Number of cloud/snowfall steps covering `duration`.
    pub fn step_count(&self) -> usize {
        let steps = self.duration * SECONDS_PER_DAY / self.time_step;
        if steps.is_finite() && steps > 0.0 {
            steps.round() as usize
        } else {
            0
        }
    }
}

impl Default for FinalSiteParameters {
    fn default() -> Self {
        Self {
            cloud_base_pressure: 700.0,
            cloud_top_pressure: 400.0,
            snowfall_flux: 2.0 / SECONDS_PER_DAY,
            duration: 1.0,
            time_step: 1.0,
            sublimation_fraction: 0.5,
            snowfall_source: SnowfallSource::Observed,
            surface: SurfaceParameters::default(),
        }
    }
}
