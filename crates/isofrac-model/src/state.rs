//! Vapour states passed between the process components
//!
//! These are plain values recomputed for every simulation run. Nothing here
//! is shared between runs.

use isofrac_core::constants::check_celsius;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::isotope::{permil_to_fraction, ratio_from_delta};
use isofrac_core::species::{BySpecies, IsotopeSpecies};
use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

pub use crate::final_site::CloudReservoir;

/// Vapour at one point along the transport path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirParcelState {
    /// unit: °C
    pub temperature: FloatValue,
    /// Specific humidity
    /// unit: g/kg
    pub humidity: FloatValue,
    /// Delta of the vapour relative to VSMOW
    /// unit: ‰
    pub delta: BySpecies<FloatValue>,
}

impl AirParcelState {
    /// Create a parcel, rejecting unphysical temperatures, negative humidity
    /// and non-finite deltas.
    pub fn new(
        temperature: FloatValue,
        humidity: FloatValue,
        delta: BySpecies<FloatValue>,
    ) -> IsoFracResult<Self> {
        if !temperature.is_finite() {
            return Err(IsoFracError::domain(format!(
                "air parcel temperature is not finite: {temperature}"
            )));
        }
        check_celsius(temperature)?;
        if !(humidity >= 0.0) {
            return Err(IsoFracError::domain(format!(
                "specific humidity must be non-negative, got {humidity} g/kg"
            )));
        }
        if let Some((species, value)) = delta.iter().find(|(_, v)| !v.is_finite()) {
            return Err(IsoFracError::domain(format!(
                "{} of the air parcel is not finite: {value}",
                species.delta_label()
            )));
        }
        Ok(Self {
            temperature,
            humidity,
            delta,
        })
    }

    /// Isotope ratio `R = (δ/1000 + 1) R_std` using the VSMOW standard.
    pub fn ratio(&self, species: IsotopeSpecies) -> FloatValue {
        ratio_from_delta(self.delta[species], species.vsmow_ratio())
    }

    /// Fractional delta `R/R_std - 1`.
    pub fn delta_fraction(&self, species: IsotopeSpecies) -> FloatValue {
        permil_to_fraction(self.delta[species])
    }
}

/// Near-surface vapour at the deposition site for one species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceState {
    /// unit: g/kg
    pub humidity: FloatValue,
    /// unit: ‰
    pub delta: FloatValue,
}

impl SurfaceState {
    pub fn new(humidity: FloatValue, delta: FloatValue) -> IsoFracResult<Self> {
        if !(humidity >= 0.0) {
            return Err(IsoFracError::domain(format!(
                "surface specific humidity must be non-negative, got {humidity} g/kg"
            )));
        }
        if !delta.is_finite() {
            return Err(IsoFracError::domain(format!(
                "surface delta is not finite: {delta}"
            )));
        }
        Ok(Self { humidity, delta })
    }

    /// Isotope ratio of the surface vapour, given the species it describes.
    pub fn ratio(&self, species: IsotopeSpecies) -> FloatValue {
        ratio_from_delta(self.delta, species.vsmow_ratio())
    }
}
