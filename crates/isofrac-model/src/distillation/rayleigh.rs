//! Rayleigh stepping engine

use super::TransportProfile;
use crate::fractionation::EffectiveFractionation;
use crate::state::AirParcelState;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::isotope::{fraction_to_permil, permil_to_fraction};
use isofrac_core::species::{BySpecies, IsotopeSpecies};
use isofrac_core::FloatValue;
use log::{debug, trace};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One Rayleigh step with fractional deltas.
///
/// $$\delta_{n+1} = \frac{\alpha - 1}{q_n} \Delta q + \delta_n$$
///
/// Fails with a numerical error if `humidity` is not positive, i.e. all
/// vapour has already condensed.
pub fn rayleigh_step(
    alpha: FloatValue,
    humidity: FloatValue,
    humidity_change: FloatValue,
    delta: FloatValue,
) -> IsoFracResult<FloatValue> {
    if !(humidity > 0.0) {
        return Err(IsoFracError::numerical(format!(
            "cannot distil vapour with specific humidity {humidity} g/kg"
        )));
    }
    Ok((alpha - 1.0) / humidity * humidity_change + delta)
}

/// Vapour deltas at every point of a transport profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistillationTrajectory {
    /// unit: °C
    pub temperature: Array1<FloatValue>,
    /// unit: g/kg
    pub humidity: Array1<FloatValue>,
    /// unit: ‰
    pub delta: BySpecies<Array1<FloatValue>>,
}

impl DistillationTrajectory {
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// The parcel at the end of the path, arriving at the deposition site.
    pub fn terminal_state(&self) -> IsoFracResult<AirParcelState> {
        let last = self
            .len()
            .checked_sub(1)
            .ok_or_else(|| IsoFracError::domain("distillation trajectory is empty"))?;
        AirParcelState::new(
            self.temperature[last],
            self.humidity[last],
            self.delta.map(|_, d| d[last]),
        )
    }
}

/// Iterates the Rayleigh equation along a transport profile.
///
/// The engine holds only the fractionation component. Each run starts from
/// the supplied deltas, so repeated runs on the same inputs give identical
/// results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RayleighDistillation {
    fractionation: EffectiveFractionation,
}

impl RayleighDistillation {
    pub fn new(fractionation: EffectiveFractionation) -> Self {
        Self { fractionation }
    }

    pub fn fractionation(&self) -> &EffectiveFractionation {
        &self.fractionation
    }

    /// Deltas (‰) of `species` at every profile point, starting from `initial_delta` (‰).
    pub fn run_species(
        &self,
        profile: &TransportProfile,
        initial_delta: FloatValue,
        species: IsotopeSpecies,
    ) -> IsoFracResult<Array1<FloatValue>> {
        let temperature = profile.temperature();
        let humidity = profile.humidity();

        let mut delta = Array1::zeros(profile.len());
        let mut current = permil_to_fraction(initial_delta);
        delta[0] = initial_delta;

        for n in 0..profile.len() - 1 {
            let alpha = self.fractionation.alpha(temperature[n + 1], species)?;
            current = rayleigh_step(alpha, humidity[n], humidity[n + 1] - humidity[n], current)
                .map_err(|e| match e {
                    IsoFracError::Numerical(msg) => IsoFracError::numerical(format!(
                        "{msg} at transport step {n} ({} °C)",
                        temperature[n]
                    )),
                    other => other,
                })?;
            delta[n + 1] = fraction_to_permil(current);
            trace!(
                "{species} step {n}: T = {:.2} °C, q = {:.4} g/kg, α = {alpha:.5}, δ = {:.3}‰",
                temperature[n + 1],
                humidity[n + 1],
                delta[n + 1]
            );
        }
        Ok(delta)
    }

    /// Distil both species from `initial_delta` (‰) along `profile`.
    pub fn run(
        &self,
        profile: &TransportProfile,
        initial_delta: &BySpecies<FloatValue>,
    ) -> IsoFracResult<DistillationTrajectory> {
        let delta = BySpecies::try_from_fn(|species| {
            self.run_species(profile, initial_delta[species], species)
        })?;
        let trajectory = DistillationTrajectory {
            temperature: profile.temperature().clone(),
            humidity: profile.humidity().clone(),
            delta,
        };
        let last = trajectory.len() - 1;
        debug!(
            "Rayleigh distillation to {} °C: δ18O = {:.2}‰, δD = {:.2}‰",
            trajectory.temperature[last], trajectory.delta.h2o18[last], trajectory.delta.hdo[last]
        );
        Ok(trajectory)
    }

    /// Distil an air parcel along `profile`, taking its deltas as the starting point.
    pub fn run_from(
        &self,
        initial: &AirParcelState,
        profile: &TransportProfile,
    ) -> IsoFracResult<DistillationTrajectory> {
        self.run(profile, &initial.delta)
    }
}
