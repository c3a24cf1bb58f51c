//! Temperature and humidity along the transport path

use crate::state::AirParcelState;
use isofrac_core::constants::check_celsius;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::vapor_pressure::{saturation_specific_humidity, SaturationFormula};
use isofrac_core::FloatValue;
use log::{debug, warn};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Ordered (temperature, humidity) points of a monotonically cooling air parcel.
///
/// Temperatures are strictly decreasing (°C). Specific humidities are
/// non-negative and non-increasing (g/kg). The first point is the parcel at
/// the moisture source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportProfile {
    temperature: Array1<FloatValue>,
    humidity: Array1<FloatValue>,
}

impl TransportProfile {
    /// Create a profile, rejecting anything that is not a monotonic cooling path.
    pub fn new(
        temperature: Array1<FloatValue>,
        humidity: Array1<FloatValue>,
    ) -> IsoFracResult<Self> {
        if temperature.is_empty() {
            return Err(IsoFracError::domain("transport profile has no points"));
        }
        if temperature.len() != humidity.len() {
            return Err(IsoFracError::domain(format!(
                "transport profile has {} temperatures but {} humidities",
                temperature.len(),
                humidity.len()
            )));
        }
        if let Some(t) = temperature.iter().find(|t| !t.is_finite()) {
            return Err(IsoFracError::domain(format!(
                "transport profile temperature is not finite: {t}"
            )));
        }
        for &t in temperature.iter() {
            check_celsius(t)?;
        }
        if let Some(q) = humidity.iter().find(|q| !(**q >= 0.0) || !q.is_finite()) {
            return Err(IsoFracError::domain(format!(
                "transport profile humidity must be finite and non-negative, got {q} g/kg"
            )));
        }
        for (n, pair) in temperature.windows(2).into_iter().enumerate() {
            if !(pair[1] < pair[0]) {
                return Err(IsoFracError::domain(format!(
                    "transport profile must cool monotonically, but point {} ({} °C) is not colder than point {} ({} °C)",
                    n + 1,
                    pair[1],
                    n,
                    pair[0]
                )));
            }
        }
        for (n, pair) in humidity.windows(2).into_iter().enumerate() {
            if pair[1] > pair[0] {
                return Err(IsoFracError::domain(format!(
                    "transport profile humidity increases from {} to {} g/kg at point {}",
                    pair[0],
                    pair[1],
                    n + 1
                )));
            }
        }
        Ok(Self {
            temperature,
            humidity,
        })
    }

    /// Saturated cooling path from `initial` down to `final_temperature`.
    ///
    /// Points are spaced by `temperature_step` and the final temperature is
    /// always the last point. The humidity at each point is the smaller of the
    /// saturation humidity and the humidity of the previous point, so an
    /// unsaturated parcel cools without condensing until it saturates.
    pub fn saturated(
        initial: &AirParcelState,
        final_temperature: FloatValue,
        temperature_step: FloatValue,
        pressure: FloatValue,
        formula: SaturationFormula,
    ) -> IsoFracResult<Self> {
        if !(temperature_step > 0.0) || !temperature_step.is_finite() {
            return Err(IsoFracError::domain(format!(
                "temperature step must be positive, got {temperature_step} °C"
            )));
        }
        if !(final_temperature <= initial.temperature) {
            return Err(IsoFracError::domain(format!(
                "final temperature ({final_temperature} °C) is warmer than the source ({} °C)",
                initial.temperature
            )));
        }

        // Points closer than this to the final temperature are merged into it
        let tolerance = temperature_step * 1e-9;
        let mut temperature = vec![initial.temperature];
        let mut k = 1.0;
        loop {
            let t = initial.temperature - k * temperature_step;
            if t <= final_temperature + tolerance {
                break;
            }
            temperature.push(t);
            k += 1.0;
        }
        if final_temperature < initial.temperature {
            temperature.push(final_temperature);
        }

        let mut humidity = Vec::with_capacity(temperature.len());
        let mut previous = initial.humidity;
        humidity.push(previous);
        for &t in &temperature[1..] {
            let q_sat = saturation_specific_humidity(t, pressure, formula)?;
            previous = q_sat.min(previous);
            humidity.push(previous);
        }

        let profile = Self::new(Array1::from(temperature), Array1::from(humidity))?;
        if !profile.condenses() {
            warn!(
                "Transport profile from {} °C to {final_temperature} °C never condenses",
                initial.temperature
            );
        }
        debug!(
            "Saturated transport profile with {} points, q from {:.3} to {:.4} g/kg",
            profile.len(),
            initial.humidity,
            profile.final_humidity()
        );
        Ok(profile)
    }

    pub fn temperature(&self) -> &Array1<FloatValue> {
        &self.temperature
    }

    pub fn humidity(&self) -> &Array1<FloatValue> {
        &self.humidity
    }

    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Humidity at the last point.
    pub fn final_humidity(&self) -> FloatValue {
        self.humidity[self.len() - 1]
    }

    /// Temperature at the last point.
    pub fn final_temperature(&self) -> FloatValue {
        self.temperature[self.len() - 1]
    }

    /// True if humidity decreases anywhere along the path.
    pub fn condenses(&self) -> bool {
        self.final_humidity() < self.humidity[0]
    }
}
