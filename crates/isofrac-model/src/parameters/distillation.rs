//! Transport path parameters

use isofrac_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the saturated cooling path between source and deposition site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistillationParameters {
    /// Air temperature at the deposition site, end of the cooling path
    /// unit: °C
    /// default: -30.0
    pub final_temperature: FloatValue,

    /// Temperature decrement between successive profile points
    /// unit: °C
    /// default: 0.5
    pub temperature_step: FloatValue,
}

impl Default for DistillationParameters {
    fn default() -> Self {
        Self {
            final_temperature: -30.0,
            temperature_step: 0.5,
        }
    }
}
