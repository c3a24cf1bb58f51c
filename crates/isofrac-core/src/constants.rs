//! Physical constants
//!
//! Values shared by the saturation formulas and the final-site cloud layer.

use crate::errors::{IsoFracError, IsoFracResult};
use crate::FloatValue;

/// Freezing point of water
/// unit: K
pub const FREEZING_POINT_K: FloatValue = 273.15;

/// Reference saturation vapour pressure at the freezing point
/// unit: hPa
pub const E0_HPA: FloatValue = 6.112;

/// Latent heat of vaporisation
/// unit: J/kg
pub const LATENT_HEAT_VAPORISATION: FloatValue = 2.5e6;

/// Universal gas constant
/// unit: J/(mol K)
pub const GAS_CONSTANT: FloatValue = 8.314;

/// Molar mass of water
/// unit: g/mol
pub const MOLAR_MASS_WATER: FloatValue = 18.015;

/// Molar mass of dry air
/// unit: g/mol
pub const MOLAR_MASS_AIR: FloatValue = 28.964;

/// Ratio of the molar masses of water and dry air (ε ≈ 0.622)
pub const EPSILON: FloatValue = MOLAR_MASS_WATER / MOLAR_MASS_AIR;

/// Standard sea-level pressure
/// unit: hPa
pub const STANDARD_PRESSURE_HPA: FloatValue = 1013.25;

/// Standard gravitational acceleration
/// unit: m/s^2
pub const GRAVITY: FloatValue = 9.80665;

pub const SECONDS_PER_DAY: FloatValue = 86400.0;

/// Convert a temperature from °C to K.
pub fn celsius_to_kelvin(temperature_c: FloatValue) -> FloatValue {
    temperature_c + FREEZING_POINT_K
}

/// Reject temperatures (°C) at or below absolute zero.
pub fn check_celsius(temperature_c: FloatValue) -> IsoFracResult<()> {
    if !(celsius_to_kelvin(temperature_c) > 0.0) {
        return Err(IsoFracError::BelowAbsoluteZero(temperature_c));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_epsilon() {
        assert_relative_eq!(EPSILON, 0.622, epsilon = 1e-3);
    }

    #[test]
    fn test_celsius_to_kelvin() {
        assert_relative_eq!(celsius_to_kelvin(0.0), 273.15);
        assert_relative_eq!(celsius_to_kelvin(-20.0), 253.15);
    }

    #[test]
    fn test_check_celsius() {
        assert!(check_celsius(-273.0).is_ok());
        assert!(matches!(
            check_celsius(-273.15),
            Err(IsoFracError::BelowAbsoluteZero(_))
        ));
        assert!(matches!(
            check_celsius(-300.0),
            Err(IsoFracError::BelowAbsoluteZero(_))
        ));
    }
}
