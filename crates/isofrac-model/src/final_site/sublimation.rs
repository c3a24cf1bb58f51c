//! Sublimation of snowfall into near-surface air
//!
//! A fraction $f$ of the snowfall sublimates without fractionation and mixes
//! with the surface vapour:
//!
//! $$q_{sub} = f \cdot Sn_{tot}$$
//! $$q_u = q_{surf} + q_{sub}$$
//! $$R_u = \frac{q_{surf} R_{surf} + q_{sub} R_{Sn}}{q_u}$$

use crate::state::SurfaceState;
use isofrac_core::errors::{IsoFracError, IsoFracResult};
use isofrac_core::isotope::{fraction_to_permil, permil_to_fraction};
use isofrac_core::FloatValue;

/// Humidity (g/kg) added to surface air when a fraction of `snow_total` (g/kg) sublimates.
pub fn sublimated_humidity(
    snow_total: FloatValue,
    sublimation_fraction: FloatValue,
) -> IsoFracResult<FloatValue> {
    if !(0.0..=1.0).contains(&sublimation_fraction) {
        return Err(IsoFracError::domain(format!(
            "sublimation fraction must be in [0, 1], got {sublimation_fraction}"
        )));
    }
    if !(snow_total >= 0.0) {
        return Err(IsoFracError::domain(format!(
            "snowfall amount must be non-negative, got {snow_total} g/kg"
        )));
    }
    Ok(snow_total * sublimation_fraction)
}

/// Mix sublimated snow of delta `snow_delta` (‰) into `surface`.
///
/// Fails with a domain error if the fraction is outside `[0, 1]` or the mixed
/// humidity is not positive.
pub fn sublimation_mixing(
    surface: &SurfaceState,
    snow_total: FloatValue,
    sublimation_fraction: FloatValue,
    snow_delta: FloatValue,
) -> IsoFracResult<SurfaceState> {
    let q_sub = sublimated_humidity(snow_total, sublimation_fraction)?;
    let humidity = surface.humidity + q_sub;
    if !(humidity > 0.0) {
        return Err(IsoFracError::domain(
            "no vapour at the surface after sublimation mixing",
        ));
    }

    // Pure end members are returned unchanged
    if q_sub == 0.0 {
        return SurfaceState::new(humidity, surface.delta);
    }
    if surface.humidity == 0.0 {
        return SurfaceState::new(humidity, snow_delta);
    }

    let ratio = (surface.humidity * (permil_to_fraction(surface.delta) + 1.0)
        + q_sub * (permil_to_fraction(snow_delta) + 1.0))
        / humidity;
    SurfaceState::new(humidity, fraction_to_permil(ratio - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_parts() {
        let surface = SurfaceState::new(1.0, -100.0).unwrap();
        let mixed = sublimation_mixing(&surface, 2.0, 0.5, -300.0).unwrap();
        assert_eq!(mixed.humidity, 2.0);
        assert_relative_eq!(mixed.delta, -200.0, epsilon = 1e-10);
    }

    #[test]
    fn test_no_sublimation_is_identity() {
        let surface = SurfaceState::new(2.8, -120.0).unwrap();
        let mixed = sublimation_mixing(&surface, 1.3, 0.0, -400.0).unwrap();
        assert_eq!(mixed, surface);
    }

    #[test]
    fn test_dry_surface_takes_snow_signal() {
        let surface = SurfaceState::new(0.0, -120.0).unwrap();
        let mixed = sublimation_mixing(&surface, 1.3, 1.0, -400.0).unwrap();
        assert_eq!(mixed.humidity, 1.3);
        assert_eq!(mixed.delta, -400.0);
    }

    #[test]
    fn test_fraction_out_of_range() {
        let surface = SurfaceState::new(2.8, -120.0).unwrap();
        for f in [-0.01, 1.01, f64::NAN] {
            let err = sublimation_mixing(&surface, 1.3, f, -400.0).unwrap_err();
            assert!(err.is_domain(), "f = {f}");
        }
    }

    #[test]
    fn test_nothing_to_mix() {
        let surface = SurfaceState::new(0.0, -120.0).unwrap();
        let err = sublimation_mixing(&surface, 1.3, 0.0, -400.0).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_mass_weighted_conservation() {
        let surface = SurfaceState::new(2.8, -120.0).unwrap();
        let mixed = sublimation_mixing(&surface, 1.3, 0.4, -420.0).unwrap();
        let q_sub = 1.3 * 0.4;
        assert_relative_eq!(
            mixed.humidity * (mixed.delta - 1.0),
            surface.humidity * (surface.delta - 1.0) + q_sub * (-420.0 - 1.0),
            epsilon = 1e-9
        );
    }
}
