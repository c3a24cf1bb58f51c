//! Conversions between isotope ratios and delta values
//!
//! A delta value is the per-mille deviation of an isotope ratio from a
//! reference standard:
//!
//! $$\delta = \left(\frac{R}{R_{std}} - 1\right) \cdot 1000$$
//!
//! The distillation and mixing equations are written in terms of the
//! fractional delta $\delta / 1000$, so helpers for both forms live here.

use crate::FloatValue;

/// Per-mille delta from an isotope ratio and its reference standard.
pub fn delta_from_ratio(ratio: FloatValue, standard: FloatValue) -> FloatValue {
    (ratio / standard - 1.0) * 1000.0
}

/// Isotope ratio from a per-mille delta and its reference standard.
pub fn ratio_from_delta(delta_permil: FloatValue, standard: FloatValue) -> FloatValue {
    (delta_permil / 1000.0 + 1.0) * standard
}

/// Per-mille delta to fractional delta (`R/R_std - 1`).
pub fn permil_to_fraction(delta_permil: FloatValue) -> FloatValue {
    delta_permil / 1000.0
}

/// Fractional delta (`R/R_std - 1`) to per-mille delta.
pub fn fraction_to_permil(delta_fraction: FloatValue) -> FloatValue {
    delta_fraction * 1000.0
}
