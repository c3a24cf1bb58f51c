//! Linear interpolation between two anchor points.

use num::Float;

/// Linearly interpolate between `(x0, y0)` and `(x1, y1)` at `x`.
///
/// Returns exactly `y0` at `x == x0` and exactly `y1` at `x == x1` so that
/// piecewise functions built from it stay continuous at their anchors.
/// `x0 == x1` returns `y0`.
pub fn linear_interpolate<T: Float>(x: T, x0: T, x1: T, y0: T, y1: T) -> T {
    if x == x0 || x0 == x1 {
        return y0;
    }
    if x == x1 {
        return y1;
    }
    let weight = (x - x0) / (x1 - x0);
    y0 + weight * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_anchors_are_exact() {
        let (y0, y1) = (1.0834_f64, 1.1123_f64);
        assert_eq!(linear_interpolate(-20.0, -20.0, 0.0, y0, y1), y0);
        assert_eq!(linear_interpolate(0.0, -20.0, 0.0, y0, y1), y1);
    }

    #[test]
    fn test_midpoint() {
        let value = linear_interpolate(-10.0_f64, -20.0, 0.0, 1.0, 2.0);
        assert_relative_eq!(value, 1.5);
    }

    #[test]
    fn test_degenerate_interval() {
        assert_eq!(linear_interpolate(5.0_f64, 1.0, 1.0, 3.0, 4.0), 3.0);
    }

    #[test]
    fn test_f32() {
        let value = linear_interpolate(0.25_f32, 0.0, 1.0, 0.0, 4.0);
        assert_relative_eq!(value, 1.0_f32);
    }
}
