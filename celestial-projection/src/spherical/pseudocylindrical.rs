use celestial_core::constants::SQRT2;
use celestial_core::Vector3;

use super::{Projected, Unprojected};
use crate::error::ProjectionResult;

/// Hammer-Aitoff, equal area over the whole sphere.
pub(crate) fn forward_hammer(v: Vector3) -> ProjectionResult<Projected> {
    let r = v.magnitude();
    let alpha = libm::atan2(v.x, -v.z);
    let sin_delta = v.y / r;
    let cos_delta = libm::sqrt((1.0 - sin_delta * sin_delta).max(0.0));
    let (sin_half, cos_half) = libm::sincos(0.5 * alpha);
    let z = libm::sqrt(1.0 + cos_delta * cos_half);
    Ok(Projected::new(
        2.0 * SQRT2 * cos_delta * sin_half / z,
        SQRT2 * sin_delta / z,
        r,
    ))
}

pub(crate) fn backward_hammer(x: f64, y: f64) -> Unprojected {
    let zsq = 1.0 - 0.0625 * x * x - 0.25 * y * y;
    let z = if zsq < 0.0 { 0.0 } else { libm::sqrt(zsq) };
    let valid = 0.25 * x * x + y * y < 2.0;
    let alpha = 2.0 * libm::atan2(z * x, 2.0 * (2.0 * zsq - 1.0));
    let sin_delta = (y * z).clamp(-1.0, 1.0);
    let cos_delta = libm::sqrt(1.0 - sin_delta * sin_delta);
    let (sin_alpha, cos_alpha) = libm::sincos(alpha);
    Unprojected::new(
        Vector3::new(cos_delta * sin_alpha, sin_delta, -cos_delta * cos_alpha),
        valid,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hammer_outline() {
        // the back seam lands on the ellipse edge x = 2 sqrt(2)
        let p = forward_hammer(Vector3::new(1e-12, 0.0, 1.0)).unwrap();
        assert!((p.x - 2.0 * SQRT2).abs() < 1e-9);
        // the pole lands at y = sqrt(2)
        let p = forward_hammer(Vector3::y_axis()).unwrap();
        assert!((p.y - SQRT2).abs() < 1e-15);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn test_hammer_backward_valid_region() {
        assert!(backward_hammer(0.0, 0.0).valid);
        assert!(backward_hammer(2.0, 0.5).valid);
        assert!(!backward_hammer(2.9, 0.0).valid);
        assert!(!backward_hammer(0.0, 1.5).valid);
    }
}
