use celestial_core::constants::{HALF_PI, PI};
use celestial_core::Vector3;

use super::{Projected, ProjectionKind, Unprojected};
use crate::error::{ProjectionError, ProjectionResult};

fn direction_from_lon_lat(lon: f64, sin_lat: f64, cos_lat: f64) -> Vector3 {
    let (sin_lon, cos_lon) = libm::sincos(lon);
    Vector3::new(cos_lat * sin_lon, sin_lat, -cos_lat * cos_lon)
}

pub(crate) fn forward_cylinder(v: Vector3) -> ProjectionResult<Projected> {
    let r = v.magnitude();
    let lon = libm::atan2(v.x, -v.z);
    let lat = libm::asin((v.y / r).clamp(-1.0, 1.0));
    Ok(Projected::new(lon, lat, r))
}

pub(crate) fn backward_cylinder(x: f64, y: f64) -> Unprojected {
    let valid = y < HALF_PI && y > -HALF_PI && x > -PI && x < PI;
    let (sin_lat, cos_lat) = libm::sincos(y);
    Unprojected::new(direction_from_lon_lat(x, sin_lat, cos_lat), valid)
}

pub(crate) fn forward_mercator(v: Vector3) -> ProjectionResult<Projected> {
    let r = v.magnitude();
    let sin_lat = v.y / r;
    if sin_lat.abs() >= 1.0 {
        return Err(ProjectionError::out_of_domain(
            ProjectionKind::Mercator,
            "the poles are at infinity",
        ));
    }
    let lon = libm::atan2(v.x, -v.z);
    let y = 0.5 * libm::log((1.0 + sin_lat) / (1.0 - sin_lat));
    Ok(Projected::new(lon, y, r))
}

pub(crate) fn backward_mercator(x: f64, y: f64) -> Unprojected {
    let e = libm::exp(y);
    let h = e * e;
    let h1 = 1.0 / (1.0 + h);
    let sin_lat = (h - 1.0) * h1;
    let cos_lat = 2.0 * e * h1;
    Unprojected::new(
        direction_from_lon_lat(x, sin_lat, cos_lat),
        x > -PI && x < PI,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cylinder_is_plate_carree() {
        let p = forward_cylinder(Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert!((p.x - HALF_PI).abs() < 1e-15);
        assert!((p.y - PI / 4.0).abs() < 1e-15);
    }

    #[test]
    fn test_cylinder_back_seam() {
        let p = forward_cylinder(Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert!((p.x.abs() - PI).abs() < 1e-15);
        assert!(!backward_cylinder(p.x, p.y).valid);
    }

    #[test]
    fn test_mercator_latitude_stretch() {
        // y = atanh(sin 45°)
        let v = Vector3::new(0.0, 1.0, -1.0);
        let p = forward_mercator(v).unwrap();
        let expected = libm::atanh(std::f64::consts::FRAC_1_SQRT_2);
        assert!((p.y - expected).abs() < 1e-14);
        let back = backward_mercator(p.x, p.y);
        assert!((back.direction - v.normalize()).magnitude() < 1e-14);
    }

    #[test]
    fn test_mercator_rejects_pole() {
        assert!(forward_mercator(Vector3::new(0.0, -2.0, 0.0)).is_err());
    }
}
