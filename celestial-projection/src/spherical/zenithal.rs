use celestial_core::Vector3;

use super::{Projected, ProjectionKind, Unprojected};
use crate::error::{ProjectionError, ProjectionResult};

pub(crate) fn forward_perspective(v: Vector3) -> ProjectionResult<Projected> {
    if v.z >= 0.0 {
        return Err(ProjectionError::out_of_domain(
            ProjectionKind::Perspective,
            "direction not in front of the viewer",
        ));
    }
    Ok(Projected::new(v.x / -v.z, v.y / -v.z, v.magnitude()))
}

pub(crate) fn backward_perspective(x: f64, y: f64) -> Unprojected {
    let q = 1.0 / libm::sqrt(1.0 + x * x + y * y);
    Unprojected::new(Vector3::new(x * q, y * q, -q), true)
}

pub(crate) fn forward_equal_area(v: Vector3) -> ProjectionResult<Projected> {
    let r = v.magnitude();
    let denom = r * (r - v.z);
    if denom <= 0.0 {
        return Err(ProjectionError::out_of_domain(
            ProjectionKind::EqualArea,
            "direction opposite the view center",
        ));
    }
    let f = libm::sqrt(2.0 / denom);
    Ok(Projected::new(v.x * f, v.y * f, r))
}

pub(crate) fn backward_equal_area(x: f64, y: f64) -> Unprojected {
    let dq = x * x + y * y;
    let l = 1.0 - 0.25 * dq;
    if l < 0.0 {
        return Unprojected::new(Vector3::z_axis(), false);
    }
    let l = libm::sqrt(l);
    Unprojected::new(Vector3::new(x * l, y * l, 0.5 * dq - 1.0), true)
}

pub(crate) fn forward_stereographic(v: Vector3) -> ProjectionResult<Projected> {
    let r = v.magnitude();
    let h = 0.5 * (r - v.z);
    if h <= 0.0 {
        return Err(ProjectionError::out_of_domain(
            ProjectionKind::Stereographic,
            "direction opposite the view center",
        ));
    }
    let f = 1.0 / h;
    Ok(Projected::new(v.x * f, v.y * f, r))
}

pub(crate) fn backward_stereographic(x: f64, y: f64) -> Unprojected {
    let lqq = 0.25 * (x * x + y * y);
    let scale = 1.0 / (lqq + 1.0);
    Unprojected::new(Vector3::new(x, y, lqq - 1.0) * scale, true)
}

pub(crate) fn forward_fisheye(v: Vector3) -> ProjectionResult<Projected> {
    let r = v.magnitude();
    let rq1 = v.x * v.x + v.y * v.y;
    if rq1 > 0.0 {
        let h = libm::sqrt(rq1);
        let f = libm::atan2(h, -v.z) / h;
        return Ok(Projected::new(v.x * f, v.y * f, r));
    }
    if v.z < 0.0 {
        return Ok(Projected::new(0.0, 0.0, r));
    }
    Err(ProjectionError::out_of_domain(
        ProjectionKind::Fisheye,
        "direction opposite the view center",
    ))
}

pub(crate) fn backward_fisheye(x: f64, y: f64) -> Unprojected {
    let a = libm::sqrt(x * x + y * y);
    let f = if a > 0.0 { libm::sin(a) / a } else { 1.0 };
    Unprojected::new(
        Vector3::new(x * f, y * f, -libm::cos(a)),
        a < std::f64::consts::PI,
    )
}

pub(crate) fn forward_orthographic(v: Vector3) -> ProjectionResult<Projected> {
    if v.z > 0.0 {
        return Err(ProjectionError::out_of_domain(
            ProjectionKind::Orthographic,
            "direction on the far hemisphere",
        ));
    }
    let r = v.magnitude();
    Ok(Projected::new(v.x / r, v.y / r, r))
}

pub(crate) fn backward_orthographic(x: f64, y: f64) -> Unprojected {
    let l = 1.0 - (x * x + y * y);
    if l < 0.0 {
        return Unprojected::new(Vector3::z_axis(), false);
    }
    Unprojected::new(Vector3::new(x, y, -libm::sqrt(l)), true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_perspective_is_gnomonic() {
        // 45 degrees off-axis lands at plane distance tan(45) = 1
        let p = forward_perspective(Vector3::new(1.0, 0.0, -1.0)).unwrap();
        assert!((p.x - 1.0).abs() < 1e-15);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_stereographic_horizon_radius() {
        // 90 degrees off-axis: 2 tan(45) = 2
        let p = forward_stereographic(Vector3::x_axis()).unwrap();
        assert!((p.x - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_equal_area_horizon_radius() {
        // 90 degrees off-axis: 2 sin(45) = sqrt(2)
        let p = forward_equal_area(Vector3::y_axis()).unwrap();
        assert!((p.y - std::f64::consts::SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn test_fisheye_radius_is_angle() {
        let p = forward_fisheye(Vector3::x_axis()).unwrap();
        assert!((p.x - FRAC_PI_2).abs() < 1e-15);
        let back = backward_fisheye(PI - 1e-9, 0.0);
        assert!(back.valid);
        assert!(back.direction.z > 0.99);
    }

    #[test]
    fn test_orthographic_accepts_limb() {
        let p = forward_orthographic(Vector3::x_axis()).unwrap();
        assert_eq!((p.x, p.y), (1.0, 0.0));
        let back = backward_orthographic(1.0, 0.0);
        assert!(back.valid);
        assert_eq!(back.direction, Vector3::new(1.0, 0.0, -0.0));
    }

    #[test]
    fn test_forward_reports_distance() {
        let p = forward_stereographic(Vector3::new(0.0, 3.0, -4.0)).unwrap();
        assert_eq!(p.distance, 5.0);
    }
}
