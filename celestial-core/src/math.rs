#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a - t * (a - b)
}

/// Interpolates between two angles in degrees along the shorter arc.
#[inline]
pub fn lerp_angle_degrees(a: f64, b: f64, t: f64) -> f64 {
    a + t * crate::utils::angular_difference(b, a)
}
