//! Angle normalization helpers.
//!
//! | Function | Input | Output Range |
//! |----------|-------|--------------|
//! | [`normalize_longitude`] | degrees | (-180°, 180°] |
//! | [`normalize_degrees_positive`] | degrees | [0°, 360°) |
//!
//! [`angular_difference`] computes the shortest signed difference between two angles
//! in degrees, handling the wraparound at ±180°.

/// Normalizes longitude to the range (-180°, 180°].
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut normalized = lon % 360.0;
    if normalized > 180.0 {
        normalized -= 360.0;
    } else if normalized <= -180.0 {
        normalized += 360.0;
    }
    normalized
}

/// Normalizes an angle in degrees to the range [0°, 360°).
#[inline]
pub fn normalize_degrees_positive(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    a
}

/// Computes the shortest signed angular difference `a - b` in degrees.
///
/// The result is in the range (-180°, 180°], whatever the winding of the inputs.
///
/// ```
/// use celestial_core::utils::angular_difference;
///
/// assert_eq!(angular_difference(90.0, 45.0), 45.0);
/// assert!((angular_difference(10.0, 350.0) - 20.0).abs() < 1e-12);
/// ```
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    normalize_longitude(a - b)
}
