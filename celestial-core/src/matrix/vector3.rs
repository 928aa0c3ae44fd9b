//! 3D Cartesian vectors used for sky directions and body positions.
//!
//! Directions on the celestial sphere are carried as vectors throughout the frame
//! pipeline: a star position in J2000, a planet position in heliocentric VSOP87
//! coordinates, or a viewing direction in the observer's horizontal frame. Only the
//! direction matters for most of them, so many operations accept non-unit input.
//!
//! # Spherical convention
//!
//! [`from_spherical`](Vector3::from_spherical) takes a longitude measured from +X
//! toward +Y and a latitude measured from the XY plane, both in radians:
//!
//! ```
//! use celestial_core::Vector3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let pole = Vector3::from_spherical(0.0, FRAC_PI_2);
//! assert!((pole.z - 1.0).abs() < 1e-15);
//!
//! let (lon, lat) = Vector3::new(0.0, 2.0, 0.0).to_spherical();
//! assert!((lon - FRAC_PI_2).abs() < 1e-15);
//! assert_eq!(lat, 0.0);
//! ```
use crate::{AstroError, AstroResult, MathErrorKind};
use std::fmt;

/// A 3D Cartesian vector.
///
/// Components are public. In equatorial frames `x` points to the equinox and `z`
/// to the pole; in the horizontal frame `x` points south, `y` east and `z` to the
/// zenith.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    #[inline]
    pub const fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.magnitude_squared())
    }

    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns a unit vector in the same direction.
    ///
    /// The zero vector is returned unchanged rather than becoming NaN.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            *self
        } else {
            Self::new(self.x / mag, self.y / mag, self.z / mag)
        }
    }

    /// Like [`normalize`](Self::normalize) but rejects zero and non-finite vectors.
    pub fn try_normalize(&self) -> AstroResult<Self> {
        let mag = self.magnitude();
        if !mag.is_finite() {
            return Err(AstroError::math_error(
                "Vector3::try_normalize",
                MathErrorKind::NotFinite,
                "vector has non-finite components",
            ));
        }
        if mag == 0.0 {
            return Err(AstroError::math_error(
                "Vector3::try_normalize",
                MathErrorKind::DivisionByZero,
                "zero-length vector has no direction",
            ));
        }
        Ok(*self / mag)
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    ///
    /// ```
    /// use celestial_core::Vector3;
    ///
    /// assert_eq!(Vector3::x_axis().cross(&Vector3::y_axis()), Vector3::z_axis());
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Angle between two directions in radians, in `[0, π]`.
    ///
    /// Uses `atan2(|a×b|, a·b)` so nearly parallel vectors keep full precision.
    pub fn angle_to(&self, other: &Self) -> f64 {
        libm::atan2(self.cross(other).magnitude(), self.dot(other))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Unit vector for longitude `lon` and latitude `lat`, in radians.
    pub fn from_spherical(lon: f64, lat: f64) -> Self {
        let (sin_lon, cos_lon) = libm::sincos(lon);
        let (sin_lat, cos_lat) = libm::sincos(lat);
        Self::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    /// Returns `(lon, lat)` in radians; `lon` in `(-π, π]`, `lat` in `[-π/2, π/2]`.
    ///
    /// The zero vector maps to `(0, 0)`.
    pub fn to_spherical(&self) -> (f64, f64) {
        let d2 = self.x * self.x + self.y * self.y;
        let lon = if d2 == 0.0 {
            0.0
        } else {
            libm::atan2(self.y, self.x)
        };
        let lat = if self.z == 0.0 {
            0.0
        } else {
            libm::atan2(self.z, libm::sqrt(d2))
        };
        (lon, lat)
    }

    /// Component-wise linear interpolation, `self` at `t = 0`.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        *self + (*other - *self) * t
    }
}

impl std::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3 {
        vec * self
    }
}

impl std::ops::Div<f64> for Vector3 {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Index<usize> for Vector3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector3 index out of bounds: {}", index),
        }
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({:.9}, {:.9}, {:.9})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_vector3_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(&b), 32.0);
        assert_eq!(a[2], 3.0);
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vector3::zeros().normalize(), Vector3::zeros());
        assert!(Vector3::zeros().try_normalize().is_err());
        assert!(Vector3::new(f64::NAN, 0.0, 0.0).try_normalize().is_err());
    }

    #[test]
    fn test_try_normalize() {
        let unit = Vector3::new(0.0, 3.0, 4.0).try_normalize().unwrap();
        assert_eq!(unit, Vector3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_angle_to() {
        let a = Vector3::x_axis();
        assert!((a.angle_to(&Vector3::y_axis()) - FRAC_PI_2).abs() < 1e-15);
        assert!((a.angle_to(&-a) - PI).abs() < 1e-15);
        assert_eq!(a.angle_to(&(a * 5.0)), 0.0);
    }

    #[test]
    fn test_spherical_roundtrip() {
        let v = Vector3::from_spherical(1.2, -0.4);
        let (lon, lat) = v.to_spherical();
        assert!((lon - 1.2).abs() < 1e-14);
        assert!((lat + 0.4).abs() < 1e-14);
        assert_eq!(Vector3::zeros().to_spherical(), (0.0, 0.0));
    }

    #[test]
    fn test_lerp() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(2.0, -4.0, 8.0);
        assert_eq!(a.lerp(&b, 0.5), Vector3::new(1.0, -2.0, 4.0));
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    #[should_panic(expected = "Vector3 index out of bounds")]
    fn test_index_panic() {
        let _ = Vector3::zeros()[3];
    }
}
