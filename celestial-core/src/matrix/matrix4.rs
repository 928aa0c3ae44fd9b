//! Homogeneous 4×4 matrices for rigid frame transforms.
//!
//! Frame changes between the observer's horizontal frame, the equator of date,
//! J2000, VSOP87 and the heliocentric frame are rotations optionally combined with
//! a translation (the observer sits off the Sun and off its body's center). A 4×4
//! matrix keeps both in one value so chains compose with `*`.
//!
//! # Conventions
//!
//! - Storage is row-major: `m[row][col]`.
//! - Vectors are columns multiplied on the right: `v' = M v`.
//! - Rotations are **active**: [`rotation_z`](Matrix4::rotation_z) with a positive
//!   angle turns +X toward +Y.
//! - `A * B` applied to `v` applies `B` first.
//!
//! ```
//! use celestial_core::{Matrix4, Vector3};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let m = Matrix4::translation(Vector3::new(0.0, 0.0, 1.0)) * Matrix4::rotation_z(FRAC_PI_2);
//! let p = m.transform_point(Vector3::x_axis());
//! assert!((p.x).abs() < 1e-15);
//! assert!((p.y - 1.0).abs() < 1e-15);
//! assert!((p.z - 1.0).abs() < 1e-15);
//! ```
use super::Vector3;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix4 {
    elements: [[f64; 4]; 4],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        elements: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_rows(elements: [[f64; 4]; 4]) -> Self {
        Self { elements }
    }

    /// Embeds a 3×3 rotation (row-major) with no translation.
    pub fn from_rotation(rows: [[f64; 3]; 3]) -> Self {
        let mut m = Self::IDENTITY;
        for (i, row) in rows.iter().enumerate() {
            m.elements[i][..3].copy_from_slice(row);
        }
        m
    }

    /// Rotation whose columns are the given basis vectors.
    pub fn from_columns(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self::from_rotation([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    pub fn translation(offset: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.elements[0][3] = offset.x;
        m.elements[1][3] = offset.y;
        m.elements[2][3] = offset.z;
        m
    }

    /// Active rotation about +X by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self::from_rotation([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Active rotation about +Y by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self::from_rotation([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Active rotation about +Z by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = libm::sincos(angle);
        Self::from_rotation([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[row][col]
    }

    #[inline]
    pub fn elements(&self) -> &[[f64; 4]; 4] {
        &self.elements
    }

    pub fn transpose(&self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.elements[j][i];
            }
        }
        Self { elements: out }
    }

    /// Inverse of a rotation-plus-translation matrix.
    ///
    /// Only valid when the upper-left 3×3 block is orthonormal and the bottom row
    /// is `[0, 0, 0, 1]`.
    pub fn rigid_inverse(&self) -> Self {
        let mut rot = [[0.0; 3]; 3];
        for (i, row) in rot.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.elements[j][i];
            }
        }
        let mut inv = Self::from_rotation(rot);
        let t = inv.transform_direction(self.translation_part());
        inv.elements[0][3] = -t.x;
        inv.elements[1][3] = -t.y;
        inv.elements[2][3] = -t.z;
        inv
    }

    pub fn translation_part(&self) -> Vector3 {
        Vector3::new(
            self.elements[0][3],
            self.elements[1][3],
            self.elements[2][3],
        )
    }

    /// Column `index` of the upper-left 3×3 block.
    pub fn column(&self, index: usize) -> Vector3 {
        Vector3::new(
            self.elements[0][index],
            self.elements[1][index],
            self.elements[2][index],
        )
    }

    /// Applies rotation and translation.
    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        let m = &self.elements;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        )
    }

    /// Applies only the rotation part; translation is ignored.
    pub fn transform_direction(&self, v: Vector3) -> Vector3 {
        let m = &self.elements;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.elements.iter().flatten().all(|v| v.is_finite())
    }

    /// Largest absolute element-wise difference, for tolerance checks.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.elements
            .iter()
            .flatten()
            .zip(other.elements.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = (0..4)
                    .map(|k| self.elements[i][k] * rhs.elements[k][j])
                    .sum();
            }
        }
        Self { elements: out }
    }
}

impl std::ops::Mul<Vector3> for Matrix4 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.transform_point(v)
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix4[")?;
        for row in &self.elements {
            writeln!(
                f,
                "  [{:12.9}, {:12.9}, {:12.9}, {:12.9}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        write!(f, "]")
    }
}
