//! The closed family of sky map projections.
//!
//! Every algorithm maps a direction in its local frame, where the viewer looks
//! along -Z with +Y up, to dimensionless plane coordinates, and back. The
//! [`Projector`](crate::Projector) scales plane coordinates to pixels.
//!
//! | Kind | Forward domain | Max FOV |
//! |------|----------------|---------|
//! | Perspective | z < 0 | 120° |
//! | Equal Area | all but the anti-center | 360° |
//! | Stereographic | all but the anti-center | 235° |
//! | Fisheye | all but the anti-center | 360° |
//! | Hammer | all | 185° |
//! | Cylinder | all | 233.3° |
//! | Mercator | all but the poles | 233.3° |
//! | Orthographic | z ≤ 0 | 180° |

use celestial_core::Vector3;

use crate::error::{ProjectionError, ProjectionResult};

mod cylindrical;
mod pseudocylindrical;
mod zenithal;

use cylindrical::{backward_cylinder, backward_mercator, forward_cylinder, forward_mercator};
use pseudocylindrical::{backward_hammer, forward_hammer};
use zenithal::{backward_equal_area, backward_fisheye, backward_orthographic};
use zenithal::{backward_perspective, backward_stereographic};
use zenithal::{forward_equal_area, forward_fisheye, forward_orthographic};
use zenithal::{forward_perspective, forward_stereographic};

/// Plane coordinates of a projected direction, plus the input's length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Length of the projected vector, used for depth.
    pub distance: f64,
}

impl Projected {
    pub(crate) fn new(x: f64, y: f64, distance: f64) -> Self {
        Self { x, y, distance }
    }
}

/// Result of mapping a plane point back to a direction.
///
/// `direction` is always filled in so callers can still draw partial geometry;
/// `valid` tells whether the point actually lies on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unprojected {
    pub direction: Vector3,
    pub valid: bool,
}

impl Unprojected {
    pub(crate) fn new(direction: Vector3, valid: bool) -> Self {
        Self { direction, valid }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectionKind {
    Perspective,
    EqualArea,
    #[default]
    Stereographic,
    Fisheye,
    Hammer,
    Cylinder,
    Mercator,
    Orthographic,
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 8] = [
        Self::Perspective,
        Self::EqualArea,
        Self::Stereographic,
        Self::Fisheye,
        Self::Hammer,
        Self::Cylinder,
        Self::Mercator,
        Self::Orthographic,
    ];

    /// Configuration key, e.g. `"ProjectionStereographic"`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Perspective => "ProjectionPerspective",
            Self::EqualArea => "ProjectionEqualArea",
            Self::Stereographic => "ProjectionStereographic",
            Self::Fisheye => "ProjectionFisheye",
            Self::Hammer => "ProjectionHammer",
            Self::Cylinder => "ProjectionCylinder",
            Self::Mercator => "ProjectionMercator",
            Self::Orthographic => "ProjectionOrthographic",
        }
    }

    pub fn all_keys() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.key()).collect()
    }

    /// Parses a configuration key.
    ///
    /// Accepts the full key (`"ProjectionMercator"`) and the bare lowercase name
    /// (`"mercator"`, `"equal_area"`).
    pub fn try_from_key(key: &str) -> ProjectionResult<Self> {
        let trimmed = key.trim();
        if let Some(kind) = Self::ALL.iter().find(|k| k.key() == trimmed) {
            return Ok(*kind);
        }
        let short: String = trimmed
            .strip_prefix("Projection")
            .unwrap_or(trimmed)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|k| k.key()["Projection".len()..].eq_ignore_ascii_case(&short))
            .copied()
            .ok_or_else(|| ProjectionError::unknown_key(key))
    }

    /// Like [`try_from_key`](Self::try_from_key) but falls back to stereographic.
    pub fn from_key(key: &str) -> Self {
        Self::try_from_key(key).unwrap_or_else(|_| {
            log::warn!(
                "Unknown projection type: {:?}, using {} instead",
                key,
                Self::Stereographic.key()
            );
            Self::Stereographic
        })
    }

    /// English display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Perspective => "Perspective",
            Self::EqualArea => "Equal Area",
            Self::Stereographic => "Stereographic",
            Self::Fisheye => "Fish-eye",
            Self::Hammer => "Hammer-Aitoff",
            Self::Cylinder => "Cylinder",
            Self::Mercator => "Mercator",
            Self::Orthographic => "Orthographic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Perspective => {
                "Gnomonic projection: great circles are straight lines. Usable only below 180 degrees."
            }
            Self::EqualArea => {
                "Lambert azimuthal equal-area projection: area is preserved across the whole sphere."
            }
            Self::Stereographic => {
                "Conformal azimuthal projection: angles and circle shapes are preserved."
            }
            Self::Fisheye => {
                "Azimuthal equidistant projection: angular distance from the center is proportional to radius."
            }
            Self::Hammer => {
                "Equal-area pseudocylindrical projection of the full sphere inside an ellipse."
            }
            Self::Cylinder => {
                "Plate carree: longitude and latitude map linearly to x and y."
            }
            Self::Mercator => {
                "Conformal cylindrical projection; the poles are at infinity."
            }
            Self::Orthographic => {
                "Parallel projection of one hemisphere, as seen from far away."
            }
        }
    }

    /// Largest field of view, in degrees, the projection can display.
    pub fn max_fov(&self) -> f64 {
        match self {
            Self::Perspective => 120.0,
            Self::EqualArea => 360.0,
            Self::Stereographic => 235.0,
            Self::Fisheye => 360.0,
            Self::Hammer => 185.0,
            Self::Cylinder | Self::Mercator => 175.0 * 4.0 / 3.0,
            Self::Orthographic => 179.9999,
        }
    }

    /// Plane distance from the center for an angle (radians) away from the center.
    pub fn fov_to_view_scaling(&self, half_fov: f64) -> f64 {
        match self {
            Self::Perspective => libm::tan(half_fov),
            Self::EqualArea => 2.0 * libm::sin(0.5 * half_fov),
            Self::Stereographic => 2.0 * libm::tan(0.5 * half_fov),
            Self::Orthographic => libm::sin(half_fov),
            Self::Fisheye | Self::Hammer | Self::Cylinder | Self::Mercator => half_fov,
        }
    }

    /// Inverse of [`fov_to_view_scaling`](Self::fov_to_view_scaling).
    pub fn view_scaling_to_fov(&self, scaling: f64) -> f64 {
        match self {
            Self::Perspective => libm::atan(scaling),
            Self::EqualArea => 2.0 * libm::asin(0.5 * scaling),
            Self::Stereographic => 2.0 * libm::atan(0.5 * scaling),
            Self::Orthographic => libm::asin(scaling),
            Self::Fisheye | Self::Hammer | Self::Cylinder | Self::Mercator => scaling,
        }
    }

    /// Maps a local-frame direction to plane coordinates.
    ///
    /// # Errors
    ///
    /// [`ProjectionError::OutOfDomain`] for the zero vector, non-finite input, or a
    /// direction the projection cannot represent.
    pub fn forward(&self, v: Vector3) -> ProjectionResult<Projected> {
        if !v.is_finite() {
            return Err(ProjectionError::out_of_domain(*self, "non-finite direction"));
        }
        if v.magnitude_squared() == 0.0 {
            return Err(ProjectionError::out_of_domain(*self, "zero-length direction"));
        }
        match self {
            Self::Perspective => forward_perspective(v),
            Self::EqualArea => forward_equal_area(v),
            Self::Stereographic => forward_stereographic(v),
            Self::Fisheye => forward_fisheye(v),
            Self::Hammer => forward_hammer(v),
            Self::Cylinder => forward_cylinder(v),
            Self::Mercator => forward_mercator(v),
            Self::Orthographic => forward_orthographic(v),
        }
    }

    /// Maps plane coordinates back to a unit direction in the local frame.
    pub fn backward(&self, x: f64, y: f64) -> Unprojected {
        match self {
            Self::Perspective => backward_perspective(x, y),
            Self::EqualArea => backward_equal_area(x, y),
            Self::Stereographic => backward_stereographic(x, y),
            Self::Fisheye => backward_fisheye(x, y),
            Self::Hammer => backward_hammer(x, y),
            Self::Cylinder => backward_cylinder(x, y),
            Self::Mercator => backward_mercator(x, y),
            Self::Orthographic => backward_orthographic(x, y),
        }
    }
}

impl std::fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ProjectionKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_key(s)
    }
}
