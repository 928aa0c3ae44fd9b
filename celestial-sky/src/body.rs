//! Bodies an observer can stand on, as seen by the frame engine.
//!
//! The engine never integrates orbits itself. It asks a [`BodyCatalog`] for a
//! [`CelestialBody`] by English name and queries it for the handful of quantities
//! that tie the body-fixed horizon to the heliocentric ecliptic: where the body
//! centre is, how big it is, how its equator is tilted, and how far it has turned.

use std::rc::Rc;

use celestial_core::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Orientation of a body's equator relative to the VSOP87 ecliptic, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationElements {
    /// Tilt of the equator against the ecliptic.
    pub obliquity: f64,
    /// Ecliptic longitude of the equator's ascending node.
    pub ascending_node: f64,
}

impl RotationElements {
    pub fn new(obliquity: f64, ascending_node: f64) -> Self {
        Self {
            obliquity,
            ascending_node,
        }
    }

    /// Rotation taking body-equatorial coordinates into VSOP87 ecliptic ones.
    pub fn equatorial_to_vsop87(&self) -> Matrix4 {
        Matrix4::rotation_z(self.ascending_node) * Matrix4::rotation_x(-self.obliquity)
    }
}

pub trait CelestialBody {
    fn english_name(&self) -> &str;

    /// Equatorial radius in AU.
    fn radius_au(&self) -> f64;

    /// Length of one sidereal rotation, in days.
    fn sidereal_day(&self) -> f64;

    /// Rotation angle of the prime meridian at `jd`, in degrees.
    fn sidereal_time(&self, jd: f64) -> f64;

    /// Body centre in VSOP87 heliocentric ecliptic coordinates, AU.
    fn heliocentric_ecliptic_position(&self, jd: f64) -> Vector3;

    fn rotation_elements(&self, jd: f64) -> RotationElements;

    fn rot_equatorial_to_vsop87(&self, jd: f64) -> Matrix4 {
        self.rotation_elements(jd).equatorial_to_vsop87()
    }
}

impl std::fmt::Debug for dyn CelestialBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CelestialBody")
            .field("name", &self.english_name())
            .finish_non_exhaustive()
    }
}

pub trait BodyCatalog {
    fn search_by_english_name(&self, name: &str) -> Option<Rc<dyn CelestialBody>>;

    /// The body unknown names fall back to.
    fn earth(&self) -> Rc<dyn CelestialBody>;
}
