//! A small built-in solar system for demos and tests.
//!
//! Orbits are circles in the ecliptic plane and rotation is uniform, which is far
//! too crude for ephemeris work but keeps every quantity the frame engine needs
//! finite, smooth and cheap. Earth turns by the IAU 2000 Earth Rotation Angle so
//! that sidereal time on Earth is realistic.

use std::rc::Rc;

use celestial_core::constants::{AU_KM, DEG_TO_RAD, J2000_JD, VSOP87_OBLIQUITY_DEG};
use celestial_core::math::fmod;
use celestial_core::utils::normalize_degrees_positive;
use celestial_core::Vector3;

use crate::body::{BodyCatalog, CelestialBody, RotationElements};

/// Name of the pseudo-body at the solar system barycentre.
pub const SOLAR_SYSTEM_OBSERVER: &str = "Solar System Observer";

/// Earth rotation rate in turns per day, IAU 2000.
#[allow(clippy::excessive_precision)]
const ERA_RATE: f64 = 1.00273781191135448;

/// Earth Rotation Angle in degrees (IERS Conventions 2003).
pub fn earth_rotation_angle(jd: f64) -> f64 {
    let t = jd - J2000_JD;
    let f = fmod(jd, 1.0);
    normalize_degrees_positive(360.0 * (f + 0.7790572732640 + (ERA_RATE - 1.0) * t))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationModel {
    /// Prime meridian frozen at this angle, degrees.
    Fixed(f64),
    /// Uniform spin from the given angle at J2000.0, degrees.
    Uniform { at_j2000: f64 },
    EarthRotationAngle,
}

#[derive(Debug, Clone)]
pub struct CircularOrbitBody {
    name: String,
    radius_au: f64,
    orbit_radius_au: f64,
    orbital_period: f64,
    longitude_at_j2000: f64,
    sidereal_day: f64,
    rotation: RotationModel,
    elements: RotationElements,
}

impl CircularOrbitBody {
    /// A motionless, non-rotating body at the Sun's position.
    pub fn new(name: &str, radius_km: f64) -> Self {
        Self {
            name: name.to_string(),
            radius_au: radius_km / AU_KM,
            orbit_radius_au: 0.0,
            orbital_period: 0.0,
            longitude_at_j2000: 0.0,
            sidereal_day: 1.0,
            rotation: RotationModel::Fixed(0.0),
            elements: RotationElements::default(),
        }
    }

    /// Circular heliocentric orbit; angles in degrees, period in days.
    pub fn with_orbit(mut self, radius_au: f64, period_days: f64, longitude_at_j2000: f64) -> Self {
        self.orbit_radius_au = radius_au;
        self.orbital_period = period_days;
        self.longitude_at_j2000 = longitude_at_j2000;
        self
    }

    pub fn with_rotation(mut self, sidereal_day: f64, rotation: RotationModel) -> Self {
        self.sidereal_day = sidereal_day;
        self.rotation = rotation;
        self
    }

    /// Equator orientation against the VSOP87 ecliptic, degrees.
    pub fn with_equator(mut self, obliquity_deg: f64, ascending_node_deg: f64) -> Self {
        self.elements = RotationElements::new(
            obliquity_deg * DEG_TO_RAD,
            ascending_node_deg * DEG_TO_RAD,
        );
        self
    }
}

impl CelestialBody for CircularOrbitBody {
    fn english_name(&self) -> &str {
        &self.name
    }

    fn radius_au(&self) -> f64 {
        self.radius_au
    }

    fn sidereal_day(&self) -> f64 {
        self.sidereal_day
    }

    fn sidereal_time(&self, jd: f64) -> f64 {
        match self.rotation {
            RotationModel::Fixed(angle) => angle,
            RotationModel::Uniform { at_j2000 } => normalize_degrees_positive(
                at_j2000 + 360.0 * fmod(jd - J2000_JD, self.sidereal_day) / self.sidereal_day,
            ),
            RotationModel::EarthRotationAngle => earth_rotation_angle(jd),
        }
    }

    fn heliocentric_ecliptic_position(&self, jd: f64) -> Vector3 {
        if self.orbital_period <= 0.0 {
            return Vector3::zeros();
        }
        let turns = fmod(jd - J2000_JD, self.orbital_period) / self.orbital_period;
        let lon = (self.longitude_at_j2000 + 360.0 * turns) * DEG_TO_RAD;
        let (s, c) = libm::sincos(lon);
        Vector3::new(self.orbit_radius_au * c, self.orbit_radius_au * s, 0.0)
    }

    fn rotation_elements(&self, _jd: f64) -> RotationElements {
        self.elements
    }
}

/// Bodies looked up by English name, always containing an Earth.
pub struct SolarSystemCatalog {
    bodies: Vec<Rc<dyn CelestialBody>>,
    earth: Rc<dyn CelestialBody>,
}

impl SolarSystemCatalog {
    pub fn new(earth: Rc<dyn CelestialBody>) -> Self {
        Self {
            bodies: vec![earth.clone()],
            earth,
        }
    }

    pub fn with_body(mut self, body: Rc<dyn CelestialBody>) -> Self {
        self.bodies.push(body);
        self
    }

    /// Sun, Earth, Mars, Jupiter and the barycentric pseudo-body.
    pub fn demo() -> Self {
        let earth = CircularOrbitBody::new("Earth", 6378.1366)
            .with_orbit(1.00000261, 365.256363004, 100.46457166)
            .with_rotation(1.0 / ERA_RATE, RotationModel::EarthRotationAngle)
            .with_equator(VSOP87_OBLIQUITY_DEG, 0.0);

        let sun = CircularOrbitBody::new("Sun", 695_700.0)
            .with_rotation(25.38, RotationModel::Uniform { at_j2000: 84.176 })
            .with_equator(7.25, 75.76);

        let mars = CircularOrbitBody::new("Mars", 3396.19)
            .with_orbit(1.52371034, 686.980, 355.44656795)
            .with_rotation(1.025957, RotationModel::Uniform { at_j2000: 176.630 })
            .with_equator(26.72, 82.91);

        let jupiter = CircularOrbitBody::new("Jupiter", 71_492.0)
            .with_orbit(5.20288700, 4332.589, 34.39644051)
            .with_rotation(0.41354, RotationModel::Uniform { at_j2000: 284.95 })
            .with_equator(2.22, 337.57);

        let barycentre = CircularOrbitBody::new(SOLAR_SYSTEM_OBSERVER, 0.0);

        Self::new(Rc::new(earth))
            .with_body(Rc::new(sun))
            .with_body(Rc::new(mars))
            .with_body(Rc::new(jupiter))
            .with_body(Rc::new(barycentre))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.english_name())
    }
}

impl BodyCatalog for SolarSystemCatalog {
    fn search_by_english_name(&self, name: &str) -> Option<Rc<dyn CelestialBody>> {
        self.bodies
            .iter()
            .find(|b| b.english_name() == name)
            .cloned()
    }

    fn earth(&self) -> Rc<dyn CelestialBody> {
        self.earth.clone()
    }
}
