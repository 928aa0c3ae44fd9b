//! Where the viewpoint is: standing still, or travelling between two locations.
//!
//! An [`ObserverState`] is either [`Stationary`] on one body or [`Transitioning`]
//! from one [`Location`] to another, possibly on a different body. A transition
//! never turns itself into a stationary observer; once its life is over the owner
//! replaces it with [`ObserverState::successor`].
//!
//! While a transition crosses bodies, the body the observer stands on is a blend of
//! the two endpoints ([`HomeBody::Blended`]): position, size, spin and equator
//! orientation all slide from one body to the other.

use std::rc::Rc;

use celestial_core::constants::{AU_KM, DEG_TO_RAD};
use celestial_core::math::{lerp, lerp_angle_degrees};
use celestial_core::utils::{normalize_degrees_positive, normalize_longitude};
use celestial_core::{Location, Matrix4, Vector3};

use crate::body::{BodyCatalog, CelestialBody};

/// Latitudes closer to a pole than this make the horizon frame degenerate.
pub const MAX_ROTATION_LATITUDE: f64 = 89.5;

const EARTH: &str = "Earth";

/// Looks up `name`, standing on Earth when the catalog does not know it.
pub fn resolve_body(catalog: &dyn BodyCatalog, name: &str) -> Rc<dyn CelestialBody> {
    match catalog.search_by_english_name(name) {
        Some(body) => body,
        None => {
            log::warn!("cannot place an observer on unknown body {:?}; using Earth", name);
            catalog.earth()
        }
    }
}

/// The body under the observer's feet.
#[derive(Debug, Clone)]
pub enum HomeBody {
    Resting(Rc<dyn CelestialBody>),
    /// Part way from `from` to `to`, `t` in `[0, 1]`.
    Blended {
        from: Rc<dyn CelestialBody>,
        to: Rc<dyn CelestialBody>,
        t: f64,
    },
}

impl HomeBody {
    /// During a blend the non-Earth endpoint gives its name.
    pub fn english_name(&self) -> &str {
        match self {
            Self::Resting(body) => body.english_name(),
            Self::Blended { from, to, .. } => {
                if to.english_name() != EARTH {
                    to.english_name()
                } else {
                    from.english_name()
                }
            }
        }
    }

    pub fn radius_au(&self) -> f64 {
        match self {
            Self::Resting(body) => body.radius_au(),
            Self::Blended { from, to, t } => lerp(from.radius_au(), to.radius_au(), *t),
        }
    }

    pub fn sidereal_day(&self) -> f64 {
        match self {
            Self::Resting(body) => body.sidereal_day(),
            Self::Blended { from, to, t } => lerp(from.sidereal_day(), to.sidereal_day(), *t),
        }
    }

    /// Degrees in `[0, 360)`.
    pub fn sidereal_time(&self, jd: f64) -> f64 {
        match self {
            Self::Resting(body) => body.sidereal_time(jd),
            Self::Blended { from, to, t } => normalize_degrees_positive(lerp_angle_degrees(
                from.sidereal_time(jd),
                to.sidereal_time(jd),
                *t,
            )),
        }
    }

    pub fn heliocentric_ecliptic_position(&self, jd: f64) -> Vector3 {
        match self {
            Self::Resting(body) => body.heliocentric_ecliptic_position(jd),
            Self::Blended { from, to, t } => from
                .heliocentric_ecliptic_position(jd)
                .lerp(&to.heliocentric_ecliptic_position(jd), *t),
        }
    }

    pub fn rot_equatorial_to_vsop87(&self, jd: f64) -> Matrix4 {
        match self {
            Self::Resting(body) => body.rot_equatorial_to_vsop87(jd),
            Self::Blended { from, to, t } => blend_rotations(
                &from.rot_equatorial_to_vsop87(jd),
                &to.rot_equatorial_to_vsop87(jd),
                *t,
            ),
        }
    }
}

/// Slides rotation `a` toward `b`: the pole (third column) and prime axis
/// (first column) are interpolated, then squared up again.
///
/// When the poles cancel out the nearer endpoint is used as is.
fn blend_rotations(a: &Matrix4, b: &Matrix4, t: f64) -> Matrix4 {
    let prime = a.column(0).lerp(&b.column(0), t);
    let basis = a
        .column(2)
        .lerp(&b.column(2), t)
        .try_normalize()
        .and_then(|pole| {
            let x = (prime - pole * prime.dot(&pole)).try_normalize()?;
            Ok((x, pole))
        });
    match basis {
        Ok((x, z)) => Matrix4::from_columns(x, z.cross(&x), z),
        Err(err) => {
            log::debug!("equator blend is degenerate at t = {} ({})", t, err);
            if t < 0.5 {
                *a
            } else {
                *b
            }
        }
    }
}

/// Rotation from the local horizon frame to the body's equator of date.
///
/// Alt-az axes: x toward the south point, y toward the east point, z to the zenith.
fn horizon_to_equatorial(home: &HomeBody, location: &Location, jd: f64) -> Matrix4 {
    let lat = location
        .latitude
        .clamp(-MAX_ROTATION_LATITUDE, MAX_ROTATION_LATITUDE);
    Matrix4::rotation_z((home.sidereal_time(jd) + location.longitude) * DEG_TO_RAD)
        * Matrix4::rotation_y((90.0 - lat) * DEG_TO_RAD)
}

#[derive(Debug, Clone)]
pub struct Stationary {
    location: Location,
    body: Rc<dyn CelestialBody>,
}

impl Stationary {
    pub fn new(location: Location, catalog: &dyn BodyCatalog) -> Self {
        let body = resolve_body(catalog, &location.planet);
        Self { location, body }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

#[derive(Debug, Clone)]
pub struct Transitioning {
    from: Location,
    to: Location,
    from_body: Rc<dyn CelestialBody>,
    to_body: Rc<dyn CelestialBody>,
    duration: f64,
    elapsed: f64,
    name: String,
    current: Location,
}

impl Transitioning {
    /// Starts a transition of `duration` seconds with nothing elapsed yet.
    pub fn new(from: Location, to: Location, duration: f64, catalog: &dyn BodyCatalog) -> Self {
        let from_body = resolve_body(catalog, &from.planet);
        let to_body = resolve_body(catalog, &to.planet);
        let name = if from.planet != to.planet {
            format!("{} -> {}", from.planet, to.planet)
        } else {
            format!("{} -> {}", from.name, to.name)
        };
        let current = from.clone().with_name(&name).with_region(None);
        Self {
            from,
            to,
            from_body,
            to_body,
            duration,
            elapsed: 0.0,
            name,
            current,
        }
    }

    pub fn from(&self) -> &Location {
        &self.from
    }

    pub fn to(&self) -> &Location {
        &self.to
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fraction of the way travelled, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_life_over(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn home_body(&self) -> HomeBody {
        if Rc::ptr_eq(&self.from_body, &self.to_body) {
            HomeBody::Resting(self.to_body.clone())
        } else {
            HomeBody::Blended {
                from: self.from_body.clone(),
                to: self.to_body.clone(),
                t: self.progress(),
            }
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.elapsed += dt;
        if self.is_life_over() {
            self.current = self.to.clone();
            return;
        }

        let t = self.progress();
        let home = self.home_body();
        self.current = Location {
            name: self.name.clone(),
            planet: home.english_name().to_string(),
            longitude: normalize_longitude(lerp_angle_degrees(
                self.from.longitude,
                self.to.longitude,
                t,
            )),
            latitude: lerp(self.from.latitude, self.to.latitude, t),
            altitude: lerp(self.from.altitude, self.to.altitude, t),
            region: None,
        };
    }
}

#[derive(Debug, Clone)]
pub enum ObserverState {
    Stationary(Stationary),
    Transitioning(Transitioning),
}

impl ObserverState {
    pub fn stationary(location: Location, catalog: &dyn BodyCatalog) -> Self {
        Self::Stationary(Stationary::new(location, catalog))
    }

    pub fn transitioning(
        from: Location,
        to: Location,
        duration: f64,
        catalog: &dyn BodyCatalog,
    ) -> Self {
        Self::Transitioning(Transitioning::new(from, to, duration, catalog))
    }

    /// Interpolated while transitioning.
    pub fn location(&self) -> &Location {
        match self {
            Self::Stationary(s) => &s.location,
            Self::Transitioning(t) => &t.current,
        }
    }

    pub fn home_body(&self) -> HomeBody {
        match self {
            Self::Stationary(s) => HomeBody::Resting(s.body.clone()),
            Self::Transitioning(t) => t.home_body(),
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Transitioning(_))
    }

    /// Always false for a stationary observer.
    pub fn is_life_over(&self) -> bool {
        match self {
            Self::Stationary(_) => false,
            Self::Transitioning(t) => t.is_life_over(),
        }
    }

    /// What replaces this state once its life is over: the transition's
    /// destination, or the same stationary observer.
    pub fn successor(&self) -> ObserverState {
        match self {
            Self::Stationary(s) => Self::Stationary(s.clone()),
            Self::Transitioning(t) => Self::Stationary(Stationary {
                location: t.to.clone(),
                body: t.to_body.clone(),
            }),
        }
    }

    pub fn update(&mut self, dt: f64) {
        if let Self::Transitioning(t) = self {
            t.update(dt);
        }
    }

    pub fn rot_altaz_to_equatorial(&self, jd: f64) -> Matrix4 {
        horizon_to_equatorial(&self.home_body(), self.location(), jd)
    }

    pub fn rot_equatorial_to_vsop87(&self, jd: f64) -> Matrix4 {
        self.home_body().rot_equatorial_to_vsop87(jd)
    }

    /// Heliocentric ecliptic position of the home body's centre, AU.
    pub fn center_vsop87_pos(&self, jd: f64) -> Vector3 {
        self.home_body().heliocentric_ecliptic_position(jd)
    }

    /// Distance from the home body's centre, AU.
    pub fn distance_from_center(&self) -> f64 {
        self.home_body().radius_au() + self.location().altitude / (1000.0 * AU_KM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SolarSystemCatalog;
    use celestial_core::constants::J2000_JD;

    fn site(name: &str, planet: &str, lon: f64, lat: f64, alt: f64) -> Location {
        Location::new(name, planet, lon, lat, alt).unwrap()
    }

    #[test]
    fn test_unknown_body_stands_on_earth() {
        let catalog = SolarSystemCatalog::demo();
        let obs = ObserverState::stationary(site("X", "Vulcan", 0.0, 0.0, 0.0), &catalog);
        assert_eq!(obs.home_body().english_name(), "Earth");
        assert_eq!(obs.location().planet, "Vulcan");
    }

    #[test]
    fn test_zenith_at_north_pole_is_celestial_pole() {
        let catalog = SolarSystemCatalog::demo();
        let obs = ObserverState::stationary(site("Pole", "Earth", 0.0, 90.0, 0.0), &catalog);
        let rot = obs.rot_altaz_to_equatorial(J2000_JD);
        let zenith = rot.transform_direction(Vector3::z_axis());
        // clamped to 89.5 degrees
        assert!((zenith.z - (89.5 * DEG_TO_RAD).sin()).abs() < 1e-12);
    }

    #[test]
    fn test_zenith_on_equator_follows_local_sidereal_time() {
        let catalog = SolarSystemCatalog::demo();
        let obs = ObserverState::stationary(site("Eq", "Earth", 30.0, 0.0, 0.0), &catalog);
        let jd = J2000_JD + 0.25;
        let lst = catalog.earth().sidereal_time(jd) + 30.0;
        let zenith = obs
            .rot_altaz_to_equatorial(jd)
            .transform_direction(Vector3::z_axis());
        let expected = Vector3::from_spherical(lst * DEG_TO_RAD, 0.0);
        assert!((zenith - expected).magnitude() < 1e-12);
    }

    #[test]
    fn test_distance_adds_altitude_in_au() {
        let catalog = SolarSystemCatalog::demo();
        let obs = ObserverState::stationary(site("Peak", "Earth", 0.0, 0.0, 8848.0), &catalog);
        let expected = catalog.earth().radius_au() + 8.848 / AU_KM;
        assert!((obs.distance_from_center() - expected).abs() < 1e-18);
    }

    #[test]
    fn test_transition_names() {
        let catalog = SolarSystemCatalog::demo();
        let paris = site("Paris", "Earth", 2.35, 48.85, 35.0);
        let rome = site("Rome", "Earth", 12.5, 41.9, 20.0);
        let crater = site("Gale", "Mars", 137.4, -5.4, 0.0);

        let local = Transitioning::new(paris.clone(), rome, 10.0, &catalog);
        assert_eq!(local.current.name, "Paris -> Rome");

        let trip = Transitioning::new(paris, crater, 10.0, &catalog);
        assert_eq!(trip.current.name, "Earth -> Mars");
    }

    #[test]
    fn test_transition_interpolates_halfway() {
        let catalog = SolarSystemCatalog::demo();
        let from = site("A", "Earth", 10.0, 20.0, 0.0);
        let to = site("B", "Earth", 30.0, 40.0, 1000.0);
        let mut obs = ObserverState::transitioning(from, to, 4.0, &catalog);
        obs.update(2.0);
        let loc = obs.location();
        assert!((loc.longitude - 20.0).abs() < 1e-12);
        assert!((loc.latitude - 30.0).abs() < 1e-12);
        assert!((loc.altitude - 500.0).abs() < 1e-9);
        assert!(!obs.is_life_over());
    }

    #[test]
    fn test_transition_longitude_crosses_antimeridian() {
        let catalog = SolarSystemCatalog::demo();
        let from = site("A", "Earth", 170.0, 0.0, 0.0);
        let to = site("B", "Earth", -170.0, 0.0, 0.0);
        let mut obs = ObserverState::transitioning(from, to, 2.0, &catalog);
        obs.update(1.0);
        assert!((obs.location().longitude.abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_successor_lands_on_target() {
        let catalog = SolarSystemCatalog::demo();
        let from = site("A", "Earth", 0.0, 0.0, 0.0);
        let to = site("B", "Mars", 45.0, -10.0, 0.0);
        let mut obs = ObserverState::transitioning(from, to.clone(), 3.0, &catalog);
        for _ in 0..3 {
            assert!(!obs.is_life_over());
            obs.update(1.0);
        }
        assert!(obs.is_life_over());
        let next = obs.successor();
        assert!(!next.is_transitioning());
        assert_eq!(next.location(), &to);
        assert_eq!(next.home_body().english_name(), "Mars");
    }

    #[test]
    fn test_blended_home_body_between_planets() {
        let catalog = SolarSystemCatalog::demo();
        let from = site("A", "Earth", 0.0, 0.0, 0.0);
        let to = site("B", "Mars", 0.0, 0.0, 0.0);
        let mut obs = ObserverState::transitioning(from, to, 10.0, &catalog);
        obs.update(5.0);

        let home = obs.home_body();
        assert_eq!(home.english_name(), "Mars");
        assert_eq!(obs.location().planet, "Mars");

        let jd = J2000_JD + 40.0;
        let earth = catalog.earth().heliocentric_ecliptic_position(jd);
        let mars = catalog
            .search_by_english_name("Mars")
            .unwrap()
            .heliocentric_ecliptic_position(jd);
        let mid = home.heliocentric_ecliptic_position(jd);
        assert!((mid - (earth + mars) * 0.5).magnitude() < 1e-12);
    }

    #[test]
    fn test_blend_toward_earth_keeps_other_name() {
        let catalog = SolarSystemCatalog::demo();
        let from = site("A", "Jupiter", 0.0, 0.0, 0.0);
        let to = site("B", "Earth", 0.0, 0.0, 0.0);
        let obs = ObserverState::transitioning(from, to, 10.0, &catalog);
        assert_eq!(obs.home_body().english_name(), "Jupiter");
    }

    #[test]
    fn test_rotations_stay_orthonormal_mid_blend() {
        let catalog = SolarSystemCatalog::demo();
        let from = site("A", "Earth", 0.0, 45.0, 0.0);
        let to = site("B", "Jupiter", 90.0, -30.0, 0.0);
        let mut obs = ObserverState::transitioning(from, to, 10.0, &catalog);
        obs.update(3.7);
        for rot in [
            obs.rot_altaz_to_equatorial(J2000_JD),
            obs.rot_equatorial_to_vsop87(J2000_JD),
        ] {
            let product = rot * rot.transpose();
            assert!(product.max_abs_diff(&Matrix4::identity()) < 1e-14);
        }
    }

    /// Earth's spin and orbit with a hand-set equator orientation.
    #[derive(Debug)]
    struct TiltedEarth {
        earth: Rc<dyn CelestialBody>,
        equator: Matrix4,
    }

    impl CelestialBody for TiltedEarth {
        fn english_name(&self) -> &str {
            "Tilted"
        }
        fn radius_au(&self) -> f64 {
            self.earth.radius_au()
        }
        fn sidereal_day(&self) -> f64 {
            self.earth.sidereal_day()
        }
        fn sidereal_time(&self, jd: f64) -> f64 {
            self.earth.sidereal_time(jd)
        }
        fn heliocentric_ecliptic_position(&self, jd: f64) -> Vector3 {
            self.earth.heliocentric_ecliptic_position(jd)
        }
        fn rotation_elements(&self, jd: f64) -> crate::body::RotationElements {
            self.earth.rotation_elements(jd)
        }
        fn rot_equatorial_to_vsop87(&self, _jd: f64) -> Matrix4 {
            self.equator
        }
    }

    fn tilted(equator: Matrix4) -> Rc<dyn CelestialBody> {
        Rc::new(TiltedEarth {
            earth: SolarSystemCatalog::demo().earth(),
            equator,
        })
    }

    #[test]
    fn test_blend_honours_custom_equator_orientation() {
        let earth = SolarSystemCatalog::demo().earth();
        let equator = Matrix4::rotation_y(0.7) * Matrix4::rotation_z(0.3);
        let custom = tilted(equator);
        let at = |t: f64| {
            HomeBody::Blended {
                from: earth.clone(),
                to: custom.clone(),
                t,
            }
            .rot_equatorial_to_vsop87(J2000_JD)
        };

        assert!(at(1.0).max_abs_diff(&equator) < 1e-12);
        assert!(at(0.0).max_abs_diff(&earth.rot_equatorial_to_vsop87(J2000_JD)) < 1e-12);

        let mid = at(0.5);
        assert!((mid * mid.transpose()).max_abs_diff(&Matrix4::identity()) < 1e-14);
        let handedness = mid.column(0).cross(&mid.column(1)) - mid.column(2);
        assert!(handedness.magnitude() < 1e-14);
        let pole = mid.column(2);
        let from_pole = earth.rot_equatorial_to_vsop87(J2000_JD).column(2);
        assert!((pole.angle_to(&from_pole) - pole.angle_to(&equator.column(2))).abs() < 1e-12);
    }

    #[test]
    fn test_blend_of_opposite_poles_picks_nearer_endpoint() {
        let upright = tilted(Matrix4::identity());
        let flipped = Matrix4::from_columns(Vector3::x_axis(), -Vector3::y_axis(), -Vector3::z_axis());
        let home = HomeBody::Blended {
            from: upright,
            to: tilted(flipped),
            t: 0.5,
        };
        assert!(home.rot_equatorial_to_vsop87(J2000_JD).max_abs_diff(&flipped) < 1e-15);
    }
}
