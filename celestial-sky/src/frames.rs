//! Reference frames and the per-tick transform set relating them.
//!
//! | Frame | Origin | Fundamental plane |
//! |-------|--------|-------------------|
//! | AltAz | observer | local horizon (x south, y east, z zenith) |
//! | HeliocentricEcliptic | Sun | VSOP87 ecliptic |
//! | ObservercentricEcliptic | observer | VSOP87 ecliptic |
//! | EquinoxEqu | observer | home body equator of date |
//! | J2000 | observer | Earth mean equator at J2000.0 |
//! | Galactic | observer | galactic plane |
//!
//! [`TransformSet::compute`] is a pure function of the instant and the observer
//! state. Nothing is carried from one tick to the next, so rounding never
//! accumulates.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use celestial_core::constants::{
    DEG_TO_RAD, J2000_TO_GALACTIC, VSOP87_FRAME_ROTATION_DEG, VSOP87_OBLIQUITY_DEG,
};
use celestial_core::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{SkyError, SkyResult};
use crate::observer::ObserverState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameType {
    AltAz,
    HeliocentricEcliptic,
    ObservercentricEcliptic,
    EquinoxEqu,
    J2000,
    Galactic,
}

impl FrameType {
    pub const ALL: [FrameType; 6] = [
        FrameType::AltAz,
        FrameType::HeliocentricEcliptic,
        FrameType::ObservercentricEcliptic,
        FrameType::EquinoxEqu,
        FrameType::J2000,
        FrameType::Galactic,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FrameType::AltAz => "FrameAltAz",
            FrameType::HeliocentricEcliptic => "FrameHeliocentricEcliptic",
            FrameType::ObservercentricEcliptic => "FrameObservercentricEcliptic",
            FrameType::EquinoxEqu => "FrameEquinoxEqu",
            FrameType::J2000 => "FrameJ2000",
            FrameType::Galactic => "FrameGalactic",
        }
    }

    /// Accepts `"FrameJ2000"` as well as `"j2000"`, ignoring case.
    pub fn from_key(key: &str) -> SkyResult<Self> {
        let wanted = key.trim();
        let short = |frame: &FrameType| &frame.key()["Frame".len()..];
        Self::ALL
            .into_iter()
            .find(|frame| {
                frame.key().eq_ignore_ascii_case(wanted) || short(frame).eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SkyError::unknown_frame(key))
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FrameType {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

struct FixedFrames {
    j2000_to_vsop87: Matrix4,
    vsop87_to_j2000: Matrix4,
    j2000_to_galactic: Matrix4,
    galactic_to_j2000: Matrix4,
}

fn fixed_frames() -> &'static FixedFrames {
    static FRAMES: OnceLock<FixedFrames> = OnceLock::new();
    FRAMES.get_or_init(|| {
        let j2000_to_vsop87 = Matrix4::rotation_x(-VSOP87_OBLIQUITY_DEG * DEG_TO_RAD)
            * Matrix4::rotation_z(VSOP87_FRAME_ROTATION_DEG * DEG_TO_RAD);
        let j2000_to_galactic = Matrix4::from_rotation(J2000_TO_GALACTIC);
        FixedFrames {
            j2000_to_vsop87,
            vsop87_to_j2000: j2000_to_vsop87.transpose(),
            j2000_to_galactic,
            galactic_to_j2000: j2000_to_galactic.transpose(),
        }
    })
}

pub fn j2000_to_vsop87() -> Matrix4 {
    fixed_frames().j2000_to_vsop87
}

pub fn vsop87_to_j2000() -> Matrix4 {
    fixed_frames().vsop87_to_j2000
}

pub fn j2000_to_galactic() -> Matrix4 {
    fixed_frames().j2000_to_galactic
}

pub fn galactic_to_j2000() -> Matrix4 {
    fixed_frames().galactic_to_j2000
}

/// Every observer-dependent transform for one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSet {
    pub altaz_to_equinox_equ: Matrix4,
    pub equinox_equ_to_altaz: Matrix4,
    pub equinox_equ_to_j2000: Matrix4,
    pub j2000_to_equinox_equ: Matrix4,
    pub j2000_to_altaz: Matrix4,
    pub altaz_to_j2000: Matrix4,
    pub heliocentric_ecliptic_to_equinox_equ: Matrix4,
    pub equinox_equ_to_heliocentric_ecliptic: Matrix4,
    pub altaz_to_heliocentric_ecliptic: Matrix4,
    pub heliocentric_ecliptic_to_altaz: Matrix4,
}

impl Default for TransformSet {
    fn default() -> Self {
        let id = Matrix4::identity();
        Self {
            altaz_to_equinox_equ: id,
            equinox_equ_to_altaz: id,
            equinox_equ_to_j2000: id,
            j2000_to_equinox_equ: id,
            j2000_to_altaz: id,
            altaz_to_j2000: id,
            heliocentric_ecliptic_to_equinox_equ: id,
            equinox_equ_to_heliocentric_ecliptic: id,
            altaz_to_heliocentric_ecliptic: id,
            heliocentric_ecliptic_to_altaz: id,
        }
    }
}

impl TransformSet {
    pub fn compute(jd: f64, observer: &ObserverState) -> Self {
        let fixed = fixed_frames();

        let altaz_to_equinox_equ = observer.rot_altaz_to_equatorial(jd);
        let equinox_equ_to_altaz = altaz_to_equinox_equ.transpose();

        let equinox_equ_to_j2000 = fixed.vsop87_to_j2000 * observer.rot_equatorial_to_vsop87(jd);
        let j2000_to_equinox_equ = equinox_equ_to_j2000.transpose();

        let j2000_to_altaz = equinox_equ_to_altaz * j2000_to_equinox_equ;
        let altaz_to_j2000 = equinox_equ_to_j2000 * altaz_to_equinox_equ;

        let center = observer.center_vsop87_pos(jd);
        let heliocentric_ecliptic_to_equinox_equ =
            j2000_to_equinox_equ * fixed.vsop87_to_j2000 * Matrix4::translation(-center);
        let equinox_equ_to_heliocentric_ecliptic =
            Matrix4::translation(center) * fixed.j2000_to_vsop87 * equinox_equ_to_j2000;

        let lift = Vector3::new(0.0, 0.0, observer.distance_from_center());
        let altaz_to_vsop87 = fixed.j2000_to_vsop87 * altaz_to_j2000;
        let altaz_to_heliocentric_ecliptic =
            Matrix4::translation(center) * altaz_to_vsop87 * Matrix4::translation(lift);
        let heliocentric_ecliptic_to_altaz = Matrix4::translation(-lift)
            * altaz_to_vsop87.transpose()
            * Matrix4::translation(-center);

        Self {
            altaz_to_equinox_equ,
            equinox_equ_to_altaz,
            equinox_equ_to_j2000,
            j2000_to_equinox_equ,
            j2000_to_altaz,
            altaz_to_j2000,
            heliocentric_ecliptic_to_equinox_equ,
            equinox_equ_to_heliocentric_ecliptic,
            altaz_to_heliocentric_ecliptic,
            heliocentric_ecliptic_to_altaz,
        }
    }

    /// Each transform paired with the one claimed to undo it.
    pub fn inverse_pairs(&self) -> [(&'static str, Matrix4, Matrix4); 5] {
        [
            ("altaz/equinox_equ", self.altaz_to_equinox_equ, self.equinox_equ_to_altaz),
            ("equinox_equ/j2000", self.equinox_equ_to_j2000, self.j2000_to_equinox_equ),
            ("j2000/altaz", self.j2000_to_altaz, self.altaz_to_j2000),
            (
                "heliocentric_ecliptic/equinox_equ",
                self.heliocentric_ecliptic_to_equinox_equ,
                self.equinox_equ_to_heliocentric_ecliptic,
            ),
            (
                "altaz/heliocentric_ecliptic",
                self.altaz_to_heliocentric_ecliptic,
                self.heliocentric_ecliptic_to_altaz,
            ),
        ]
    }

    /// Model-view for drawing in `frame`, given the alt-az model-view.
    pub fn model_view(&self, frame: FrameType, altaz_model_view: &Matrix4) -> Matrix4 {
        let mv = *altaz_model_view;
        match frame {
            FrameType::AltAz => mv,
            FrameType::HeliocentricEcliptic => mv * self.heliocentric_ecliptic_to_altaz,
            FrameType::ObservercentricEcliptic => {
                mv * self.j2000_to_altaz * fixed_frames().vsop87_to_j2000
            }
            FrameType::EquinoxEqu => mv * self.equinox_equ_to_altaz,
            FrameType::J2000 => mv * self.equinox_equ_to_altaz * self.j2000_to_equinox_equ,
            FrameType::Galactic => {
                mv * self.equinox_equ_to_altaz
                    * self.j2000_to_equinox_equ
                    * fixed_frames().galactic_to_j2000
            }
        }
    }

    /// Observer position in heliocentric ecliptic coordinates, AU.
    pub fn observer_heliocentric_ecliptic_position(&self) -> Vector3 {
        self.altaz_to_heliocentric_ecliptic.translation_part()
    }

    pub fn altaz_to_equinox_equ(&self, v: Vector3) -> Vector3 {
        self.altaz_to_equinox_equ.transform_point(v)
    }

    pub fn equinox_equ_to_altaz(&self, v: Vector3) -> Vector3 {
        self.equinox_equ_to_altaz.transform_point(v)
    }

    pub fn altaz_to_j2000(&self, v: Vector3) -> Vector3 {
        self.altaz_to_j2000.transform_point(v)
    }

    pub fn j2000_to_altaz(&self, v: Vector3) -> Vector3 {
        self.j2000_to_altaz.transform_point(v)
    }

    pub fn equinox_equ_to_j2000(&self, v: Vector3) -> Vector3 {
        self.equinox_equ_to_j2000.transform_point(v)
    }

    pub fn j2000_to_equinox_equ(&self, v: Vector3) -> Vector3 {
        self.j2000_to_equinox_equ.transform_point(v)
    }

    pub fn heliocentric_ecliptic_to_altaz(&self, v: Vector3) -> Vector3 {
        self.heliocentric_ecliptic_to_altaz.transform_point(v)
    }

    pub fn altaz_to_heliocentric_ecliptic(&self, v: Vector3) -> Vector3 {
        self.altaz_to_heliocentric_ecliptic.transform_point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SolarSystemCatalog;
    use celestial_core::constants::J2000_JD;
    use celestial_core::test_helpers::assert_matrix_close;
    use celestial_core::Location;

    fn observer_at(planet: &str, lon: f64, lat: f64) -> ObserverState {
        let catalog = SolarSystemCatalog::demo();
        let loc = Location::new("Site", planet, lon, lat, 250.0).unwrap();
        ObserverState::stationary(loc, &catalog)
    }

    #[test]
    fn test_frame_keys() {
        assert_eq!(FrameType::from_key("FrameJ2000").unwrap(), FrameType::J2000);
        assert_eq!(FrameType::from_key("altaz").unwrap(), FrameType::AltAz);
        assert_eq!("frameGalactic".parse::<FrameType>().unwrap(), FrameType::Galactic);
        assert!(matches!(
            FrameType::from_key("FrameSupergalactic"),
            Err(SkyError::UnknownFrame { .. })
        ));
    }

    #[test]
    fn test_fixed_frames_are_rotations() {
        let id = Matrix4::identity();
        assert_matrix_close(&(j2000_to_vsop87() * vsop87_to_j2000()), &id, 1e-15);
        assert_matrix_close(&(j2000_to_galactic() * galactic_to_j2000()), &id, 1e-9);
    }

    #[test]
    fn test_galactic_north_pole() {
        // J2000 direction of the north galactic pole: RA 192.85948, Dec 27.12825
        let ngp = Vector3::from_spherical(192.85948 * DEG_TO_RAD, 27.12825 * DEG_TO_RAD);
        let gal = j2000_to_galactic().transform_direction(ngp);
        assert!((gal.z - 1.0).abs() < 1e-8, "z = {}", gal.z);
    }

    #[test]
    fn test_every_pair_inverts() {
        let sites = [
            ("Earth", 2.35, 48.85),
            ("Mars", -120.0, -70.0),
            ("Jupiter", 10.0, 89.9),
        ];
        for (planet, lon, lat) in sites {
            let obs = observer_at(planet, lon, lat);
            for jd in [J2000_JD, J2000_JD + 1234.567, 2_300_000.25] {
                let set = TransformSet::compute(jd, &obs);
                for (name, forward, backward) in set.inverse_pairs() {
                    let diff = (forward * backward).max_abs_diff(&Matrix4::identity());
                    assert!(diff <= 1e-9, "{} on {} at {}: {}", name, planet, jd, diff);
                }
            }
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let obs = observer_at("Earth", 0.0, 45.0);
        let a = TransformSet::compute(J2000_JD + 10.0, &obs);
        let b = TransformSet::compute(J2000_JD + 10.0, &obs);
        assert_eq!(a, b);
    }

    #[test]
    fn test_earth_equator_of_date_is_j2000() {
        let obs = observer_at("Earth", 0.0, 45.0);
        let set = TransformSet::compute(J2000_JD, &obs);
        // only the 0.0000275 degree VSOP87 frame offset remains
        assert_matrix_close(&set.equinox_equ_to_j2000, &Matrix4::identity(), 1e-6);
    }

    #[test]
    fn test_observer_sits_on_the_surface() {
        let obs = observer_at("Earth", 0.0, 0.0);
        let jd = J2000_JD + 50.0;
        let set = TransformSet::compute(jd, &obs);
        let center = obs.center_vsop87_pos(jd);
        let offset = set.observer_heliocentric_ecliptic_position() - center;
        assert!((offset.magnitude() - obs.distance_from_center()).abs() < 1e-15);
    }

    #[test]
    fn test_sun_direction_agrees_between_paths() {
        let obs = observer_at("Earth", 30.0, 10.0);
        let set = TransformSet::compute(J2000_JD + 3.3, &obs);
        let sun = set.heliocentric_ecliptic_to_altaz(Vector3::zeros());
        let via_equ = set.equinox_equ_to_altaz(
            set.heliocentric_ecliptic_to_equinox_equ.transform_point(Vector3::zeros()),
        );
        // the two paths differ only by the observer's offset from the body centre
        let angle = sun.angle_to(&via_equ);
        assert!(angle < 1e-3, "angle = {}", angle);
    }

    #[test]
    fn test_model_view_altaz_passthrough() {
        let set = TransformSet::default();
        let mv = Matrix4::rotation_x(0.4);
        assert_eq!(set.model_view(FrameType::AltAz, &mv), mv);
        for frame in FrameType::ALL {
            assert!(set.model_view(frame, &mv).is_finite());
        }
    }

    #[test]
    fn test_galactic_model_view_composes_j2000() {
        let obs = observer_at("Earth", 5.0, 40.0);
        let set = TransformSet::compute(J2000_JD + 0.7, &obs);
        let mv = Matrix4::rotation_y(1.1);
        let j2000 = set.model_view(FrameType::J2000, &mv);
        let galactic = set.model_view(FrameType::Galactic, &mv);
        let v = Vector3::new(0.3, -0.2, 0.9).normalize();
        let a = galactic.transform_point(v);
        let b = j2000.transform_point(galactic_to_j2000().transform_point(v));
        assert!((a - b).magnitude() < 1e-12);
    }
}
