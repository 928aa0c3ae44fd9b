//! A minimal zoom and pointing controller.
//!
//! [`ZoomController`] keeps the view fixed in the horizon frame (an alt-azimuth
//! mount) and eases the field of view toward a target over a fixed time.

use celestial_core::constants::DEG_TO_RAD;
use celestial_core::Vector3;

use crate::collaborators::MovementController;
use crate::frames::TransformSet;

pub const DEFAULT_INIT_FOV: f64 = 60.0;
pub const MIN_FOV: f64 = 0.001;

#[derive(Debug, Clone)]
pub struct ZoomController {
    init_fov: f64,
    current_fov: f64,
    target_fov: f64,
    /// Degrees per second while zooming.
    zoom_speed: f64,
    max_fov: f64,
    tracking: bool,
    /// Viewing direction in alt-az coordinates.
    view_altaz: Vector3,
}

impl ZoomController {
    pub fn new(init_fov: f64) -> Self {
        Self {
            init_fov,
            current_fov: init_fov,
            target_fov: init_fov,
            zoom_speed: 0.0,
            max_fov: 360.0,
            tracking: false,
            view_altaz: Vector3::from_spherical(0.0, 30.0 * DEG_TO_RAD),
        }
    }

    /// Points at azimuth/altitude in degrees, azimuth from north through east.
    pub fn look_at_altaz(&mut self, azimuth: f64, altitude: f64) {
        self.view_altaz =
            Vector3::from_spherical((180.0 - azimuth) * DEG_TO_RAD, altitude * DEG_TO_RAD);
    }

    /// Eases toward `fov` over `duration` seconds; zero jumps immediately.
    pub fn zoom_to(&mut self, fov: f64, duration: f64) {
        self.target_fov = fov.clamp(MIN_FOV, self.max_fov);
        if duration <= 0.0 {
            self.current_fov = self.target_fov;
            self.zoom_speed = 0.0;
        } else {
            self.zoom_speed = (self.target_fov - self.current_fov).abs() / duration;
        }
    }

    pub fn target_fov(&self) -> f64 {
        self.target_fov
    }

    pub fn max_fov(&self) -> f64 {
        self.max_fov
    }
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(DEFAULT_INIT_FOV)
    }
}

impl MovementController for ZoomController {
    fn init_fov(&self) -> f64 {
        self.init_fov
    }

    fn update_motion(&mut self, dt: f64) {
        let remaining = self.target_fov - self.current_fov;
        let step = self.zoom_speed * dt;
        if remaining.abs() <= step || self.zoom_speed == 0.0 {
            self.current_fov = self.target_fov;
        } else {
            self.current_fov += step.copysign(remaining);
        }
        self.current_fov = self.current_fov.min(self.max_fov);
    }

    fn current_fov(&self) -> f64 {
        self.current_fov
    }

    fn set_max_fov(&mut self, max_fov: f64) {
        self.max_fov = max_fov;
        self.target_fov = self.target_fov.min(max_fov);
        self.current_fov = self.current_fov.min(max_fov);
    }

    fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn view_j2000(&self, transforms: &TransformSet) -> (Vector3, Vector3) {
        (
            transforms.altaz_to_j2000.transform_direction(self.view_altaz),
            transforms.altaz_to_j2000.transform_direction(Vector3::z_axis()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_reaches_target() {
        let mut zoom = ZoomController::new(60.0);
        zoom.zoom_to(20.0, 2.0);
        zoom.update_motion(1.0);
        assert!((zoom.current_fov() - 40.0).abs() < 1e-12);
        zoom.update_motion(1.5);
        assert_eq!(zoom.current_fov(), 20.0);
    }

    #[test]
    fn test_max_fov_clamps_current_and_target() {
        let mut zoom = ZoomController::new(200.0);
        zoom.set_max_fov(120.0);
        assert_eq!(zoom.current_fov(), 120.0);
        zoom.zoom_to(170.0, 0.0);
        assert_eq!(zoom.current_fov(), 120.0);
    }

    #[test]
    fn test_look_at_south_horizon() {
        let mut zoom = ZoomController::default();
        zoom.look_at_altaz(180.0, 0.0);
        let (dir, up) = zoom.view_j2000(&TransformSet::default());
        assert!((dir - Vector3::x_axis()).magnitude() < 1e-15);
        assert_eq!(up, Vector3::z_axis());
    }
}
