//! Viewport geometry and drawing flags handed to every projector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of the visible area inside the viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MaskType {
    /// The whole rectangle is drawn.
    #[default]
    None,
    /// Only the disk of diameter `fov_diameter` around the viewport center.
    Disk,
}

impl MaskType {
    /// `"disk"` selects [`MaskType::Disk`]; anything else means no mask.
    pub fn from_key(key: &str) -> Self {
        if key.trim().eq_ignore_ascii_case("disk") {
            Self::Disk
        } else {
            Self::None
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Disk => "disk",
        }
    }
}

/// Pixel rectangle, origin at the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + 0.5 * self.width as f64,
            self.y as f64 + 0.5 * self.height as f64,
        )
    }

    /// Closed containment test on window coordinates.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x as f64
            && y >= self.y as f64
            && x <= (self.x + self.width) as f64
            && y <= (self.y + self.height) as f64
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0, 256, 256)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectorParams {
    pub viewport: Viewport,
    /// Center of projection in window coordinates; need not be the viewport center.
    pub viewport_center: (f64, f64),
    /// Diameter in pixels that `fov` spans.
    pub fov_diameter: f64,
    /// Field of view in degrees.
    pub fov: f64,
    pub z_near: f64,
    pub z_far: f64,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub gravity_labels: bool,
    pub mask_type: MaskType,
}

impl Default for ProjectorParams {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            viewport,
            viewport_center: viewport.center(),
            fov_diameter: viewport.min_side(),
            fov: 60.0,
            z_near: 0.0,
            z_far: 0.0,
            flip_horizontal: false,
            flip_vertical: false,
            gravity_labels: false,
            mask_type: MaskType::None,
        }
    }
}

impl ProjectorParams {
    /// Resets the viewport to a new window rectangle, recentering and refitting
    /// the field-of-view diameter.
    pub fn resize(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.viewport = Viewport::new(x, y, width, height);
        self.viewport_center = self.viewport.center();
        self.fov_diameter = self.viewport.min_side();
    }
}
