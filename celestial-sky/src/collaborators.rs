//! Services the sky core drives but does not own the logic of.
//!
//! The core receives each of these at construction through [`Collaborators`]; it
//! never looks them up globally.

use celestial_core::{Location, Vector3};
use celestial_projection::ViewportShape;

use crate::frames::TransformSet;
use crate::movement::ZoomController;

pub trait LocationResolver {
    /// Resolves an identifier such as `"Paris, France"`.
    fn location_for_string(&self, id: &str) -> Option<Location>;

    /// Used when the configured identifier cannot be resolved.
    fn default_location(&self) -> Location;
}

pub trait SelectionProvider {
    /// English name of the selected object, if any.
    fn selected_object(&self) -> Option<String>;

    fn unselect(&mut self);
}

/// Drives field of view and viewing direction from user input.
pub trait MovementController {
    /// Field of view at startup, degrees.
    fn init_fov(&self) -> f64;

    fn update_motion(&mut self, dt: f64);

    fn current_fov(&self) -> f64;

    /// Ceiling imposed by the active projection, degrees.
    fn set_max_fov(&mut self, max_fov: f64);

    fn set_tracking(&mut self, tracking: bool);

    fn is_tracking(&self) -> bool;

    /// Viewing direction and up vector in J2000 coordinates.
    fn view_j2000(&self, transforms: &TransformSet) -> (Vector3, Vector3);
}

pub trait SkyDrawer {
    fn update(&mut self, dt: f64);

    fn pre_draw(&mut self);
}

pub trait FrameRenderer {
    fn clear(&mut self);

    fn draw_viewport_shape(&mut self, shape: &ViewportShape);
}

/// Everything the core talks to, handed over once.
pub struct Collaborators {
    pub locations: Box<dyn LocationResolver>,
    pub selection: Box<dyn SelectionProvider>,
    pub movement: Box<dyn MovementController>,
    pub sky_drawer: Box<dyn SkyDrawer>,
    pub renderer: Box<dyn FrameRenderer>,
}

impl Collaborators {
    /// No selection, a [`ZoomController`], and nothing drawn.
    pub fn headless(locations: Box<dyn LocationResolver>) -> Self {
        Self {
            locations,
            selection: Box::new(NameSelection::default()),
            movement: Box::new(ZoomController::default()),
            sky_drawer: Box::new(Headless),
            renderer: Box::new(Headless),
        }
    }
}

/// Resolver over a fixed list of locations, matched by [`Location::id`] or name.
#[derive(Debug, Clone)]
pub struct StaticLocationResolver {
    locations: Vec<Location>,
    default: Location,
}

impl StaticLocationResolver {
    pub fn new(default: Location) -> Self {
        Self {
            locations: vec![default.clone()],
            default,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }
}

impl LocationResolver for StaticLocationResolver {
    fn location_for_string(&self, id: &str) -> Option<Location> {
        let id = id.trim();
        self.locations
            .iter()
            .find(|loc| loc.id() == id || loc.name == id)
            .cloned()
    }

    fn default_location(&self) -> Location {
        self.default.clone()
    }
}

/// Selection held as a plain name.
#[derive(Debug, Clone, Default)]
pub struct NameSelection {
    selected: Option<String>,
}

impl NameSelection {
    pub fn select(&mut self, name: &str) {
        self.selected = Some(name.to_string());
    }
}

impl SelectionProvider for NameSelection {
    fn selected_object(&self) -> Option<String> {
        self.selected.clone()
    }

    fn unselect(&mut self) {
        self.selected = None;
    }
}

/// Drawer and renderer that do nothing, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl SkyDrawer for Headless {
    fn update(&mut self, _dt: f64) {}

    fn pre_draw(&mut self) {}
}

impl FrameRenderer for Headless {
    fn clear(&mut self) {}

    fn draw_viewport_shape(&mut self, _shape: &ViewportShape) {}
}
