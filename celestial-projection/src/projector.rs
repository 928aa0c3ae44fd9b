//! A projection bound to a model-view transform and a viewport.
//!
//! A [`Projector`] is a snapshot: it copies the [`ProjectorParams`] it was built
//! from, so later changes to the owner's parameters do not affect projectors
//! already handed out for the current frame.
//!
//! Screen mapping for a world vector `v`:
//!
//! 1. `m = model_view.forward(v)`
//! 2. `(px, py) = kind.forward(m)` in plane units
//! 3. `x = cx + flip_h * pixel_per_rad * px`, `y = cy + flip_v * pixel_per_rad * py`
//!
//! ```
//! use celestial_core::Vector3;
//! use celestial_projection::{ModelViewTransform, ProjectionKind, Projector, ProjectorParams};
//!
//! let mut params = ProjectorParams::default();
//! params.resize(0, 0, 800, 600);
//! let prj = Projector::new(ProjectionKind::Stereographic, ModelViewTransform::identity(), &params);
//!
//! let center = prj.project(Vector3::new(0.0, 0.0, -1.0))?;
//! assert_eq!((center.x, center.y), (400.0, 300.0));
//! # Ok::<(), celestial_projection::ProjectionError>(())
//! ```

use celestial_core::Vector3;

use crate::error::{ProjectionError, ProjectionResult};
use crate::params::{MaskType, ProjectorParams, Viewport};
use crate::spherical::{ProjectionKind, Unprojected};
use crate::transform::ModelViewTransform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// Depth in `[0, 1]`-like units derived from the near/far clip distances.
    pub depth: f64,
}

/// Region of the sphere bounded by a small circle: all `v` with
/// `v · center >= cos_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCap {
    pub center: Vector3,
    pub cos_radius: f64,
}

impl SphericalCap {
    pub fn full_sphere() -> Self {
        Self {
            center: Vector3::x_axis(),
            cos_radius: -1.0,
        }
    }

    pub fn contains(&self, direction: Vector3) -> bool {
        self.center.dot(&direction.normalize()) >= self.cos_radius
    }

    pub fn is_full_sphere(&self) -> bool {
        self.cos_radius <= -1.0
    }
}

/// Outline of the drawable area, for the renderer's viewport overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportShape {
    Rectangle(Viewport),
    Disk { center: (f64, f64), radius: f64 },
}

#[derive(Debug, Clone)]
pub struct Projector {
    kind: ProjectionKind,
    model_view: ModelViewTransform,
    params: ProjectorParams,
    pixel_per_rad: f64,
    flip_horizontal: f64,
    flip_vertical: f64,
    one_over_znear_minus_zfar: f64,
    bounding_cap: SphericalCap,
}

impl Projector {
    pub fn new(kind: ProjectionKind, model_view: ModelViewTransform, params: &ProjectorParams) -> Self {
        let half_fov_rad = params.fov.to_radians() * 0.5;
        let one_over_znear_minus_zfar = if params.z_near != params.z_far {
            1.0 / (params.z_near - params.z_far)
        } else {
            0.0
        };

        let mut projector = Self {
            kind,
            model_view,
            params: params.clone(),
            pixel_per_rad: 0.5 * params.fov_diameter / kind.fov_to_view_scaling(half_fov_rad),
            flip_horizontal: if params.flip_horizontal { -1.0 } else { 1.0 },
            flip_vertical: if params.flip_vertical { -1.0 } else { 1.0 },
            one_over_znear_minus_zfar,
            bounding_cap: SphericalCap::full_sphere(),
        };
        projector.bounding_cap = projector.compute_bounding_cap();
        projector
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn model_view(&self) -> &ModelViewTransform {
        &self.model_view
    }

    pub fn params(&self) -> &ProjectorParams {
        &self.params
    }

    pub fn fov(&self) -> f64 {
        self.params.fov
    }

    pub fn max_fov(&self) -> f64 {
        self.kind.max_fov()
    }

    pub fn pixel_per_rad(&self) -> f64 {
        self.pixel_per_rad
    }

    pub fn viewport(&self) -> Viewport {
        self.params.viewport
    }

    pub fn viewport_center(&self) -> (f64, f64) {
        self.params.viewport_center
    }

    pub fn viewport_fov_diameter(&self) -> f64 {
        self.params.fov_diameter
    }

    pub fn mask_type(&self) -> MaskType {
        self.params.mask_type
    }

    pub fn gravity_labels(&self) -> bool {
        self.params.gravity_labels
    }

    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal < 0.0
    }

    pub fn flip_vertical(&self) -> bool {
        self.flip_vertical < 0.0
    }

    pub fn bounding_cap(&self) -> &SphericalCap {
        &self.bounding_cap
    }

    /// Maps a world vector to window coordinates.
    ///
    /// # Errors
    ///
    /// [`ProjectionError::OutOfDomain`] when the transformed direction cannot be
    /// represented by this projection.
    pub fn project(&self, v: Vector3) -> ProjectionResult<ScreenPoint> {
        let local = self.model_view.forward(v);
        let plane = self.kind.forward(local)?;
        let (cx, cy) = self.params.viewport_center;
        Ok(ScreenPoint {
            x: cx + self.flip_horizontal * self.pixel_per_rad * plane.x,
            y: cy + self.flip_vertical * self.pixel_per_rad * plane.y,
            depth: (plane.distance - self.params.z_near) * self.one_over_znear_minus_zfar,
        })
    }

    /// Projects and keeps the result only when it falls inside the viewport.
    pub fn project_in_viewport(&self, v: Vector3) -> Option<ScreenPoint> {
        self.project(v)
            .ok()
            .filter(|p| self.check_in_viewport(p.x, p.y))
    }

    /// Maps window coordinates back to a world direction, whether or not the point
    /// lies on the map.
    pub fn unproject_lenient(&self, x: f64, y: f64) -> Unprojected {
        let (cx, cy) = self.params.viewport_center;
        let px = self.flip_horizontal * (x - cx) / self.pixel_per_rad;
        let py = self.flip_vertical * (y - cy) / self.pixel_per_rad;
        let local = self.kind.backward(px, py);
        Unprojected {
            direction: self.model_view.backward(local.direction),
            valid: local.valid,
        }
    }

    /// # Errors
    ///
    /// [`ProjectionError::OutsideMap`] when `(x, y)` is beyond the map's edge.
    pub fn unproject(&self, x: f64, y: f64) -> ProjectionResult<Vector3> {
        let result = self.unproject_lenient(x, y);
        if result.valid {
            Ok(result.direction)
        } else {
            Err(ProjectionError::outside_map(
                self.kind,
                format!("window point ({}, {})", x, y),
            ))
        }
    }

    pub fn check_in_viewport(&self, x: f64, y: f64) -> bool {
        self.params.viewport.contains(x, y)
    }

    pub fn viewport_shape(&self) -> ViewportShape {
        match self.params.mask_type {
            MaskType::None => ViewportShape::Rectangle(self.params.viewport),
            MaskType::Disk => ViewportShape::Disk {
                center: self.params.viewport_center,
                radius: 0.5 * self.params.fov_diameter,
            },
        }
    }

    // Cap around the unprojected viewport center reaching the corners and the
    // middle of the left and right edges.
    fn compute_bounding_cap(&self) -> SphericalCap {
        let vp = self.params.viewport;
        let (x, y) = (vp.x as f64, vp.y as f64);
        let (w, h) = (vp.width as f64, vp.height as f64);

        let center = self.unproject_lenient(x + 0.5 * w, y + 0.5 * h);
        if !center.valid {
            return SphericalCap::full_sphere();
        }
        let n = center.direction.normalize();

        let edges = [
            (x, y),
            (x + w, y + h),
            (x, y + h),
            (x + w, y),
            (x, y + 0.5 * h),
            (x + w, y + 0.5 * h),
        ];
        let mut cos_radius = 1.0_f64;
        for (ex, ey) in edges {
            let e = self.unproject_lenient(ex, ey);
            if !e.valid {
                return SphericalCap::full_sphere();
            }
            cos_radius = cos_radius.min(n.dot(&e.direction.normalize()));
        }
        SphericalCap {
            center: n,
            cos_radius,
        }
    }
}
