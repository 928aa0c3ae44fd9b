//! Map projections from sky directions to viewport pixels.
//!
//! - [`ProjectionKind`]: the eight projection algorithms, dispatched by `match`
//! - [`ProjectorParams`]: viewport rectangle, center, fov, clip planes and flags
//! - [`ModelViewTransform`]: rigid world-to-view transform with cached inverse
//! - [`Projector`]: one algorithm bound to a transform and a params snapshot

pub mod error;
pub mod params;
pub mod projector;
pub mod spherical;
pub mod transform;

pub use error::{ProjectionError, ProjectionResult};
pub use params::{MaskType, ProjectorParams, Viewport};
pub use projector::{Projector, ScreenPoint, SphericalCap, ViewportShape};
pub use spherical::{Projected, ProjectionKind, Unprojected};
pub use transform::ModelViewTransform;
