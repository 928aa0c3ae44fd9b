//! Numeric primitives shared by the sky reference-frame crates.
//!
//! - [`Vector3`] for directions and positions
//! - [`Matrix4`] homogeneous transforms (rotation plus translation) between frames
//! - [`Location`] for an observer site on a named body
//! - [`AstroError`] and the [`AstroResult`] alias
//! - [`constants`] for angle conversion, epoch, and fixed frame-rotation values
//!
//! ```
//! use celestial_core::{constants::DEG_TO_RAD, Matrix4, Vector3};
//!
//! let m = Matrix4::rotation_z(90.0 * DEG_TO_RAD);
//! let v = m.transform_direction(Vector3::x_axis());
//! assert!((v.y - 1.0).abs() < 1e-15);
//! ```

pub mod constants;
pub mod errors;
pub mod location;
pub mod math;
pub mod matrix;
pub mod utils;

pub use errors::{AstroError, AstroResult, MathErrorKind};
pub use location::Location;
pub use matrix::{Matrix4, Vector3};

pub mod test_helpers;
