//! Error types for the reference-frame primitives.
//!
//! [`AstroError`] covers the two ways the value types in this crate fail: a
//! location with out-of-range coordinates, and numerical trouble such as
//! normalizing a zero vector.
//!
//! # Usage
//!
//! ```
//! use celestial_core::{AstroError, MathErrorKind};
//!
//! fn safe_divide(a: f64, b: f64) -> Result<f64, AstroError> {
//!     if b == 0.0 {
//!         return Err(AstroError::math_error(
//!             "safe_divide",
//!             MathErrorKind::DivisionByZero,
//!             "divisor is zero",
//!         ));
//!     }
//!     Ok(a / b)
//! }
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MathErrorKind {
    /// Attempted division by zero or near-zero value.
    DivisionByZero,
    /// Result is NaN or infinity.
    NotFinite,
}

/// Unified error type for the primitives in this crate.
#[derive(Error, Debug)]
pub enum AstroError {
    /// A location field is non-finite or outside its range.
    #[error("Invalid location ({field}): {message}")]
    InvalidLocation { field: String, message: String },

    /// Numerical computation failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

/// Convenience alias for `Result<T, AstroError>`.
pub type AstroResult<T> = Result<T, AstroError>;

impl AstroError {
    /// Creates an [`InvalidLocation`](Self::InvalidLocation) error.
    pub fn invalid_location(field: &str, reason: &str) -> Self {
        Self::InvalidLocation {
            field: field.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_location_error() {
        let err = AstroError::invalid_location("latitude", "outside [-90, 90]");
        assert_eq!(
            err.to_string(),
            "Invalid location (latitude): outside [-90, 90]"
        );
    }

    #[test]
    fn test_math_error_with_kind() {
        let err = AstroError::math_error(
            "Vector3::normalize",
            MathErrorKind::DivisionByZero,
            "zero-length vector",
        );
        assert!(err.to_string().contains("Math error"));
        assert!(err.to_string().contains("DivisionByZero"));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<AstroError>();
        _assert_sync::<AstroError>();
    }
}
