use thiserror::Error;

use crate::ProjectionKind;

pub type ProjectionResult<T> = Result<T, ProjectionError>;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("{kind} projection: direction outside valid domain: {message}")]
    OutOfDomain {
        kind: ProjectionKind,
        message: String,
    },

    #[error("{kind} projection: viewport point has no sky direction: {message}")]
    OutsideMap {
        kind: ProjectionKind,
        message: String,
    },

    #[error("Unknown projection type: {key}")]
    UnknownKey { key: String },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },
}

impl ProjectionError {
    pub fn out_of_domain(kind: ProjectionKind, message: impl Into<String>) -> Self {
        Self::OutOfDomain {
            kind,
            message: message.into(),
        }
    }

    pub fn outside_map(kind: ProjectionKind, message: impl Into<String>) -> Self {
        Self::OutsideMap {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
