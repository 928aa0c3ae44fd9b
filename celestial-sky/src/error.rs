use celestial_core::AstroError;
use celestial_projection::ProjectionError;
use celestial_time::TimeError;
use thiserror::Error;

pub type SkyResult<T> = Result<T, SkyError>;

#[derive(Debug, Error)]
pub enum SkyError {
    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Core calculation failed: {0}")]
    Astro(#[from] AstroError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Sky core used before init()")]
    NotInitialized,

    #[error("Unknown reference frame '{key}'")]
    UnknownFrame { key: String },

    #[error("Unknown projection '{key}'")]
    UnknownProjection { key: String },

    #[error("Preset sky time '{value}' is neither a Julian day nor a date")]
    InvalidPresetTime { value: String },

    #[error("Degenerate view orientation: {message}")]
    DegenerateView { message: String },
}

impl SkyError {
    pub fn unknown_frame(key: impl Into<String>) -> Self {
        Self::UnknownFrame { key: key.into() }
    }

    pub fn unknown_projection(key: impl Into<String>) -> Self {
        Self::UnknownProjection { key: key.into() }
    }

    pub fn invalid_preset_time(value: impl Into<String>) -> Self {
        Self::InvalidPresetTime {
            value: value.into(),
        }
    }

    pub fn degenerate_view(message: impl Into<String>) -> Self {
        Self::DegenerateView {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err: SkyError = TimeError::ParseError("bad".into()).into();
        assert_eq!(err.to_string(), "Time error: Parse error: bad");

        let err: SkyError = ProjectionError::unknown_key("ProjectionFoo").into();
        assert!(err.to_string().starts_with("Projection error:"));
    }

    #[test]
    fn test_helper_constructors() {
        assert_eq!(
            SkyError::unknown_frame("Ecliptic").to_string(),
            "Unknown reference frame 'Ecliptic'"
        );
        assert!(matches!(
            SkyError::invalid_preset_time("tomorrow"),
            SkyError::InvalidPresetTime { ref value } if value == "tomorrow"
        ));
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: SkyError = json_err.into();
        assert!(matches!(err, SkyError::Config(_)));
    }
}
