//! Simulation time for the sky engine.
//!
//! The simulated instant is a single Julian day number that flows at a signed rate
//! (days per real second). [`SimulationClock`] owns that pair and the stepped speed
//! controls; [`TimeSource`] is the wall-clock collaborator it consults for "now",
//! "today" and the civil-time offset.
//!
//! ```
//! use celestial_time::{constants::JD_SECOND, ManualTimeSource, SimulationClock};
//!
//! let wall = ManualTimeSource::new(2_460_000.5, 0.0);
//! let mut clock = SimulationClock::new();
//! clock.set_to_now(&wall);
//! assert!(clock.is_now(&wall));
//!
//! clock.set_rate(0.0);
//! clock.increase_speed();
//! assert_eq!(clock.rate(), JD_SECOND);
//! ```

pub mod clock;
pub mod constants;
pub mod julian;
pub mod parsing;
pub mod source;

pub use clock::SimulationClock;
pub use julian::JulianDate;
pub use parsing::{parse_date_or_datetime, parse_iso8601, parse_time_of_day, ParsedDateTime, TimeOfDay};
pub use source::{ManualTimeSource, SystemTimeSource, TimeSource};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeError {
    InvalidDate,
    ConversionError(String),
    ParseError(String),
    InvalidTimeOfDay(String),
}

impl std::fmt::Display for TimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeError::InvalidDate => write!(f, "Invalid date"),
            TimeError::ConversionError(msg) => write!(f, "Conversion error: {}", msg),
            TimeError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            TimeError::InvalidTimeOfDay(msg) => write!(f, "Invalid time of day: {}", msg),
        }
    }
}

impl std::error::Error for TimeError {}

impl From<celestial_core::AstroError> for TimeError {
    fn from(err: celestial_core::AstroError) -> Self {
        TimeError::ConversionError(err.to_string())
    }
}
