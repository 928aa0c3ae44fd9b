pub const UNIX_EPOCH_JD: f64 = 2440587.5;

pub const SECONDS_TO_DAYS: f64 = 1.0 / celestial_core::constants::SECONDS_PER_DAY_F64;

/// One second expressed in days. Also the real-time flow rate.
#[allow(clippy::excessive_precision)]
pub const JD_SECOND: f64 = 0.000011574074074074074074;

#[allow(clippy::excessive_precision)]
pub const JD_MINUTE: f64 = 0.00069444444444444444444;

#[allow(clippy::excessive_precision)]
pub const JD_HOUR: f64 = 0.041666666666666666666;

pub const JD_DAY: f64 = 1.0;

/// Latest representable simulated instant.
pub const JD_MAX: f64 = 38245309.499988;

/// Earliest representable simulated instant.
pub const JD_MIN: f64 = -34803211.500012;
