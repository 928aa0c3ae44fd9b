//! Wall-clock collaborators.
//!
//! The clock never reads system time directly; it asks a [`TimeSource`] so that
//! applications can supply their own time-zone rules and tests can pin "now".

use crate::JulianDate;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

pub trait TimeSource {
    /// Current wall-clock instant as a Julian day (UTC).
    fn now_jd(&self) -> f64;

    /// Local civil time minus UTC, in hours, at the given instant.
    fn utc_offset_hours(&self, jd: f64) -> f64;
}

/// System clock with a fixed civil-time offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource {
    pub utc_offset_hours: f64,
}

impl SystemTimeSource {
    pub fn new(utc_offset_hours: f64) -> Self {
        Self { utc_offset_hours }
    }
}

impl TimeSource for SystemTimeSource {
    fn now_jd(&self) -> f64 {
        let seconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        };
        JulianDate::unix_epoch().add_seconds(seconds).to_f64()
    }

    fn utc_offset_hours(&self, _jd: f64) -> f64 {
        self.utc_offset_hours
    }
}

/// Hand-driven clock. Clones share the same instant.
///
/// ```
/// use celestial_time::{ManualTimeSource, TimeSource};
///
/// let source = ManualTimeSource::new(2451545.0, 1.0);
/// let handle = source.clone();
/// handle.advance_days(0.5);
/// assert_eq!(source.now_jd(), 2451545.5);
/// ```
#[derive(Debug, Clone)]
pub struct ManualTimeSource {
    now: Rc<Cell<f64>>,
    offset_hours: Rc<Cell<f64>>,
}

impl ManualTimeSource {
    pub fn new(now_jd: f64, utc_offset_hours: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(now_jd)),
            offset_hours: Rc::new(Cell::new(utc_offset_hours)),
        }
    }

    pub fn set_now(&self, jd: f64) {
        self.now.set(jd);
    }

    pub fn advance_days(&self, days: f64) {
        self.now.set(self.now.get() + days);
    }

    pub fn set_utc_offset_hours(&self, hours: f64) {
        self.offset_hours.set(hours);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_jd(&self) -> f64 {
        self.now.get()
    }

    fn utc_offset_hours(&self, _jd: f64) -> f64 {
        self.offset_hours.get()
    }
}
