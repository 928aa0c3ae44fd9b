//! Debouncing of GPS fixes.
//!
//! A fix is accepted when there is no previous one, or when it moved by more than
//! [`GEO_THRESHOLD`] degrees in latitude or in longitude. Accepted fixes become
//! synthetic Earth locations at zero altitude.

use celestial_core::{AstroResult, Location};

/// Degrees a fix must move, on either axis, to count as new.
pub const GEO_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct GpsTracker {
    last_fix: Option<Location>,
}

impl GpsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fix(&self) -> Option<&Location> {
        self.last_fix.as_ref()
    }

    /// Returns the new location when the fix is accepted, `None` when it is
    /// within the threshold of the last one.
    ///
    /// # Errors
    ///
    /// Non-finite coordinates or a latitude beyond ±90 degrees.
    pub fn accept_fix(&mut self, longitude: f64, latitude: f64) -> AstroResult<Option<Location>> {
        if let Some(last) = &self.last_fix {
            let moved = (last.latitude - latitude).abs() > GEO_THRESHOLD
                || (last.longitude - longitude).abs() > GEO_THRESHOLD;
            if !moved {
                return Ok(None);
            }
        }

        let name = format!("GPS {:.2},{:.2}", latitude, longitude);
        let location = Location::new(&name, "Earth", longitude, latitude, 0.0)?;
        log::debug!("accepted GPS fix {}", name);
        self.last_fix = Some(location.clone());
        Ok(Some(location))
    }
}
