//! Named observer location on any body.
//!
//! Unlike a geodetic site on Earth, a [`Location`] names the body it belongs to, so
//! the same type describes a site in Paris, on Mars, or the pseudo-location at the
//! barycentre of the solar system.
//!
//! # Coordinate conventions
//!
//! - **Longitude**: East positive, degrees, normalized to (-180, 180]
//! - **Latitude**: North positive, degrees, range [-90, 90]
//! - **Altitude**: meters above the body's reference radius
//!
//! Two locations are equal when they stand on the same body at the same coordinates;
//! the display name and region are labels and do not take part in comparison.
//!
//! ```
//! use celestial_core::Location;
//!
//! let paris = Location::new("Paris", "Earth", 2.35, 48.85, 35.0)?;
//! let renamed = paris.clone().with_name("Home");
//! assert_eq!(paris, renamed);
//! # Ok::<(), celestial_core::AstroError>(())
//! ```

use crate::errors::{AstroError, AstroResult};
use crate::utils::normalize_longitude;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub name: String,
    /// English name of the body the observer stands on.
    pub planet: String,
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
    /// Political region or country, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub region: Option<String>,
}

impl Location {
    /// Creates a validated location from degrees and meters.
    ///
    /// # Errors
    ///
    /// Returns [`AstroError::InvalidLocation`] if any coordinate is non-finite or the
    /// latitude lies outside [-90, 90].
    pub fn new(
        name: &str,
        planet: &str,
        longitude: f64,
        latitude: f64,
        altitude: f64,
    ) -> AstroResult<Self> {
        if !longitude.is_finite() {
            return Err(AstroError::invalid_location(
                "longitude",
                "must be finite",
            ));
        }
        if !latitude.is_finite() {
            return Err(AstroError::invalid_location("latitude", "must be finite"));
        }
        if !altitude.is_finite() {
            return Err(AstroError::invalid_location("altitude", "must be finite"));
        }
        if latitude.abs() > 90.0 {
            return Err(AstroError::invalid_location(
                "latitude",
                "outside valid range [-90, 90] degrees",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            planet: planet.to_string(),
            longitude: normalize_longitude(longitude),
            latitude,
            altitude,
            region: None,
        })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_planet(mut self, planet: &str) -> Self {
        self.planet = planet.to_string();
        self
    }

    pub fn with_region(mut self, region: Option<&str>) -> Self {
        self.region = region.map(str::to_string);
        self
    }

    /// Canonical identifier, `"name, region"` or just the name.
    pub fn id(&self) -> String {
        match &self.region {
            Some(region) if !region.is_empty() => format!("{}, {}", self.name, region),
            _ => self.name.clone(),
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.planet == other.planet
            && self.longitude == other.longitude
            && self.latitude == other.latitude
            && self.altitude == other.altitude
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}; lon {:.4}°, lat {:.4}°, alt {:.0} m)",
            self.id(),
            self.planet,
            self.longitude,
            self.latitude,
            self.altitude
        )
    }
}
