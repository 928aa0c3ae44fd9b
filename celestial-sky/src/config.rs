//! Startup settings, keyed the way the settings store names them.
//!
//! [`CoreConfig`] deserializes from any flat key/value source. Keys are the
//! store's own (`projection/viewport_width`, `init_location/useGPS`, ...) and every
//! missing key takes its usual default.
//!
//! ```
//! use celestial_sky::config::{CoreConfig, StartupTimeMode};
//!
//! let config = CoreConfig::from_pairs([
//!     ("projection/viewport_width", "1024"),
//!     ("navigation/startup_time_mode", "Preset"),
//! ])?;
//! assert_eq!(config.viewport_width, 1024);
//! assert_eq!(config.viewport_height, 256);
//! assert_eq!(config.startup_time_mode(), StartupTimeMode::Preset);
//! # Ok::<(), celestial_sky::SkyError>(())
//! ```

use celestial_core::constants::J2000_JD;
use celestial_projection::{MaskType, ProjectorParams, Viewport};
use celestial_time::parse_date_or_datetime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{SkyError, SkyResult};

/// How the clock is set at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StartupTimeMode {
    /// The wall clock.
    #[default]
    Actual,
    /// A fixed instant, read as local civil time.
    Preset,
    /// Today's date at a configured time of day.
    Today,
}

impl StartupTimeMode {
    /// Case-insensitive; anything unrecognised is [`StartupTimeMode::Actual`].
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "preset" => Self::Preset,
            "today" => Self::Today,
            _ => Self::Actual,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Actual => "actual",
            Self::Preset => "preset",
            Self::Today => "today",
        }
    }
}

/// Preset instant, stored either as a Julian day or as a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetSkyTime {
    JulianDay(f64),
    Text(String),
}

impl Default for PresetSkyTime {
    fn default() -> Self {
        Self::JulianDay(J2000_JD)
    }
}

impl PresetSkyTime {
    /// Julian day of the preset: a number first, then an ISO-8601 date.
    ///
    /// # Errors
    ///
    /// [`SkyError::InvalidPresetTime`] when the text is neither.
    pub fn resolve(&self) -> SkyResult<f64> {
        match self {
            Self::JulianDay(jd) if jd.is_finite() => Ok(*jd),
            Self::JulianDay(jd) => Err(SkyError::invalid_preset_time(jd.to_string())),
            Self::Text(text) => {
                if let Some(jd) = text.trim().parse::<f64>().ok().filter(|jd| jd.is_finite()) {
                    log::debug!("preset sky time {:?} is a Julian day", text);
                    return Ok(jd);
                }
                log::debug!("preset sky time {:?} is not a number; reading it as a date", text);
                parse_date_or_datetime(text)
                    .map(|dt| dt.to_julian_date().to_f64())
                    .map_err(|_| SkyError::invalid_preset_time(text.as_str()))
            }
        }
    }
}

fn string_like<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// Stores write flags as "true", "1" or 1 depending on who saved them.
fn bool_like<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 0.0 => Some(false),
            Some(x) if x == 1.0 => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| serde::de::Error::custom(format!("expected a boolean flag, got {}", value)))
}

// Pixel sizes sometimes arrive as "800.0"; accept any integral value that fits.
fn i32_like<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number
        .filter(|x| x.is_finite() && x.fract() == 0.0)
        .filter(|x| *x >= i32::MIN as f64 && *x <= i32::MAX as f64)
        .map(|x| x as i32)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a whole pixel count, got {}", value)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    #[serde(rename = "projection/viewport", deserialize_with = "string_like")]
    pub viewport_mask: String,
    #[serde(rename = "projection/viewport_width", deserialize_with = "i32_like")]
    pub viewport_width: i32,
    #[serde(rename = "projection/viewport_height", deserialize_with = "i32_like")]
    pub viewport_height: i32,
    #[serde(rename = "projection/viewport_x", deserialize_with = "i32_like")]
    pub viewport_x: i32,
    #[serde(rename = "projection/viewport_y", deserialize_with = "i32_like")]
    pub viewport_y: i32,
    /// Half the viewport width when unset.
    #[serde(rename = "projection/viewport_center_x", skip_serializing_if = "Option::is_none")]
    pub viewport_center_x: Option<f64>,
    #[serde(rename = "projection/viewport_center_y", skip_serializing_if = "Option::is_none")]
    pub viewport_center_y: Option<f64>,
    /// The smaller viewport side when unset.
    #[serde(rename = "projection/viewport_fov_diameter", skip_serializing_if = "Option::is_none")]
    pub viewport_fov_diameter: Option<f64>,
    #[serde(rename = "projection/flip_horz", deserialize_with = "bool_like")]
    pub flip_horizontal: bool,
    #[serde(rename = "projection/flip_vert", deserialize_with = "bool_like")]
    pub flip_vertical: bool,
    #[serde(rename = "viewing/flag_gravity_labels", deserialize_with = "bool_like")]
    pub gravity_labels: bool,
    #[serde(rename = "init_location/useGPS", deserialize_with = "bool_like")]
    pub use_gps: bool,
    #[serde(rename = "init_location/location", deserialize_with = "string_like")]
    pub default_location: String,
    #[serde(rename = "navigation/preset_sky_time")]
    pub preset_sky_time: PresetSkyTime,
    #[serde(rename = "navigation/today_time", deserialize_with = "string_like")]
    pub today_time: String,
    #[serde(rename = "navigation/startup_time_mode", deserialize_with = "string_like")]
    pub startup_time_mode: String,
    #[serde(rename = "projection/type", deserialize_with = "string_like")]
    pub projection_type: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            viewport_mask: String::new(),
            viewport_width: 256,
            viewport_height: 256,
            viewport_x: 0,
            viewport_y: 0,
            viewport_center_x: None,
            viewport_center_y: None,
            viewport_fov_diameter: None,
            flip_horizontal: false,
            flip_vertical: false,
            gravity_labels: false,
            use_gps: true,
            default_location: "error".to_string(),
            preset_sky_time: PresetSkyTime::default(),
            today_time: "22:00".to_string(),
            startup_time_mode: "actual".to_string(),
            projection_type: "stereographic".to_string(),
        }
    }
}

// Settings stores hand back text; give numbers and booleans their JSON type.
fn typed_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if let Ok(b) = trimmed.parse::<bool>() {
        return Value::Bool(b);
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(raw.to_string())
}

impl CoreConfig {
    /// Builds a config from textual key/value pairs; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> SkyResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map: Map<String, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), typed_value(v.as_ref())))
            .collect();
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    pub fn from_json_str(json: &str) -> SkyResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn startup_time_mode(&self) -> StartupTimeMode {
        StartupTimeMode::from_key(&self.startup_time_mode)
    }

    pub fn mask_type(&self) -> MaskType {
        MaskType::from_key(&self.viewport_mask)
    }

    pub fn projector_params(&self) -> ProjectorParams {
        let viewport = Viewport::new(
            self.viewport_x,
            self.viewport_y,
            self.viewport_width,
            self.viewport_height,
        );
        ProjectorParams {
            viewport,
            viewport_center: (
                self.viewport_center_x
                    .unwrap_or(0.5 * self.viewport_width as f64),
                self.viewport_center_y
                    .unwrap_or(0.5 * self.viewport_height as f64),
            ),
            fov_diameter: self
                .viewport_fov_diameter
                .unwrap_or_else(|| viewport.min_side()),
            flip_horizontal: self.flip_horizontal,
            flip_vertical: self.flip_vertical,
            gravity_labels: self.gravity_labels,
            mask_type: self.mask_type(),
            ..ProjectorParams::default()
        }
    }
}
