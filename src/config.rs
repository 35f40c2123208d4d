//! Geotagging options
//!
//! Options come from an optional TOML file with a `[geotag]` table and
//! are then overridden by command line flags:
//!
//! ```toml
//! [geotag]
//! frame = 10
//! filename_as_name = true
//! overwrite = false
//! name = "IMG_0042"
//! ```

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::fs;

use crate::exif::errors::{ExifError, ExifResult};
use crate::geotag::ReferencePoint;

/// Default tolerance between image time and point time, in seconds
pub const DEFAULT_FRAME_SECONDS: i64 = 10;

/// Options controlling how an image is geotagged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeotagOptions {
    /// Largest accepted distance between image time and point time, in seconds
    pub frame: i64,
    /// Name points read from an image after the image's file name
    pub filename_as_name: bool,
    /// Replace the input file instead of writing next to it
    pub overwrite: bool,
    /// Accept only a point with this name (case-insensitive) instead of matching by time
    pub name: Option<String>,
}

impl Default for GeotagOptions {
    fn default() -> Self {
        GeotagOptions {
            frame: DEFAULT_FRAME_SECONDS,
            filename_as_name: true,
            overwrite: false,
            name: None,
        }
    }
}

impl GeotagOptions {
    /// Load options from a TOML file
    pub fn from_file(path: &str) -> ExifResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ExifError::GenericError(format!("Failed to read config {}: {}", path, e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse options from a TOML string, defaulting missing keys
    pub fn from_toml_str(content: &str) -> ExifResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(ExifError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut options = GeotagOptions::default();
        let Some(table) = toml_value.get("geotag").and_then(|v| v.as_table()) else {
            debug!("No [geotag] table, using defaults");
            return Ok(options);
        };

        if let Some(value) = table.get("frame") {
            options.frame = value.as_integer()
                .filter(|frame| *frame >= 0)
                .ok_or_else(|| ExifError::InvalidValue(format!("frame must be a non-negative integer, got {}", value)))?;
        }
        if let Some(value) = table.get("filename_as_name") {
            options.filename_as_name = value.as_bool()
                .ok_or_else(|| ExifError::InvalidValue(format!("filename_as_name must be a boolean, got {}", value)))?;
        }
        if let Some(value) = table.get("overwrite") {
            options.overwrite = value.as_bool()
                .ok_or_else(|| ExifError::InvalidValue(format!("overwrite must be a boolean, got {}", value)))?;
        }
        if let Some(value) = table.get("name") {
            let name = value.as_str()
                .ok_or_else(|| ExifError::InvalidValue(format!("name must be a string, got {}", value)))?;
            options.name = Some(name.to_string());
        }

        Ok(options)
    }

    /// Whether a point may be used to geotag an image taken at `image_time`
    ///
    /// With a name key the point's name must match; otherwise the point's
    /// time must lie within `frame` seconds of the image time.
    pub fn accepts(&self, point: &ReferencePoint, image_time: Option<DateTime<Utc>>) -> bool {
        if let Some(key) = &self.name {
            let matches = point.name.as_deref()
                .map_or(false, |name| name.eq_ignore_ascii_case(key));
            if !matches {
                warn!("No matching point with name \"{}\" found", key);
            }
            return matches;
        }

        let Some(point_time) = point.time else {
            warn!("No point with a valid timestamp found");
            return false;
        };
        let Some(image_time) = image_time else {
            warn!("Image has no capture time to match against");
            return false;
        };

        let distance = (image_time - point_time).num_seconds().abs();
        if distance > self.frame {
            warn!("No matching point found for image date {}", image_time.format("%Y-%m-%dT%H:%M:%SZ"));
            warn!("Best is from {}, {} second(s) away", point_time.format("%Y-%m-%dT%H:%M:%SZ"), distance);
            return false;
        }

        debug!("Point is {} second(s) from image time", distance);
        true
    }
}
