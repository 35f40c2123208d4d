//! Geodetic datum handling
//!
//! GPS directories may name the map datum their coordinates are expressed
//! in. Only WGS 84 is built in; other datums go through a `DatumConverter`.

use log::debug;

use crate::exif::errors::{ExifError, ExifResult};

/// Name written to GPSMapDatum
pub const WGS84_NAME: &str = "WGS-84";

/// Identifier for map datums
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapDatum {
    /// WGS 84, the datum GPS receivers report in
    Wgs84,
    /// Any other named datum
    Other(String),
}

impl MapDatum {
    /// Parse a datum from GPSMapDatum text (e.g. "WGS-84")
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name.trim()
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '_'))
            .collect::<String>()
            .to_uppercase();

        match normalized.as_str() {
            "WGS84" => MapDatum::Wgs84,
            _ => MapDatum::Other(name.trim().to_string()),
        }
    }

    /// Whether coordinates in this datum need no conversion
    pub fn is_wgs84(&self) -> bool {
        matches!(self, MapDatum::Wgs84)
    }

    /// Get a description of this datum
    pub fn description(&self) -> String {
        match self {
            MapDatum::Wgs84 => WGS84_NAME.to_string(),
            MapDatum::Other(name) => name.clone(),
        }
    }
}

/// Converts coordinates between a named datum and WGS 84
pub trait DatumConverter {
    /// Convert latitude/longitude in decimal degrees from `datum` to WGS 84
    fn to_wgs84(&self, datum: &MapDatum, latitude: f64, longitude: f64) -> ExifResult<(f64, f64)>;
}

/// Converter that knows WGS 84 only and rejects every other datum
#[derive(Debug, Clone, Copy, Default)]
pub struct Wgs84Only;

impl DatumConverter for Wgs84Only {
    fn to_wgs84(&self, datum: &MapDatum, latitude: f64, longitude: f64) -> ExifResult<(f64, f64)> {
        match datum {
            MapDatum::Wgs84 => Ok((latitude, longitude)),
            MapDatum::Other(name) => {
                debug!("No conversion available for datum {}", name);
                Err(ExifError::UnknownDatum(name.clone()))
            },
        }
    }
}
