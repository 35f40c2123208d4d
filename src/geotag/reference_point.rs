//! Reference point structure for geotagging

use chrono::{DateTime, Utc};
use std::fmt;

/// Quality of the GPS fix a point was recorded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixQuality {
    #[default]
    None,
    TwoD,
    ThreeD,
}

impl FixQuality {
    /// GPSMeasureMode character, if the fix has one
    pub fn measure_mode(&self) -> Option<&'static str> {
        match self {
            FixQuality::None => None,
            FixQuality::TwoD => Some("2"),
            FixQuality::ThreeD => Some("3"),
        }
    }

    /// Parse a GPSMeasureMode character
    pub fn from_measure_mode(mode: u8) -> Self {
        match mode {
            b'2' => FixQuality::TwoD,
            b'3' => FixQuality::ThreeD,
            _ => FixQuality::None,
        }
    }
}

/// A geographic position with the metadata recorded alongside it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferencePoint {
    /// Latitude in decimal degrees, negative south
    pub latitude: f64,
    /// Longitude in decimal degrees, negative west
    pub longitude: f64,
    /// Altitude in meters, negative below sea level
    pub altitude: Option<f64>,
    pub time: Option<DateTime<Utc>>,
    pub satellites: Option<u32>,
    pub fix: FixQuality,
    pub hdop: Option<f64>,
    pub pdop: Option<f64>,
    /// Speed in meters per second
    pub speed: Option<f64>,
    pub notes: Option<String>,
    pub name: Option<String>,
}

impl ReferencePoint {
    /// Create a point with only a position
    pub fn new(latitude: f64, longitude: f64) -> Self {
        ReferencePoint {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    /// Dilution of precision matching the fix: PDOP for 3D, HDOP otherwise
    pub fn dop(&self) -> Option<f64> {
        match self.fix {
            FixQuality::ThreeD => self.pdop.or(self.hdop),
            _ => self.hdop,
        }
        .filter(|dop| *dop > 0.0)
    }
}

impl fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7}, {:.7}", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, " alt {:.1} m", altitude)?;
        }
        if let Some(time) = &self.time {
            write!(f, " at {}", time.format("%Y-%m-%dT%H:%M:%SZ"))?;
        }
        if let Some(name) = &self.name {
            write!(f, " \"{}\"", name)?;
        }
        Ok(())
    }
}

/// Display name derived from a file path: the base name without extension
///
/// Drive, backslash and slash separators are all stripped. A leading dot
/// is kept so hidden files keep a name.
pub fn name_from_path(path: &str) -> String {
    let mut name = path;
    for separator in [':', '\\', '/'] {
        if let Some(index) = name.rfind(separator) {
            name = &name[index + 1..];
        }
    }
    match name.find('.') {
        Some(index) if index > 0 => name[..index].to_string(),
        _ => name.to_string(),
    }
}
