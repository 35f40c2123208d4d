//! Geotagging command
//!
//! Builds a reference point from the command line and writes it into the
//! image's GPS directory.

use chrono::{DateTime, Utc};
use clap::ArgMatches;
use log::{info, warn};

use crate::api::ExifGeo;
use crate::commands::command_traits::Command;
use crate::commands::{input_file, load_options, parse_arg};
use crate::exif::codec;
use crate::exif::errors::{ExifError, ExifResult};
use crate::geotag::{FixQuality, ReferencePoint};

/// Command for geotagging an image
pub struct WriteCommand {
    /// Path to the input file
    input_file: String,
    point: ReferencePoint,
    api: ExifGeo,
}

impl WriteCommand {
    /// Create a new write command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new WriteCommand instance or an error if the point is incomplete
    pub fn new(args: &ArgMatches) -> ExifResult<Self> {
        let input_file = input_file(args)?;
        let point = Self::parse_point(args)?;
        let api = ExifGeo::new(load_options(args)?);

        Ok(WriteCommand { input_file, point, api })
    }

    /// Build the reference point from the CLI arguments
    fn parse_point(args: &ArgMatches) -> ExifResult<ReferencePoint> {
        let latitude = parse_arg::<f64>(args, "lat")?.ok_or(ExifError::MissingCoordinates)?;
        let longitude = parse_arg::<f64>(args, "lon")?.ok_or(ExifError::MissingCoordinates)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ExifError::ValueOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ExifError::ValueOutOfRange(longitude));
        }

        let mut point = ReferencePoint::new(latitude, longitude);
        point.altitude = parse_arg(args, "alt")?;
        point.satellites = parse_arg(args, "sat")?;
        point.hdop = parse_arg(args, "hdop")?;
        point.pdop = parse_arg(args, "pdop")?;
        point.speed = parse_arg(args, "speed")?;
        point.name = args.get_one::<String>("name").cloned();

        if let Some(text) = args.get_one::<String>("time") {
            point.time = Some(Self::parse_time(text)?);
        }

        point.fix = match args.get_one::<String>("fix").map(|fix| fix.to_lowercase()) {
            None => FixQuality::None,
            Some(fix) => match fix.as_str() {
                "none" => FixQuality::None,
                "2d" | "2" => FixQuality::TwoD,
                "3d" | "3" => FixQuality::ThreeD,
                other => return Err(ExifError::InvalidValue(format!("Invalid value for --fix: {}", other))),
            },
        };

        Ok(point)
    }

    /// Parse an RFC 3339 time, or an EXIF `YYYY:MM:DD hh:mm:ss` time taken as UTC
    fn parse_time(text: &str) -> ExifResult<DateTime<Utc>> {
        if let Ok(time) = DateTime::parse_from_rfc3339(text.trim()) {
            return Ok(time.with_timezone(&Utc));
        }
        codec::parse_exif_datetime(text)
            .ok_or_else(|| ExifError::InvalidValue(format!("Invalid value for --time: {}", text)))
    }
}

impl Command for WriteCommand {
    fn execute(&self) -> ExifResult<()> {
        info!("Geotagging {} with {}", self.input_file, self.point);

        match self.api.geotag_file(&self.input_file, &self.point)? {
            Some(path) => println!("Wrote {}", path),
            None => warn!("No matching point, {} was not modified", self.input_file),
        }
        Ok(())
    }
}
