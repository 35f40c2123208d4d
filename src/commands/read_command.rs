//! Reference point reading command
//!
//! Prints the reference point stored in an image's GPS directory.

use clap::ArgMatches;
use log::info;

use crate::api::ExifGeo;
use crate::commands::command_traits::Command;
use crate::commands::{input_file, load_options};
use crate::exif::errors::ExifResult;
use crate::geotag::ReferencePoint;
use crate::utils::file_utils;

/// Command for printing an image's reference point
pub struct ReadCommand {
    /// Path to the input file
    input_file: String,
    api: ExifGeo,
}

impl ReadCommand {
    /// Create a new read command
    pub fn new(args: &ArgMatches) -> ExifResult<Self> {
        Ok(ReadCommand {
            input_file: input_file(args)?,
            api: ExifGeo::new(load_options(args)?),
        })
    }

    fn display_point(&self, point: &ReferencePoint) {
        println!("Latitude:   {:.7}", point.latitude);
        println!("Longitude:  {:.7}", point.longitude);
        if let Some(altitude) = point.altitude {
            println!("Altitude:   {:.2} m", altitude);
        }
        if let Some(time) = &point.time {
            println!("Time:       {}", time.format("%Y-%m-%dT%H:%M:%SZ"));
        }
        if let Some(satellites) = point.satellites {
            println!("Satellites: {}", satellites);
        }
        if let Some(mode) = point.fix.measure_mode() {
            println!("Fix:        {}D", mode);
        }
        if let Some(hdop) = point.hdop {
            println!("HDOP:       {:.2}", hdop);
        }
        if let Some(pdop) = point.pdop {
            println!("PDOP:       {:.2}", pdop);
        }
        if let Some(speed) = point.speed {
            println!("Speed:      {:.2} m/s", speed);
        }
        if let Some(notes) = &point.notes {
            println!("Notes:      {}", notes);
        }
        if let Some(name) = &point.name {
            println!("Name:       {}", name);
        }
    }
}

impl Command for ReadCommand {
    fn execute(&self) -> ExifResult<()> {
        info!("Reading GPS data from {}", self.input_file);
        let jpeg = file_utils::read_file(&self.input_file)?;

        match self.api.read_reference_point(&jpeg, Some(&self.input_file))? {
            Some(point) => self.display_point(&point),
            None => println!("No GPS information in {}", self.input_file),
        }
        Ok(())
    }
}
