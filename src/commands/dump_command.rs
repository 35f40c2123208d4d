//! EXIF structure dump command

use clap::ArgMatches;
use log::info;

use crate::api::ExifGeo;
use crate::commands::command_traits::Command;
use crate::commands::input_file;
use crate::config::GeotagOptions;
use crate::exif::errors::ExifResult;
use crate::utils::file_utils;

/// Command for listing every directory and tag of an image
pub struct DumpCommand {
    /// Path to the input file
    input_file: String,
}

impl DumpCommand {
    /// Create a new dump command
    pub fn new(args: &ArgMatches) -> ExifResult<Self> {
        Ok(DumpCommand {
            input_file: input_file(args)?,
        })
    }
}

impl Command for DumpCommand {
    fn execute(&self) -> ExifResult<()> {
        info!("Dumping EXIF structure of {}", self.input_file);
        let jpeg = file_utils::read_file(&self.input_file)?;
        let listing = ExifGeo::new(GeotagOptions::default()).dump(&jpeg)?;
        print!("{}", listing);
        Ok(())
    }
}
