//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod read_command;
pub mod dump_command;
pub mod write_command;

pub use command_traits::{Command, CommandFactory};
pub use read_command::ReadCommand;
pub use dump_command::DumpCommand;
pub use write_command::WriteCommand;

use clap::ArgMatches;
use log::debug;
use std::str::FromStr;

use crate::config::GeotagOptions;
use crate::exif::errors::{ExifError, ExifResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct ExifgeoCommandFactory;

impl ExifgeoCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ExifgeoCommandFactory
    }
}

impl Default for ExifgeoCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for ExifgeoCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> ExifResult<Box<dyn Command>> {
        if args.get_flag("write") {
            Ok(Box::new(WriteCommand::new(args)?))
        } else if args.get_flag("dump") {
            Ok(Box::new(DumpCommand::new(args)?))
        } else {
            // Default to reading the embedded reference point
            Ok(Box::new(ReadCommand::new(args)?))
        }
    }
}

/// Gets the required input file argument
pub(crate) fn input_file(args: &ArgMatches) -> ExifResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))
}

/// Parses an optional argument
pub(crate) fn parse_arg<T: FromStr>(args: &ArgMatches, name: &str) -> ExifResult<Option<T>> {
    match args.get_one::<String>(name) {
        Some(text) => text.trim().parse::<T>()
            .map(Some)
            .map_err(|_| ExifError::InvalidValue(format!("Invalid value for --{}: {}", name, text))),
        None => Ok(None),
    }
}

/// Builds options from the config file, if any, overridden by CLI flags
pub(crate) fn load_options(args: &ArgMatches) -> ExifResult<GeotagOptions> {
    let mut options = match args.get_one::<String>("config") {
        Some(path) => GeotagOptions::from_file(path)?,
        None => GeotagOptions::default(),
    };

    if let Some(frame) = parse_arg::<i64>(args, "frame")? {
        options.frame = frame;
    }
    if args.get_flag("overwrite") {
        options.overwrite = true;
    }
    if args.get_flag("no-filename-name") {
        options.filename_as_name = false;
    }
    if let Some(name) = args.get_one::<String>("match-name") {
        options.name = Some(name.clone());
    }

    debug!("Options: {:?}", options);
    Ok(options)
}
