use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::{error, LevelFilter};

use exifgeo::utils::logger::Logger;
use exifgeo::commands::{CommandFactory, ExifgeoCommandFactory};

fn main() {
    let matches = ClapCommand::new("exifgeo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read and write GPS geotags in JPEG EXIF data")
        .arg(
            Arg::new("input")
                .help("Input JPEG file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log output to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("dump")
                .short('d')
                .long("dump")
                .help("List every EXIF directory and tag")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .help("Geotag the image with the given point")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("lat")
                .long("lat")
                .help("Latitude in decimal degrees, negative south")
                .value_name("DEGREES")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("lon")
                .long("lon")
                .help("Longitude in decimal degrees, negative west")
                .value_name("DEGREES")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("alt")
                .long("alt")
                .help("Altitude in meters, negative below sea level")
                .value_name("METERS")
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new("time")
                .long("time")
                .help("Time of the point (RFC 3339, or 'YYYY:MM:DD hh:mm:ss' in UTC)")
                .value_name("TIME")
                .required(false),
        )
        .arg(
            Arg::new("sat")
                .long("sat")
                .help("Number of satellites used for the fix")
                .value_name("COUNT")
                .required(false),
        )
        .arg(
            Arg::new("fix")
                .long("fix")
                .help("Fix quality (none, 2d, 3d)")
                .value_name("FIX")
                .required(false),
        )
        .arg(
            Arg::new("hdop")
                .long("hdop")
                .help("Horizontal dilution of precision")
                .value_name("DOP")
                .required(false),
        )
        .arg(
            Arg::new("pdop")
                .long("pdop")
                .help("Positional dilution of precision")
                .value_name("DOP")
                .required(false),
        )
        .arg(
            Arg::new("speed")
                .long("speed")
                .help("Speed in meters per second")
                .value_name("MPS")
                .required(false),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .help("Name of the point")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("match-name")
                .long("match-name")
                .help("Accept only a point with this name instead of matching by time")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("frame")
                .long("frame")
                .help("Largest accepted distance between image and point time, in seconds")
                .value_name("SECONDS")
                .required(false),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Replace the input file instead of writing <input>.jpg")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-filename-name")
                .long("no-filename-name")
                .help("Do not name read points after the image file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file with a [geotag] options table")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        },
        None => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_default_env()
                .init();
        },
    }

    let factory = ExifgeoCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
