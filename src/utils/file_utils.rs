//! File handling for geotagged output

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::exif::errors::{ExifError, ExifResult};

/// Reads a whole input file
pub fn read_file(path: &str) -> ExifResult<Vec<u8>> {
    fs::read(Path::new(path))
        .map_err(|e| ExifError::GenericError(format!("Failed to read {}: {}", path, e)))
}

/// Path of the output written next to an input: the input path with `.jpg` appended
pub fn output_path(input: &str) -> String {
    format!("{}.jpg", input)
}

/// Writes the output next to the input, then moves it over the input if `overwrite` is set
///
/// # Returns
/// The path the result ended up at
pub fn write_output(input: &str, bytes: &[u8], overwrite: bool) -> ExifResult<String> {
    let output = output_path(input);
    fs::write(&output, bytes)
        .map_err(|e| ExifError::GenericError(format!("Failed to write {}: {}", output, e)))?;
    debug!("Wrote {} bytes to {}", bytes.len(), output);

    if !overwrite {
        return Ok(output);
    }

    fs::rename(&output, input)
        .map_err(|e| ExifError::GenericError(format!("Failed to replace {}: {}", input, e)))?;
    info!("Replaced {}", input);
    Ok(input.to_string())
}
