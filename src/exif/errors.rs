//! Custom error types for EXIF processing
//!
//! Every variant here is fatal: the codec treats one image as all-or-nothing
//! and never emits a partially rewritten segment.

use std::fmt;
use std::io;

/// EXIF-specific error types
#[derive(Debug)]
pub enum ExifError {
    /// I/O error
    IoError(io::Error),
    /// The APP1 body does not start with the EXIF identifier
    InvalidHeader,
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Unsupported field type
    UnsupportedFieldType(u16),
    /// Value cannot be represented by its target type
    ValueOutOfRange(f64),
    /// Negative value written to an unsigned RATIONAL
    NegativeRational(f64),
    /// Payload does not match the declared field type
    InvalidValue(String),
    /// GPS directory without latitude and/or longitude
    MissingCoordinates,
    /// Map datum the datum converter does not know
    UnknownDatum(String),
    /// JPEG container framing error
    InvalidJpeg(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ExifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifError::IoError(e) => write!(f, "I/O error: {}", e),
            ExifError::InvalidHeader => write!(f, "Invalid EXIF header"),
            ExifError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            ExifError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            ExifError::UnsupportedFieldType(ft) => write!(f, "Unsupported field type: {}", ft),
            ExifError::ValueOutOfRange(v) => write!(f, "Value {} too big for a rational representation", v),
            ExifError::NegativeRational(v) => write!(f, "Negative value {} cannot be stored as RATIONAL", v),
            ExifError::InvalidValue(msg) => write!(f, "Invalid tag value: {}", msg),
            ExifError::MissingCoordinates => write!(f, "Missing GPSLatitude and/or GPSLongitude"),
            ExifError::UnknownDatum(d) => write!(f, "Unknown GPSMapDatum \"{}\"", d),
            ExifError::InvalidJpeg(msg) => write!(f, "Invalid JPEG: {}", msg),
            ExifError::GenericError(msg) => write!(f, "EXIF error: {}", msg),
        }
    }
}

impl std::error::Error for ExifError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExifError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExifError {
    fn from(error: io::Error) -> Self {
        ExifError::IoError(error)
    }
}

impl From<String> for ExifError {
    fn from(msg: String) -> Self {
        ExifError::GenericError(msg)
    }
}

/// Result type for EXIF operations
pub type ExifResult<T> = Result<T, ExifError>;
