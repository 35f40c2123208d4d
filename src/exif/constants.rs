//! EXIF/TIFF format constants
//!
//! This module defines constants used throughout the EXIF processing code,
//! replacing magic numbers with descriptive names.

/// TIFF and EXIF segment header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43), recognized only to reject it
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// "MM" byte order marker for big-endian
    pub const BIG_ENDIAN_MARKER: [u8; 2] = [0x4D, 0x4D];

    /// Size of the classic TIFF header
    pub const TIFF_HEADER_SIZE: u32 = 8;

    /// Identifier that opens an APP1 EXIF body
    pub const EXIF_IDENTIFIER: [u8; 6] = *b"Exif\0\0";

    /// Length of the EXIF identifier
    pub const EXIF_IDENTIFIER_SIZE: usize = 6;
}

/// Field types as defined by TIFF 6.0, EXIF and BigTIFF
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const IFD: u16 = 13;       // 32-bit directory offset
    pub const UNICODE: u16 = 14;   // UCS-2 character
    pub const COMPLEX: u16 = 15;   // Pair of floats
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// Tags of the primary (IFD0) and thumbnail (IFD1) directories
pub mod tags {
    pub const STRIP_OFFSETS: u16 = 0x0111;             // Offset of the thumbnail strip
    pub const STRIP_BYTE_COUNTS: u16 = 0x0117;         // Length of the thumbnail strip
    pub const DATE_TIME: u16 = 0x0132;                 // File change date and time
    pub const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;   // Offset of the JPEG thumbnail
    pub const JPEG_INTERCHANGE_LENGTH: u16 = 0x0202;   // Length of the JPEG thumbnail
    pub const EXIF_IFD_POINTER: u16 = 0x8769;          // Offset of the EXIF directory
    pub const GPS_IFD_POINTER: u16 = 0x8825;           // Offset of the GPS directory
}

/// Tags of the EXIF sub-directory
pub mod exif_tags {
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;        // Capture date and time
    pub const DATE_TIME_DIGITIZED: u16 = 0x9004;       // Digitization date and time
    pub const USER_COMMENT: u16 = 0x9286;              // Free text with code designation
    pub const INTEROP_IFD_POINTER: u16 = 0xA005;       // Offset of the Interop directory
}

/// Tags of the GPS sub-directory
pub mod gps_tags {
    pub const VERSION_ID: u16 = 0x0000;
    pub const LATITUDE_REF: u16 = 0x0001;
    pub const LATITUDE: u16 = 0x0002;
    pub const LONGITUDE_REF: u16 = 0x0003;
    pub const LONGITUDE: u16 = 0x0004;
    pub const ALTITUDE_REF: u16 = 0x0005;
    pub const ALTITUDE: u16 = 0x0006;
    pub const TIME_STAMP: u16 = 0x0007;
    pub const SATELLITES: u16 = 0x0008;
    pub const MEASURE_MODE: u16 = 0x000A;
    pub const DOP: u16 = 0x000B;
    pub const SPEED_REF: u16 = 0x000C;
    pub const SPEED: u16 = 0x000D;
    pub const MAP_DATUM: u16 = 0x0012;
    pub const DATE_STAMP: u16 = 0x001D;

    /// Version written into every GPS directory we emit
    pub const WRITER_VERSION: [u8; 4] = [2, 0, 0, 0];
}

/// Code designations that prefix a UserComment payload
pub mod comment_codes {
    pub const ASCII: [u8; 8] = *b"ASCII\0\0\0";
    pub const UNICODE: [u8; 8] = *b"UNICODE\0";
    pub const JIS: [u8; 8] = *b"JIS\0\0\0\0\0";
    pub const PREFIX_SIZE: usize = 8;
}

/// Speed unit conversion factors to metres per second
pub mod speed {
    pub const KPH_TO_MPS: f64 = 1000.0 / 3600.0;
    pub const MPH_TO_MPS: f64 = 1609.344 / 3600.0;
    pub const KNOTS_TO_MPS: f64 = 1852.0 / 3600.0;
}
