//! JPEG marker codes (the byte following 0xFF)

/// Start Of Image
pub const SOI: u8 = 0xD8;
/// End Of Image
pub const EOI: u8 = 0xD9;
/// Start Of Scan; entropy-coded data follows
pub const SOS: u8 = 0xDA;
/// Application segment 0 (JFIF)
pub const APP0: u8 = 0xE0;
/// Application segment 1 (EXIF, XMP)
pub const APP1: u8 = 0xE1;
/// Temporary private use, carries no length
pub const TEM: u8 = 0x01;

/// Largest segment body a 16-bit length can describe
pub const MAX_SEGMENT_BODY: usize = 0xFFFF - 2;

/// Whether a marker stands alone without a length field
pub fn is_standalone(marker: u8) -> bool {
    matches!(marker, TEM | SOI | EOI | 0xD0..=0xD7)
}
