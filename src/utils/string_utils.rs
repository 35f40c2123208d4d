//! String utility functions
//!
//! Utilities for working with the fixed-size text fields of EXIF tags.

/// Trims trailing null characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() && buffer[buffer.len() - 1] == 0 {
        buffer.pop();
    }
}

/// Trims trailing spaces from a byte buffer
///
/// Cameras pad fixed-length text fields with spaces as well as NULs.
pub fn trim_trailing_spaces(buffer: &mut Vec<u8>) {
    while !buffer.is_empty() && buffer[buffer.len() - 1] == b' ' {
        buffer.pop();
    }
}

/// Decodes UCS-2 text in the given byte order, stopping at the first NUL
pub fn decode_ucs2(bytes: &[u8], little_endian: bool) -> String {
    let units: Vec<u16> = bytes.chunks_exact(2)
        .map(|pair| if little_endian {
            u16::from_le_bytes([pair[0], pair[1]])
        } else {
            u16::from_be_bytes([pair[0], pair[1]])
        })
        .take_while(|unit| *unit != 0)
        .collect();
    String::from_utf16_lossy(&units)
}
