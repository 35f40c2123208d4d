//! EXIF writing utilities
//!
//! Helpers for laying out directory data areas, which keep every
//! out-of-line payload on a word boundary.

use std::io::Write;

use crate::exif::errors::ExifResult;

/// Round a size up to the next even number
///
/// Out-of-line payloads start on word boundaries, so each one occupies an
/// even number of bytes in the data area.
pub fn align_to_2_bytes(size: u32) -> u32 {
    size + (size & 1)
}

/// Calculate padding required to align to a 2-byte boundary
pub fn calculate_padding(data_len: usize) -> usize {
    data_len & 1
}

/// Write the padding byte that keeps the next payload word-aligned
pub fn write_padding(writer: &mut dyn Write, data_len: usize) -> ExifResult<()> {
    let padding = calculate_padding(data_len);
    if padding > 0 {
        writer.write_all(&vec![0u8; padding])?;
    }
    Ok(())
}
