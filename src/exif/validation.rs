//! Structural validation of TIFF blobs
//!
//! Offsets found in a blob are checked against its size before the reader
//! seeks to them, so a corrupt pointer fails the read instead of producing
//! a garbage directory.

use log::{error, warn};
use std::io::SeekFrom;

use crate::io::seekable::SeekableReader;
use crate::exif::constants::header;
use crate::exif::errors::{ExifError, ExifResult};

/// Validates a directory offset
///
/// A directory needs at least its 2-byte count inside the blob and cannot
/// overlap the 8-byte header.
pub fn validate_directory_offset(offset: u32, blob_size: u64) -> ExifResult<()> {
    if offset < header::TIFF_HEADER_SIZE || offset as u64 + 2 > blob_size {
        error!("Invalid directory offset {:#010x} (blob size: {})", offset, blob_size);
        return Err(ExifError::GenericError(format!(
            "Invalid directory offset: {} (blob size: {})",
            offset, blob_size
        )));
    }

    Ok(())
}

/// Validates that an out-of-line payload lies inside the blob
pub fn validate_payload_range(offset: u32, size: u32, blob_size: u64) -> ExifResult<()> {
    if offset as u64 + size as u64 > blob_size {
        error!("Payload {:#010x}+{} exceeds blob size {}", offset, size, blob_size);
        return Err(ExifError::GenericError(format!(
            "Tag payload at {} ({} bytes) exceeds blob size {}",
            offset, size, blob_size
        )));
    }

    Ok(())
}

/// Gets the size of the stream, restoring the current position
pub fn get_stream_size(reader: &mut dyn SeekableReader) -> ExifResult<u64> {
    let current_position = reader.stream_position()?;
    let size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => size,
        Err(e) => {
            warn!("Could not determine stream size: {}", e);
            u64::MAX
        },
    };
    reader.seek(SeekFrom::Start(current_position))?;

    Ok(size)
}

/// Validates the version word of a TIFF header
pub fn validate_version(version: u16) -> ExifResult<()> {
    match version {
        header::TIFF_VERSION => Ok(()),
        header::BIG_TIFF_VERSION => {
            error!("BigTIFF layout is not supported inside EXIF");
            Err(ExifError::UnsupportedVersion(version))
        },
        _ => Err(ExifError::UnsupportedVersion(version)),
    }
}
