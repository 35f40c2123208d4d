//! Seekable reader trait
//!
//! The directory reader jumps between entry tables and the payload areas
//! they point at, so every source it walks must support both reading and
//! seeking. In practice this is a `Cursor` over the TIFF blob of one EXIF
//! segment.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
