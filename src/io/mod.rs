//! I/O primitives shared by the EXIF codec
//!
//! Byte order strategies for reading and writing TIFF words, and the
//! seekable source abstraction the directory reader walks.

pub mod seekable;
pub mod byte_order;
