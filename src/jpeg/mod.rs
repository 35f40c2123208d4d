//! JPEG container handling
//!
//! Just enough of the JPEG format to find, replace and insert the EXIF
//! APP1 segment; the compressed image data is carried through untouched.

pub mod markers;
mod segments;

pub use segments::{JpegFile, Segment};
#[cfg(test)]
mod tests;
