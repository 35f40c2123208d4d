//! EXIF segment codec
//!
//! This module reads the TIFF-structured directory graph embedded in a
//! JPEG APP1 segment, lets callers mutate its tags, and writes it back
//! with freshly computed offsets.

pub mod errors;
pub mod constants;
pub mod types;
pub mod tag;
pub mod directory;
pub mod tag_names;
pub mod codec;
pub mod reader;
pub(crate) mod validation;
pub mod data;
pub mod mutation;
pub mod writer;
#[cfg(test)]
pub(crate) mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{ExifError, ExifResult};
pub use types::{ElementLayout, FieldType};
pub use tag::{Tag, TagValue};
pub use directory::{Directory, DirectoryKind};
pub use data::ExifData;
pub use mutation::Elements;
pub use reader::DirectoryReader;
pub use writer::{ExifWriter, LayoutPlan};
pub use tag_names::get_tag_name;
