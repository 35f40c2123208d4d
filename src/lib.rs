pub mod io;
pub mod exif;
pub mod geotag;
pub mod jpeg;
pub mod config;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::ExifGeo;

pub use config::GeotagOptions;
pub use exif::{DirectoryKind, ExifData, ExifError, ExifResult};
pub use geotag::{FixQuality, ReferencePoint};
pub use jpeg::JpegFile;
