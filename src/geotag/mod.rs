//! Geotagging
//!
//! Conversion between the GPS directory of an EXIF graph and a
//! reference point, plus the datum handling that goes with it.

mod apply;
mod datum;
mod extract;
mod reference_point;

// Re-export key types
pub use self::apply::apply_reference_point;
pub use self::datum::{DatumConverter, MapDatum, Wgs84Only, WGS84_NAME};
pub use self::extract::{image_time, reference_point_from_exif};
pub use self::reference_point::{name_from_path, FixQuality, ReferencePoint};
#[cfg(test)]
mod tests;
