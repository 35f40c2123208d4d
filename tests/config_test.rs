//! Tests for geotagging options

extern crate std;

use chrono::{Duration, TimeZone, Utc};

use exifgeo::config::DEFAULT_FRAME_SECONDS;
use exifgeo::{ExifError, GeotagOptions, ReferencePoint};

#[test]
fn test_defaults() {
    let options = GeotagOptions::default();
    std::assert_eq!(options.frame, DEFAULT_FRAME_SECONDS);
    std::assert!(options.filename_as_name);
    std::assert!(!options.overwrite);
    std::assert_eq!(options.name, None);
}

#[test]
fn test_toml_overrides() {
    let options = GeotagOptions::from_toml_str(
        "[geotag]\nframe = 120\nfilename_as_name = false\noverwrite = true\nname = \"IMG_0042\"\n",
    ).unwrap();

    std::assert_eq!(options.frame, 120);
    std::assert!(!options.filename_as_name);
    std::assert!(options.overwrite);
    std::assert_eq!(options.name.as_deref(), Some("IMG_0042"));
}

#[test]
fn test_toml_without_table_uses_defaults() {
    let options = GeotagOptions::from_toml_str("[other]\nframe = 3\n").unwrap();
    std::assert_eq!(options, GeotagOptions::default());
}

#[test]
fn test_toml_errors() {
    std::assert!(matches!(GeotagOptions::from_toml_str("[geotag]\nframe = \"ten\"\n"), Err(ExifError::InvalidValue(_))));
    std::assert!(matches!(GeotagOptions::from_toml_str("[geotag]\nframe = -1\n"), Err(ExifError::InvalidValue(_))));
    std::assert!(matches!(GeotagOptions::from_toml_str("[geotag]\noverwrite = 1\n"), Err(ExifError::InvalidValue(_))));
    std::assert!(matches!(GeotagOptions::from_toml_str("[geotag"), Err(ExifError::GenericError(_))));
}

#[test]
fn test_accepts_time_window() {
    let options = GeotagOptions::default();
    let image_time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut point = ReferencePoint::new(1.0, 2.0);

    std::assert!(!options.accepts(&point, Some(image_time)));

    point.time = Some(image_time - Duration::seconds(10));
    std::assert!(options.accepts(&point, Some(image_time)));
    std::assert!(!options.accepts(&point, None));

    point.time = Some(image_time + Duration::seconds(11));
    std::assert!(!options.accepts(&point, Some(image_time)));
}

#[test]
fn test_accepts_name_key() {
    let options = GeotagOptions { name: Some("Summit".to_string()), ..GeotagOptions::default() };
    let mut point = ReferencePoint::new(1.0, 2.0);

    std::assert!(!options.accepts(&point, None));
    point.name = Some("SUMMIT".to_string());
    std::assert!(options.accepts(&point, None));
}
