//! Integration tests for geotagging JPEG images

extern crate std;

use chrono::{TimeZone, Utc};
use std::fs;

use exifgeo::exif::ByteOrder;
use exifgeo::utils::logger::Logger;
use exifgeo::{DirectoryKind, ExifData, ExifError, ExifGeo, FixQuality, GeotagOptions, JpegFile, ReferencePoint};

const IMAGE_TIME: &str = "2024:05:01 12:00:00";

/// A JPEG whose EXIF segment holds only a capture time
fn camera_jpeg(byte_order: ByteOrder, image_time: Option<&str>) -> Vec<u8> {
    let mut data = ExifData::new(byte_order);
    data.put_str(DirectoryKind::Primary, 0x010F, Some("IntegrationCam")).unwrap();
    data.put_str(DirectoryKind::Primary, 0x0132, image_time).unwrap();

    let mut jpeg = vec![0xFF, 0xD8];
    jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    jpeg.extend_from_slice(b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0");
    jpeg.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0xAB, 0xCD, 0xFF, 0xD9]);

    let mut file = JpegFile::parse(&jpeg).unwrap();
    file.set_exif_body(data.into_app1().unwrap()).unwrap();
    file.to_bytes().unwrap()
}

fn eiffel_tower(seconds: u32) -> ReferencePoint {
    let mut point = ReferencePoint::new(48.858222, 2.2945);
    point.altitude = Some(35.0);
    point.time = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, seconds).unwrap());
    point.satellites = Some(8);
    point.fix = FixQuality::ThreeD;
    point.pdop = Some(1.5);
    point
}

fn check_geotag_workflow(byte_order: ByteOrder) {
    let geo = ExifGeo::new(GeotagOptions::default());
    let jpeg = camera_jpeg(byte_order, Some(IMAGE_TIME));
    std::assert!(geo.read_reference_point(&jpeg, None).unwrap().is_none());

    let point = eiffel_tower(7);
    let tagged = geo.geotag(&jpeg, &point).unwrap().expect("point within frame");

    // Scan data is carried over untouched
    std::assert!(tagged.ends_with(&[0xFF, 0xDA, 0x00, 0x02, 0xAB, 0xCD, 0xFF, 0xD9]));

    let data = geo.read_exif(&tagged).unwrap();
    std::assert_eq!(data.byte_order(), byte_order);
    std::assert_eq!(data.find_tag(DirectoryKind::Primary, 0x010F).unwrap().ascii(), "IntegrationCam");

    let copy = geo.read_reference_point(&tagged, Some("/photos/IMG_0007.JPG")).unwrap().unwrap();
    std::assert!((copy.latitude - point.latitude).abs() < 1e-6);
    std::assert!((copy.longitude - point.longitude).abs() < 1e-6);
    std::assert_eq!(copy.altitude, Some(35.0));
    std::assert_eq!(copy.time, point.time);
    std::assert_eq!(copy.satellites, Some(8));
    std::assert_eq!(copy.fix, FixQuality::ThreeD);
    std::assert_eq!(copy.pdop, Some(1.5));
    std::assert_eq!(copy.name.as_deref(), Some("IMG_0007"));
}

#[test]
fn test_geotag_workflow_little_endian() {
    check_geotag_workflow(ByteOrder::LittleEndian);
}

#[test]
fn test_geotag_workflow_big_endian() {
    check_geotag_workflow(ByteOrder::BigEndian);
}

#[test]
fn test_geotag_twice_replaces_point() {
    let geo = ExifGeo::new(GeotagOptions::default());
    let jpeg = camera_jpeg(ByteOrder::LittleEndian, Some(IMAGE_TIME));

    let first = geo.geotag(&jpeg, &eiffel_tower(3)).unwrap().unwrap();
    let mut second_point = ReferencePoint::new(-33.856784, 151.215297);
    second_point.time = Some(Utc.with_ymd_and_hms(2024, 5, 1, 11, 59, 55).unwrap());
    let second = geo.geotag(&first, &second_point).unwrap().unwrap();

    let copy = geo.read_reference_point(&second, None).unwrap().unwrap();
    std::assert!((copy.latitude + 33.856784).abs() < 1e-6);
    std::assert!((copy.longitude - 151.215297).abs() < 1e-6);
    std::assert_eq!(copy.altitude, None);
    std::assert_eq!(copy.satellites, None);
    std::assert_eq!(copy.fix, FixQuality::None);
}

#[test]
fn test_point_outside_frame_is_rejected() {
    let geo = ExifGeo::new(GeotagOptions::default());
    let jpeg = camera_jpeg(ByteOrder::LittleEndian, Some(IMAGE_TIME));

    std::assert!(geo.geotag(&jpeg, &eiffel_tower(11)).unwrap().is_none());

    let wide = ExifGeo::new(GeotagOptions { frame: 60, ..GeotagOptions::default() });
    std::assert!(wide.geotag(&jpeg, &eiffel_tower(11)).unwrap().is_some());
}

#[test]
fn test_image_without_time() {
    let jpeg = camera_jpeg(ByteOrder::BigEndian, None);
    let mut point = eiffel_tower(0);
    point.name = Some("IMG_0042".to_string());

    let geo = ExifGeo::new(GeotagOptions::default());
    std::assert!(matches!(geo.geotag(&jpeg, &point), Err(ExifError::GenericError(_))));

    let by_name = ExifGeo::new(GeotagOptions { name: Some("img_0042".to_string()), ..GeotagOptions::default() });
    std::assert!(by_name.geotag(&jpeg, &point).unwrap().is_some());

    let other_name = ExifGeo::new(GeotagOptions { name: Some("IMG_0043".to_string()), ..GeotagOptions::default() });
    std::assert!(other_name.geotag(&jpeg, &point).unwrap().is_none());
}

#[test]
fn test_jpeg_without_exif() {
    let jpeg = [0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02, 0x00, 0xFF, 0xD9];
    let geo = ExifGeo::new(GeotagOptions::default());

    std::assert!(matches!(geo.read_exif(&jpeg), Err(ExifError::InvalidJpeg(_))));
    std::assert!(matches!(geo.geotag(&jpeg, &eiffel_tower(0)), Err(ExifError::InvalidJpeg(_))));
}

#[test]
fn test_dump_lists_gps_tags() {
    let geo = ExifGeo::new(GeotagOptions::default());
    let jpeg = camera_jpeg(ByteOrder::LittleEndian, Some(IMAGE_TIME));
    let tagged = geo.geotag(&jpeg, &eiffel_tower(0)).unwrap().unwrap();

    let dump = geo.dump(&tagged).unwrap();
    std::assert!(dump.contains("GPS"));
    std::assert!(dump.contains("GPSLatitude"));
    std::assert!(dump.contains("DateTime"));
}

#[test]
fn test_geotag_file_output_paths() {
    let logger = Logger::new("integration_test.log", log::LevelFilter::Info).unwrap();
    logger.log("Starting file output test").unwrap();

    let directory = std::env::temp_dir().join(format!("exifgeo_it_{}", std::process::id()));
    fs::create_dir_all(&directory).unwrap();
    let input = directory.join("IMG_0100.JPG");
    let input = input.to_str().unwrap().to_string();
    let jpeg = camera_jpeg(ByteOrder::LittleEndian, Some(IMAGE_TIME));
    fs::write(&input, &jpeg).unwrap();

    let geo = ExifGeo::new(GeotagOptions::default());
    let written = geo.geotag_file(&input, &eiffel_tower(2)).unwrap().unwrap();
    std::assert_eq!(written, format!("{}.jpg", input));
    std::assert_eq!(fs::read(&input).unwrap(), jpeg);
    std::assert!(geo.read_reference_point(&fs::read(&written).unwrap(), None).unwrap().is_some());

    let overwriting = ExifGeo::new(GeotagOptions { overwrite: true, ..GeotagOptions::default() });
    let written = overwriting.geotag_file(&input, &eiffel_tower(2)).unwrap().unwrap();
    std::assert_eq!(written, input);
    std::assert!(overwriting.read_reference_point(&fs::read(&input).unwrap(), None).unwrap().is_some());

    std::assert!(geo.geotag_file(&input, &eiffel_tower(30)).unwrap().is_none());

    fs::remove_dir_all(&directory).unwrap();
}
