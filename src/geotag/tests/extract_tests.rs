//! Tests for reading reference points from GPS directories

extern crate std;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use chrono::{TimeZone, Utc};

use crate::exif::data::ExifData;
use crate::exif::directory::DirectoryKind;
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::mutation::Elements;
use crate::exif::tests::test_utils;
use crate::exif::types::FieldType;
use crate::geotag::{image_time, name_from_path, reference_point_from_exif, DatumConverter, FixQuality, MapDatum, Wgs84Only};

const GPS: DirectoryKind = DirectoryKind::Gps;

fn sample<E: Endian>(with_gps: bool) -> ExifData {
    ExifData::from_tiff(test_utils::sample_tiff::<E>(with_gps)).unwrap()
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

fn check_sample_point<E: Endian>() {
    let point = reference_point_from_exif(&sample::<E>(true), &Wgs84Only).unwrap().unwrap();

    std::assert!(close(point.latitude, 48.0 + 51.0 / 60.0 + 29.6 / 3600.0), "{}", point.latitude);
    std::assert!(close(point.longitude, 2.2945), "{}", point.longitude);
    std::assert_eq!(point.altitude, Some(35.0));
    std::assert_eq!(point.time, Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 3).unwrap()));
    std::assert_eq!(point.satellites, Some(7));
    std::assert_eq!(point.fix, FixQuality::ThreeD);
    std::assert_eq!(point.pdop, Some(2.5));
    std::assert_eq!(point.hdop, None);
    std::assert!(close(point.speed.unwrap(), 10.0));
    std::assert_eq!(point.notes.as_deref(), Some("Eiffel"));
    std::assert_eq!(point.name, None);
}

#[test]
fn test_sample_point_little_endian() {
    check_sample_point::<LittleEndian>();
}

#[test]
fn test_sample_point_big_endian() {
    check_sample_point::<BigEndian>();
}

#[test]
fn test_no_gps_directory() {
    let data = sample::<LittleEndian>(false);
    std::assert!(reference_point_from_exif(&data, &Wgs84Only).unwrap().is_none());
}

#[test]
fn test_missing_latitude_is_fatal() {
    let mut data = sample::<LittleEndian>(true);
    data.remove_tag(GPS, 0x0002);

    let result = reference_point_from_exif(&data, &Wgs84Only);
    std::assert!(matches!(result, Err(ExifError::MissingCoordinates)));
}

#[test]
fn test_south_west_references() {
    let mut data = sample::<BigEndian>(true);
    data.put_str(GPS, 0x0001, Some("S")).unwrap();
    data.put_str(GPS, 0x0003, Some("W")).unwrap();

    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert!(point.latitude < -48.0);
    std::assert!(close(point.longitude, -2.2945));
}

#[test]
fn test_missing_references_default_north_east() {
    let mut data = sample::<LittleEndian>(true);
    data.remove_tag(GPS, 0x0001);
    data.remove_tag(GPS, 0x0003);

    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert!(point.latitude > 48.0);
    std::assert!(point.longitude > 2.0);
}

#[test]
fn test_below_sea_level() {
    let mut data = sample::<LittleEndian>(true);
    data.put_bytes(GPS, 0x0005, &[1]).unwrap();

    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.altitude, Some(-35.0));
}

#[test]
fn test_two_d_fix_sets_hdop() {
    let mut data = sample::<LittleEndian>(true);
    data.put_str(GPS, 0x000A, Some("2")).unwrap();

    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.fix, FixQuality::TwoD);
    std::assert_eq!(point.hdop, Some(2.5));
    std::assert_eq!(point.pdop, None);
}

#[test]
fn test_speed_units() {
    let mut data = sample::<LittleEndian>(true);

    data.put_str(GPS, 0x000C, Some("N")).unwrap();
    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert!(close(point.speed.unwrap(), 36.0 * 1852.0 / 3600.0));

    data.remove_tag(GPS, 0x000C);
    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert!(close(point.speed.unwrap(), 10.0));

    data.put_str(GPS, 0x000C, Some("X")).unwrap();
    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.speed, None);
}

#[test]
fn test_satellites_need_leading_digits() {
    let mut data = sample::<LittleEndian>(true);

    data.put_str(GPS, 0x0008, Some(" 12 in view")).unwrap();
    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.satellites, Some(12));

    data.put_str(GPS, 0x0008, Some("none")).unwrap();
    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.satellites, None);
}

#[test]
fn test_time_falls_back_to_image_time() {
    let mut data = sample::<LittleEndian>(true);
    data.remove_tag(GPS, 0x0007);
    data.remove_tag(GPS, 0x001D);

    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.time, Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap()));
}

#[test]
fn test_image_time_order() {
    let mut data = sample::<LittleEndian>(false);
    std::assert_eq!(image_time(&data), Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap()));

    data.remove_tag(DirectoryKind::Exif, 0x9003);
    std::assert_eq!(image_time(&data), Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));

    data.remove_tag(DirectoryKind::Primary, 0x0132);
    std::assert_eq!(image_time(&data), None);

    data.put_str(DirectoryKind::Exif, 0x9004, Some("2023:12:31 23:59:59")).unwrap();
    std::assert_eq!(image_time(&data), Some(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()));
}

#[test]
fn test_unicode_user_comment() {
    let mut data = sample::<BigEndian>(true);
    let mut comment = b"UNICODE\0".to_vec();
    comment.extend_from_slice(&[0x00, b'H', 0x00, b'i']);
    data.remove_tag(DirectoryKind::Exif, 0x9286);
    data.put_value(DirectoryKind::Exif, 0x9286, FieldType::Undefined, comment.len() as i32, 0,
                   Elements::Raw(&comment)).unwrap();

    let point = reference_point_from_exif(&data, &Wgs84Only).unwrap().unwrap();
    std::assert_eq!(point.notes.as_deref(), Some("Hi"));
}

#[test]
fn test_unknown_datum_is_rejected() {
    let mut data = sample::<LittleEndian>(true);
    data.put_str(GPS, 0x0012, Some("TOKYO")).unwrap();

    match reference_point_from_exif(&data, &Wgs84Only) {
        Err(ExifError::UnknownDatum(name)) => std::assert_eq!(name, "TOKYO"),
        other => std::panic!("expected UnknownDatum, got {:?}", other),
    }
}

struct Shift;

impl DatumConverter for Shift {
    fn to_wgs84(&self, datum: &MapDatum, latitude: f64, longitude: f64) -> ExifResult<(f64, f64)> {
        std::assert_eq!(datum, &MapDatum::Other("TOKYO".to_string()));
        Ok((latitude + 1.0, longitude - 1.0))
    }
}

#[test]
fn test_custom_datum_converter() {
    let mut data = sample::<LittleEndian>(true);
    data.put_str(GPS, 0x0012, Some("TOKYO")).unwrap();

    let point = reference_point_from_exif(&data, &Shift).unwrap().unwrap();
    std::assert!(close(point.latitude, 49.0 + 51.0 / 60.0 + 29.6 / 3600.0));
    std::assert!(close(point.longitude, 1.2945));
}

#[test]
fn test_datum_names() {
    std::assert!(MapDatum::from_name("WGS-84").is_wgs84());
    std::assert!(MapDatum::from_name("wgs 84").is_wgs84());
    std::assert!(MapDatum::from_name("WGS_84 ").is_wgs84());
    std::assert_eq!(MapDatum::from_name(" NAD27"), MapDatum::Other("NAD27".to_string()));
}

#[test]
fn test_name_from_path() {
    std::assert_eq!(name_from_path("C:\\photos\\IMG_0042.JPG"), "IMG_0042");
    std::assert_eq!(name_from_path("/home/user/trip/dsc01.tar.jpg"), "dsc01");
    std::assert_eq!(name_from_path("noext"), "noext");
    std::assert_eq!(name_from_path("dir/.hidden"), ".hidden");
}
