//! Tests for writing reference points into GPS directories

extern crate std;

use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};
use chrono::{TimeZone, Utc};

use crate::exif::codec;
use crate::exif::data::ExifData;
use crate::exif::directory::DirectoryKind;
use crate::exif::errors::ExifError;
use crate::exif::tests::test_utils;
use crate::geotag::{apply_reference_point, reference_point_from_exif, FixQuality, ReferencePoint, Wgs84Only};
use crate::io::byte_order::ByteOrder;

const GPS: DirectoryKind = DirectoryKind::Gps;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}

#[test]
fn test_position_only_into_empty_graph() {
    let mut data = ExifData::new(ByteOrder::LittleEndian);
    apply_reference_point(&mut data, &ReferencePoint::new(52.5, 13.4)).unwrap();

    std::assert!(data.find_tag(DirectoryKind::Primary, 0x8825).is_some());
    std::assert_eq!(data.find_tag(GPS, 0x0000).unwrap().payload(), &[2, 0, 0, 0]);
    std::assert_eq!(data.find_tag(GPS, 0x0012).unwrap().ascii(), "WGS-84");
    std::assert_eq!(data.find_tag(GPS, 0x0001).unwrap().ascii(), "N");
    std::assert_eq!(data.find_tag(GPS, 0x0003).unwrap().ascii(), "E");

    let latitude = data.find_tag(GPS, 0x0002).unwrap();
    std::assert_eq!(latitude.count, 3);
    std::assert_eq!(latitude.rational(0), Some((52, 1)));
    std::assert_eq!(latitude.rational(1), Some((30, 1)));
    std::assert!(close(codec::read_coordinate(latitude).unwrap(), 52.5));
    std::assert!(close(codec::read_coordinate(data.find_tag(GPS, 0x0004).unwrap()).unwrap(), 13.4));

    for absent in [0x0005, 0x0006, 0x0007, 0x0008, 0x000A, 0x000B, 0x000C, 0x000D, 0x001D] {
        std::assert!(data.find_tag(GPS, absent).is_none(), "tag {:#06x}", absent);
    }
}

#[test]
fn test_below_sea_level_altitude() {
    let mut data = ExifData::new(ByteOrder::BigEndian);
    let mut point = ReferencePoint::new(-33.9, -70.6);
    point.altitude = Some(-12.3);
    apply_reference_point(&mut data, &point).unwrap();

    std::assert_eq!(data.find_tag(GPS, 0x0001).unwrap().ascii(), "S");
    std::assert_eq!(data.find_tag(GPS, 0x0003).unwrap().ascii(), "W");
    std::assert_eq!(data.find_tag(GPS, 0x0005).unwrap().payload(), &[1]);
    std::assert_eq!(data.find_tag(GPS, 0x0006).unwrap().rational(0), Some((123, 10)));
}

#[test]
fn test_missing_time_removes_stale_stamps() {
    let mut data = ExifData::from_tiff(test_utils::sample_tiff::<LittleEndian>(true)).unwrap();
    std::assert!(data.find_tag(GPS, 0x0007).is_some());

    apply_reference_point(&mut data, &ReferencePoint::new(1.0, 2.0)).unwrap();

    for removed in [0x0005, 0x0006, 0x0007, 0x0008, 0x000A, 0x000B, 0x000C, 0x000D, 0x001D] {
        std::assert!(data.find_tag(GPS, removed).is_none(), "tag {:#06x}", removed);
    }
    // The sample's 4-element version is overwritten, not shrunk
    std::assert_eq!(data.find_tag(GPS, 0x0000).unwrap().payload(), &[2, 0, 0, 0]);
}

#[test]
fn test_time_and_date_stamps() {
    let mut data = ExifData::new(ByteOrder::LittleEndian);
    let mut point = ReferencePoint::new(10.0, 20.0);
    point.time = Some(Utc.with_ymd_and_hms(2023, 7, 14, 8, 5, 9).unwrap());
    apply_reference_point(&mut data, &point).unwrap();

    let stamp = data.find_tag(GPS, 0x0007).unwrap();
    std::assert_eq!(stamp.count, 3);
    std::assert_eq!(stamp.rational(0), Some((8, 1)));
    std::assert_eq!(stamp.rational(1), Some((5, 1)));
    std::assert_eq!(stamp.rational(2), Some((9, 1)));
    std::assert_eq!(data.find_tag(GPS, 0x001D).unwrap().ascii(), "2023:07:14");
}

#[test]
fn test_fix_selects_dop() {
    let mut point = ReferencePoint::new(10.0, 20.0);
    point.hdop = Some(0.9);
    point.pdop = Some(1.8);

    point.fix = FixQuality::ThreeD;
    let mut data = ExifData::new(ByteOrder::LittleEndian);
    apply_reference_point(&mut data, &point).unwrap();
    std::assert_eq!(data.find_tag(GPS, 0x000A).unwrap().ascii(), "3");
    std::assert_eq!(data.find_tag(GPS, 0x000B).unwrap().rational(0), Some((9, 5)));

    point.fix = FixQuality::TwoD;
    let mut data = ExifData::new(ByteOrder::LittleEndian);
    apply_reference_point(&mut data, &point).unwrap();
    std::assert_eq!(data.find_tag(GPS, 0x000A).unwrap().ascii(), "2");
    std::assert_eq!(data.find_tag(GPS, 0x000B).unwrap().rational(0), Some((9, 10)));
}

#[test]
fn test_speed_written_in_kilometres_per_hour() {
    let mut data = ExifData::new(ByteOrder::LittleEndian);
    let mut point = ReferencePoint::new(10.0, 20.0);
    point.speed = Some(10.0);
    apply_reference_point(&mut data, &point).unwrap();

    std::assert_eq!(data.find_tag(GPS, 0x000C).unwrap().ascii(), "K");
    std::assert!(close(codec::read_f64(data.find_tag(GPS, 0x000D).unwrap(), 0).unwrap(), 36.0));
}

#[test]
fn test_out_of_range_altitude_is_rejected() {
    let mut data = ExifData::new(ByteOrder::LittleEndian);
    let mut point = ReferencePoint::new(10.0, 20.0);
    point.altitude = Some(1e12);

    std::assert!(matches!(apply_reference_point(&mut data, &point), Err(ExifError::ValueOutOfRange(_))));
}

#[test]
fn test_unknown_position_is_missing_coordinates() {
    let mut data = ExifData::new(ByteOrder::LittleEndian);

    let result = apply_reference_point(&mut data, &ReferencePoint::new(f64::NAN, 13.4));
    std::assert!(matches!(result, Err(ExifError::MissingCoordinates)));
    std::assert!(data.directories().is_empty());

    let result = apply_reference_point(&mut data, &ReferencePoint::new(52.5, f64::NAN));
    std::assert!(matches!(result, Err(ExifError::MissingCoordinates)));
}

fn check_written_point_reads_back<E: Endian>() {
    let mut data = ExifData::from_tiff(test_utils::sample_tiff::<E>(false)).unwrap();
    let mut point = ReferencePoint::new(-22.951916, -43.210487);
    point.altitude = Some(700.5);
    point.time = Some(Utc.with_ymd_and_hms(2024, 5, 1, 11, 59, 58).unwrap());
    point.satellites = Some(9);
    point.fix = FixQuality::TwoD;
    point.hdop = Some(1.2);
    point.speed = Some(2.5);
    apply_reference_point(&mut data, &point).unwrap();

    let reread = ExifData::from_tiff(data.into_tiff().unwrap()).unwrap();
    let copy = reference_point_from_exif(&reread, &Wgs84Only).unwrap().unwrap();

    std::assert!(close(copy.latitude, point.latitude), "{}", copy.latitude);
    std::assert!(close(copy.longitude, point.longitude), "{}", copy.longitude);
    std::assert!(close(copy.altitude.unwrap(), 700.5));
    std::assert_eq!(copy.time, point.time);
    std::assert_eq!(copy.satellites, Some(9));
    std::assert_eq!(copy.fix, FixQuality::TwoD);
    std::assert!(close(copy.hdop.unwrap(), 1.2));
    std::assert!(close(copy.speed.unwrap(), 2.5));
    std::assert_eq!(copy.notes.as_deref(), Some("Eiffel"));
}

#[test]
fn test_written_point_reads_back_little_endian() {
    check_written_point_reads_back::<LittleEndian>();
}

#[test]
fn test_written_point_reads_back_big_endian() {
    check_written_point_reads_back::<BigEndian>();
}
