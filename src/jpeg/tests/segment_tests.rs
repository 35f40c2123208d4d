//! Tests for JPEG segment handling

extern crate std;

use byteorder::LittleEndian;

use crate::exif::errors::ExifError;
use crate::exif::tests::test_utils;
use crate::jpeg::markers;
use crate::jpeg::JpegFile;

#[test]
fn test_parse_and_join_is_lossless() {
    let app1 = test_utils::sample_app1::<LittleEndian>(true);
    let bytes = test_utils::sample_jpeg(Some(&app1));

    let jpeg = JpegFile::parse(&bytes).unwrap();
    std::assert_eq!(jpeg.segments.len(), 3);
    std::assert_eq!(jpeg.segments[0].marker, markers::APP0);
    std::assert_eq!(jpeg.segments[1].marker, markers::APP1);
    std::assert_eq!(jpeg.exif_body(), Some(app1.as_slice()));
    std::assert_eq!(&jpeg.scan[..2], &[0xFF, markers::SOS]);

    std::assert_eq!(jpeg.to_bytes().unwrap(), bytes);
}

#[test]
fn test_exif_inserted_after_app0() {
    let bytes = test_utils::sample_jpeg(None);
    let mut jpeg = JpegFile::parse(&bytes).unwrap();
    std::assert!(jpeg.exif_body().is_none());

    jpeg.set_exif_body(b"Exif\0\0II*\0\x08\0\0\0".to_vec()).unwrap();
    std::assert_eq!(jpeg.segments[0].marker, markers::APP0);
    std::assert_eq!(jpeg.segments[1].marker, markers::APP1);
    std::assert_eq!(jpeg.segments[2].marker, 0xDB);

    let reparsed = JpegFile::parse(&jpeg.to_bytes().unwrap()).unwrap();
    std::assert_eq!(reparsed.exif_body(), Some(&b"Exif\0\0II*\0\x08\0\0\0"[..]));
}

#[test]
fn test_exif_replaced_in_place() {
    let app1 = test_utils::sample_app1::<LittleEndian>(false);
    let mut jpeg = JpegFile::parse(&test_utils::sample_jpeg(Some(&app1))).unwrap();

    jpeg.set_exif_body(b"Exif\0\0MM\0*\0\0\0\x08".to_vec()).unwrap();
    std::assert_eq!(jpeg.segments.len(), 3);
    std::assert_eq!(jpeg.segments[1].data, b"Exif\0\0MM\0*\0\0\0\x08".to_vec());
}

#[test]
fn test_oversized_exif_is_rejected() {
    let mut jpeg = JpegFile::parse(&test_utils::sample_jpeg(None)).unwrap();
    let body = vec![0u8; markers::MAX_SEGMENT_BODY + 1];

    std::assert!(matches!(jpeg.set_exif_body(body), Err(ExifError::InvalidJpeg(_))));
}

#[test]
fn test_missing_soi_is_rejected() {
    let result = JpegFile::parse(&[0x89, b'P', b'N', b'G']);
    std::assert!(matches!(result, Err(ExifError::InvalidJpeg(_))));
}

#[test]
fn test_fill_bytes_before_marker() {
    let bytes = [0xFF, 0xD8, 0xFF, 0xFF, 0xFF, 0xE0, 0x00, 0x03, 0x00, 0xFF, 0xD9];
    let jpeg = JpegFile::parse(&bytes).unwrap();

    std::assert_eq!(jpeg.segments.len(), 1);
    std::assert_eq!(jpeg.segments[0].data, vec![0x00]);
    std::assert_eq!(jpeg.scan, vec![0xFF, 0xD9]);
}

#[test]
fn test_short_segment_length_is_rejected() {
    let bytes = [0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x01, 0xFF, 0xD9];
    std::assert!(matches!(JpegFile::parse(&bytes), Err(ExifError::InvalidJpeg(_))));
}
