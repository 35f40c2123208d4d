//! Tests for the byte order module

extern crate std;

use std::io::Cursor;
use byteorder::{LittleEndian, BigEndian, WriteBytesExt};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler, LittleEndianHandler, BigEndianHandler};
use crate::exif::errors::ExifError;

#[test]
fn test_byte_order_detection_little_endian() {
    let mut cursor = Cursor::new(b"II".to_vec());

    let result = ByteOrder::detect(&mut cursor);
    std::assert!(result.is_ok());
    std::assert_eq!(result.unwrap(), ByteOrder::LittleEndian);
}

#[test]
fn test_byte_order_detection_big_endian() {
    let mut cursor = Cursor::new(b"MM".to_vec());

    let result = ByteOrder::detect(&mut cursor);
    std::assert!(result.is_ok());
    std::assert_eq!(result.unwrap(), ByteOrder::BigEndian);
}

#[test]
fn test_byte_order_detection_invalid() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x4949 ^ 0x0101).unwrap();
    let mut cursor = Cursor::new(buffer);

    let result = ByteOrder::detect(&mut cursor);
    std::assert!(matches!(result, Err(ExifError::InvalidByteOrder(0x4848))));
}

#[test]
fn test_marker_round_trip() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let marker = u16::from_be_bytes(order.marker());
        std::assert_eq!(ByteOrder::from_marker(marker).unwrap(), order);
    }
}

#[test]
fn test_little_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<LittleEndian>(0x1234).unwrap();
    buffer.write_u32::<LittleEndian>(0x12345678).unwrap();
    buffer.write_u64::<LittleEndian>(0x1234567890ABCDEF).unwrap();
    buffer.write_u32::<LittleEndian>(296).unwrap();
    buffer.write_u32::<LittleEndian>(10).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = LittleEndianHandler;

    std::assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
    std::assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    std::assert_eq!(handler.read_u64(&mut cursor).unwrap(), 0x1234567890ABCDEF);
    std::assert_eq!(handler.read_rational(&mut cursor).unwrap(), (296, 10));
}

#[test]
fn test_big_endian_handler() {
    let mut buffer = Vec::new();
    buffer.write_u16::<BigEndian>(0x1234).unwrap();
    buffer.write_u32::<BigEndian>(0x12345678).unwrap();
    buffer.write_u64::<BigEndian>(0x1234567890ABCDEF).unwrap();
    buffer.write_f64::<BigEndian>(48.8582).unwrap();
    let mut cursor = Cursor::new(buffer);

    let handler = BigEndianHandler;

    std::assert_eq!(handler.read_u16(&mut cursor).unwrap(), 0x1234);
    std::assert_eq!(handler.read_u32(&mut cursor).unwrap(), 0x12345678);
    std::assert_eq!(handler.read_u64(&mut cursor).unwrap(), 0x1234567890ABCDEF);
    std::assert_eq!(handler.read_f64(&mut cursor).unwrap(), 48.8582);
}

#[test]
fn test_handlers_write_in_their_order() {
    let mut little = Vec::new();
    LittleEndianHandler.write_u32(&mut little, 0x0A0B0C0D).unwrap();
    LittleEndianHandler.write_u16(&mut little, 0x0102).unwrap();
    std::assert_eq!(little, vec![0x0D, 0x0C, 0x0B, 0x0A, 0x02, 0x01]);

    let mut big = Vec::new();
    BigEndianHandler.write_u32(&mut big, 0x0A0B0C0D).unwrap();
    BigEndianHandler.write_u16(&mut big, 0x0102).unwrap();
    std::assert_eq!(big, vec![0x0A, 0x0B, 0x0C, 0x0D, 0x01, 0x02]);
}
