//! GPS directory to reference point
//!
//! Interprets the GPS directory of a graph the way cameras and GPS loggers
//! write it. Missing references fall back to north/east with a warning;
//! missing coordinates are fatal.

use chrono::{DateTime, TimeZone, Utc};
use log::{debug, warn};

use crate::exif::codec;
use crate::exif::constants::{comment_codes, exif_tags, gps_tags, speed, tags};
use crate::exif::data::ExifData;
use crate::exif::directory::DirectoryKind;
use crate::exif::errors::{ExifError, ExifResult};
use crate::geotag::datum::{DatumConverter, MapDatum};
use crate::geotag::reference_point::{FixQuality, ReferencePoint};
use crate::io::byte_order::ByteOrder;
use crate::utils::string_utils;

/// Reads the reference point stored in a graph's GPS directory
///
/// # Returns
/// `None` when the graph has no GPS directory
pub fn reference_point_from_exif(data: &ExifData, converter: &dyn DatumConverter) -> ExifResult<Option<ReferencePoint>> {
    let Some(gps) = data.directory(DirectoryKind::Gps) else {
        return Ok(None);
    };

    let latitude = gps.get_tag(gps_tags::LATITUDE).and_then(codec::read_coordinate);
    let longitude = gps.get_tag(gps_tags::LONGITUDE).and_then(codec::read_coordinate);
    let (Some(mut latitude), Some(mut longitude)) = (latitude, longitude) else {
        return Err(ExifError::MissingCoordinates);
    };

    match gps.get_tag(gps_tags::LATITUDE_REF).and_then(|tag| tag.first_byte()) {
        Some(b'S') => latitude = -latitude,
        Some(b'N') => {},
        _ => warn!("GPSLatitudeRef not set, using N(orth)"),
    }
    match gps.get_tag(gps_tags::LONGITUDE_REF).and_then(|tag| tag.first_byte()) {
        Some(b'W') => longitude = -longitude,
        Some(b'E') => {},
        _ => warn!("GPSLongitudeRef not set, using E(ast)"),
    }

    if let Some(tag) = gps.get_tag(gps_tags::MAP_DATUM) {
        let datum = MapDatum::from_name(&tag.ascii());
        if !datum.is_wgs84() {
            debug!("Converting from datum {}", datum.description());
            (latitude, longitude) = converter.to_wgs84(&datum, latitude, longitude)?;
        }
    }

    let mut point = ReferencePoint::new(latitude, longitude);

    if let Some(altitude) = gps.get_tag(gps_tags::ALTITUDE).and_then(|tag| codec::read_f64(tag, 0)) {
        let sign = match gps.get_tag(gps_tags::ALTITUDE_REF).and_then(|tag| tag.first_byte()) {
            None | Some(0) => 1.0,
            Some(1) => -1.0,
            Some(other) => {
                warn!("Invalid GPSAltitudeRef ({}), using 0 (above sea level)", other);
                1.0
            },
        };
        point.altitude = Some(sign * altitude);
    }

    if let Some(tag) = gps.get_tag(gps_tags::SATELLITES) {
        point.satellites = parse_leading_integer(&tag.ascii()).filter(|count| *count > 0);
    }

    let dop = gps.get_tag(gps_tags::DOP).and_then(|tag| codec::read_f64(tag, 0));
    point.fix = gps.get_tag(gps_tags::MEASURE_MODE)
        .and_then(|tag| tag.first_byte())
        .map(FixQuality::from_measure_mode)
        .unwrap_or_default();
    match point.fix {
        FixQuality::TwoD => point.hdop = dop,
        FixQuality::ThreeD => point.pdop = dop,
        FixQuality::None => {},
    }

    if let Some(value) = gps.get_tag(gps_tags::SPEED).and_then(|tag| codec::read_f64(tag, 0)) {
        let unit = gps.get_tag(gps_tags::SPEED_REF).and_then(|tag| tag.first_byte()).unwrap_or(b'K');
        point.speed = match unit {
            b'K' => Some(value * speed::KPH_TO_MPS),
            b'M' => Some(value * speed::MPH_TO_MPS),
            b'N' => Some(value * speed::KNOTS_TO_MPS),
            other => {
                warn!("Unknown GPSSpeedRef unit {} ({:#04x})", other as char, other);
                None
            },
        };
    }

    let time_of_day = gps.get_tag(gps_tags::TIME_STAMP).and_then(codec::read_time_of_day);
    let date = gps.get_tag(gps_tags::DATE_STAMP).and_then(codec::read_date_stamp);
    point.time = match codec::combine_gps_time(time_of_day, date) {
        Some(seconds) => Utc.timestamp_opt(seconds, 0).single(),
        None => image_time(data),
    };

    point.notes = user_comment(data);

    debug!("GPS reference point: {}", point);
    Ok(Some(point))
}

/// Capture time of the image
///
/// DateTimeOriginal, then DateTime of the primary image, then
/// DateTimeDigitized; the first one present is used.
pub fn image_time(data: &ExifData) -> Option<DateTime<Utc>> {
    let candidates = [
        (DirectoryKind::Exif, exif_tags::DATE_TIME_ORIGINAL),
        (DirectoryKind::Primary, tags::DATE_TIME),
        (DirectoryKind::Exif, exif_tags::DATE_TIME_DIGITIZED),
    ];

    let tag = candidates.iter().find_map(|(kind, id)| data.find_tag(*kind, *id))?;
    let text = tag.ascii();
    let time = codec::parse_exif_datetime(&text);
    if time.is_none() {
        warn!("Unparsable image time \"{}\"", text);
    }
    time
}

/// Text of the EXIF UserComment, for ASCII and Unicode code designations
fn user_comment(data: &ExifData) -> Option<String> {
    let tag = data.find_tag(DirectoryKind::Exif, exif_tags::USER_COMMENT)?;
    let payload = tag.payload();
    if payload.len() <= comment_codes::PREFIX_SIZE {
        return None;
    }

    let (code, text) = payload.split_at(comment_codes::PREFIX_SIZE);
    if code == comment_codes::ASCII {
        let mut bytes = text.to_vec();
        string_utils::trim_trailing_nulls(&mut bytes);
        // Latin-1, byte for code point
        Some(bytes.iter().map(|b| *b as char).collect())
    } else if code == comment_codes::UNICODE {
        let little_endian = data.byte_order() == ByteOrder::LittleEndian;
        Some(string_utils::decode_ucs2(text, little_endian))
    } else {
        debug!("Ignoring user comment with code designation {:?}", String::from_utf8_lossy(code));
        None
    }
}

/// Leading decimal digits of a string, ignoring leading whitespace
fn parse_leading_integer(text: &str) -> Option<u32> {
    let digits: String = text.trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
