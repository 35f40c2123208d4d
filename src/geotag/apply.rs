//! Reference point to GPS directory
//!
//! Rewrites the GPS directory of a graph from a reference point. Fields
//! the point does not carry are removed so stale values from an earlier
//! geotag do not survive.

use log::info;

use crate::exif::codec;
use crate::exif::constants::{gps_tags, speed, tags};
use crate::exif::data::ExifData;
use crate::exif::directory::DirectoryKind;
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::types::FieldType;
use crate::exif::mutation::Elements;
use crate::geotag::datum::WGS84_NAME;
use crate::geotag::reference_point::ReferencePoint;

const GPS: DirectoryKind = DirectoryKind::Gps;

/// Writes a reference point into the graph's GPS directory
pub fn apply_reference_point(data: &mut ExifData, point: &ReferencePoint) -> ExifResult<()> {
    if point.latitude.is_nan() || point.longitude.is_nan() {
        return Err(ExifError::MissingCoordinates);
    }

    data.put_long(DirectoryKind::Primary, tags::GPS_IFD_POINTER, 0, 0)?;
    data.put_value(GPS, gps_tags::VERSION_ID, FieldType::Byte, 4, 0, Elements::Raw(&gps_tags::WRITER_VERSION))?;
    data.put_str(GPS, gps_tags::MAP_DATUM, Some(WGS84_NAME))?;

    data.put_str(GPS, gps_tags::LATITUDE_REF, Some(if point.latitude < 0.0 { "S" } else { "N" }))?;
    data.put_coordinate(GPS, gps_tags::LATITUDE, point.latitude.abs())?;
    data.put_str(GPS, gps_tags::LONGITUDE_REF, Some(if point.longitude < 0.0 { "W" } else { "E" }))?;
    data.put_coordinate(GPS, gps_tags::LONGITUDE, point.longitude.abs())?;

    match point.altitude {
        Some(altitude) => {
            let reference: u8 = if altitude >= 0.0 { 0 } else { 1 };
            data.put_bytes(GPS, gps_tags::ALTITUDE_REF, &[reference])?;
            data.put_decimal(GPS, gps_tags::ALTITUDE, 0, altitude.abs())?;
        },
        None => {
            data.remove_tag(GPS, gps_tags::ALTITUDE);
            data.remove_tag(GPS, gps_tags::ALTITUDE_REF);
        },
    }

    match &point.time {
        Some(time) => {
            for (index, component) in codec::time_of_day_components(time).into_iter().enumerate() {
                data.put_decimal(GPS, gps_tags::TIME_STAMP, index as i32, component)?;
            }
            data.put_str(GPS, gps_tags::DATE_STAMP, Some(&codec::format_date_stamp(time)))?;
        },
        None => {
            data.remove_tag(GPS, gps_tags::TIME_STAMP);
            data.remove_tag(GPS, gps_tags::DATE_STAMP);
        },
    }

    match point.satellites.filter(|count| *count > 0) {
        Some(count) => { data.put_str(GPS, gps_tags::SATELLITES, Some(&count.to_string()))?; },
        None => data.remove_tag(GPS, gps_tags::SATELLITES),
    }

    match point.fix.measure_mode() {
        Some(mode) => { data.put_str(GPS, gps_tags::MEASURE_MODE, Some(mode))?; },
        None => data.remove_tag(GPS, gps_tags::MEASURE_MODE),
    }

    match point.dop() {
        Some(dop) => { data.put_decimal(GPS, gps_tags::DOP, 0, dop)?; },
        None => data.remove_tag(GPS, gps_tags::DOP),
    }

    match point.speed {
        Some(mps) => {
            data.put_str(GPS, gps_tags::SPEED_REF, Some("K"))?;
            data.put_decimal(GPS, gps_tags::SPEED, 0, (mps / speed::KPH_TO_MPS).abs())?;
        },
        None => {
            data.remove_tag(GPS, gps_tags::SPEED_REF);
            data.remove_tag(GPS, gps_tags::SPEED);
        },
    }

    info!("Applied reference point {}", point);
    Ok(())
}
