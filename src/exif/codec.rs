//! Value codec
//!
//! Conversions between tag payloads and the semantic values the GPS layer
//! works with: rationals, degree/minute/second coordinates, GPS time and
//! date stamps, and decimal to fraction conversion for the write path.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::tag::Tag;
use crate::exif::types::FieldType;

/// Largest decimal accepted by the fraction conversion
pub const MAX_RATIONAL_DECIMAL: f64 = 999_999_999.0;

/// Decimals below this are written as zero
pub const MIN_RATIONAL_DECIMAL: f64 = 0.000_000_001;

/// Significant digits kept by the fraction conversion
const SIGNIFICANT_DIGITS: usize = 9;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

lazy_static! {
    static ref DATE_STAMP: Regex = Regex::new(r"^\s*(\d{1,4}):(\d{1,2}):(\d{1,2})").unwrap();
}

/// Divides a rational, treating a zero denominator as 1
pub fn rational_to_f64(numerator: u32, denominator: u32) -> f64 {
    let denominator = if denominator == 0 { 1 } else { denominator };
    numerator as f64 / denominator as f64
}

/// Same as `rational_to_f64` for signed rationals
pub fn srational_to_f64(numerator: i32, denominator: i32) -> f64 {
    let denominator = if denominator == 0 { 1 } else { denominator };
    numerator as f64 / denominator as f64
}

/// Reads the `index`-th element of a rational tag as a double
pub fn read_f64(tag: &Tag, index: usize) -> Option<f64> {
    let (numerator, denominator) = tag.rational(index)?;
    let value = match tag.field_type {
        FieldType::SRational => srational_to_f64(numerator as i32, denominator as i32),
        _ => rational_to_f64(numerator, denominator),
    };
    Some(value)
}

/// Decodes a 1 to 3 element degree/minute/second rational array
pub fn read_coordinate(tag: &Tag) -> Option<f64> {
    let mut value = read_f64(tag, 0)?;
    if let Some(minutes) = read_f64(tag, 1) {
        value += minutes / 60.0;
    }
    if let Some(seconds) = read_f64(tag, 2) {
        value += seconds / 3600.0;
    }
    Some(value)
}

/// Decodes a GPS time stamp into seconds since midnight
pub fn read_time_of_day(tag: &Tag) -> Option<i64> {
    if !tag.field_type.is_rational() || tag.count == 0 {
        return None;
    }

    let hours = read_f64(tag, 0).unwrap_or(0.0) as i64;
    let minutes = read_f64(tag, 1).unwrap_or(0.0) as i64;
    let seconds = read_f64(tag, 2).unwrap_or(0.0) as i64;

    Some(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds)
}

/// Decodes a `YYYY:MM:DD` date stamp into seconds since the epoch at UTC midnight
pub fn read_date_stamp(tag: &Tag) -> Option<i64> {
    parse_date_stamp(&tag.ascii())
}

/// Parses a `YYYY:MM:DD` date stamp
pub fn parse_date_stamp(text: &str) -> Option<i64> {
    let captures = DATE_STAMP.captures(text)?;
    let year = captures[1].parse::<i32>().ok()?;
    let month = captures[2].parse::<u32>().ok()?;
    let day = captures[3].parse::<u32>().ok()?;

    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).timestamp())
}

/// Combines GPS time of day and date stamp
///
/// Either one alone is used as is; neither means the time is unknown.
pub fn combine_gps_time(time_of_day: Option<i64>, date: Option<i64>) -> Option<i64> {
    match (time_of_day, date) {
        (Some(time), Some(date)) => Some(time + date),
        (Some(time), None) => Some(time),
        (None, Some(date)) => Some(date),
        (None, None) => None,
    }
}

/// Parses an EXIF `YYYY:MM:DD hh:mm:ss` date-time, taken as UTC
pub fn parse_exif_datetime(text: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), "%Y:%m:%d %H:%M:%S").ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Hour, minute and second of a UTC instant, as written to GPSTimeStamp
pub fn time_of_day_components(time: &DateTime<Utc>) -> [f64; 3] {
    [time.hour() as f64, time.minute() as f64, time.second() as f64]
}

/// `YYYY:MM:DD` text of a UTC instant, as written to GPSDateStamp
pub fn format_date_stamp(time: &DateTime<Utc>) -> String {
    time.format("%Y:%m:%d").to_string()
}

/// Greatest common divisor, iterative Euclid
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut u, mut v) = (a, b);
    while v != 0 {
        let r = u % v;
        u = v;
        v = r;
    }
    u
}

/// Converts a non-negative decimal to a reduced fraction
///
/// The value is printed with 9 significant digits; the digits form the
/// numerator and the number of fractional digits the power-of-ten
/// denominator.
pub fn fraction_from_decimal(value: f64) -> ExifResult<(u32, u32)> {
    if value.is_nan() || value < 0.0 {
        return Err(ExifError::InvalidValue(format!("{} is not a non-negative decimal", value)));
    }
    if value > MAX_RATIONAL_DECIMAL {
        return Err(ExifError::ValueOutOfRange(value));
    }
    let value = if value < MIN_RATIONAL_DECIMAL { 0.0 } else { value };

    let mut integer_digits = 0usize;
    let mut scaled = value;
    while scaled > 1.0 {
        integer_digits += 1;
        scaled /= 10.0;
    }

    let precision = SIGNIFICANT_DIGITS.saturating_sub(integer_digits);
    let formatted = format!("{:.*}", precision, value);

    let mut numerator: u64 = 0;
    let mut denominator: u64 = 1;
    let mut after_point = false;
    for c in formatted.chars() {
        if c == '.' {
            after_point = true;
            continue;
        }
        let digit = c.to_digit(10)
            .ok_or_else(|| ExifError::InvalidValue(format!("unexpected '{}' in {}", c, formatted)))?;
        numerator = numerator * 10 + digit as u64;
        if after_point {
            denominator *= 10;
        }
    }

    debug_assert!(numerator != 0 || denominator != 0);
    let divisor = gcd(numerator, denominator);
    let numerator = numerator / divisor;
    let denominator = denominator / divisor;

    trace!("{} -> {} ({}/{})", value, formatted, numerator, denominator);

    match (u32::try_from(numerator), u32::try_from(denominator)) {
        (Ok(numerator), Ok(denominator)) => Ok((numerator, denominator)),
        _ => Err(ExifError::ValueOutOfRange(value)),
    }
}

/// Converts a non-negative decimal to a rational
///
/// Integral values map to `(v, 1)` directly, which keeps whole numbers
/// exact up to the full 32-bit range.
pub fn decimal_to_rational(value: f64) -> ExifResult<(u32, u32)> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        return Ok((value as u32, 1));
    }
    fraction_from_decimal(value)
}

/// Splits non-negative decimal degrees into degrees, minutes and seconds
pub fn coordinate_to_dms(value: f64) -> [f64; 3] {
    let degrees = value.trunc();
    let minutes_total = (value - degrees) * 60.0;
    let minutes = minutes_total.trunc();
    let seconds = (minutes_total - minutes) * 60.0;
    [degrees, minutes, seconds]
}
