//! Tag mutation
//!
//! Every change to the directory graph goes through `put_value`, which
//! creates, grows, overwrites or deletes one tag. The typed helpers below
//! it cover the shapes the GPS layer needs.

use log::{debug, trace};

use crate::exif::codec;
use crate::exif::data::ExifData;
use crate::exif::directory::DirectoryKind;
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::tag::{self, Tag};
use crate::exif::types::FieldType;

/// Elements handed to `put_value`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elements<'a> {
    /// No data; deletes the tag
    Empty,
    /// Raw little-endian element bytes, at least `count` elements long
    Raw(&'a [u8]),
    /// One decimal, converted for rational types
    Decimal(f64),
}

impl Elements<'_> {
    fn is_empty(&self) -> bool {
        matches!(self, Elements::Empty)
    }
}

impl ExifData {
    /// Creates, overwrites, grows or deletes one tag
    ///
    /// Writes `count` elements starting at element `index`. A zero derived
    /// size (`count < 1`, `index < 0` or no data) deletes the tag. A tag of
    /// a different field type is replaced. Errors leave the graph untouched.
    ///
    /// # Returns
    /// The tag after the change, or `None` if it was deleted or never existed
    pub fn put_value(
        &mut self,
        kind: DirectoryKind,
        tag_id: u16,
        field_type: FieldType,
        count: i32,
        index: i32,
        elements: Elements<'_>,
    ) -> ExifResult<Option<&Tag>> {
        let element_size = field_type.element_size();
        let elements_needed = if elements.is_empty() || count < 1 || index < 0 {
            0
        } else {
            (index as u32).checked_add(count as u32)
                .ok_or_else(|| ExifError::InvalidValue(format!("element range {}+{} overflows", index, count)))?
        };

        if elements_needed == 0 {
            self.remove_tag(kind, tag_id);
            return Ok(None);
        }

        if tag::payload_size(field_type, elements_needed).is_none() {
            return Err(ExifError::ValueOutOfRange(elements_needed as f64));
        }

        let encoded = encode_elements(field_type, count as u32, elements)?;
        let directory = self.directory_or_insert(kind);

        let position = match directory.tags.iter().position(|tag| tag.id == tag_id) {
            Some(position) => {
                let tag = &mut directory.tags[position];
                if tag.field_type != field_type {
                    debug!("Retyping tag {:#06x} in {} from {} to {}", tag_id, kind, tag.field_type, field_type);
                    *tag = Tag::new(tag_id, field_type, elements_needed);
                } else if elements_needed > tag.count {
                    trace!("Growing tag {:#06x} in {} to {} elements", tag_id, kind, elements_needed);
                    tag.grow(elements_needed);
                }
                position
            },
            None => {
                trace!("Creating tag {:#06x} in {} with {} elements", tag_id, kind, elements_needed);
                directory.tags.push(Tag::new(tag_id, field_type, elements_needed));
                directory.tags.len() - 1
            },
        };

        let tag = &mut directory.tags[position];
        let start = index as usize * element_size as usize;
        tag.buffer_mut()[start..start + encoded.len()].copy_from_slice(&encoded);

        Ok(Some(&directory.tags[position]))
    }

    /// Writes one decimal as the `index`-th element of a rational tag
    pub fn put_decimal(&mut self, kind: DirectoryKind, tag_id: u16, index: i32, value: f64) -> ExifResult<Option<&Tag>> {
        self.put_value(kind, tag_id, FieldType::Rational, 1, index, Elements::Decimal(value))
    }

    /// Writes a NUL-terminated ASCII string, or deletes the tag for `None`
    pub fn put_str(&mut self, kind: DirectoryKind, tag_id: u16, text: Option<&str>) -> ExifResult<Option<&Tag>> {
        match text {
            Some(text) => {
                let mut bytes = Vec::with_capacity(text.len() + 1);
                bytes.extend_from_slice(text.as_bytes());
                bytes.push(0);
                let count = i32::try_from(bytes.len())
                    .map_err(|_| ExifError::InvalidValue(format!("string of {} bytes is too long", bytes.len())))?;
                self.put_value(kind, tag_id, FieldType::Ascii, count, 0, Elements::Raw(&bytes))
            },
            None => self.put_value(kind, tag_id, FieldType::Ascii, 0, 0, Elements::Empty),
        }
    }

    /// Writes non-negative decimal degrees as a 3-element degree/minute/second rational
    ///
    /// NaN stands for an unknown position and fails as `MissingCoordinates`.
    pub fn put_coordinate(&mut self, kind: DirectoryKind, tag_id: u16, value: f64) -> ExifResult<Option<&Tag>> {
        if value.is_nan() {
            return Err(ExifError::MissingCoordinates);
        }
        if value < 0.0 {
            return Err(ExifError::NegativeRational(value));
        }

        let dms = codec::coordinate_to_dms(value);
        let mut bytes = Vec::with_capacity(24);
        for component in dms {
            let (numerator, denominator) = codec::decimal_to_rational(component)?;
            bytes.extend_from_slice(&numerator.to_le_bytes());
            bytes.extend_from_slice(&denominator.to_le_bytes());
        }

        self.put_value(kind, tag_id, FieldType::Rational, 3, 0, Elements::Raw(&bytes))
    }

    /// Writes the `index`-th element of a LONG tag
    pub fn put_long(&mut self, kind: DirectoryKind, tag_id: u16, index: i32, value: u32) -> ExifResult<Option<&Tag>> {
        self.put_value(kind, tag_id, FieldType::Long, 1, index, Elements::Raw(&value.to_le_bytes()))
    }

    /// Writes a byte array
    pub fn put_bytes(&mut self, kind: DirectoryKind, tag_id: u16, bytes: &[u8]) -> ExifResult<Option<&Tag>> {
        let count = i32::try_from(bytes.len())
            .map_err(|_| ExifError::InvalidValue(format!("{} bytes is too long", bytes.len())))?;
        self.put_value(kind, tag_id, FieldType::Byte, count, 0, Elements::Raw(bytes))
    }

    /// Removes a tag; a no-op if the tag is absent
    pub fn remove_tag(&mut self, kind: DirectoryKind, tag_id: u16) {
        if let Some(directory) = self.directory_mut(kind) {
            if directory.remove_tag(tag_id).is_some() {
                debug!("Removed tag {:#06x} from {}", tag_id, kind);
            }
        }
    }
}

/// Encodes the elements of one `put_value` call into little-endian bytes
fn encode_elements(field_type: FieldType, count: u32, elements: Elements<'_>) -> ExifResult<Vec<u8>> {
    let size = field_type.element_size() as usize * count as usize;

    match elements {
        Elements::Decimal(value) => match field_type {
            FieldType::Rational => {
                if value < 0.0 {
                    return Err(ExifError::NegativeRational(value));
                }
                let (numerator, denominator) = codec::decimal_to_rational(value)?;
                let mut bytes = numerator.to_le_bytes().to_vec();
                bytes.extend_from_slice(&denominator.to_le_bytes());
                Ok(bytes)
            },
            FieldType::SRational => {
                let (numerator, denominator) = signed_rational(value)?;
                let mut bytes = numerator.to_le_bytes().to_vec();
                bytes.extend_from_slice(&denominator.to_le_bytes());
                Ok(bytes)
            },
            other => Err(ExifError::InvalidValue(format!("cannot store a decimal in a {} tag", other))),
        },
        Elements::Raw(bytes) => {
            if bytes.len() < size {
                return Err(ExifError::InvalidValue(format!(
                    "{} {} elements need {} bytes, got {}",
                    count, field_type, size, bytes.len()
                )));
            }
            Ok(bytes[..size].to_vec())
        },
        Elements::Empty => Ok(Vec::new()),
    }
}

/// Converts a decimal to a signed rational, the sign carried by the numerator
fn signed_rational(value: f64) -> ExifResult<(i32, i32)> {
    if value.is_nan() {
        return Err(ExifError::InvalidValue("NaN is not a rational".to_string()));
    }

    let (numerator, denominator) = codec::decimal_to_rational(value.abs())?;
    let numerator = i32::try_from(numerator).map_err(|_| ExifError::ValueOutOfRange(value))?;
    let denominator = i32::try_from(denominator).map_err(|_| ExifError::ValueOutOfRange(value))?;

    Ok((if value < 0.0 { -numerator } else { numerator }, denominator))
}
