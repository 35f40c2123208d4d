//! Directory entry model
//!
//! A tag's payload is always materialized in memory, whether it was stored
//! in the entry's 4-byte slot or out of line. Payload bytes are kept in
//! little-endian element order regardless of the blob's byte order; the
//! reader and writer convert at the boundary.

use std::fmt;

use crate::exif::types::FieldType;
use crate::utils::string_utils;

/// Bytes available in a directory entry for an inline value
pub const INLINE_SIZE: u32 = 4;

/// Payload size of `count` elements, `None` if it does not fit 32 bits
pub fn payload_size(field_type: FieldType, count: u32) -> Option<u32> {
    field_type.element_size().checked_mul(count)
}

/// Storage of a tag's payload
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Payload of at most 4 bytes held in the entry itself
    Inline([u8; 4]),
    /// Payload held in the data area, with the offset it was read from
    External { offset: u32, data: Vec<u8> },
}

impl TagValue {
    /// Zero-filled storage for a payload of `size` bytes
    pub fn zeroed(size: u32) -> Self {
        if size <= INLINE_SIZE {
            TagValue::Inline([0u8; 4])
        } else {
            TagValue::External { offset: 0, data: vec![0u8; size as usize] }
        }
    }

    /// The whole buffer, which may be longer than the tag's size
    pub fn bytes(&self) -> &[u8] {
        match self {
            TagValue::Inline(bytes) => bytes,
            TagValue::External { data, .. } => data,
        }
    }

    /// Mutable access to the whole buffer
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            TagValue::Inline(bytes) => bytes,
            TagValue::External { data, .. } => data,
        }
    }

    /// Offset the payload was read from, for external storage
    pub fn offset(&self) -> Option<u32> {
        match self {
            TagValue::Inline(_) => None,
            TagValue::External { offset, .. } => Some(*offset),
        }
    }

    /// Grows the buffer to `size` bytes, zero-extended
    ///
    /// Moves an inline value out of line once it no longer fits.
    fn grow_to(&mut self, size: u32) {
        if (size as usize) <= self.bytes().len() {
            return;
        }

        let mut data = self.bytes().to_vec();
        data.resize(size as usize, 0);

        *self = match self {
            TagValue::External { offset, .. } => TagValue::External { offset: *offset, data },
            TagValue::Inline(_) => TagValue::External { offset: 0, data },
        };
    }
}

/// One entry of an image file directory
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Tag identifier, unique within its directory
    pub id: u16,
    /// Field type
    pub field_type: FieldType,
    /// Number of elements (not bytes)
    pub count: u32,
    /// Payload storage
    pub value: TagValue,
    /// The raw value-or-offset field as found in the source blob
    pub original: u32,
}

impl Tag {
    /// Creates a tag with a zero-filled payload
    ///
    /// Callers check the size with `payload_size` first; an oversized
    /// count saturates instead of wrapping.
    pub fn new(id: u16, field_type: FieldType, count: u32) -> Self {
        let size = field_type.element_size().saturating_mul(count);
        Tag {
            id,
            field_type,
            count,
            value: TagValue::zeroed(size),
            original: 0,
        }
    }

    /// Creates a tag from little-endian payload bytes
    ///
    /// `data` must hold at least `count` elements.
    pub fn with_data(id: u16, field_type: FieldType, count: u32, data: &[u8]) -> Self {
        let mut tag = Tag::new(id, field_type, count);
        let size = tag.size() as usize;
        tag.value.bytes_mut()[..size].copy_from_slice(&data[..size]);
        tag
    }

    /// Derived size of the payload in bytes
    pub fn size(&self) -> u32 {
        self.field_type.element_size().saturating_mul(self.count)
    }

    /// Whether the payload fits in the entry's value slot
    pub fn is_inline(&self) -> bool {
        self.size() <= INLINE_SIZE
    }

    /// Payload bytes, exactly `size()` long
    pub fn payload(&self) -> &[u8] {
        let size = (self.size() as usize).min(self.value.bytes().len());
        &self.value.bytes()[..size]
    }

    /// Mutable payload buffer (may extend past `size()`)
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.value.bytes_mut()
    }

    /// Grows the tag to `count` elements, keeping existing bytes
    pub fn grow(&mut self, count: u32) {
        let size = self.field_type.element_size().saturating_mul(count);
        self.value.grow_to(size);
        self.count = count;
    }

    /// First element as an unsigned integer
    ///
    /// Works for byte, word and long layouts; this is how pointer tags and
    /// byte-count tags are read.
    pub fn as_u32(&self) -> Option<u32> {
        let bytes = self.value.bytes();
        match self.field_type.element_size() {
            1 => bytes.first().map(|b| *b as u32),
            2 => Some(u16::from_le_bytes([bytes[0], bytes[1]]) as u32),
            4 => Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
            _ => None,
        }
    }

    /// The `index`-th numerator/denominator pair of a rational tag
    pub fn rational(&self, index: usize) -> Option<(u32, u32)> {
        if !self.field_type.is_rational() || index >= self.count as usize {
            return None;
        }

        let bytes = self.payload();
        let start = index * 8;
        let chunk = bytes.get(start..start + 8)?;
        let numerator = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let denominator = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
        Some((numerator, denominator))
    }

    /// Payload as text, cut at the first NUL and with trailing spaces removed
    pub fn ascii(&self) -> String {
        let mut buffer = self.payload().to_vec();
        if let Some(nul) = buffer.iter().position(|b| *b == 0) {
            buffer.truncate(nul);
        }
        string_utils::trim_trailing_spaces(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// First payload byte, used for single-character reference tags
    pub fn first_byte(&self) -> Option<u8> {
        self.value.bytes().first().copied()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={:#06x} type={} count={} size={}", self.id, self.field_type, self.count, self.size())?;
        match self.value.offset() {
            Some(offset) => write!(f, " offset={:#010x}", offset),
            None => write!(f, " value={:#010x}", self.original),
        }
    }
}
