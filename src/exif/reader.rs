//! Directory reader
//!
//! Reads one directory at a time from a TIFF blob using the byte order
//! strategy detected from its header. Entry tables are read first and
//! out-of-line payloads resolved afterwards, since payload areas may sit
//! before or after the table that references them.

use log::{debug, trace, warn};
use std::io::SeekFrom;

use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::exif::directory::{Directory, DirectoryKind};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::tag::{Tag, TagValue, INLINE_SIZE};
use crate::exif::tag_names;
use crate::exif::types::{ElementLayout, FieldType};
use crate::exif::validation;

/// Reader for the directories of one TIFF blob
pub struct DirectoryReader {
    /// Byte order of the blob
    byte_order: ByteOrder,
    /// Strategy matching `byte_order`
    handler: Box<dyn ByteOrderHandler>,
}

impl DirectoryReader {
    /// Creates a reader for a blob of the given byte order
    pub fn new(byte_order: ByteOrder) -> Self {
        DirectoryReader {
            byte_order,
            handler: byte_order.create_handler(),
        }
    }

    /// Byte order this reader decodes
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Reads a u32 at the current position
    pub fn read_u32(&self, reader: &mut dyn SeekableReader) -> ExifResult<u32> {
        Ok(self.handler.read_u32(reader)?)
    }

    /// Reads a u16 at the current position
    pub fn read_u16(&self, reader: &mut dyn SeekableReader) -> ExifResult<u16> {
        Ok(self.handler.read_u16(reader)?)
    }

    /// Reads the directory of the given kind located at `offset`
    ///
    /// # Arguments
    /// * `reader` - The TIFF blob
    /// * `kind` - Which directory of the graph this is
    /// * `offset` - Offset of the directory from the start of the blob
    ///
    /// # Returns
    /// The directory with every payload resolved
    pub fn read_directory(&self, reader: &mut dyn SeekableReader, kind: DirectoryKind, offset: u32) -> ExifResult<Directory> {
        let blob_size = validation::get_stream_size(reader)?;
        validation::validate_directory_offset(offset, blob_size)?;

        reader.seek(SeekFrom::Start(offset as u64))?;
        let entry_count = self.handler.read_u16(reader)?;
        debug!("{} at offset {:#010x}: {} entries", kind, offset, entry_count);

        let mut directory = Directory::new(kind);
        if entry_count == 0 {
            return Ok(directory);
        }

        for _ in 0..entry_count {
            let tag = self.read_entry(reader)?;
            trace!("{}: {} [{}]", kind, tag, tag_names::get_tag_name(kind, tag.id));
            directory.tags.push(tag);
        }

        directory.next_ifd = self.handler.read_u32(reader)?;
        debug!("{} next directory: {:#010x}", kind, directory.next_ifd);

        for tag in directory.tags.iter_mut() {
            self.resolve_payload(reader, tag, blob_size)?;
        }

        Ok(directory)
    }

    /// Offsets of the sub-directories a directory's pointer tags locate
    pub fn pointer_targets(directory: &Directory) -> Vec<(DirectoryKind, u32)> {
        directory.kind.child_pointers().iter()
            .filter_map(|(tag_id, child)| {
                let offset = directory.get_tag(*tag_id)?.as_u32()?;
                if offset == 0 {
                    None
                } else {
                    Some((*child, offset))
                }
            })
            .collect()
    }

    /// Reads one 12-byte entry, decoding inline values
    fn read_entry(&self, reader: &mut dyn SeekableReader) -> ExifResult<Tag> {
        let id = self.handler.read_u16(reader)?;
        let field_type = FieldType::from_code(self.handler.read_u16(reader)?)?;
        let count = self.handler.read_u32(reader)?;
        let size = field_type.element_size() as u64 * count as u64;
        if size > u32::MAX as u64 {
            return Err(ExifError::GenericError(format!(
                "Tag {:#06x}: {} {} elements exceed 4 GiB", id, count, field_type
            )));
        }

        if size <= INLINE_SIZE as u64 {
            let slot = self.read_inline_slot(reader, field_type)?;
            return Ok(Tag {
                id,
                field_type,
                count,
                value: TagValue::Inline(slot),
                original: u32::from_le_bytes(slot),
            });
        }

        let offset = self.handler.read_u32(reader)?;
        Ok(Tag {
            id,
            field_type,
            count,
            value: TagValue::External { offset, data: Vec::new() },
            original: offset,
        })
    }

    /// Decodes the 4-byte value slot of an entry into little-endian order
    fn read_inline_slot(&self, reader: &mut dyn SeekableReader, field_type: FieldType) -> ExifResult<[u8; 4]> {
        let mut slot = [0u8; 4];
        match field_type.layout() {
            ElementLayout::Word => {
                let first = self.handler.read_u16(reader)?.to_le_bytes();
                let second = self.handler.read_u16(reader)?.to_le_bytes();
                slot = [first[0], first[1], second[0], second[1]];
            },
            ElementLayout::Long => slot = self.handler.read_u32(reader)?.to_le_bytes(),
            ElementLayout::Float => slot = self.handler.read_f32(reader)?.to_le_bytes(),
            // Byte runs, and zero-count entries of the wider types
            _ => reader.read_exact(&mut slot)?,
        }
        Ok(slot)
    }

    /// Reads the out-of-line payload of an external tag
    fn resolve_payload(&self, reader: &mut dyn SeekableReader, tag: &mut Tag, blob_size: u64) -> ExifResult<()> {
        let offset = match &tag.value {
            TagValue::External { offset, .. } => *offset,
            TagValue::Inline(_) => return Ok(()),
        };

        let size = tag.size();
        if offset == 0 {
            warn!("Tag {:#06x} has a {} byte payload at offset 0, using zeros", tag.id, size);
            tag.value = TagValue::External { offset, data: vec![0u8; size as usize] };
            return Ok(());
        }
        validation::validate_payload_range(offset, size, blob_size)?;

        reader.seek(SeekFrom::Start(offset as u64))?;
        let mut data = Vec::with_capacity(size as usize);

        match tag.field_type.layout() {
            ElementLayout::Bytes => {
                data.resize(size as usize, 0);
                reader.read_exact(&mut data)?;
            },
            layout => {
                for _ in 0..tag.count {
                    self.read_element(reader, layout, tag.field_type, &mut data)?;
                }
            },
        }

        tag.value = TagValue::External { offset, data };
        Ok(())
    }

    /// Reads one element and appends it in little-endian order
    fn read_element(&self, reader: &mut dyn SeekableReader, layout: ElementLayout, field_type: FieldType, data: &mut Vec<u8>) -> ExifResult<()> {
        match layout {
            ElementLayout::Word => data.extend_from_slice(&self.handler.read_u16(reader)?.to_le_bytes()),
            ElementLayout::Long => data.extend_from_slice(&self.handler.read_u32(reader)?.to_le_bytes()),
            ElementLayout::Rational => {
                let (numerator, denominator) = self.handler.read_rational(reader)?;
                data.extend_from_slice(&numerator.to_le_bytes());
                data.extend_from_slice(&denominator.to_le_bytes());
            },
            ElementLayout::Float => data.extend_from_slice(&self.handler.read_f32(reader)?.to_le_bytes()),
            ElementLayout::Double => data.extend_from_slice(&self.handler.read_f64(reader)?.to_le_bytes()),
            ElementLayout::Long8 => data.extend_from_slice(&self.handler.read_u64(reader)?.to_le_bytes()),
            ElementLayout::Bytes | ElementLayout::Opaque => {
                let mut element = vec![0u8; field_type.element_size() as usize];
                reader.read_exact(&mut element)?;
                data.extend_from_slice(&element);
            },
        }
        Ok(())
    }
}
