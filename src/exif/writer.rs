//! EXIF writing
//!
//! Serializes a directory graph back into a TIFF blob in two passes. The
//! first pass completes the pointer tags, sizes every directory and assigns
//! offsets; the second pass emits the header, the directories with their
//! data areas, and finally the thumbnail copied from the source blob.
//!
//! Layout of the output:
//!
//! ```text
//! header | IFD0 + data | IFD1 + data | EXIF + data | GPS + data | INTEROP + data | 0u32 | thumbnail
//! ```

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::io::Write;

use crate::io::byte_order::ByteOrderHandler;
use crate::exif::constants::{header, tags};
use crate::exif::data::ExifData;
use crate::exif::directory::{Directory, DirectoryKind};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::tag::Tag;
use crate::exif::types::ElementLayout;
use crate::utils::write_utils;

/// Bytes of the entry count field
const COUNT_SIZE: u32 = 2;
/// Bytes of one directory entry
const ENTRY_SIZE: u32 = 12;
/// Bytes of the next-directory pointer
const NEXT_POINTER_SIZE: u32 = 4;
/// Bytes of the zero dword closing the directory area
const TRAILER_SIZE: u32 = 4;

/// Offset/length pairs locating a thumbnail image
const THUMBNAIL_LOCATORS: [(u16, u16); 2] = [
    (tags::JPEG_INTERCHANGE_FORMAT, tags::JPEG_INTERCHANGE_LENGTH),
    (tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS),
];

/// An out-of-line payload placed in a directory's data area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataBlock {
    pub kind: DirectoryKind,
    pub tag_id: u16,
    pub offset: u32,
    pub size: u32,
}

/// The thumbnail bytes carried over from the source blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailCopy {
    /// Offset tag rewritten to point at the copy
    pub offset_tag: u16,
    /// Where the bytes start in the source blob
    pub source_offset: u32,
    /// Where the bytes start in the output
    pub target_offset: u32,
    pub length: u32,
}

/// Result of the sizing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Offset of each directory, in emission order
    pub directory_offsets: BTreeMap<DirectoryKind, u32>,
    /// Size of each directory including its data area
    pub directory_sizes: BTreeMap<DirectoryKind, u32>,
    /// Every out-of-line payload, in emission order
    pub data_blocks: Vec<DataBlock>,
    pub thumbnail: Option<ThumbnailCopy>,
    /// Size of the output blob
    pub total_size: u32,
}

impl LayoutPlan {
    /// Offset of a directory, if it is emitted
    pub fn offset_of(&self, kind: DirectoryKind) -> Option<u32> {
        self.directory_offsets.get(&kind).copied()
    }
}

/// Serializes directory graphs
pub struct ExifWriter;

impl ExifWriter {
    /// Serialize a directory graph into a TIFF blob
    ///
    /// This is the main entry point. The graph is consumed: planning
    /// rewrites its pointer tags and thumbnail offset.
    pub fn write(mut data: ExifData) -> ExifResult<Vec<u8>> {
        let plan = Self::plan(&mut data)?;
        Self::serialize(&data, &plan)
    }

    /// Run the sizing pass
    ///
    /// Ensures every present sub-directory has its pointer tag, assigns
    /// directory offsets in emission order, records them in the pointer
    /// tags and points the thumbnail offset tag past the directory area.
    /// Tags are sorted by id on return.
    pub fn plan(data: &mut ExifData) -> ExifResult<LayoutPlan> {
        // Pointer tags must exist before sizing since they occupy entries
        Self::ensure_pointer_tags(data)?;

        // Captured before the offset tag is rewritten below
        let thumbnail_source = Self::thumbnail_source(data)?;

        data.directories.sort_by_key(|directory| directory.kind);

        let mut plan = LayoutPlan::default();
        let mut cursor = header::TIFF_HEADER_SIZE;
        for directory in &data.directories {
            let size = Self::calculate_directory_size(directory);
            plan.directory_offsets.insert(directory.kind, cursor);
            plan.directory_sizes.insert(directory.kind, size);
            cursor = cursor.checked_add(size)
                .ok_or_else(|| ExifError::GenericError("EXIF data exceeds 4 GiB".to_string()))?;
        }
        cursor += TRAILER_SIZE;

        for (kind, offset) in plan.directory_offsets.clone() {
            if let Some((parent, pointer_tag)) = kind.parent_pointer() {
                data.put_long(parent, pointer_tag, 0, offset)?;
            }
        }

        if let Some((offset_tag, source_offset, length)) = thumbnail_source {
            data.put_long(DirectoryKind::Thumbnail, offset_tag, 0, cursor)?;
            plan.thumbnail = Some(ThumbnailCopy {
                offset_tag,
                source_offset,
                target_offset: cursor,
                length,
            });
            cursor = cursor.checked_add(length)
                .ok_or_else(|| ExifError::GenericError("EXIF data exceeds 4 GiB".to_string()))?;
        }

        for directory in data.directories.iter_mut() {
            directory.sort_tags();
        }

        for directory in &data.directories {
            let directory_offset = plan.directory_offsets[&directory.kind];
            let mut data_offset = directory_offset + Self::calculate_table_size(directory);
            for tag in directory.tags.iter().filter(|tag| !tag.is_inline()) {
                plan.data_blocks.push(DataBlock {
                    kind: directory.kind,
                    tag_id: tag.id,
                    offset: data_offset,
                    size: tag.size(),
                });
                data_offset += write_utils::align_to_2_bytes(tag.size());
            }
        }

        plan.total_size = cursor;
        debug!("Planned {} directories, {} data blocks, {} bytes",
               plan.directory_offsets.len(), plan.data_blocks.len(), plan.total_size);

        Ok(plan)
    }

    /// Run the emission pass for a planned graph
    pub fn serialize(data: &ExifData, plan: &LayoutPlan) -> ExifResult<Vec<u8>> {
        let handler = data.byte_order().create_handler();
        let mut out: Vec<u8> = Vec::with_capacity(plan.total_size as usize);

        Self::write_header(&mut out, handler.as_ref(), data)?;

        for directory in &data.directories {
            let offset = plan.directory_offsets[&directory.kind];
            if out.len() as u32 != offset {
                return Err(ExifError::GenericError(format!(
                    "{} planned at {} but emitted at {}", directory.kind, offset, out.len()
                )));
            }

            let next_ifd = match directory.kind {
                DirectoryKind::Primary => plan.offset_of(DirectoryKind::Thumbnail).unwrap_or(0),
                _ => 0,
            };
            Self::write_directory(&mut out, handler.as_ref(), directory, offset, next_ifd)?;
        }

        handler.write_u32(&mut out, 0)?;

        if let Some(thumbnail) = &plan.thumbnail {
            let start = thumbnail.source_offset as usize;
            let end = start + thumbnail.length as usize;
            out.extend_from_slice(&data.source()[start..end]);
        }

        info!("Wrote {} bytes of EXIF data ({})", out.len(), data.byte_order().name());
        Ok(out)
    }

    /// Adds a zero pointer tag for every present sub-directory lacking one
    ///
    /// Pointer tags of absent directories are dropped. Interop is handled
    /// first because its parent may have to be created.
    fn ensure_pointer_tags(data: &mut ExifData) -> ExifResult<()> {
        if data.has_directory(DirectoryKind::Interop) {
            data.directory_or_insert(DirectoryKind::Exif);
        }

        for kind in [DirectoryKind::Interop, DirectoryKind::Exif, DirectoryKind::Gps] {
            let Some((parent, pointer_tag)) = kind.parent_pointer() else {
                continue;
            };

            if data.has_directory(kind) {
                let present = data.directory(parent).map_or(false, |directory| directory.has_tag(pointer_tag));
                if !present {
                    debug!("Adding pointer tag {:#06x} to {} for {}", pointer_tag, parent, kind);
                    data.put_long(parent, pointer_tag, 0, 0)?;
                }
            } else if data.find_tag(parent, pointer_tag).is_some() {
                debug!("Dropping pointer tag {:#06x} of absent {}", pointer_tag, kind);
                data.remove_tag(parent, pointer_tag);
            }
        }

        Ok(())
    }

    /// Locates the thumbnail bytes in the source blob
    ///
    /// Returns the offset tag in use, the source offset and the length.
    fn thumbnail_source(data: &ExifData) -> ExifResult<Option<(u16, u32, u32)>> {
        let Some(thumbnail) = data.directory(DirectoryKind::Thumbnail) else {
            return Ok(None);
        };

        for (offset_tag, length_tag) in THUMBNAIL_LOCATORS {
            let Some(offset) = thumbnail.get_tag(offset_tag) else {
                continue;
            };
            if offset.count != 1 {
                warn!("Thumbnail split into {} strips is not carried over", offset.count);
                continue;
            }

            let length = thumbnail.get_tag(length_tag).and_then(Tag::as_u32).unwrap_or(0);
            let source_offset = offset.original;
            let available = data.source().len() as u64;
            if source_offset as u64 + length as u64 > available {
                return Err(ExifError::GenericError(format!(
                    "Thumbnail at {} ({} bytes) exceeds source size {}",
                    source_offset, length, available
                )));
            }

            debug!("Thumbnail: {} bytes at {}", length, source_offset);
            return Ok(Some((offset_tag, source_offset, length)));
        }

        Ok(None)
    }

    /// Size of the entry count, entry table and next pointer
    fn calculate_table_size(directory: &Directory) -> u32 {
        COUNT_SIZE + ENTRY_SIZE * directory.tags.len() as u32 + NEXT_POINTER_SIZE
    }

    /// Size of a directory including its data area
    fn calculate_directory_size(directory: &Directory) -> u32 {
        let data_size: u32 = directory.tags.iter()
            .filter(|tag| !tag.is_inline())
            .map(|tag| write_utils::align_to_2_bytes(tag.size()))
            .sum();
        Self::calculate_table_size(directory) + data_size
    }

    /// Write the 8-byte TIFF header
    fn write_header(out: &mut Vec<u8>, handler: &dyn ByteOrderHandler, data: &ExifData) -> ExifResult<()> {
        out.write_all(&data.byte_order().marker())?;
        handler.write_u16(out, header::TIFF_VERSION)?;
        handler.write_u32(out, header::TIFF_HEADER_SIZE)?;
        Ok(())
    }

    /// Write one directory: count, sorted entries, next pointer, data area
    fn write_directory(
        out: &mut Vec<u8>,
        handler: &dyn ByteOrderHandler,
        directory: &Directory,
        offset: u32,
        next_ifd: u32,
    ) -> ExifResult<()> {
        handler.write_u16(out, directory.count())?;

        let mut data_offset = offset + Self::calculate_table_size(directory);
        for tag in &directory.tags {
            handler.write_u16(out, tag.id)?;
            handler.write_u16(out, tag.field_type.code())?;
            handler.write_u32(out, tag.count)?;

            if tag.is_inline() {
                Self::write_inline_value(out, handler, tag)?;
            } else {
                handler.write_u32(out, data_offset)?;
                data_offset += write_utils::align_to_2_bytes(tag.size());
            }
        }

        handler.write_u32(out, next_ifd)?;

        for tag in directory.tags.iter().filter(|tag| !tag.is_inline()) {
            Self::write_payload(out, handler, tag)?;
            write_utils::write_padding(out, tag.size() as usize)?;
        }

        Ok(())
    }

    /// Write the 4-byte value slot of an entry
    fn write_inline_value(out: &mut Vec<u8>, handler: &dyn ByteOrderHandler, tag: &Tag) -> ExifResult<()> {
        let bytes = tag.value.bytes();
        let mut slot = [0u8; 4];
        let used = (tag.size() as usize).min(bytes.len());
        slot[..used].copy_from_slice(&bytes[..used]);

        match tag.field_type.layout() {
            ElementLayout::Word => {
                handler.write_u16(out, u16::from_le_bytes([slot[0], slot[1]]))?;
                handler.write_u16(out, u16::from_le_bytes([slot[2], slot[3]]))?;
            },
            ElementLayout::Long if tag.count == 1 => handler.write_u32(out, u32::from_le_bytes(slot))?,
            ElementLayout::Float if tag.count == 1 => handler.write_f32(out, f32::from_le_bytes(slot))?,
            _ => out.write_all(&slot)?,
        }
        Ok(())
    }

    /// Write an out-of-line payload in the output byte order
    fn write_payload(out: &mut Vec<u8>, handler: &dyn ByteOrderHandler, tag: &Tag) -> ExifResult<()> {
        let payload = tag.payload();
        let element_size = tag.field_type.element_size() as usize;

        match tag.field_type.layout() {
            ElementLayout::Bytes | ElementLayout::Opaque => out.write_all(payload)?,
            ElementLayout::Word => {
                for chunk in payload.chunks_exact(2) {
                    handler.write_u16(out, u16::from_le_bytes([chunk[0], chunk[1]]))?;
                }
            },
            ElementLayout::Long | ElementLayout::Rational => {
                for chunk in payload.chunks_exact(4) {
                    handler.write_u32(out, u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))?;
                }
            },
            ElementLayout::Float => {
                for chunk in payload.chunks_exact(4) {
                    handler.write_f32(out, f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))?;
                }
            },
            ElementLayout::Double => {
                for chunk in payload.chunks_exact(element_size) {
                    let mut element = [0u8; 8];
                    element.copy_from_slice(chunk);
                    handler.write_f64(out, f64::from_le_bytes(element))?;
                }
            },
            ElementLayout::Long8 => {
                for chunk in payload.chunks_exact(element_size) {
                    let mut element = [0u8; 8];
                    element.copy_from_slice(chunk);
                    handler.write_u64(out, u64::from_le_bytes(element))?;
                }
            },
        }
        Ok(())
    }
}
