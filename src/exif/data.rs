//! Directory graph of one EXIF segment
//!
//! `ExifData` is the context handle every mutation and the writer operate
//! on. It owns the directories read from one image together with the
//! source blob they were read from, which the writer still needs to copy
//! the thumbnail payload.

use log::{debug, info};
use std::fmt;
use std::io::Cursor;

use crate::io::byte_order::ByteOrder;
use crate::exif::constants::header;
use crate::exif::directory::{Directory, DirectoryKind};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::reader::DirectoryReader;
use crate::exif::tag::Tag;
use crate::exif::validation;
use crate::exif::writer::ExifWriter;

/// The directories of one EXIF segment
#[derive(Debug, Clone)]
pub struct ExifData {
    /// Byte order of the source blob, reused for output
    byte_order: ByteOrder,
    /// Directories, in read or creation order
    pub(crate) directories: Vec<Directory>,
    /// The TIFF blob the directories were read from
    source: Vec<u8>,
}

impl ExifData {
    /// Creates an empty graph that will be written with the given byte order
    pub fn new(byte_order: ByteOrder) -> Self {
        ExifData {
            byte_order,
            directories: Vec::new(),
            source: Vec::new(),
        }
    }

    /// Parses an APP1 body: the 6-byte `Exif\0\0` identifier and a TIFF blob
    pub fn from_app1(body: &[u8]) -> ExifResult<Self> {
        if body.len() < header::EXIF_IDENTIFIER_SIZE + header::TIFF_HEADER_SIZE as usize {
            return Err(ExifError::InvalidHeader);
        }
        if body[..4] != header::EXIF_IDENTIFIER[..4] {
            return Err(ExifError::InvalidHeader);
        }
        if body[4] != 0 || body[5] != 0 {
            return Err(ExifError::InvalidHeader);
        }

        Self::from_tiff(body[header::EXIF_IDENTIFIER_SIZE..].to_vec())
    }

    /// Parses a TIFF blob and materializes its directory graph
    ///
    /// Reads the primary directory, the thumbnail directory it chains to,
    /// then the sub-directories its pointer tags locate.
    pub fn from_tiff(blob: Vec<u8>) -> ExifResult<Self> {
        let mut cursor = Cursor::new(blob.as_slice());

        let byte_order = ByteOrder::detect(&mut cursor)?;
        debug!("Detected byte order: {}", byte_order.name());

        let reader = DirectoryReader::new(byte_order);
        let version = reader.read_u16(&mut cursor)?;
        validation::validate_version(version)?;
        let first_offset = reader.read_u32(&mut cursor)?;
        debug!("First directory offset: {}", first_offset);

        let mut directories = Vec::new();

        let primary = reader.read_directory(&mut cursor, DirectoryKind::Primary, first_offset)?;
        let mut pending = DirectoryReader::pointer_targets(&primary);
        let next_ifd = primary.next_ifd;
        directories.push(primary);

        if next_ifd != 0 {
            directories.push(reader.read_directory(&mut cursor, DirectoryKind::Thumbnail, next_ifd)?);
        }

        // EXIF is read before GPS so its Interop pointer joins the queue last
        pending.sort_by_key(|(kind, _)| *kind);
        let mut index = 0;
        while index < pending.len() {
            let (kind, offset) = pending[index];
            let directory = reader.read_directory(&mut cursor, kind, offset)?;
            pending.extend(DirectoryReader::pointer_targets(&directory));
            directories.push(directory);
            index += 1;
        }

        info!("Read {} directories ({})", directories.len(), byte_order.name());

        Ok(ExifData {
            byte_order,
            directories,
            source: blob,
        })
    }

    /// Byte order used for output
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// All directories
    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    /// The source TIFF blob (empty for graphs built from scratch)
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    /// Gets the directory of a kind
    pub fn directory(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories.iter().find(|directory| directory.kind == kind)
    }

    /// Gets the directory of a kind for modification
    pub fn directory_mut(&mut self, kind: DirectoryKind) -> Option<&mut Directory> {
        self.directories.iter_mut().find(|directory| directory.kind == kind)
    }

    /// Gets the directory of a kind, creating it empty if missing
    pub fn directory_or_insert(&mut self, kind: DirectoryKind) -> &mut Directory {
        let index = match self.directories.iter().position(|directory| directory.kind == kind) {
            Some(index) => index,
            None => {
                debug!("Creating empty {} directory", kind);
                self.directories.push(Directory::new(kind));
                self.directories.len() - 1
            },
        };
        &mut self.directories[index]
    }

    /// Whether a directory of the kind exists
    pub fn has_directory(&self, kind: DirectoryKind) -> bool {
        self.directory(kind).is_some()
    }

    /// Finds a tag by directory kind and id
    pub fn find_tag(&self, kind: DirectoryKind, tag_id: u16) -> Option<&Tag> {
        self.directory(kind)?.get_tag(tag_id)
    }

    /// Serializes the graph into a TIFF blob, consuming it
    pub fn into_tiff(self) -> ExifResult<Vec<u8>> {
        ExifWriter::write(self)
    }

    /// Serializes the graph into an APP1 body (`Exif\0\0` followed by the TIFF blob)
    pub fn into_app1(self) -> ExifResult<Vec<u8>> {
        let tiff = self.into_tiff()?;
        let mut body = Vec::with_capacity(header::EXIF_IDENTIFIER_SIZE + tiff.len());
        body.extend_from_slice(&header::EXIF_IDENTIFIER);
        body.extend_from_slice(&tiff);
        Ok(body)
    }
}

impl fmt::Display for ExifData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EXIF data:")?;
        writeln!(f, "  Byte order: {}", self.byte_order.name())?;
        writeln!(f, "  Number of directories: {}", self.directories.len())?;
        for directory in &self.directories {
            write!(f, "  {}", directory)?;
        }
        Ok(())
    }
}
