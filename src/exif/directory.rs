//! Image File Directory (IFD) structures
//!
//! An EXIF segment holds a small, fixed-shape graph of directories: the
//! primary image directory may chain to a thumbnail directory, and pointer
//! tags locate the EXIF, GPS and Interoperability sub-directories.

use std::fmt;
use log::trace;

use crate::exif::constants::{exif_tags, tags};
use crate::exif::tag::Tag;
use crate::exif::tag_names;

/// Which directory of the graph a directory is
///
/// The declaration order is the order directories are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectoryKind {
    /// IFD0, the primary image
    Primary,
    /// IFD1, the thumbnail image
    Thumbnail,
    /// EXIF sub-directory
    Exif,
    /// GPS sub-directory
    Gps,
    /// Interoperability sub-directory
    Interop,
    /// Any other directory, kept opaque
    Private(u16),
}

impl DirectoryKind {
    /// The directory whose pointer tag locates this one, with that tag's id
    ///
    /// Thumbnail and private directories are not located by a pointer tag.
    pub fn parent_pointer(&self) -> Option<(DirectoryKind, u16)> {
        match self {
            DirectoryKind::Exif => Some((DirectoryKind::Primary, tags::EXIF_IFD_POINTER)),
            DirectoryKind::Gps => Some((DirectoryKind::Primary, tags::GPS_IFD_POINTER)),
            DirectoryKind::Interop => Some((DirectoryKind::Exif, exif_tags::INTEROP_IFD_POINTER)),
            _ => None,
        }
    }

    /// Pointer tags scanned while reading this kind, with the kind each one locates
    pub fn child_pointers(&self) -> &'static [(u16, DirectoryKind)] {
        match self {
            DirectoryKind::Primary => &[
                (tags::EXIF_IFD_POINTER, DirectoryKind::Exif),
                (tags::GPS_IFD_POINTER, DirectoryKind::Gps),
            ],
            DirectoryKind::Exif => &[(exif_tags::INTEROP_IFD_POINTER, DirectoryKind::Interop)],
            _ => &[],
        }
    }

    /// Short name used in logs and dumps
    pub fn name(&self) -> String {
        match self {
            DirectoryKind::Primary => "IFD0".to_string(),
            DirectoryKind::Thumbnail => "IFD1".to_string(),
            DirectoryKind::Exif => "EXIF".to_string(),
            DirectoryKind::Gps => "GPS".to_string(),
            DirectoryKind::Interop => "INTEROP".to_string(),
            DirectoryKind::Private(n) => format!("private #{}", n),
        }
    }
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// One directory: its tags and the pointer to the next directory in its chain
#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    /// Position of this directory in the graph
    pub kind: DirectoryKind,
    /// Entries, in file order until the writer sorts them
    pub tags: Vec<Tag>,
    /// Offset of the next directory in the chain, 0 if none
    pub next_ifd: u32,
}

impl Directory {
    /// Creates an empty directory
    pub fn new(kind: DirectoryKind) -> Self {
        Directory {
            kind,
            tags: Vec::new(),
            next_ifd: 0,
        }
    }

    /// Number of entries, as written in the directory's count field
    pub fn count(&self) -> u16 {
        self.tags.len() as u16
    }

    /// Gets a tag by id
    pub fn get_tag(&self, id: u16) -> Option<&Tag> {
        let tag = self.tags.iter().find(|tag| tag.id == id);
        trace!("Lookup of {} {} in {}: {}",
               id, tag_names::get_tag_name(self.kind, id), self.kind,
               if tag.is_some() { "found" } else { "absent" });
        tag
    }

    /// Gets a mutable tag by id
    pub fn get_tag_mut(&mut self, id: u16) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|tag| tag.id == id)
    }

    /// Checks whether this directory has a tag
    pub fn has_tag(&self, id: u16) -> bool {
        self.tags.iter().any(|tag| tag.id == id)
    }

    /// Appends a tag, replacing an existing tag with the same id
    pub fn insert_tag(&mut self, tag: Tag) {
        match self.tags.iter().position(|existing| existing.id == tag.id) {
            Some(index) => self.tags[index] = tag,
            None => self.tags.push(tag),
        }
    }

    /// Removes a tag, returning it if it was present
    pub fn remove_tag(&mut self, id: u16) -> Option<Tag> {
        let index = self.tags.iter().position(|tag| tag.id == id)?;
        Some(self.tags.remove(index))
    }

    /// Sorts the entries by ascending tag id
    pub fn sort_tags(&mut self) {
        self.tags.sort_by_key(|tag| tag.id);
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} entries, next: {:#010x})", self.kind, self.tags.len(), self.next_ifd)?;
        for tag in &self.tags {
            writeln!(f, "    {} [{}]", tag, tag_names::get_tag_name(self.kind, tag.id))?;
        }
        Ok(())
    }
}
