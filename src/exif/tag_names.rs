//! EXIF tag name tables
//!
//! Tag ids are only unique within a directory kind (GPS tag 1 and Interop
//! tag 1 mean different things), so names are looked up per kind.

use std::collections::HashMap;
use lazy_static::lazy_static;

use crate::exif::directory::DirectoryKind;
use crate::exif::errors::{ExifError, ExifResult};

lazy_static! {
    static ref TAG_DEFINITIONS: TagDefinitions = {
        let content = include_str!("../../exif_tags.toml");
        TagDefinitions::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse EXIF tag definitions: {}", e);
            TagDefinitions::default()
        })
    };
}

/// Tag names of every directory kind
#[derive(Debug, Default)]
pub struct TagDefinitions {
    // Primary and thumbnail directories share the TIFF image tags
    pub image_tags: HashMap<u16, String>,
    pub exif_tags: HashMap<u16, String>,
    pub gps_tags: HashMap<u16, String>,
    pub interop_tags: HashMap<u16, String>,
}

impl TagDefinitions {
    /// Parse tag definitions from a TOML string
    pub fn from_str(content: &str) -> ExifResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(ExifError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = TagDefinitions::default();
        Self::parse_name_table(&toml_value, "image_tags", &mut defs.image_tags);
        Self::parse_name_table(&toml_value, "exif_tags", &mut defs.exif_tags);
        Self::parse_name_table(&toml_value, "gps_tags", &mut defs.gps_tags);
        Self::parse_name_table(&toml_value, "interop_tags", &mut defs.interop_tags);

        Ok(defs)
    }

    fn parse_name_table(toml_value: &toml::Value, table_name: &str, target: &mut HashMap<u16, String>) {
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    target.insert(id, name.to_string());
                }
            }
        }
    }

    /// Get a tag name by directory kind and id
    pub fn get_tag_name(&self, kind: DirectoryKind, tag_id: u16) -> String {
        let table = match kind {
            DirectoryKind::Primary | DirectoryKind::Thumbnail => &self.image_tags,
            DirectoryKind::Exif => &self.exif_tags,
            DirectoryKind::Gps => &self.gps_tags,
            DirectoryKind::Interop => &self.interop_tags,
            DirectoryKind::Private(_) => return format!("Unknown-{}", tag_id),
        };

        table.get(&tag_id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown-{}", tag_id))
    }
}

/// Get the name of a tag in a directory of the given kind
pub fn get_tag_name(kind: DirectoryKind, tag_id: u16) -> String {
    TAG_DEFINITIONS.get_tag_name(kind, tag_id)
}
