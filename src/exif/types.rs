//! Field type catalog
//!
//! Maps the numeric type code of a directory entry to its element size and
//! to the way its elements are laid out on disk.

use std::fmt;

use crate::exif::constants::field_types;
use crate::exif::errors::{ExifError, ExifResult};

/// A TIFF/EXIF field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Ifd,
    Unicode,
    Complex,
    Long8,
    SLong8,
    Ifd8,
}

/// How the elements of a field type are encoded
///
/// The reader and writer convert each layout between the blob's byte order
/// and the little-endian form payloads are kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementLayout {
    /// Single bytes, copied as a run
    Bytes,
    /// 16-bit words
    Word,
    /// 32-bit words
    Long,
    /// Pairs of 32-bit words
    Rational,
    /// IEEE-754 single precision
    Float,
    /// IEEE-754 double precision
    Double,
    /// 64-bit words
    Long8,
    /// Opaque elements copied byte for byte
    Opaque,
}

impl FieldType {
    /// Looks up a field type by its numeric code
    pub fn from_code(code: u16) -> ExifResult<Self> {
        let field_type = match code {
            field_types::BYTE => FieldType::Byte,
            field_types::ASCII => FieldType::Ascii,
            field_types::SHORT => FieldType::Short,
            field_types::LONG => FieldType::Long,
            field_types::RATIONAL => FieldType::Rational,
            field_types::SBYTE => FieldType::SByte,
            field_types::UNDEFINED => FieldType::Undefined,
            field_types::SSHORT => FieldType::SShort,
            field_types::SLONG => FieldType::SLong,
            field_types::SRATIONAL => FieldType::SRational,
            field_types::FLOAT => FieldType::Float,
            field_types::DOUBLE => FieldType::Double,
            field_types::IFD => FieldType::Ifd,
            field_types::UNICODE => FieldType::Unicode,
            field_types::COMPLEX => FieldType::Complex,
            field_types::LONG8 => FieldType::Long8,
            field_types::SLONG8 => FieldType::SLong8,
            field_types::IFD8 => FieldType::Ifd8,
            _ => return Err(ExifError::UnsupportedFieldType(code)),
        };
        Ok(field_type)
    }

    /// Numeric code written into a directory entry
    pub fn code(&self) -> u16 {
        match self {
            FieldType::Byte => field_types::BYTE,
            FieldType::Ascii => field_types::ASCII,
            FieldType::Short => field_types::SHORT,
            FieldType::Long => field_types::LONG,
            FieldType::Rational => field_types::RATIONAL,
            FieldType::SByte => field_types::SBYTE,
            FieldType::Undefined => field_types::UNDEFINED,
            FieldType::SShort => field_types::SSHORT,
            FieldType::SLong => field_types::SLONG,
            FieldType::SRational => field_types::SRATIONAL,
            FieldType::Float => field_types::FLOAT,
            FieldType::Double => field_types::DOUBLE,
            FieldType::Ifd => field_types::IFD,
            FieldType::Unicode => field_types::UNICODE,
            FieldType::Complex => field_types::COMPLEX,
            FieldType::Long8 => field_types::LONG8,
            FieldType::SLong8 => field_types::SLONG8,
            FieldType::Ifd8 => field_types::IFD8,
        }
    }

    /// Size in bytes of one element of this type
    pub fn element_size(&self) -> u32 {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort | FieldType::Unicode => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double
            | FieldType::Complex | FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => 8,
        }
    }

    /// Element encoding used when converting between byte orders
    pub fn layout(&self) -> ElementLayout {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => ElementLayout::Bytes,
            FieldType::Short | FieldType::SShort | FieldType::Unicode => ElementLayout::Word,
            FieldType::Long | FieldType::SLong | FieldType::Ifd => ElementLayout::Long,
            FieldType::Rational | FieldType::SRational => ElementLayout::Rational,
            FieldType::Float => ElementLayout::Float,
            FieldType::Double => ElementLayout::Double,
            FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => ElementLayout::Long8,
            FieldType::Complex => ElementLayout::Opaque,
        }
    }

    /// Whether values of this type are numerator/denominator pairs
    pub fn is_rational(&self) -> bool {
        matches!(self, FieldType::Rational | FieldType::SRational)
    }

    /// Human-readable type name
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Ifd => "IFD",
            FieldType::Unicode => "UNICODE",
            FieldType::Complex => "COMPLEX",
            FieldType::Long8 => "LONG8",
            FieldType::SLong8 => "SLONG8",
            FieldType::Ifd8 => "IFD8",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element size of a raw type code
///
/// Fails with `UnsupportedFieldType` for codes outside the catalog; callers
/// treat that as a corrupt or unsupported file.
pub fn element_size(code: u16) -> ExifResult<u32> {
    FieldType::from_code(code).map(|field_type| field_type.element_size())
}
