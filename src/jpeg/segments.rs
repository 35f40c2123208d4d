//! JPEG segment splitting and joining
//!
//! Splits a JPEG file into its marker segments up to the start of scan,
//! keeping everything from the SOS marker on as an opaque tail, and joins
//! them back with recomputed length fields.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, trace};
use std::io::{Cursor, Read};

use crate::exif::constants::header;
use crate::exif::errors::{ExifError, ExifResult};
use crate::jpeg::markers;

/// One marker segment before the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Marker code without the 0xFF prefix
    pub marker: u8,
    /// Segment body, without the length field
    pub data: Vec<u8>,
}

impl Segment {
    /// Whether this is an APP1 segment carrying EXIF data
    pub fn is_exif(&self) -> bool {
        self.marker == markers::APP1 && self.data.starts_with(&header::EXIF_IDENTIFIER)
    }
}

/// A JPEG file split into segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegFile {
    /// Segments between SOI and SOS
    pub segments: Vec<Segment>,
    /// Everything from the SOS marker to the end of the file
    pub scan: Vec<u8>,
}

impl JpegFile {
    /// Splits a JPEG file into segments
    pub fn parse(bytes: &[u8]) -> ExifResult<Self> {
        let mut cursor = Cursor::new(bytes);

        if cursor.read_u8()? != 0xFF || cursor.read_u8()? != markers::SOI {
            return Err(ExifError::InvalidJpeg("missing SOI marker".to_string()));
        }

        let mut segments = Vec::new();
        loop {
            if cursor.read_u8()? != 0xFF {
                return Err(ExifError::InvalidJpeg(format!(
                    "expected segment marker at offset {}", cursor.position() - 1
                )));
            }

            // Any number of 0xFF fill bytes may precede a marker
            let mut marker = cursor.read_u8()?;
            while marker == 0xFF {
                marker = cursor.read_u8()?;
            }

            if marker == markers::SOS || marker == markers::EOI {
                let start = cursor.position() as usize - 2;
                debug!("Scan tail of {} bytes after {} segments", bytes.len() - start, segments.len());
                return Ok(JpegFile {
                    segments,
                    scan: bytes[start..].to_vec(),
                });
            }

            if markers::is_standalone(marker) {
                trace!("Standalone marker {:#04x}", marker);
                segments.push(Segment { marker, data: Vec::new() });
                continue;
            }

            let length = cursor.read_u16::<BigEndian>()?;
            if length < 2 {
                return Err(ExifError::InvalidJpeg(format!("segment {:#04x} has length {}", marker, length)));
            }
            let mut data = vec![0u8; length as usize - 2];
            cursor.read_exact(&mut data)
                .map_err(|_| ExifError::InvalidJpeg(format!("segment {:#04x} is truncated", marker)))?;

            trace!("Segment {:#04x}: {} bytes", marker, data.len());
            segments.push(Segment { marker, data });
        }
    }

    /// Body of the first EXIF APP1 segment
    pub fn exif_body(&self) -> Option<&[u8]> {
        self.segments.iter()
            .find(|segment| segment.is_exif())
            .map(|segment| segment.data.as_slice())
    }

    /// Replaces the EXIF APP1 body, inserting a segment after any JFIF header if there is none
    pub fn set_exif_body(&mut self, body: Vec<u8>) -> ExifResult<()> {
        if body.len() > markers::MAX_SEGMENT_BODY {
            return Err(ExifError::InvalidJpeg(format!(
                "EXIF data of {} bytes does not fit in one segment", body.len()
            )));
        }

        match self.segments.iter_mut().find(|segment| segment.is_exif()) {
            Some(segment) => segment.data = body,
            None => {
                let position = self.segments.iter()
                    .position(|segment| segment.marker != markers::APP0)
                    .unwrap_or(self.segments.len());
                self.segments.insert(position, Segment { marker: markers::APP1, data: body });
            },
        }
        Ok(())
    }

    /// Joins the segments and scan tail back into a JPEG file
    pub fn to_bytes(&self) -> ExifResult<Vec<u8>> {
        let size = 2 + self.segments.iter().map(|segment| segment.data.len() + 4).sum::<usize>() + self.scan.len();
        let mut out = Vec::with_capacity(size);

        out.write_u8(0xFF)?;
        out.write_u8(markers::SOI)?;
        for segment in &self.segments {
            out.write_u8(0xFF)?;
            out.write_u8(segment.marker)?;
            if markers::is_standalone(segment.marker) {
                continue;
            }
            if segment.data.len() > markers::MAX_SEGMENT_BODY {
                return Err(ExifError::InvalidJpeg(format!(
                    "segment {:#04x} of {} bytes is too long", segment.marker, segment.data.len()
                )));
            }
            out.write_u16::<BigEndian>(segment.data.len() as u16 + 2)?;
            out.extend_from_slice(&segment.data);
        }
        out.extend_from_slice(&self.scan);

        Ok(out)
    }
}
