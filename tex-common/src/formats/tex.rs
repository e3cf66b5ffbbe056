//! TEX texture container (`.tex`)
//!
//! Versioned container used by the game for all of its textures. The header
//! grows by additive field groups: each version tier only ever appends a
//! group, so one reader handles every version by walking the groups whose
//! introducing version is at or below the file's version.
//!
//! # Layout
//! ```text
//! string  tag            "CM3D2_TEX" (7-bit length prefix + UTF-8)
//! int32   version        1000 | 1010 | 1011
//! string  internal_path  may be empty
//! -- version >= 1011:
//! int32   rect_count
//! f32×4   rects[rect_count]   x, y, width, height
//! -- version >= 1010:
//! int32   width
//! int32   height
//! int32   format         3 = RGB24, 5 = ARGB32, 10 = DXT1, 12 = DXT5
//! -- all versions:
//! int32   payload_size
//! byte    payload[payload_size]
//! ```
//!
//! Version 1000 has no explicit dimensions or format. The payload is always a
//! PNG there, so width and height are taken from the IHDR chunk as big-endian
//! integers at payload offsets 16 and 20, and the format is ARGB32.

use std::io::Cursor;

use crate::error::TexError;
use crate::formats::pixel_format::PixelFormat;
use crate::formats::uv_rects::{Rect, read_rects, write_rects};
use crate::io::{read_bytes, read_i32, read_string, remaining, write_i32, write_string};

/// Leading tag of every TEX container
pub const TEX_TAG: &str = "CM3D2_TEX";

/// File extension of TEX containers (without dot)
pub const TEX_EXTENSION: &str = "tex";

/// First layout: tag, version, path, payload
pub const VERSION_LEGACY: i32 = 1000;

/// Adds explicit width, height and format
pub const VERSION_DIMENSIONS: i32 = 1010;

/// Adds the embedded UV rect block
pub const VERSION_UV_RECTS: i32 = 1011;

/// Payload offset of the big-endian width in legacy containers
pub const LEGACY_WIDTH_OFFSET: usize = 16;

/// Payload offset of the big-endian height in legacy containers
pub const LEGACY_HEIGHT_OFFSET: usize = 20;

/// Optional header field groups, in on-disk order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldGroup {
    UvRects,
    Dimensions,
}

/// Each group paired with the version that introduced it
const FIELD_GROUPS: [(FieldGroup, i32); 2] = [
    (FieldGroup::UvRects, VERSION_UV_RECTS),
    (FieldGroup::Dimensions, VERSION_DIMENSIONS),
];

/// Field groups present in a container of the given version
fn field_groups(version: i32) -> impl Iterator<Item = FieldGroup> {
    FIELD_GROUPS
        .into_iter()
        .filter(move |&(_, since)| version >= since)
        .map(|(group, _)| group)
}

/// A parsed TEX container
///
/// The payload is kept opaque; its meaning depends on `format`.
#[derive(Debug, Clone, PartialEq)]
pub struct TexContainer {
    pub version: i32,
    pub internal_path: String,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub uv_rects: Vec<Rect>,
    pub payload: Vec<u8>,
}

impl TexContainer {
    /// Container for an encoded image payload, labeled ARGB32
    ///
    /// The version is the lowest one that can hold the rects: 1011 when
    /// `uv_rects` is non-empty, otherwise 1010 so older readers still load it.
    pub fn argb32(width: u32, height: u32, payload: Vec<u8>, uv_rects: Vec<Rect>) -> Self {
        Self {
            version: Self::version_for(&uv_rects),
            internal_path: String::new(),
            width,
            height,
            format: PixelFormat::Argb32,
            uv_rects,
            payload,
        }
    }

    /// Version to write for a container carrying `uv_rects`
    pub fn version_for(uv_rects: &[Rect]) -> i32 {
        if uv_rects.is_empty() {
            VERSION_DIMENSIONS
        } else {
            VERSION_UV_RECTS
        }
    }

    /// Whether the header stores width, height and format explicitly
    pub fn has_explicit_dimensions(&self) -> bool {
        self.version >= VERSION_DIMENSIONS
    }

    /// Parse a complete container
    ///
    /// # Errors
    /// * [`TexError::InvalidContainer`] - the tag is missing or wrong
    /// * [`TexError::UnsupportedFormat`] - the format code is unknown
    /// * [`TexError::TruncatedData`] - a declared size runs past the data
    /// * [`TexError::InvalidHeader`] - a size or count is negative or zero
    pub fn decode(data: &[u8]) -> Result<Self, TexError> {
        let mut cursor = Cursor::new(data);

        let tag = read_string(&mut cursor, "tag").ok();
        if tag.as_deref() != Some(TEX_TAG) {
            return Err(TexError::InvalidContainer {
                expected: TEX_TAG,
                found: tag.unwrap_or_default().chars().take(32).collect(),
            });
        }

        let version = read_i32(&mut cursor, "version")?;
        let internal_path = read_string(&mut cursor, "internal path")?;

        let mut uv_rects = Vec::new();
        let mut dimensions = None;

        for group in field_groups(version) {
            match group {
                FieldGroup::UvRects => uv_rects = read_rects(&mut cursor)?,
                FieldGroup::Dimensions => {
                    let width = read_dimension(&mut cursor, "width")?;
                    let height = read_dimension(&mut cursor, "height")?;
                    let format = PixelFormat::try_from(read_i32(&mut cursor, "format")?)?;
                    dimensions = Some((width, height, format));
                }
            }
        }

        let payload_size = read_i32(&mut cursor, "payload size")?;
        if payload_size < 0 {
            return Err(TexError::InvalidHeader {
                field: "payload size",
                value: i64::from(payload_size),
            });
        }
        let payload = read_bytes(&mut cursor, payload_size as usize, "payload")?;

        let trailing = remaining(&cursor);
        if trailing > 0 {
            tracing::debug!("Ignoring {} trailing bytes after TEX payload", trailing);
        }

        let (width, height, format) = match dimensions {
            Some(dimensions) => dimensions,
            None => {
                let (width, height) = legacy_dimensions(&payload)?;
                (width, height, PixelFormat::Argb32)
            }
        };

        Ok(Self {
            version,
            internal_path,
            width,
            height,
            format,
            uv_rects,
            payload,
        })
    }

    /// Serialize the container
    ///
    /// Only the field groups belonging to `version` are written; rects on a
    /// container below version 1011 are not stored.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.payload.len() + 64);

        write_string(&mut out, TEX_TAG);
        write_i32(&mut out, self.version);
        write_string(&mut out, &self.internal_path);

        for group in field_groups(self.version) {
            match group {
                FieldGroup::UvRects => write_rects(&mut out, &self.uv_rects),
                FieldGroup::Dimensions => {
                    write_i32(&mut out, self.width as i32);
                    write_i32(&mut out, self.height as i32);
                    write_i32(&mut out, self.format.code());
                }
            }
        }

        write_i32(&mut out, self.payload.len() as i32);
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Read a width/height field; must be positive
fn read_dimension(cursor: &mut Cursor<&[u8]>, field: &'static str) -> Result<u32, TexError> {
    let value = read_i32(cursor, field)?;
    if value <= 0 {
        return Err(TexError::InvalidHeader {
            field,
            value: i64::from(value),
        });
    }
    Ok(value as u32)
}

/// Width and height of a legacy payload, read from fixed PNG IHDR offsets
///
/// The payload is not checked for being a PNG.
pub fn legacy_dimensions(payload: &[u8]) -> Result<(u32, u32), TexError> {
    let end = LEGACY_HEIGHT_OFFSET + 4;
    if payload.len() < end {
        return Err(TexError::TruncatedData {
            context: "legacy PNG header",
            needed: end,
            available: payload.len(),
        });
    }

    let be_u32 = |offset: usize| {
        u32::from_be_bytes([
            payload[offset],
            payload[offset + 1],
            payload[offset + 2],
            payload[offset + 3],
        ])
    };

    Ok((be_u32(LEGACY_WIDTH_OFFSET), be_u32(LEGACY_HEIGHT_OFFSET)))
}
