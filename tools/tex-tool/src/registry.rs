//! Pixel format registry
//!
//! Closed table from [`PixelFormat`] to the routine that turns a payload into
//! pixels. Encoding has a single path: PNG, labeled ARGB32.

use tex_common::{PixelFormat, TexError};

use crate::dxt::{self, BlockKind};
use crate::error::ConvertError;
use crate::image_codec::{self, DecodedImage, ImageCodecError};

/// How a payload of a given format is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    /// Payload is a complete image file (PNG, JPEG, ...)
    ImageCodec,
    /// Payload is raw compressed blocks
    Dxt(BlockKind),
}

/// Registered handler for a format
pub const fn handler_for(format: PixelFormat) -> Handler {
    match format {
        PixelFormat::Rgb24 | PixelFormat::Argb32 => Handler::ImageCodec,
        PixelFormat::Dxt1 => Handler::Dxt(BlockKind::Bc1),
        PixelFormat::Dxt5 => Handler::Dxt(BlockKind::Bc3),
    }
}

/// Decode a payload declared with `format_code`
///
/// The code is checked again here, independently of the header reader.
pub fn decode(
    payload: &[u8],
    width: u32,
    height: u32,
    format_code: i32,
) -> Result<DecodedImage, ConvertError> {
    let format = PixelFormat::try_from(format_code)?;

    match handler_for(format) {
        Handler::ImageCodec => Ok(image_codec::decode(payload, None)?),
        Handler::Dxt(kind) => {
            let pixels = dxt::decode(payload, width, height, kind)?;
            DecodedImage::new(width, height, pixels).ok_or_else(|| {
                TexError::Decompression("decoded buffer does not match dimensions".to_string())
                    .into()
            })
        }
    }
}

/// Encode pixels for a new container: always ARGB32 with a PNG payload
pub fn encode(image: &DecodedImage) -> Result<(PixelFormat, Vec<u8>), ImageCodecError> {
    Ok((PixelFormat::Argb32, image_codec::encode_png(image)?))
}
