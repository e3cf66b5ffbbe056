//! Standard raster image decoding and PNG encoding
//!
//! Thin adapter over the `image` crate. The interesting part is the error
//! mapping: "this is not an image we recognize" and "the decoder hit its
//! limits" are kept apart so callers can skip the former and fail the latter.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, ImageFormat, ImageReader};

/// A decoded picture: tightly packed RGBA8, row-major, top-left origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wrap a pixel buffer. Returns `None` unless it holds exactly
    /// `width × height × 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Errors from the image adapter
#[derive(Debug, thiserror::Error)]
pub enum ImageCodecError {
    /// Not a format we can decode, or corrupt data
    #[error("unrecognized image data: {0}")]
    UnsupportedImage(String),

    /// Decoder limits exceeded (dimensions or allocation)
    #[error("image decoder limits exceeded: {0}")]
    ResourceExhausted(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("image I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ImageError> for ImageCodecError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::Unsupported(e) => ImageCodecError::UnsupportedImage(e.to_string()),
            ImageError::Decoding(e) => ImageCodecError::UnsupportedImage(e.to_string()),
            ImageError::Limits(e) => ImageCodecError::ResourceExhausted(e.to_string()),
            ImageError::Encoding(e) => ImageCodecError::Encode(e.to_string()),
            ImageError::Parameter(e) => ImageCodecError::Encode(e.to_string()),
            ImageError::IoError(e) => ImageCodecError::Io(e),
        }
    }
}

/// Classify a decoder error for in-memory input
fn decode_error(err: ImageError) -> ImageCodecError {
    match err {
        ImageError::IoError(e) => ImageCodecError::UnsupportedImage(e.to_string()),
        other => other.into(),
    }
}

/// Decode any supported raster format to RGBA8
///
/// The format is sniffed from the data; `hint` (usually derived from the file
/// extension) is used only when sniffing finds nothing, e.g. for TGA.
///
/// Reads come from memory, so an I/O error here means the data ended early or
/// is malformed, and is reported as [`ImageCodecError::UnsupportedImage`].
pub fn decode(bytes: &[u8], hint: Option<ImageFormat>) -> Result<DecodedImage, ImageCodecError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageCodecError::UnsupportedImage(e.to_string()))?;
    if let (None, Some(format)) = (reader.format(), hint) {
        reader.set_format(format);
    }

    let rgba = reader.decode().map_err(decode_error)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!("Decoded {}x{} image", width, height);

    DecodedImage::new(width, height, rgba.into_raw()).ok_or_else(|| {
        ImageCodecError::UnsupportedImage("decoder returned a short pixel buffer".to_string())
    })
}

/// Encode as PNG (8-bit RGBA)
pub fn encode_png(image: &DecodedImage) -> Result<Vec<u8>, ImageCodecError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        image.pixels(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out)
}

/// Format hint for a file extension, if `image` knows it
pub fn format_hint(extension: &str) -> Option<ImageFormat> {
    ImageFormat::from_extension(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, 255 - v, (x * 16) as u8, 200]);
            }
        }
        DecodedImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_new_validates_length() {
        assert!(DecodedImage::new(2, 2, vec![0; 16]).is_some());
        assert!(DecodedImage::new(2, 2, vec![0; 15]).is_none());
        assert!(DecodedImage::new(2, 2, vec![0; 17]).is_none());
    }

    #[test]
    fn test_png_roundtrip_is_lossless() {
        let image = checker(7, 5);
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode(&png, None).unwrap(), image);
    }

    #[test]
    fn test_garbage_is_unsupported() {
        let err = decode(b"definitely not an image", None).unwrap_err();
        assert!(matches!(err, ImageCodecError::UnsupportedImage(_)));
    }

    #[test]
    fn test_truncated_png_is_unsupported() {
        let png = encode_png(&checker(16, 16)).unwrap();
        for cut in [40, 60, png.len() / 2] {
            let err = decode(&png[..cut], None).unwrap_err();
            assert!(
                matches!(err, ImageCodecError::UnsupportedImage(_)),
                "cut at {}: {:?}",
                cut,
                err
            );
        }
    }

    #[test]
    fn test_non_png_with_png_hint_is_unsupported() {
        for bytes in [&b"x"[..], &b"plain text pretending to be a picture"[..]] {
            let err = decode(bytes, Some(ImageFormat::Png)).unwrap_err();
            assert!(matches!(err, ImageCodecError::UnsupportedImage(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_hint_used_when_sniffing_fails() {
        let mut bmp = Vec::new();
        image::RgbaImage::from_raw(2, 2, vec![10; 16])
            .unwrap()
            .write_to(&mut Cursor::new(&mut bmp), ImageFormat::Bmp)
            .unwrap();
        // BMP is sniffable, so a wrong hint must not override it
        let decoded = decode(&bmp, Some(ImageFormat::Png)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 2));
    }

    #[test]
    fn test_format_hint() {
        assert_eq!(format_hint("png"), Some(ImageFormat::Png));
        assert_eq!(format_hint("TGA"), Some(ImageFormat::Tga));
        assert_eq!(format_hint("tex"), None);
    }
}
