//! DXT1/DXT5 block decompression and pixel normalization
//!
//! Decompression goes through `texture2ddecoder`, which emits one `u32` per
//! texel packed as `0xAARRGGBB`. Written out little-endian that is B, G, R, A,
//! and rows come out in block order with the first row at the bottom of the
//! picture. [`normalize`] fixes both so the result is top-left origin RGBA8.

use tex_common::{PixelFormat, TexError};

/// Compressed block layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// DXT1: 8 bytes per 4×4 block
    Bc1,
    /// DXT5: 16 bytes per 4×4 block (8 bytes alpha + 8 bytes color)
    Bc3,
}

impl BlockKind {
    /// Block kind for a block-compressed pixel format
    pub const fn for_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::Dxt1 => Some(BlockKind::Bc1),
            PixelFormat::Dxt5 => Some(BlockKind::Bc3),
            PixelFormat::Rgb24 | PixelFormat::Argb32 => None,
        }
    }

    /// Bytes per 4×4 block
    pub const fn block_size(self) -> usize {
        match self {
            BlockKind::Bc1 => 8,
            BlockKind::Bc3 => 16,
        }
    }

    /// Bytes of compressed data needed for a `width`×`height` texture
    pub fn compressed_len(self, width: u32, height: u32) -> usize {
        let blocks_x = (width as usize).div_ceil(4);
        let blocks_y = (height as usize).div_ceil(4);
        blocks_x * blocks_y * self.block_size()
    }
}

/// Decompress raw blocks into `width × height × 4` bytes
///
/// The output is the decoder's native texel order (little-endian BGRA words,
/// block row order). Edge blocks are clipped to the texture size.
pub fn decompress(
    data: &[u8],
    width: u32,
    height: u32,
    kind: BlockKind,
) -> Result<Vec<u8>, TexError> {
    let needed = kind.compressed_len(width, height);
    if data.len() < needed {
        return Err(TexError::TruncatedData {
            context: "compressed blocks",
            needed,
            available: data.len(),
        });
    }

    let w = width as usize;
    let h = height as usize;
    let mut texels = vec![0u32; w * h];

    let result = match kind {
        BlockKind::Bc1 => texture2ddecoder::decode_bc1(data, w, h, &mut texels),
        BlockKind::Bc3 => texture2ddecoder::decode_bc3(data, w, h, &mut texels),
    };
    result.map_err(|e| TexError::Decompression(format!("{:?}: {}", kind, e)))?;

    Ok(texels.iter().flat_map(|texel| texel.to_le_bytes()).collect())
}

/// Swap byte 0 and byte 2 of every 4-byte pixel (BGRA ↔ RGBA)
pub fn swap_red_blue(pixels: &mut [u8]) {
    for pixel in pixels.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
}

/// Reverse the row order of a tightly packed RGBA8 buffer
pub fn flip_vertical(pixels: &mut [u8], width: u32, height: u32) {
    let row_len = width as usize * 4;
    let rows = height as usize;
    if row_len == 0 || pixels.len() < row_len * rows {
        return;
    }

    for y in 0..rows / 2 {
        let (upper, lower) = pixels.split_at_mut((rows - 1 - y) * row_len);
        upper[y * row_len..(y + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
    }
}

/// Channel reorder, then vertical flip
pub fn normalize(pixels: &mut [u8], width: u32, height: u32) {
    swap_red_blue(pixels);
    flip_vertical(pixels, width, height);
}

/// Decompress and normalize in one step, yielding top-left origin RGBA8
pub fn decode(data: &[u8], width: u32, height: u32, kind: BlockKind) -> Result<Vec<u8>, TexError> {
    let mut pixels = decompress(data, width, height, kind)?;
    normalize(&mut pixels, width, height);
    Ok(pixels)
}
