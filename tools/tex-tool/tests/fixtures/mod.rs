//! Test asset generation for TEX conversion tests

#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tex_common::{PixelFormat, TexContainer, VERSION_LEGACY};

/// Offset of the format code in a version 1010 container with an empty path
///
/// tag (1 + 9) + version (4) + path (1) + width (4) + height (4)
pub const V1010_FORMAT_OFFSET: usize = 23;

/// Gradient with varying alpha, so channel or row mixups show up
pub fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 7) as u8,
            (255 - x * 3) as u8,
        ])
    })
}

pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("Failed to encode PNG");
    out
}

pub fn write_png(path: &Path, image: &RgbaImage) {
    image.save(path).expect("Failed to write PNG");
}

pub fn read_png(path: &Path) -> RgbaImage {
    image::open(path)
        .expect("Failed to open PNG")
        .into_rgba8()
}

/// Version 1010 container around a PNG payload
pub fn tex_v1010(image: &RgbaImage) -> Vec<u8> {
    TexContainer::argb32(image.width(), image.height(), png_bytes(image), vec![]).encode()
}

/// Version 1000 container: dimensions only inside the PNG
pub fn tex_v1000(image: &RgbaImage) -> Vec<u8> {
    TexContainer {
        version: VERSION_LEGACY,
        internal_path: "assets/texture/legacy.png".to_string(),
        width: image.width(),
        height: image.height(),
        format: PixelFormat::Argb32,
        uv_rects: vec![],
        payload: png_bytes(image),
    }
    .encode()
}

/// Container holding raw blocks
pub fn tex_blocks(width: u32, height: u32, format: PixelFormat, blocks: Vec<u8>) -> Vec<u8> {
    TexContainer {
        version: 1010,
        internal_path: String::new(),
        width,
        height,
        format,
        uv_rects: vec![],
        payload: blocks,
    }
    .encode()
}

/// 4×4 DXT1 block: top-left texel pure red, the rest pure blue
pub fn dxt1_red_corner() -> Vec<u8> {
    let mut block = Vec::with_capacity(8);
    block.extend_from_slice(&0xF800u16.to_le_bytes());
    block.extend_from_slice(&0x001Fu16.to_le_bytes());
    block.extend_from_slice(&[0x54, 0x55, 0x55, 0x55]);
    block
}

/// 4×4 DXT5 block: opaque alpha, top-left texel pure red, the rest pure blue
pub fn dxt5_red_corner() -> Vec<u8> {
    let mut block = vec![255, 255, 0, 0, 0, 0, 0, 0];
    block.extend_from_slice(&dxt1_red_corner());
    block
}

/// 4×4 DXT5 block: alpha endpoints 255 and 0, texels 0 and 3 of the first row
/// transparent, colors as in [`dxt1_red_corner`]
pub fn dxt5_alpha_corners() -> Vec<u8> {
    let mut block = vec![255, 0, 0x01, 0x02, 0, 0, 0, 0];
    block.extend_from_slice(&dxt1_red_corner());
    block
}
