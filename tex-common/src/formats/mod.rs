//! TEX container formats
//!
//! - [`tex`] - the versioned container header and payload framing
//! - [`pixel_format`] - the closed set of payload pixel formats
//! - [`uv_rects`] - atlas rects, embedded and as sidecar text

pub mod pixel_format;
pub mod tex;
pub mod uv_rects;

pub use pixel_format::PixelFormat;
pub use tex::*;
pub use uv_rects::{
    RECT_SIZE, Rect, UV_SIDECAR_SUFFIX, format_sidecar, is_sidecar_path, parse_sidecar,
    sidecar_path,
};
