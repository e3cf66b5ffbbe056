//! Shared types and utilities for the TEX texture container
//!
//! This crate holds everything that only depends on the container bytes, and
//! is used by `tex-tool` (converter library and `textool` binary).
//!
//! # Modules
//!
//! - [`formats`] - TEX container header codec, pixel formats, UV rects
//! - [`error`] - [`TexError`], the container error taxonomy
//! - [`fs`] - bounded file reading

pub mod error;
pub mod formats;
pub mod fs;
mod io;

pub use error::TexError;

// Re-export commonly used format items
pub use formats::{
    LEGACY_HEIGHT_OFFSET, LEGACY_WIDTH_OFFSET, PixelFormat, Rect, TEX_EXTENSION, TEX_TAG,
    TexContainer, UV_SIDECAR_SUFFIX, VERSION_DIMENSIONS, VERSION_LEGACY, VERSION_UV_RECTS,
    format_sidecar, is_sidecar_path, parse_sidecar, sidecar_path,
};
