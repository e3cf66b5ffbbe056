//! tex-tool library
//!
//! Converts TEX texture containers to PNG images and images back to TEX.
//! The `textool` binary is a thin CLI over [`convert`].

pub mod config;
pub mod convert;
pub mod dxt;
pub mod error;
pub mod image_codec;
pub mod inputs;
pub mod output;
pub mod registry;

pub use convert::{
    BatchReport, ConvertOptions, Converted, Direction, Outcome, convert_batch, convert_file,
    inspect, process_file,
};
pub use error::{ConvertError, ErrorKind};
pub use image_codec::{DecodedImage, ImageCodecError};
pub use output::OutputNamer;
