//! Per-file conversion errors

use std::fmt;
use std::path::PathBuf;

use tex_common::TexError;
use tex_common::fs::ReadError;

use crate::image_codec::ImageCodecError;

/// Flat error classification used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidContainer,
    UnsupportedFormat,
    UnsupportedImage,
    TruncatedData,
    InvalidHeader,
    ResourceExhausted,
    Decompression,
    Encode,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidContainer => "invalid container",
            ErrorKind::UnsupportedFormat => "unsupported format",
            ErrorKind::UnsupportedImage => "unsupported image",
            ErrorKind::TruncatedData => "truncated data",
            ErrorKind::InvalidHeader => "invalid header",
            ErrorKind::ResourceExhausted => "resource exhausted",
            ErrorKind::Decompression => "decompression",
            ErrorKind::Encode => "encode",
            ErrorKind::Io => "I/O",
        };
        f.write_str(name)
    }
}

/// Anything that can go wrong converting one file
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Tex(#[from] TexError),

    #[error(transparent)]
    Image(#[from] ImageCodecError),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the input failed (missing, unreadable or over the size cap)
    #[error(transparent)]
    Read(#[from] ReadError),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Tex(e) => match e {
                TexError::InvalidContainer { .. } => ErrorKind::InvalidContainer,
                TexError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
                TexError::TruncatedData { .. } => ErrorKind::TruncatedData,
                TexError::InvalidHeader { .. } => ErrorKind::InvalidHeader,
                TexError::Decompression(_) => ErrorKind::Decompression,
            },
            ConvertError::Image(e) => match e {
                ImageCodecError::UnsupportedImage(_) => ErrorKind::UnsupportedImage,
                ImageCodecError::ResourceExhausted(_) => ErrorKind::ResourceExhausted,
                ImageCodecError::Encode(_) => ErrorKind::Encode,
                ImageCodecError::Io(_) => ErrorKind::Io,
            },
            ConvertError::Io { .. } | ConvertError::Read(_) => ErrorKind::Io,
        }
    }

    /// Inputs that are simply not ours to convert; reported, not counted as failures
    pub fn is_skip(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidContainer | ErrorKind::UnsupportedImage
        )
    }
}
