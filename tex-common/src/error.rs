//! Error types for TEX container parsing

/// Errors raised while reading or writing a TEX container
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TexError {
    /// Leading tag is not `CM3D2_TEX` (or could not be read as a string at all)
    #[error("not a TEX container (expected tag {expected:?}, found {found:?})")]
    InvalidContainer {
        expected: &'static str,
        found: String,
    },

    /// Pixel format code outside the supported set
    #[error("unsupported pixel format code {0}")]
    UnsupportedFormat(i32),

    /// A declared size runs past the end of the available data
    #[error("truncated {context}: needs {needed} bytes, {available} available")]
    TruncatedData {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// A header field holds a value that cannot describe a texture
    #[error("invalid {field} in header: {value}")]
    InvalidHeader { field: &'static str, value: i64 },

    /// The block decoder rejected the compressed payload
    #[error("block decompression failed: {0}")]
    Decompression(String),
}

impl TexError {
    /// Shorthand for a read that ran out of bytes
    pub(crate) fn eof(context: &'static str, needed: usize, available: usize) -> Self {
        TexError::TruncatedData {
            context,
            needed,
            available,
        }
    }
}
