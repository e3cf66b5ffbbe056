//! Pixel format codes stored in the TEX header

use std::fmt;

use crate::error::TexError;

/// Pixel format of a TEX payload
///
/// The set is closed. Codes outside it are rejected with
/// [`TexError::UnsupportedFormat`], never mapped to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PixelFormat {
    /// Payload is a standard image encoding labeled as 24-bit RGB
    Rgb24 = 3,
    /// Payload is a standard image encoding (PNG); the only format ever written
    Argb32 = 5,
    /// Raw BC1 blocks, 8 bytes per 4×4 block
    Dxt1 = 10,
    /// Raw BC3 blocks, 16 bytes per 4×4 block (explicit alpha block)
    Dxt5 = 12,
}

impl PixelFormat {
    /// Every supported format, in code order
    pub const ALL: [PixelFormat; 4] = [
        PixelFormat::Rgb24,
        PixelFormat::Argb32,
        PixelFormat::Dxt1,
        PixelFormat::Dxt5,
    ];

    /// On-disk format code
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Look up a format by its on-disk code
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            3 => Some(PixelFormat::Rgb24),
            5 => Some(PixelFormat::Argb32),
            10 => Some(PixelFormat::Dxt1),
            12 => Some(PixelFormat::Dxt5),
            _ => None,
        }
    }

    /// Whether the payload holds raw compressed blocks rather than an image file
    pub const fn is_block_compressed(self) -> bool {
        matches!(self, PixelFormat::Dxt1 | PixelFormat::Dxt5)
    }

    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgb24 => "RGB24",
            PixelFormat::Argb32 => "ARGB32",
            PixelFormat::Dxt1 => "DXT1",
            PixelFormat::Dxt5 => "DXT5",
        }
    }
}

impl TryFrom<i32> for PixelFormat {
    type Error = TexError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        PixelFormat::from_code(code).ok_or(TexError::UnsupportedFormat(code))
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(PixelFormat::Rgb24.code(), 3);
        assert_eq!(PixelFormat::Argb32.code(), 5);
        assert_eq!(PixelFormat::Dxt1.code(), 10);
        assert_eq!(PixelFormat::Dxt5.code(), 12);
    }

    #[test]
    fn test_code_roundtrip() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::try_from(format.code()), Ok(format));
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [0, 1, 4, 7, 11, 13, 25, -5, i32::MAX] {
            assert_eq!(
                PixelFormat::try_from(code),
                Err(TexError::UnsupportedFormat(code))
            );
        }
    }

    #[test]
    fn test_block_compressed() {
        assert!(!PixelFormat::Rgb24.is_block_compressed());
        assert!(!PixelFormat::Argb32.is_block_compressed());
        assert!(PixelFormat::Dxt1.is_block_compressed());
        assert!(PixelFormat::Dxt5.is_block_compressed());
    }

    #[test]
    fn test_display() {
        assert_eq!(PixelFormat::Dxt5.to_string(), "DXT5 (12)");
    }
}
