//! Bounded file reading

use std::path::{Path, PathBuf};

/// Default cap on input files read into memory.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 256 * 1024 * 1024; // 256 MiB

/// Why an input file could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("file too large: {} ({len} bytes, max {max} bytes)", .path.display())]
    TooLarge { path: PathBuf, len: u64, max: u64 },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a whole file, refusing anything over `max_bytes`.
///
/// The size is checked from metadata before any byte is read.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>, ReadError> {
    let io_error = |source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let len = std::fs::metadata(path).map_err(io_error)?.len();
    if len > max_bytes {
        return Err(ReadError::TooLarge {
            path: path.to_path_buf(),
            len,
            max: max_bytes,
        });
    }
    std::fs::read(path).map_err(io_error)
}
