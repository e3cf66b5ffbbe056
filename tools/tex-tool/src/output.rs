//! Output naming
//!
//! Picks the path an artifact is written to. Unless overwriting is allowed,
//! an occupied name gets a numeric disambiguator: `face.png`, `face.1.png`,
//! `face.2.png`, ...

use std::path::{Path, PathBuf};

/// Resolves desired output paths to free ones
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputNamer {
    overwrite: bool,
}

impl OutputNamer {
    pub fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }

    /// Final path for an artifact that would like to live at `desired`
    ///
    /// A stem that already ends in a numeric suffix (`face.1`) is reduced to
    /// its base first, so repeated conversions never stack suffixes.
    pub fn resolve(&self, desired: &Path) -> PathBuf {
        if self.overwrite || !desired.exists() {
            return desired.to_path_buf();
        }

        let stem = desired
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = strip_numeric_suffix(&stem);
        let extension = desired
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let mut attempt: u32 = 1;
        loop {
            let candidate = desired.with_file_name(format!("{}.{}{}", base, attempt, extension));
            if !candidate.exists() {
                return candidate;
            }
            attempt += 1;
        }
    }
}

/// `face.3` → `face`; anything else unchanged
fn strip_numeric_suffix(stem: &str) -> &str {
    match stem.rsplit_once('.') {
        Some((base, suffix))
            if !base.is_empty()
                && !suffix.is_empty()
                && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            base
        }
        _ => stem,
    }
}
