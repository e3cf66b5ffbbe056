//! Configuration (`config.toml` in the platform config directory)
//!
//! Every field has a default, so a missing file or a partial one is fine.
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tex_common::fs::DEFAULT_MAX_INPUT_BYTES;

/// Name of the configuration file inside [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Conversion settings
    #[serde(default)]
    pub convert: ConvertConfig,
}

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Replace existing outputs instead of picking a numbered name (default: false)
    #[serde(default)]
    pub overwrite: bool,
    /// Directory for all outputs (default: next to each input)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Read and write `.uv.csv` sidecars (default: true)
    #[serde(default = "default_true")]
    pub uv_sidecars: bool,
    /// Largest input file read into memory, in bytes (default: 256 MiB)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,
}

fn default_true() -> bool {
    true
}
fn default_max_input_bytes() -> u64 {
    DEFAULT_MAX_INPUT_BYTES
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            overwrite: false,
            output_dir: None,
            uv_sidecars: default_true(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\textool\config`
/// On macOS: `~/Library/Application Support/textool`
/// On Linux: `~/.config/textool`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "textool").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Parse configuration text.
pub fn parse(content: &str) -> Result<Config> {
    toml::from_str(content).context("Failed to parse configuration")
}

/// Load an explicitly named configuration file.
///
/// Unlike [`load`], a missing or malformed file is an error.
pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse(&content).with_context(|| format!("Invalid config: {}", path.display()))
}

/// Loads the configuration from the platform config directory.
///
/// Returns defaults if the file doesn't exist. A file that exists but
/// cannot be parsed is reported and ignored.
pub fn load() -> Config {
    let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring config: {:#}", e);
            Config::default()
        }
    }
}
