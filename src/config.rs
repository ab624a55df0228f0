//! Configuration management and validation.
//!
//! Provides the extractor configuration: where curve files are stored,
//! whether the source file is removed, and buffered I/O sizes. Configuration
//! can be loaded from a TOML file; anything missing falls back to defaults.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CURVE_FILE_EXTENSION, DEFAULT_READ_BUFFER_SIZE,
    DEFAULT_WRITE_BUFFER_SIZE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration for LAS extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Root directory under which curve files are placed
    pub storage_root: PathBuf,

    /// Delete the input file once it has been consumed
    pub remove_source: bool,

    /// Buffered reader capacity in bytes
    pub read_buffer_size: usize,

    /// Buffered writer capacity per curve file in bytes
    pub write_buffer_size: usize,

    /// Extension of curve data files (without the dot)
    pub curve_file_extension: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            storage_root: default_storage_root(),
            remove_source: true,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
            curve_file_extension: DEFAULT_CURVE_FILE_EXTENSION.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: ExtractorConfig = toml::from_str(&content)?;
        debug!("Loaded configuration from {}", path.display());

        config.validate()?;
        Ok(config)
    }

    /// Platform config file location, if the platform has a config directory
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.curve_file_extension.trim().is_empty() {
            return Err(Error::configuration("curve_file_extension must not be empty"));
        }

        if self.curve_file_extension.contains(['/', '\\', '.']) {
            return Err(Error::configuration(format!(
                "curve_file_extension must be a bare extension, got '{}'",
                self.curve_file_extension
            )));
        }

        if self.read_buffer_size == 0 || self.write_buffer_size == 0 {
            return Err(Error::configuration("buffer sizes must be greater than zero"));
        }

        if self.storage_root.as_os_str().is_empty() {
            return Err(Error::configuration("storage_root must not be empty"));
        }

        Ok(())
    }

    /// Set the storage root
    pub fn with_storage_root(mut self, storage_root: impl Into<PathBuf>) -> Self {
        self.storage_root = storage_root.into();
        self
    }

    /// Keep the input file after extraction
    pub fn with_keep_source(mut self) -> Self {
        self.remove_source = false;
        self
    }

    /// Set the curve file extension
    pub fn with_curve_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.curve_file_extension = extension.into();
        self
    }

    /// Set the per-curve write buffer size
    pub fn with_write_buffer_size(mut self, size: usize) -> Self {
        self.write_buffer_size = size;
        self
    }

    /// File name of a curve's data file
    pub fn curve_file_name(&self, curve_name: &str) -> String {
        format!("{}.{}", curve_name, self.curve_file_extension)
    }
}

fn default_storage_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./data"))
}
