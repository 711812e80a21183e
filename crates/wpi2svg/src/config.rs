//! Converter configuration (TOML).
//!
//! ```toml
//! header_len = 2059
//! render_partial = true
//! log_level = "warn"
//! ```
//!
//! Every key is optional. Rendering constants are fixed and cannot be set.

use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;

/// Converter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bytes skipped before the block stream starts.
    pub header_len: u64,

    /// Render whatever was decoded when the block stream is cut short.
    pub render_partial: bool,

    /// Base log level, before `RUST_LOG` and `-v`.
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            header_len: wpi::HEADER_LEN,
            render_partial: true,
            log_level: LogLevel::default(),
        }
    }
}

/// Log level names accepted in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Config {
    /// Load a config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::from_str(&content, path)
    }

    /// Parse a config from a string.
    pub fn from_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }
}
