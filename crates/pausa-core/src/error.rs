//! Core error types for pausa-core.
//!
//! Errors are split by store so the CLI can tell recoverable read paths
//! (missing files are absent data) from fatal append failures.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pausa-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// History log errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Preset store errors
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// History-log-specific errors.
///
/// Append failures are fatal by policy: the caller propagates them and the
/// process terminates rather than silently losing a completed session.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// Failed to append a record to the log
    #[error("Failed to append to history log at {path}: {source}")]
    AppendFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the log (other than the file being absent)
    #[error("Failed to read history log at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Preset-store-specific errors.
#[derive(Error, Debug)]
pub enum PresetError {
    /// Failed to rewrite the store file
    #[error("Failed to save presets to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to serialize the preset sequence
    #[error("Failed to serialize presets: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown or unsettable configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse a configuration value
    #[error("Failed to parse configuration value: {0}")]
    ParseFailed(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
