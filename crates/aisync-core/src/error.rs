//! Error types for aisync-core
//!
//! Only unknown-target selection and an unloadable core configuration are
//! fatal. Missing sources, malformed metadata, and skipped existing outputs
//! are recovered at the component where they occur and never surface here;
//! per-file write failures are captured in the run's `SyncReport` instead.

use aisync_fs::NormalizedPath;

/// Result type for aisync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in aisync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Core configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: NormalizedPath },

    /// Core configuration exists but cannot be parsed
    #[error("Failed to parse configuration at {path}: {message}")]
    ConfigParse { path: NormalizedPath, message: String },

    /// Requested target absent from the registry
    #[error("Unknown target: {name}")]
    UnknownTarget { name: String },

    /// Resource not found (template, command output spec)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Filesystem error from aisync-fs
    #[error(transparent)]
    Fs(#[from] aisync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
