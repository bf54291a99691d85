//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Startup configuration failures. Any of these stops the server before it binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Raised for the classifier artifact, and for the embedder path unless the stub
    /// embedder was requested.
    #[error("missing required environment variable: {name}")]
    MissingEnvVar { name: &'static str },

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },

    #[error("{name} points to a path that does not exist: {path}")]
    PathNotFound { name: &'static str, path: PathBuf },

    #[error("{name} must be a file: {path}")]
    NotAFile { name: &'static str, path: PathBuf },

    #[error("{name} must be a directory: {path}")]
    NotADirectory { name: &'static str, path: PathBuf },
}
