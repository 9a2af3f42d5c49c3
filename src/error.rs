//! Error types

use thiserror::Error;

/// Errors surfaced by Guardian 360.
///
/// Resolution itself never fails; these cover argument parsing, configuration
/// and the outer surfaces (HTTP client construction, server I/O).
#[derive(Debug, Error)]
pub enum GuardianError {
    /// Value outside a closed domain (e.g. an unknown audience)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Matcher pattern could not be compiled
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for Guardian 360 operations
pub type Result<T> = std::result::Result<T, GuardianError>;
