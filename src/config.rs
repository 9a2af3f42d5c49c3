//! Configuration for Guardian 360
//!
//! Optional TOML file; every section and field has a default, so an empty
//! file (or no file) is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::MatchMode;
use crate::{GuardianError, Result, DEFAULT_QUOTE_ENDPOINT, DEFAULT_QUOTE_TIMEOUT_MS};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Quote provider configuration
    #[serde(default)]
    pub quote: QuoteConfig,

    /// Matching behavior
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardianConfig {
    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GuardianError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load from a file if given, otherwise defaults
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: GuardianConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.quote.timeout_ms == 0 {
            return Err(GuardianError::Config(
                "quote.timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.quote.endpoint.trim().is_empty() {
            return Err(GuardianError::Config("quote.endpoint is empty".to_string()));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { addr: default_addr() }
    }
}

/// Quote provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    /// Provider URL
    #[serde(default = "default_quote_endpoint")]
    pub endpoint: String,

    /// Ceiling on one fetch, in milliseconds
    #[serde(default = "default_quote_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_quote_endpoint(),
            timeout_ms: default_quote_timeout_ms(),
        }
    }
}

/// Matching behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// `substring` (default) or `word_boundary`
    #[serde(default)]
    pub match_mode: MatchMode,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_quote_endpoint() -> String {
    DEFAULT_QUOTE_ENDPOINT.to_string()
}

fn default_quote_timeout_ms() -> u64 {
    DEFAULT_QUOTE_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(GuardianConfig::from_toml("").unwrap(), GuardianConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = GuardianConfig::from_toml(
            r#"
            [quote]
            timeout_ms = 1500

            [resolver]
            match_mode = "word_boundary"
            "#,
        )
        .unwrap();
        assert_eq!(config.quote.timeout_ms, 1500);
        assert_eq!(config.quote.endpoint, DEFAULT_QUOTE_ENDPOINT);
        assert_eq!(config.resolver.match_mode, MatchMode::WordBoundary);
        assert_eq!(config.server.addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = GuardianConfig::from_toml("[quote]\ntimeout_ms = 0\n").unwrap_err();
        assert!(matches!(err, GuardianError::Config(_)));
    }

    #[test]
    fn test_bad_toml_is_toml_error() {
        let err = GuardianConfig::from_toml("[quote\n").unwrap_err();
        assert!(matches!(err, GuardianError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = GuardianConfig::load("/nonexistent/guardian.toml").unwrap_err();
        assert!(matches!(err, GuardianError::Config(_)));
    }
}
