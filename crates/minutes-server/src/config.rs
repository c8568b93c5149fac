//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, database path, the LLM
//! provider, and extraction limits.

use minutes_extractor::ExtractorConfig;
use minutes_llm::{ProviderConfig, ProviderKind};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range or empty
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    /// HTTP listener and storage
    #[serde(default)]
    pub server: ServerSection,

    /// LLM provider
    #[serde(default)]
    pub llm: ProviderConfig,

    /// Extraction parameters and request limits
    #[serde(default)]
    pub extraction: ExtractionSection,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    pub bind_port: u16,

    /// SQLite database file, or `:memory:`
    pub database_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 3000,
            database_path: "minutes.db".to_string(),
        }
    }
}

/// `[extraction]` section
///
/// `temperature` and `max_tokens` sit directly in the section and are
/// read into the embedded [`ExtractorConfig`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSection {
    /// Generation parameters for the extractor
    #[serde(flatten)]
    pub extractor: ExtractorConfig,

    /// Shortest accepted transcript, counted after trimming
    pub min_transcript_chars: usize,

    /// Transcripts returned by the history endpoint when no limit is given
    pub history_limit: usize,
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            min_transcript_chars: 10,
            history_limit: 5,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration for testing
    ///
    /// In-memory database and the mock provider, so nothing touches disk or
    /// the network.
    pub fn default_test_config() -> Self {
        ServerConfig {
            server: ServerSection {
                database_path: ":memory:".to_string(),
                ..ServerSection::default()
            },
            llm: ProviderConfig::for_provider(ProviderKind::Mock),
            extraction: ExtractionSection::default(),
        }
    }

    /// Check ranges and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.database_path.trim().is_empty() {
            return Err(ConfigError::Invalid("database_path cannot be empty".to_string()));
        }
        self.llm
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.extraction
            .extractor
            .validate()
            .map_err(ConfigError::Invalid)?;
        if self.extraction.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.bind_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.server.database_path, "minutes.db");
        assert_eq!(config.llm.provider, ProviderKind::Gemini);
        assert_eq!(config.extraction.min_transcript_chars, 10);
        assert_eq!(config.extraction.history_limit, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [server]
            bind_address = "0.0.0.0"
            bind_port = 8080
            database_path = "/var/lib/minutes/minutes.db"

            [llm]
            provider = "openai"
            model = "gpt-4o-mini"
            endpoint = "https://api.groq.com/openai/v1"
            api_key_env = "GROQ_API_KEY"

            [extraction]
            temperature = 0.2
            max_tokens = 2048
            history_limit = 10
        "#;

        let config = ServerConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.llm.provider, ProviderKind::OpenAi);
        assert_eq!(config.llm.api_key_env.as_deref(), Some("GROQ_API_KEY"));
        assert_eq!(config.extraction.extractor.max_tokens, 2048);
        assert_eq!(config.extraction.min_transcript_chars, 10);
        assert_eq!(config.extraction.extractor.temperature, 0.2);
    }

    #[test]
    fn test_partial_extraction_section_keeps_extractor_defaults() {
        let config = ServerConfig::from_toml_str("[extraction]
min_transcript_chars = 20").unwrap();
        assert_eq!(config.extraction.min_transcript_chars, 20);
        assert_eq!(config.extraction.extractor, ExtractorConfig::default());

        let config = ServerConfig::from_toml_str("[extraction]
max_tokens = 512").unwrap();
        assert_eq!(config.extraction.extractor.max_tokens, 512);
        assert_eq!(config.extraction.extractor.temperature, 0.1);
        assert_eq!(config.extraction.history_limit, 5);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.bind_port, 3000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ServerConfig::from_toml_str("[extraction]\ntemperature = 3.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_toml_str("[extraction]\nmax_tokens = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_toml_str("[llm]\nmodel = \"\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_toml_str("[llm]\nprovider = \"bard\""),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(matches!(
            ServerConfig::from_file("/nonexistent/minutes.toml"),
            Err(ConfigError::FileRead(_))
        ));
    }
}
