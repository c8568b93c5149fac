//! Configuration for the Extractor
//!
//! Deserializable so a host can embed it in its own config file.

use minutes_domain::traits::GenerationParams;
use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: f32,

    /// Completion length cap
    pub max_tokens: u32,
}

impl ExtractorConfig {
    /// Generation parameters for one completion call
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0 (got {})",
                self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.max_tokens, 1024);
    }

    #[test]
    fn test_invalid_temperature() {
        let config = ExtractorConfig {
            temperature: 2.5,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ExtractorConfig {
            temperature: -0.1,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_max_tokens() {
        let config = ExtractorConfig {
            max_tokens: 0,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_params_follow_config() {
        let config = ExtractorConfig {
            temperature: 0.0,
            max_tokens: 300,
        };
        let params = config.params();
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.max_tokens, 300);
    }
}
