//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How oversized text is cut into fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentStrategy {
    /// Pack blank-line separated blocks
    ByParagraph,
    /// Pack individual lines
    #[default]
    ByLine,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum fragment size (characters) for fragmented extraction
    pub max_fragment_size: usize,

    /// Fragment splitting strategy
    pub fragment_strategy: FragmentStrategy,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if self.max_fragment_size == 0 {
            return Err(ExtractorError::Config(
                "max_fragment_size must be greater than 0".to_string(),
            ));
        }
        if self.max_fragment_size > self.max_text_length {
            return Err(ExtractorError::Config(
                "max_fragment_size cannot exceed max_text_length".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractorError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ExtractorError::Config(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 500_000,
            max_fragment_size: 4_000,
            fragment_strategy: FragmentStrategy::ByLine,
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
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_fragment_size_too_large() {
        let mut config = ExtractorConfig::default();
        config.max_fragment_size = config.max_text_length + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig {
            max_fragment_size: 1_000,
            fragment_strategy: FragmentStrategy::ByParagraph,
            ..Default::default()
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("max_fragment_size = 2000").unwrap();
        assert_eq!(parsed.max_fragment_size, 2_000);
        assert_eq!(parsed.max_text_length, 500_000);
        assert_eq!(parsed.fragment_strategy, FragmentStrategy::ByLine);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(ExtractorConfig::from_toml("max_fragment_size = 0").is_err());
        assert!(ExtractorConfig::from_toml("max_fragment_size = \"big\"").is_err());
    }
}
