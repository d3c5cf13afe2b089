//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/versecraft/) and project (.versecraft/)
//! level configuration.

use serde::{Deserialize, Serialize};

use crate::ai::provider::ProviderConfig;
use crate::constants::generation;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Generation model settings
    pub llm: LlmConfig,

    /// Access gate settings
    pub access: AccessConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            access: AccessConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `VerseError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(crate::types::VerseError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(crate::types::VerseError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_output_tokens == 0 {
            return Err(crate::types::VerseError::Config(
                "LLM max_output_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Provider configuration derived from the LLM section.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.llm.provider.clone(),
            model: Some(self.llm.model.clone()),
            timeout_secs: self.llm.timeout_secs,
            temperature: self.llm.temperature,
            api_key: self.llm.api_key.clone(),
            api_base: self.llm.api_base.clone(),
            max_output_tokens: self.llm.max_output_tokens,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider type: "gemini"
    pub provider: String,

    /// Model name
    pub model: String,

    /// Sampling temperature (moderately high favors creative variation)
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens the model may emit
    pub max_output_tokens: usize,

    /// API key, never serialized to output for security
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    pub api_base: Option<String>,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: generation::DEFAULT_MODEL.to_string(),
            temperature: generation::DEFAULT_TEMPERATURE,
            timeout_secs: generation::DEFAULT_TIMEOUT_SECS,
            max_output_tokens: generation::DEFAULT_MAX_OUTPUT_TOKENS,
            api_key: None,
            api_base: None,
        }
    }
}

// =============================================================================
// Access Gate Configuration
// =============================================================================

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Gate passphrase. Unset means the gate stands open.
    /// Never serialized to output for security.
    #[serde(skip_serializing)]
    pub passphrase: Option<String>,
}

impl std::fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessConfig")
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.provider, "gemini");
        assert!((config.llm.temperature - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let config = Config {
            llm: LlmConfig {
                temperature: 3.5,
                ..LlmConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            llm: LlmConfig {
                timeout_secs: 0,
                ..LlmConfig::default()
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_secrets_not_serialized() {
        let config = Config {
            llm: LlmConfig {
                api_key: Some("key-material".to_string()),
                ..LlmConfig::default()
            },
            access: AccessConfig {
                passphrase: Some("open sesame".to_string()),
            },
            ..Config::default()
        };

        let toml = toml::to_string(&config).unwrap();
        assert!(!toml.contains("key-material"));
        assert!(!toml.contains("open sesame"));
    }

    #[test]
    fn test_provider_config_carries_llm_section() {
        let config = Config::default();
        let provider = config.provider_config();
        assert_eq!(provider.provider, "gemini");
        assert_eq!(provider.model.as_deref(), Some(generation::DEFAULT_MODEL));
    }
}
