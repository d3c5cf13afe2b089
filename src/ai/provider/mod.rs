//! Generation Provider Abstraction
//!
//! Defines the `LlmProvider` trait for the single structured generation
//! call. Providers return the raw response text (or its absence) together
//! with usage metrics; deciding whether that text is a usable result
//! belongs to the validation layer.

mod gemini;

pub use gemini::GeminiProvider;

// Re-export error types from centralized location
pub use crate::types::{ErrorCategory, ErrorClassifier, LlmError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::ai::prompt::GenerationPayload;
use crate::constants::generation;
use crate::types::Result;

// =============================================================================
// Raw Response with Usage Metrics
// =============================================================================

/// Raw provider response: the returned text (if any) plus usage metrics.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response text, `None` when the service produced nothing
    pub text: Option<String>,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
    /// Provider and model info
    pub metadata: ResponseMetadata,
}

impl RawResponse {
    /// Create response with text only (usage unknown)
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }

    /// Create an empty response (service returned no text)
    pub fn empty() -> Self {
        Self {
            text: None,
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
            metadata: ResponseMetadata::default(),
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: std::time::Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Default)]
pub struct ResponseMetadata {
    /// Model used
    pub model: String,
    /// Provider name
    pub provider: String,
}

/// Shared provider handle for the session layer.
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for generation providers
///
/// Note: API keys are handled securely - they are never serialized to output
/// and are redacted in debug output. The provider converts the key to
/// SecretString internally for runtime protection.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type: "gemini"
    pub provider: String,
    /// Model name (provider-specific)
    pub model: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Temperature for generation (0.0 = deterministic, higher = creative)
    pub temperature: f32,
    /// API key, never serialized to output for security
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL (for custom endpoints)
    #[serde(default)]
    pub api_base: Option<String>,
    /// Maximum tokens the model may emit
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: usize,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

fn default_max_output_tokens() -> usize {
    generation::DEFAULT_MAX_OUTPUT_TOKENS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            timeout_secs: generation::DEFAULT_TIMEOUT_SECS,
            temperature: generation::DEFAULT_TEMPERATURE,
            api_key: None,
            api_base: None,
            max_output_tokens: generation::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Provider trait for the single structured generation call.
///
/// One payload in, raw text (or absence) out. Exactly one attempt: retry
/// policy is deliberately absent, the user resubmits manually.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Perform the generation call for the given payload.
    async fn generate(&self, payload: &GenerationPayload) -> Result<RawResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiProvider::new(config.clone())?)),
        _ => Err(crate::types::VerseError::Config(format!(
            "Unknown provider: {}. Supported: gemini",
            config.provider
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }

    #[test]
    fn test_provider_config_debug_redacts_key() {
        let config = ProviderConfig {
            api_key: Some("super-secret".to_string()),
            ..ProviderConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let config = ProviderConfig {
            provider: "mystery".to_string(),
            api_key: Some("k".to_string()),
            ..ProviderConfig::default()
        };
        assert!(create_provider(&config).is_err());
    }
}
