//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//! Every generation failure keeps its distinct internal kind for logging
//! and test assertions, while `user_message()` collapses all of them into
//! the single generic string shown to the user.
//!
//! ## Failure Taxonomy
//!
//! - **InputInvalid**: required field blank, submission never leaves the client
//! - **EmptyResponse**: the service returned no text
//! - **MalformedResponse**: text returned but not parseable as JSON
//! - **InvalidShape**: parsed but missing the required songs collection
//! - **Llm / LlmApi**: transport or service-level rejection
//!
//! No panic/unwrap - all errors are recoverable and return the caller to a
//! resubmittable state.

use thiserror::Error;

use crate::constants::messages;

// =============================================================================
// Error Categories
// =============================================================================

/// Transport error categories for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted
    RateLimit,
    /// Authentication failed
    Auth,
    /// Network/connectivity issues
    Network,
    /// Service unavailable
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Transport-level LLM error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category for diagnostics
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    /// Create a new LLM error
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    /// Create error with provider context
    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Error classifier for transport failures
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from a provider
    pub fn classify(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
        {
            return LlmError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("unauthorized")
            || lower.contains("permission denied")
        {
            return LlmError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return LlmError::with_provider(ErrorCategory::Network, message, provider);
        }

        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("service unavailable")
            || lower.contains("500")
            || lower.contains("internal error")
        {
            return LlmError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        if lower.contains("400") || lower.contains("bad request") || lower.contains("invalid") {
            return LlmError::with_provider(ErrorCategory::BadRequest, message, provider);
        }

        if lower.contains("temporary") || lower.contains("overloaded") {
            return LlmError::with_provider(ErrorCategory::Transient, message, provider);
        }

        LlmError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 => LlmError::with_provider(ErrorCategory::BadRequest, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
            }
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum VerseError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Submission Errors
    // -------------------------------------------------------------------------
    /// Required input field blank or whitespace-only.
    /// Blocked before any network interaction; submission is inert.
    #[error("Required field '{field}' is empty")]
    InputInvalid { field: &'static str },

    /// Service returned no text at all
    #[error("Generation service returned an empty response")]
    EmptyResponse,

    /// Text returned but not parseable as structured data
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Parsed, but the required songs collection is missing
    #[error("Invalid response shape: {0}")]
    InvalidShape(String),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Structured transport error with category
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// Simple LLM API error (use Llm variant for structured errors)
    #[error("LLM API error: {0}")]
    LlmApi(String),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Access denied")]
    GateDenied,
}

impl From<LlmError> for VerseError {
    fn from(err: LlmError) -> Self {
        VerseError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, VerseError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl VerseError {
    /// Create an LLM error from message (convenience wrapper)
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(LlmError::new(ErrorCategory::Unknown, message))
    }

    /// True for the four network/parse kinds that occur after submission
    /// leaves the client (everything collapsed into one user message).
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::EmptyResponse
                | Self::MalformedResponse(_)
                | Self::InvalidShape(_)
                | Self::Llm(_)
                | Self::LlmApi(_)
        )
    }

    /// The string shown to the end user. Generation failures collapse into
    /// one generic message; the distinct kinds survive only in logs.
    pub fn user_message(&self) -> String {
        match self {
            e if e.is_generation_failure() => messages::GENERATION_FAILED.to_string(),
            Self::GateDenied => messages::ACCESS_DENIED.to_string(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
        assert_eq!(ErrorCategory::Network.to_string(), "NETWORK");
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = ErrorClassifier::classify("Rate limit exceeded, please retry", "gemini");
        assert_eq!(err.category, ErrorCategory::RateLimit);
    }

    #[test]
    fn test_classify_auth() {
        let err = ErrorClassifier::classify("Invalid API key provided", "gemini");
        assert_eq!(err.category, ErrorCategory::Auth);
    }

    #[test]
    fn test_classify_network() {
        let err = ErrorClassifier::classify("Connection timed out after 30s", "gemini");
        assert_eq!(err.category, ErrorCategory::Network);
    }

    #[test]
    fn test_classify_http_status() {
        let rate_limit = ErrorClassifier::classify_http_status(429, "Rate limited", "test");
        assert_eq!(rate_limit.category, ErrorCategory::RateLimit);

        let auth = ErrorClassifier::classify_http_status(401, "Unauthorized", "test");
        assert_eq!(auth.category, ErrorCategory::Auth);

        let server_error = ErrorClassifier::classify_http_status(500, "Server error", "test");
        assert_eq!(server_error.category, ErrorCategory::Transient);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::with_provider(ErrorCategory::RateLimit, "Too many requests", "gemini");
        assert_eq!(err.to_string(), "[gemini:RATE_LIMIT] Too many requests");

        let err_no_provider = LlmError::new(ErrorCategory::Network, "Connection failed");
        assert_eq!(err_no_provider.to_string(), "[NETWORK] Connection failed");
    }

    #[test]
    fn test_generation_failures_collapse_to_one_message() {
        let kinds: Vec<VerseError> = vec![
            VerseError::EmptyResponse,
            VerseError::MalformedResponse("expected value at line 1".to_string()),
            VerseError::InvalidShape("missing 'songs'".to_string()),
            VerseError::LlmApi("503 from upstream".to_string()),
            VerseError::Llm(LlmError::new(ErrorCategory::Network, "dns failure")),
        ];

        for kind in kinds {
            assert!(kind.is_generation_failure());
            assert_eq!(kind.user_message(), messages::GENERATION_FAILED);
        }
    }

    #[test]
    fn test_input_invalid_is_not_a_generation_failure() {
        let err = VerseError::InputInvalid { field: "topic" };
        assert!(!err.is_generation_failure());
    }

    #[test]
    fn test_gate_denied_message() {
        assert_eq!(VerseError::GateDenied.user_message(), messages::ACCESS_DENIED);
    }
}
