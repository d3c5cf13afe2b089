//! AI Integration Layer
//!
//! Request building, the provider seam for the generation call, and
//! response validation.

pub mod prompt;
pub mod provider;
pub mod schema;
pub mod validation;

pub use prompt::{GenerationPayload, PromptBuilder, PromptSection, RequestBuilder};
pub use provider::{
    ErrorCategory, ErrorClassifier, GeminiProvider, LlmError, LlmProvider, ProviderConfig,
    RawResponse, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage, create_provider,
};
pub use schema::song_response_schema;
pub use validation::{SongResponseValidator, ValidationIssue, extract_json_from_response};
