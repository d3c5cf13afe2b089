//! VerseCraft - AI Song Pack Generator
//!
//! Turns a topic and a rhythm/style description into ten production-ready
//! song entries (title, style prompt, tagged lyrics) via a hosted
//! generative-language model constrained by a strict output schema.
//!
//! ## Core Flow
//!
//! - **Request Builder**: system + user instructions with the output schema
//!   and a creative sampling temperature
//! - **Provider**: one structured `generateContent` call, no retries
//! - **Validator**: EmptyResponse / MalformedResponse / InvalidShape
//!   taxonomy, lenient acceptance of the songs collection
//! - **Session**: single-writer submission state with sequence fencing so
//!   a stale in-flight call can never overwrite a newer result
//!
//! ## Quick Start
//!
//! ```ignore
//! use versecraft::ai::provider::{ProviderConfig, create_provider};
//! use versecraft::session::GeneratorSession;
//! use versecraft::types::GenerationRequest;
//!
//! let provider = create_provider(&ProviderConfig::default())?;
//! let mut session = GeneratorSession::new(provider, 0.85);
//! let songs = session
//!     .submit(&GenerationRequest::new("a midnight drive", "synthwave, 120bpm"))
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: request building, provider seam, response validation
//! - [`session`]: submission state machine
//! - [`export`]: PDF export of accepted results
//! - [`gate`]: non-cryptographic access gate
//! - [`config`]: layered configuration

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod gate;
pub mod session;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, LlmConfig};

// Error Types
pub use types::error::{ErrorCategory, Result, VerseError};

// Domain Types
pub use types::{GenerationRequest, Song, SongSet};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use ai::{
    GeminiProvider, GenerationPayload, LlmProvider, ProviderConfig, RawResponse, RequestBuilder,
    SongResponseValidator, create_provider, song_response_schema,
};
pub use export::PdfExporter;
pub use gate::AccessGate;
pub use session::{GeneratorSession, SubmissionState};
