//! Submission Session
//!
//! Single-writer state container for the submission lifecycle:
//!
//! ```text
//! Idle → Submitting { seq } → { Succeeded(songs) | Failed(message) } → Idle
//! ```
//!
//! One generation call is outstanding at a time. Every submission takes a
//! fresh monotonic sequence number; a completion only applies while its
//! sequence is still the current one, so the eventual resolution of an
//! abandoned in-flight call can never overwrite a newer result.
//!
//! All failure kinds after submission leaves the client collapse into one
//! generic user-facing message; the distinct kinds are logged and remain
//! visible to callers through the returned error.

use tracing::{debug, warn};

use crate::ai::prompt::RequestBuilder;
use crate::ai::provider::SharedProvider;
use crate::ai::validation::SongResponseValidator;
use crate::types::{GenerationRequest, Result, SongSet};

/// Submission lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    /// No submission made, or the last one has been cleared
    Idle,
    /// A generation call is in flight
    Submitting { seq: u64 },
    /// The last submission produced an accepted song collection
    Succeeded(SongSet),
    /// The last submission failed; holds the user-facing message
    Failed(String),
}

/// Owns the submission state, the sequence counter, and the provider.
pub struct GeneratorSession {
    provider: SharedProvider,
    validator: SongResponseValidator,
    temperature: f32,
    state: SubmissionState,
    seq: u64,
}

impl GeneratorSession {
    pub fn new(provider: SharedProvider, temperature: f32) -> Self {
        Self {
            provider,
            validator: SongResponseValidator::new(),
            temperature,
            state: SubmissionState::Idle,
            seq: 0,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Busy flag: a call is in flight and resubmission is disabled.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    /// The accepted result, if the last submission succeeded.
    pub fn songs(&self) -> Option<&SongSet> {
        match &self.state {
            SubmissionState::Succeeded(songs) => Some(songs),
            _ => None,
        }
    }

    /// The user-facing error, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Run one full submission: validate input, clear prior state, perform
    /// the single generation call, and apply the outcome.
    ///
    /// Blank input fails fast with `InputInvalid` and leaves the current
    /// state untouched (submission is inert, no error is displayed).
    pub async fn submit(&mut self, request: &GenerationRequest) -> Result<SongSet> {
        request.validate()?;

        let seq = self.begin();
        let payload = RequestBuilder::build(request, self.temperature);

        let outcome = match self.provider.generate(&payload).await {
            Ok(raw) => self.validator.validate(raw.text.as_deref()),
            Err(err) => Err(err),
        };

        self.complete(seq, outcome)
    }

    /// Start a new submission: bump the sequence counter and reset the
    /// state to `Submitting`, clearing any previously displayed result or
    /// error so stale output never intermixes with the new attempt.
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.state = SubmissionState::Submitting { seq: self.seq };
        self.seq
    }

    /// Apply a submission outcome. Only the holder of the current sequence
    /// number may write; a stale completion is logged and dropped.
    pub fn complete(&mut self, seq: u64, outcome: Result<SongSet>) -> Result<SongSet> {
        let current = matches!(self.state, SubmissionState::Submitting { seq: s } if s == seq);
        if !current {
            debug!(seq, "Ignoring completion of superseded submission");
            return outcome;
        }

        match outcome {
            Ok(songs) => {
                debug!(seq, count = songs.len(), "Submission succeeded");
                self.state = SubmissionState::Succeeded(songs.clone());
                Ok(songs)
            }
            Err(err) => {
                // The distinct kind lives here; the user sees one message.
                warn!(seq, kind = %err, "Submission failed");
                self.state = SubmissionState::Failed(err.user_message());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompt::GenerationPayload;
    use crate::ai::provider::{LlmProvider, RawResponse};
    use crate::constants::messages;
    use crate::types::{ErrorCategory, LlmError, VerseError};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Scripted provider for end-to-end session tests.
    struct MockProvider {
        script: std::sync::Mutex<Vec<Result<RawResponse>>>,
    }

    impl MockProvider {
        fn returning(responses: Vec<Result<RawResponse>>) -> Arc<Self> {
            Arc::new(Self {
                script: std::sync::Mutex::new(responses),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn generate(&self, _payload: &GenerationPayload) -> Result<RawResponse> {
            self.script
                .lock()
                .unwrap()
                .remove(0)
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn ten_songs_raw() -> String {
        let songs: Vec<String> = (1..=10)
            .map(|n| {
                format!(
                    r#"{{"title": "Track {}", "stylePrompt": "Synthwave, 120bpm", "lyrics": "[Verse]\nx"}}"#,
                    n
                )
            })
            .collect();
        format!(r#"{{"songs": [{}]}}"#, songs.join(","))
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("a midnight drive", "synthwave, 120bpm")
    }

    #[tokio::test]
    async fn test_successful_submission_yields_ten_cards_and_no_error() {
        let provider = MockProvider::returning(vec![Ok(RawResponse::text_only(ten_songs_raw()))]);
        let mut session = GeneratorSession::new(provider, 0.85);

        let songs = session.submit(&request()).await.unwrap();

        assert_eq!(songs.len(), 10);
        assert!(!session.is_busy());
        assert!(session.error().is_none());
        assert_eq!(session.songs().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_transport_failure_yields_generic_error_and_not_busy() {
        let provider = MockProvider::returning(vec![Err(VerseError::Llm(LlmError::new(
            ErrorCategory::Network,
            "connection refused",
        )))]);
        let mut session = GeneratorSession::new(provider, 0.85);

        let result = session.submit(&request()).await;

        assert!(result.is_err());
        assert!(!session.is_busy());
        assert!(session.songs().is_none());
        assert_eq!(session.error(), Some(messages::GENERATION_FAILED));
    }

    #[tokio::test]
    async fn test_blank_input_is_inert() {
        let provider = MockProvider::returning(vec![]);
        let mut session = GeneratorSession::new(provider, 0.85);

        let result = session
            .submit(&GenerationRequest::new("  ", "synthwave"))
            .await;

        // Blocked before any provider call; no error state is displayed.
        assert!(matches!(
            result,
            Err(VerseError::InputInvalid { field: "topic" })
        ));
        assert_eq!(*session.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_new_submission_clears_previous_result() {
        let provider = MockProvider::returning(vec![Ok(RawResponse::text_only(ten_songs_raw()))]);
        let mut session = GeneratorSession::new(provider, 0.85);

        session.submit(&request()).await.unwrap();
        assert!(session.songs().is_some());

        let seq = session.begin();
        assert!(session.is_busy());
        assert!(session.songs().is_none());
        assert!(session.error().is_none());
        assert_eq!(*session.state(), SubmissionState::Submitting { seq });
    }

    #[tokio::test]
    async fn test_empty_response_collapses_to_generic_message() {
        let provider = MockProvider::returning(vec![Ok(RawResponse::empty())]);
        let mut session = GeneratorSession::new(provider, 0.85);

        let result = session.submit(&request()).await;

        assert!(matches!(result, Err(VerseError::EmptyResponse)));
        assert_eq!(session.error(), Some(messages::GENERATION_FAILED));
    }

    #[test]
    fn test_stale_completion_cannot_overwrite_newer_submission() {
        let provider = MockProvider::returning(vec![]);
        let mut session = GeneratorSession::new(provider, 0.85);

        let stale_seq = session.begin();
        let current_seq = session.begin();

        // The stale call resolves late; its result must be dropped.
        let stale_songs = SongSet::new(vec![]);
        let _ = session.complete(stale_seq, Ok(stale_songs));
        assert_eq!(
            *session.state(),
            SubmissionState::Submitting { seq: current_seq }
        );

        // The current call still applies normally.
        let set = SongSet::new(vec![]);
        session.complete(current_seq, Ok(set)).unwrap();
        assert!(session.songs().is_some());
    }

    #[test]
    fn test_stale_failure_is_also_dropped() {
        let provider = MockProvider::returning(vec![]);
        let mut session = GeneratorSession::new(provider, 0.85);

        let stale_seq = session.begin();
        let current_seq = session.begin();

        let _ = session.complete(stale_seq, Err(VerseError::EmptyResponse));
        assert!(session.is_busy());
        assert_eq!(
            *session.state(),
            SubmissionState::Submitting { seq: current_seq }
        );
    }
}
