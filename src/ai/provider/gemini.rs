//! Gemini API Provider
//!
//! Generation provider using the `generateContent` endpoint in structured
//! output mode: the payload's schema rides in `generationConfig` so the
//! service constrains its decoding to conforming JSON.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::{
    LlmProvider, ProviderConfig, RawResponse, ResponseMetadata, ResponseTiming, TokenUsage,
};
use crate::ai::prompt::GenerationPayload;
use crate::constants::generation::DEFAULT_MODEL;
use crate::types::{ErrorClassifier, Result, VerseError};

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const PROVIDER_NAME: &str = "gemini";

/// Gemini API provider with secure API key handling
pub struct GeminiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    max_output_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key_str = config
            .api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .ok_or_else(|| {
                VerseError::Config(
                    "Gemini API key not found. Set GEMINI_API_KEY env var or provide in config"
                        .to_string(),
                )
            })?;

        let api_base = config
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        // Reject unparseable custom endpoints up front
        url::Url::parse(&api_base)
            .map_err(|e| VerseError::Config(format!("Invalid API base '{}': {}", api_base, e)))?;

        let model = config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerseError::LlmApi(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key_str),
            api_base,
            model,
            max_output_tokens: config.max_output_tokens,
            client,
        })
    }

    fn build_request(&self, payload: &GenerationPayload) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: payload.system_instruction.clone(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: payload.user_prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: payload.temperature,
                max_output_tokens: self.max_output_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: payload.schema.clone(),
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, payload: &GenerationPayload) -> Result<RawResponse> {
        info!(
            "Generating with Gemini (model: {}, temperature: {})",
            self.model, payload.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(payload);
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                VerseError::Llm(ErrorClassifier::classify(&e.to_string(), PROVIDER_NAME))
            })?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VerseError::Llm(ErrorClassifier::classify_http_status(
                status,
                &format!("Gemini API error ({}): {}", status, body),
                PROVIDER_NAME,
            )));
        }

        let response_body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| VerseError::LlmApi(format!("Failed to parse Gemini response: {}", e)))?;

        let usage = response_body
            .usage_metadata
            .as_ref()
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count.unwrap_or(0),
                output_tokens: u.candidates_token_count.unwrap_or(0),
            })
            .unwrap_or_default();

        // Text-or-absence: an empty candidate list is not an error here,
        // the validator turns absence into EmptyResponse.
        let text = response_body
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|s| !s.is_empty());

        debug!(
            "Received response from Gemini in {}ms ({} output tokens)",
            elapsed.as_millis(),
            usage.output_tokens
        );

        Ok(RawResponse {
            text,
            usage,
            timing: ResponseTiming::from_duration(elapsed),
            metadata: ResponseMetadata {
                model: self.model.clone(),
                provider: PROVIDER_NAME.to_string(),
            },
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "systemInstruction")]
    system_instruction: Option<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: usize,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompt::RequestBuilder;
    use crate::types::GenerationRequest;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..ProviderConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_build_request_carries_structured_output_mode() {
        let request = GenerationRequest::new("a midnight drive", "synthwave, 120bpm");
        let payload = RequestBuilder::build(&request, 0.85);
        let wire = provider().build_request(&payload);

        assert_eq!(wire.generation_config.response_mime_type, "application/json");
        assert!(wire.generation_config.response_schema["properties"]["songs"].is_object());
        assert!((wire.generation_config.temperature - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn test_build_request_separates_instruction_roles() {
        let request = GenerationRequest::new("topic", "style");
        let payload = RequestBuilder::build(&request, 0.85);
        let wire = provider().build_request(&payload);

        let system = wire.system_instruction.unwrap();
        assert!(system.parts[0].text.contains("music producer"));
        assert_eq!(wire.contents[0].role.as_deref(), Some("user"));
        assert!(wire.contents[0].parts[0].text.contains("topic"));
    }

    #[test]
    fn test_wire_request_uses_camel_case_keys() {
        let request = GenerationRequest::new("topic", "style");
        let payload = RequestBuilder::build(&request, 0.85);
        let wire = provider().build_request(&payload);

        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.get("systemInstruction").is_some());
        assert!(json["generationConfig"].get("responseMimeType").is_some());
        assert!(json["generationConfig"].get("responseSchema").is_some());
    }

    #[test]
    fn test_response_text_extraction_shape() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{"content": {"role": "model", "parts": [{"text": "{\"songs\":[]}"}]}}],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
            }"#,
        )
        .unwrap();

        assert_eq!(body.candidates.len(), 1);
        let usage = body.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, Some(12));
        assert_eq!(usage.candidates_token_count, Some(34));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        // Only meaningful when the environment doesn't provide a key.
        if std::env::var("GEMINI_API_KEY").is_err() {
            let result = GeminiProvider::new(ProviderConfig::default());
            assert!(matches!(result, Err(VerseError::Config(_))));
        }
    }
}
