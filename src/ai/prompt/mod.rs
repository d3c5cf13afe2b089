//! Prompt Builder System
//!
//! Standardized prompt construction for the generation call.
//! The request builder is deterministic: the same topic and style always
//! produce byte-identical instruction texts.
//!
//! ## Design Principles
//!
//! 1. **Role Definition**: system instruction fixes the assistant's persona
//! 2. **Structured Requirements**: numbered per-song requirements
//! 3. **Context Sections**: the two user inputs, clearly labeled
//! 4. **Output Schema**: attached separately (see [`crate::ai::schema`])

use serde_json::Value;

use crate::ai::schema::song_response_schema;
use crate::constants::generation::SONG_COUNT;
use crate::types::GenerationRequest;

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area and quality bar
    Role { expertise: String, mandate: String },
    /// Numbered requirements
    Requirements(Vec<String>),
    /// Context as ordered key-value pairs (order is part of determinism)
    Context(Vec<(String, String)>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, mandate: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            mandate: mandate.to_string(),
        });
        self
    }

    /// Add numbered requirements
    pub fn requirements(mut self, requirements: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Requirements(
            requirements.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, preserving insertion order
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let mut found = false;
        for section in &mut self.sections {
            if let PromptSection::Context(ctx) = section {
                ctx.push((key.to_string(), value.to_string()));
                found = true;
                break;
            }
        }
        if !found {
            self.sections
                .push(PromptSection::Context(vec![(
                    key.to_string(),
                    value.to_string(),
                )]));
        }
        self
    }

    /// Add text section
    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, mandate } => {
                    prompt.push_str(&format!("You are an expert {}. {}\n\n", expertise, mandate));
                }
                PromptSection::Requirements(requirements) => {
                    for (i, req) in requirements.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, req));
                    }
                    prompt.push('\n');
                }
                PromptSection::Context(ctx) => {
                    for (key, value) in ctx {
                        prompt.push_str(&format!("{}: \"{}\"\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("{}\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

// =============================================================================
// Generation Payload
// =============================================================================

/// The complete request payload: two instruction texts, the attached output
/// schema, and the sampling temperature. Constructing it has no side
/// effects; network I/O happens in the provider layer.
#[derive(Debug, Clone)]
pub struct GenerationPayload {
    /// System-level instruction (persona, quality bar)
    pub system_instruction: String,
    /// User-level instruction (topic and style interpolated)
    pub user_prompt: String,
    /// Structural contract demanded of the model
    pub schema: Value,
    /// Sampling temperature
    pub temperature: f32,
}

/// Builds generation payloads from validated user input.
pub struct RequestBuilder;

impl RequestBuilder {
    /// Assemble the payload for one submission. Inputs are assumed
    /// non-empty (validated by the caller before invocation).
    pub fn build(request: &GenerationRequest, temperature: f32) -> GenerationPayload {
        GenerationPayload {
            system_instruction: Self::system_instruction(),
            user_prompt: Self::user_prompt(request),
            schema: song_response_schema(),
            temperature,
        }
    }

    fn system_instruction() -> String {
        PromptBuilder::new()
            .role(
                "music producer specializing in generative audio",
                "Your output must be production-ready. Avoid generic lyrics. \
                 Focus on structure, metatags, and precise style definitions.",
            )
            .build()
    }

    fn user_prompt(request: &GenerationRequest) -> String {
        PromptBuilder::new()
            .text(&format!(
                "Act as a world-class generative-audio architect. I need {} distinct songs \
                 based on these parameters:",
                SONG_COUNT
            ))
            .context_item("CORE THEME (what it is about)", request.topic.trim())
            .context_item("RHYTHM/STYLE TARGET", request.style.trim())
            .text(&format!("For each of the {} songs, provide:", SONG_COUNT))
            .requirements(vec![
                "A creative title.",
                "High-quality lyrics formatted with tags like [Verse 1], [Chorus], [Bridge], \
                 [Outro]. Ensure good rhyme schemes and flow.",
                "A style prompt: based on the rhythm request, a highly optimized string of \
                 keywords (genre, vibe, instruments, BPM, vocal type) that yields the best \
                 results.",
            ])
            .build()
    }
}
