//! Response Validation
//!
//! Decides whether raw text returned by the generation service is a usable
//! result. Failure taxonomy (each kind stays distinct for logging/tests):
//!
//! - no text at all → `EmptyResponse`
//! - text that is not JSON → `MalformedResponse`
//! - JSON without a songs array → `InvalidShape`
//!
//! Acceptance of the songs collection itself is deliberately lenient: any
//! array is returned as-is, in order. The nominal contract (exactly ten
//! entries, all fields non-empty) is inspected and reported as warnings,
//! never enforced.

use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::extract::extract_json_from_response;
use crate::constants::generation::SONG_COUNT;
use crate::types::{Result, Song, SongSet, VerseError};

/// Severity levels for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Warning - result usable but degraded quality
    Warning,
    /// Info - observation that doesn't affect usability
    Info,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Warning => write!(f, "WARN"),
            IssueSeverity::Info => write!(f, "INFO"),
        }
    }
}

/// A single validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
}

impl ValidationIssue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Info,
            message: message.into(),
        }
    }
}

/// Validator for song generation responses
#[derive(Debug, Default)]
pub struct SongResponseValidator;

impl SongResponseValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate raw response text and return the parsed song collection.
    ///
    /// On success the collection is returned unchanged, in response order.
    /// Quality issues are logged, not enforced.
    pub fn validate(&self, raw: Option<&str>) -> Result<SongSet> {
        let text = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(VerseError::EmptyResponse)?;

        let value = extract_json_from_response(text)?;

        let entries = match value.get("songs") {
            None | Some(Value::Null) => {
                return Err(VerseError::InvalidShape(
                    "missing required 'songs' collection".to_string(),
                ));
            }
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(VerseError::InvalidShape(format!(
                    "'songs' must be an array, got {}",
                    json_type_name(other)
                )));
            }
        };

        let set = SongSet::new(entries.iter().map(song_from_value).collect());

        for issue in self.inspect(&set) {
            warn!("[{}] {}", issue.severity, issue.message);
        }

        Ok(set)
    }

    /// Report where the collection falls short of the nominal contract.
    pub fn inspect(&self, set: &SongSet) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if !set.has_expected_count() {
            issues.push(ValidationIssue::warning(format!(
                "expected {} songs, got {}",
                SONG_COUNT,
                set.len()
            )));
        }

        for (index, song) in set.iter().enumerate() {
            if !song.is_complete() {
                issues.push(ValidationIssue::warning(format!(
                    "song {} is missing one or more fields",
                    index + 1
                )));
            }
        }

        issues
    }
}

/// Read one song entry defensively: missing or non-string fields become
/// empty strings rather than rejecting the whole collection.
fn song_from_value(value: &Value) -> Song {
    Song {
        title: json_string(value, "title"),
        style_prompt: json_string(value, "stylePrompt"),
        lyrics: json_string(value, "lyrics"),
    }
}

fn json_string(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
