//! JSON Extraction
//!
//! Strict parsing of the raw response text. Structured output mode should
//! yield bare JSON, but models occasionally wrap it in markdown code
//! fences; those are stripped before the single parse attempt. There is no
//! repair loop: an unparseable response is a hard MalformedResponse and the
//! user resubmits.

use serde_json::Value;

use crate::types::{Result, VerseError};

/// Parse the raw response text as JSON after stripping code fences.
pub fn extract_json_from_response(content: &str) -> Result<Value> {
    let cleaned = preprocess(content);

    serde_json::from_str::<Value>(&cleaned)
        .map_err(|e| VerseError::MalformedResponse(format!(
            "{} (content preview: {}...)",
            e,
            cleaned.chars().take(120).collect::<String>()
        )))
}

fn preprocess(raw: &str) -> String {
    let mut s = raw.trim();

    // Remove BOM if present
    s = s.trim_start_matches('\u{feff}');

    strip_code_fences(s)
}

/// Strip markdown code fences (```json ... ``` or ``` ... ```)
fn strip_code_fences(s: &str) -> String {
    let mut result = s.to_string();

    if result.starts_with("```")
        && let Some(first_newline) = result.find('\n')
    {
        result = result[first_newline + 1..].to_string();
    }

    if result.ends_with("```") {
        result = result[..result.len() - 3].trim_end().to_string();
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_json() {
        let value = extract_json_from_response(r#"{"songs": []}"#).unwrap();
        assert!(value["songs"].is_array());
    }

    #[test]
    fn test_strips_json_code_fence() {
        let raw = "```json\n{\"songs\": []}\n```";
        let value = extract_json_from_response(raw).unwrap();
        assert!(value["songs"].is_array());
    }

    #[test]
    fn test_strips_anonymous_code_fence() {
        let raw = "```\n{\"songs\": []}\n```";
        let value = extract_json_from_response(raw).unwrap();
        assert!(value["songs"].is_array());
    }

    #[test]
    fn test_non_json_is_malformed() {
        let result = extract_json_from_response("not json");
        assert!(matches!(result, Err(VerseError::MalformedResponse(_))));
    }

    #[test]
    fn test_truncated_json_is_malformed_not_repaired() {
        let result = extract_json_from_response(r#"{"songs": [{"title": "A""#);
        assert!(matches!(result, Err(VerseError::MalformedResponse(_))));
    }
}
