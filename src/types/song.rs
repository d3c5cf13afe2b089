//! Song Domain Types
//!
//! The data model for one submission cycle: a `GenerationRequest` built
//! fresh per submission, and the `SongSet` produced by a successful call.
//! Both live only in memory for the current session.

use serde::{Deserialize, Serialize};

use crate::constants::generation::SONG_COUNT;
use crate::types::error::{Result, VerseError};

// =============================================================================
// Generation Request
// =============================================================================

/// User input for one generation call.
///
/// Both fields are required; `validate()` rejects blank or whitespace-only
/// values before any network interaction happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// What the songs are about
    pub topic: String,
    /// Rhythm/style target (genre, tempo, vocal type, ...)
    pub style: String,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            style: style.into(),
        }
    }

    /// Reject submission when either field is blank or whitespace-only.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(VerseError::InputInvalid { field: "topic" });
        }
        if self.style.trim().is_empty() {
            return Err(VerseError::InputInvalid { field: "style" });
        }
        Ok(())
    }
}

// =============================================================================
// Song
// =============================================================================

/// One generated song entry.
///
/// Field names on the wire follow the response schema (`stylePrompt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Creative title
    pub title: String,
    /// Comma-separated descriptive keywords for a downstream audio generator
    #[serde(rename = "stylePrompt")]
    pub style_prompt: String,
    /// Full lyrics, structured with section tags ([Verse], [Chorus], ...)
    pub lyrics: String,
}

impl Song {
    /// All three contract fields present and non-empty.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.style_prompt.trim().is_empty()
            && !self.lyrics.trim().is_empty()
    }
}

// =============================================================================
// Song Set
// =============================================================================

/// An ordered collection of generated songs.
///
/// Order is the presentation order (display index 1-based) and carries no
/// other ranking. The contract nominally requests exactly [`SONG_COUNT`]
/// entries; acceptance is lenient, so callers that care check
/// `has_expected_count()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongSet(Vec<Song>);

impl SongSet {
    pub fn new(songs: Vec<Song>) -> Self {
        Self(songs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Song> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[Song] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Song> {
        self.0
    }

    /// Whether the set holds the nominally requested count.
    pub fn has_expected_count(&self) -> bool {
        self.0.len() == SONG_COUNT
    }
}

impl From<Vec<Song>> for SongSet {
    fn from(songs: Vec<Song>) -> Self {
        Self(songs)
    }
}

impl<'a> IntoIterator for &'a SongSet {
    type Item = &'a Song;
    type IntoIter = std::slice::Iter<'a, Song>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(n: usize) -> Song {
        Song {
            title: format!("Track {}", n),
            style_prompt: "Synthwave, 120bpm, Female Vocals".to_string(),
            lyrics: "[Verse 1]\nNeon lights\n[Chorus]\nDrive on".to_string(),
        }
    }

    #[test]
    fn test_request_validation_accepts_non_empty() {
        let request = GenerationRequest::new("a midnight drive", "synthwave, 120bpm");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_validation_rejects_blank_topic() {
        let request = GenerationRequest::new("", "synthwave");
        assert!(matches!(
            request.validate(),
            Err(VerseError::InputInvalid { field: "topic" })
        ));
    }

    #[test]
    fn test_request_validation_rejects_whitespace_style() {
        let request = GenerationRequest::new("a midnight drive", "   \t\n");
        assert!(matches!(
            request.validate(),
            Err(VerseError::InputInvalid { field: "style" })
        ));
    }

    #[test]
    fn test_song_completeness() {
        assert!(song(1).is_complete());

        let missing_lyrics = Song {
            lyrics: "  ".to_string(),
            ..song(1)
        };
        assert!(!missing_lyrics.is_complete());
    }

    #[test]
    fn test_song_wire_field_names() {
        let json = serde_json::to_value(song(1)).unwrap();
        assert!(json.get("stylePrompt").is_some());
        assert!(json.get("style_prompt").is_none());
    }

    #[test]
    fn test_set_preserves_order() {
        let set = SongSet::new((1..=10).map(song).collect());
        assert!(set.has_expected_count());
        assert_eq!(set.get(0).unwrap().title, "Track 1");
        assert_eq!(set.get(9).unwrap().title, "Track 10");
    }

    #[test]
    fn test_set_count_check_is_advisory() {
        let set = SongSet::new((1..=3).map(song).collect());
        assert!(!set.has_expected_count());
        assert_eq!(set.len(), 3);
    }
}
