//! Response Schema
//!
//! The structural contract demanded of the model. The schema is attached to
//! the generation request so the service's own decoding is constrained to
//! emit conforming JSON; it is part of the request, not just documentation.

use serde_json::{Value, json};

/// Build the output schema for a song generation call: an object with one
/// required `songs` array whose items each require `title`, `stylePrompt`,
/// and `lyrics` string fields.
///
/// Type names are uppercase per the generation API's schema dialect.
pub fn song_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "songs": {
                "type": "ARRAY",
                "description": "A list of exactly 10 generated songs.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {
                            "type": "STRING",
                            "description": "The creative title of the song."
                        },
                        "stylePrompt": {
                            "type": "STRING",
                            "description": "A specific, comma-separated style prompt optimized for a generative audio system (e.g., 'Dark Techno, 140bpm, Male Vocals')."
                        },
                        "lyrics": {
                            "type": "STRING",
                            "description": "The full lyrics of the song, structured with [Verse], [Chorus], [Bridge], [Outro] tags."
                        }
                    },
                    "required": ["title", "stylePrompt", "lyrics"]
                }
            }
        },
        "required": ["songs"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_songs_collection() {
        let schema = song_response_schema();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "songs"));
        assert_eq!(schema["properties"]["songs"]["type"], "ARRAY");
    }

    #[test]
    fn test_schema_requires_all_song_fields() {
        let schema = song_response_schema();
        let item = &schema["properties"]["songs"]["items"];
        let required = item["required"].as_array().unwrap();

        for field in ["title", "stylePrompt", "lyrics"] {
            assert!(required.iter().any(|v| v == field), "missing {}", field);
            assert_eq!(item["properties"][field]["type"], "STRING");
        }
    }
}
