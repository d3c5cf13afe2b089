//! Response Validation Layer
//!
//! Turns raw generation-service text into an accepted song collection or a
//! distinct failure kind (EmptyResponse, MalformedResponse, InvalidShape).
//!
//! ## Design Philosophy
//! - Fail hard on structure (no songs collection), stay lenient on content
//! - Single parse attempt, no repair loop

mod extract;
mod response;

pub use extract::extract_json_from_response;
pub use response::{IssueSeverity, SongResponseValidator, ValidationIssue};
