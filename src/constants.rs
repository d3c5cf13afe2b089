//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Application display name (title pages, card headers)
pub const APP_NAME: &str = "VerseCraft";

/// Generation constants
pub mod generation {
    /// Number of songs requested per submission
    pub const SONG_COUNT: usize = 10;

    /// Default generation model
    pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

    /// Default sampling temperature (favors creative variation)
    pub const DEFAULT_TEMPERATURE: f32 = 0.85;

    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Default maximum tokens the model may emit
    pub const DEFAULT_MAX_OUTPUT_TOKENS: usize = 16_384;
}

/// User-facing messages
pub mod messages {
    /// Single generic message for every generation failure kind.
    /// Internal kinds stay distinct for logging and tests.
    pub const GENERATION_FAILED: &str =
        "Something went wrong while generating songs. Check your connection or try simplifying the request.";

    /// Static message when the access gate rejects the passphrase
    pub const ACCESS_DENIED: &str = "Incorrect passphrase.";
}

/// PDF export layout (A4 portrait)
pub mod pdf {
    /// Page width in millimeters
    pub const PAGE_WIDTH_MM: f64 = 210.0;

    /// Page height in millimeters
    pub const PAGE_HEIGHT_MM: f64 = 297.0;

    /// Left/right margin in millimeters
    pub const MARGIN_MM: f64 = 20.0;

    /// Vertical distance between body lines in millimeters
    pub const LINE_HEIGHT_MM: f64 = 6.0;

    /// Characters per wrapped body line
    pub const WRAP_COLUMNS: usize = 88;

    /// Characters per wrapped monospace line (style prompt block)
    pub const MONO_WRAP_COLUMNS: usize = 72;

    /// Maximum characters of the topic shown on the title page
    pub const TOPIC_TRUNCATE: usize = 120;
}
