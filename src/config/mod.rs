//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/versecraft/config.toml)
//! 3. Project config (.versecraft/config.toml)
//! 4. Environment variables (VERSECRAFT_*)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
