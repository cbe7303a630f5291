//! Configuration module - snippet storage and application settings
//!
//! This module provides functionality for:
//! - Loading/saving the snippet mapping (`config.txt`, `@@`-delimited records)
//! - Built-in default snippets
//! - Application settings from ~/.text-typer/settings.json
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `snippet_map` - The ordered shortcut → snippet mapping
//! - `store` - Snippet file format and persistence
//! - `types` - Settings struct
//! - `loader` - Settings loading

mod defaults;
mod loader;
mod snippet_map;
mod store;
mod types;

pub use defaults::{DEFAULT_INJECT_DELAY_MS, RECORD_DELIMITER};
pub use loader::{default_settings_path, load_settings, load_settings_from};
pub use snippet_map::SnippetMap;
pub use store::{parse_snippets, serialize_snippets, SnippetStore};
pub use types::Settings;


#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
