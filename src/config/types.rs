//! Configuration type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{DEFAULT_CONFIRM_SAVE, DEFAULT_INJECT_DELAY_MS, DEFAULT_SNIPPETS_PATH};

/// Application settings, read from ~/.text-typer/settings.json.
///
/// Every field is optional in the file; missing fields fall back to defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Snippet file. Relative paths resolve against the working directory.
    pub snippets_path: PathBuf,
    /// Pause before typing a snippet (ms)
    pub inject_delay_ms: u64,
    /// Show the "saved" notice after each save
    pub confirm_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snippets_path: PathBuf::from(DEFAULT_SNIPPETS_PATH),
            inject_delay_ms: DEFAULT_INJECT_DELAY_MS,
            confirm_save: DEFAULT_CONFIRM_SAVE,
        }
    }
}
