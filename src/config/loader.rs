//! Settings loading from file system

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use super::types::Settings;
use crate::logging;

/// Default settings location (~/.text-typer/settings.json)
pub fn default_settings_path() -> PathBuf {
    logging::app_dir().join("settings.json")
}

/// Load settings from ~/.text-typer/settings.json
pub fn load_settings() -> Settings {
    load_settings_from(&default_settings_path())
}

/// Load settings from `path`.
///
/// Returns `Settings::default()` if the file is missing or malformed.
#[instrument(name = "load_settings")]
pub fn load_settings_from(path: &Path) -> Settings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            info!(path = %path.display(), error = %e, "Settings file not readable, using defaults");
            return Settings::default();
        }
    };

    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => {
            info!(path = %path.display(), ?settings, "Loaded settings");
            settings
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse settings, using defaults");
            Settings::default()
        }
    }
}
