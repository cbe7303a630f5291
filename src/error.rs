use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, warn};

/// Domain-specific errors for Text Typer
#[derive(Error, Debug)]
pub enum TextTyperError {
    #[error("Failed to read snippets from '{path}': {source}")]
    SnippetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write snippets to '{path}': {source}")]
    SnippetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Another instance is already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    #[error("Instance lock '{path}' unavailable: {source}")]
    InstanceLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Hotkey manager unavailable: {0}")]
    HotkeyManager(#[from] global_hotkey::Error),

    #[error("Keyboard injection unavailable: {0}")]
    Injection(String),
}

impl TextTyperError {
    pub fn user_message(&self) -> String {
        match self {
            Self::SnippetRead { path, .. } => {
                format!("Could not read snippets from {}", path.display())
            }
            Self::SnippetWrite { path, .. } => {
                format!("Could not save snippets to {}", path.display())
            }
            Self::AlreadyRunning { .. } => "Application is already running!".to_string(),
            Self::InstanceLock { path, .. } => {
                format!("Could not create instance lock {}", path.display())
            }
            Self::HotkeyManager(e) => format!("Global hotkeys unavailable: {}", e),
            Self::Injection(msg) => format!("Cannot type text: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextTyperError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use text_typer::error::ResultExt;
///
/// // Log and continue if the tray icon can't be created
/// let tray = TrayManager::new().log_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_running_message_matches_dialog_text() {
        let err = TextTyperError::AlreadyRunning { pid: 42 };
        assert_eq!(err.user_message(), "Application is already running!");
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn write_error_keeps_path_and_source() {
        let err = TextTyperError::SnippetWrite {
            path: PathBuf::from("config.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.user_message().contains("config.txt"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn result_ext_converts_to_option() {
        let ok: std::result::Result<u8, &str> = Ok(3);
        let err: std::result::Result<u8, &str> = Err("boom");
        assert_eq!(ok.log_err(), Some(3));
        assert_eq!(err.warn_on_err(), None);
    }
}
