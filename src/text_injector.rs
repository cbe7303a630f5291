//! Text injection via synthesized keystrokes.
//!
//! The injector waits a short pre-delay so the hotkey that triggered it has
//! been released, then types the text into whatever window has focus.
//! Failures are logged and swallowed; callers never see them.

use std::thread;
use std::time::Duration;

use enigo::{Enigo, Keyboard, Settings};
use tracing::{debug, instrument, warn};

use crate::config::DEFAULT_INJECT_DELAY_MS;
use crate::error::TextTyperError;

/// Something that can type text into the focused application.
///
/// The hotkey listener thread and the editor's Test action both go through
/// this trait.
pub trait TextSink: Send + Sync {
    fn type_text(&self, text: &str);
}

/// Timing for text injection
#[derive(Debug, Clone)]
pub struct TextInjectorConfig {
    /// Delay before typing starts (ms)
    pub pre_delay_ms: u64,
}

impl Default for TextInjectorConfig {
    fn default() -> Self {
        Self {
            pre_delay_ms: DEFAULT_INJECT_DELAY_MS,
        }
    }
}

/// Types text through the OS input-injection facility (`enigo`).
#[derive(Debug, Clone, Default)]
pub struct TextInjector {
    config: TextInjectorConfig,
}

impl TextInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TextInjectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TextInjectorConfig {
        &self.config
    }

    /// Sleep the pre-delay, then type `text`. Never fails from the caller's view.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn inject(&self, text: &str) {
        thread::sleep(Duration::from_millis(self.config.pre_delay_ms));

        if text.is_empty() {
            debug!("Empty snippet, nothing to type");
            return;
        }

        if let Err(e) = type_with_enigo(text) {
            warn!(error = %e, "Text injection failed");
        }
    }
}

impl TextSink for TextInjector {
    fn type_text(&self, text: &str) {
        self.inject(text);
    }
}

/// A new [`Enigo`] is created per call because it is not `Send` and the
/// handle is cheap to construct.
fn type_with_enigo(text: &str) -> Result<(), TextTyperError> {
    let mut enigo = Enigo::new(&Settings::default())
        .map_err(|e| TextTyperError::Injection(e.to_string()))?;
    enigo
        .text(text)
        .map_err(|e| TextTyperError::Injection(e.to_string()))?;
    debug!(chars = text.chars().count(), "Typed snippet");
    Ok(())
}
