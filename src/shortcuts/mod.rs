//! Shortcut identifiers usable as snippet bindings.
//!
//! # Example
//!
//! ```ignore
//! use text_typer::shortcuts::ShortcutId;
//!
//! let id: ShortcutId = "Shift+F2".parse()?;
//! assert_eq!(id.combo(), "shift+f2");
//! let hotkey = id.hotkey(); // registered with the OS
//! ```

mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

pub use types::{ShortcutGroup, ShortcutId, ShortcutParseError};
