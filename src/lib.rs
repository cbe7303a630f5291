//! Text Typer - types preconfigured text snippets on global hotkeys
//!
//! F-keys, Shift+F-keys and Ctrl+digits each carry a snippet. Snippets live
//! in a plain-text file and are edited in a small window reachable from the
//! tray.

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod hotkeys;
pub mod logging;
pub mod session;
pub mod shortcuts;
pub mod single_instance;
pub mod text_injector;
pub mod tray;
