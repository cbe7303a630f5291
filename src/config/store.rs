//! Snippet file persistence.
//!
//! Format: one record per shortcut, `<identifier>@@<text>`. Multi-line text
//! continues on the following raw lines until the next line containing the
//! delimiter:
//!
//! ```text
//! F1@@Hello
//! F4@@first line
//! second line
//! Ctrl+0@@
//! ```
//!
//! The delimiter is not escaped. A continuation line that itself contains
//! `@@` starts a new record. Both `\n` and `\r\n` line endings are read;
//! files are always written with `\n`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::error::{Result, TextTyperError};
use crate::shortcuts::ShortcutId;

use super::defaults::RECORD_DELIMITER;
use super::snippet_map::SnippetMap;

/// Parse snippet file content.
///
/// Records with an unknown identifier are skipped together with their
/// continuation lines. Lines before the first record are ignored.
pub fn parse_snippets(content: &str) -> SnippetMap {
    let mut map = SnippetMap::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for raw in content.split_inclusive('\n') {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some((key, text)) = line.split_once(RECORD_DELIMITER) {
            if let Some((key, lines)) = current.take() {
                push_record(&mut map, key, &lines);
            }
            current = Some((key, vec![text]));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((key, lines)) = current {
        push_record(&mut map, key, &lines);
    }

    map
}

fn push_record(map: &mut SnippetMap, key: &str, lines: &[&str]) {
    match key.parse::<ShortcutId>() {
        Ok(id) => {
            map.set(id, lines.join("\n"));
        }
        Err(e) => {
            warn!(identifier = %key.trim(), error = %e, "Skipping snippet with unknown shortcut");
        }
    }
}

/// Serialize a mapping, one record per entry in mapping order.
pub fn serialize_snippets(map: &SnippetMap) -> String {
    let mut out = String::new();
    for (id, text) in map.iter() {
        out.push_str(&id.to_string());
        out.push_str(RECORD_DELIMITER);
        out.push_str(text);
        out.push('\n');
    }
    out
}

/// Loads and saves the snippet file.
#[derive(Clone, Debug)]
pub struct SnippetStore {
    path: PathBuf,
}

impl SnippetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the mapping.
    ///
    /// A missing file is replaced by the built-in defaults, which are written
    /// out immediately. Every predefined shortcut is present afterwards.
    #[instrument(name = "load_snippets", skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<SnippetMap> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Snippet file not found, writing defaults");
                let defaults = SnippetMap::defaults();
                self.save(&defaults)?;
                return Ok(defaults);
            }
            Err(source) => {
                return Err(TextTyperError::SnippetRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut map = parse_snippets(&content);
        let loaded = map.len();
        let filled = map.fill_missing();
        info!(loaded, filled, "Loaded snippets");
        Ok(map)
    }

    /// Overwrite the file with the whole mapping.
    #[instrument(name = "save_snippets", skip(self, map), fields(path = %self.path.display(), entries = map.len()))]
    pub fn save(&self, map: &SnippetMap) -> Result<()> {
        let write_err = |source| TextTyperError::SnippetWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        fs::write(&self.path, serialize_snippets(map)).map_err(write_err)?;
        info!("Saved snippets");
        Ok(())
    }
}
