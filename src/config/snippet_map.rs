//! Ordered shortcut → snippet mapping.

use std::sync::Arc;

use crate::shortcuts::ShortcutId;

use super::defaults::DEFAULT_SNIPPETS;

/// Ordered mapping from shortcut to snippet text.
///
/// Iteration follows insertion order. Setting an existing shortcut replaces
/// its text in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnippetMap {
    entries: Vec<(ShortcutId, String)>,
}

impl SnippetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in mapping used when no snippet file exists.
    pub fn defaults() -> Self {
        DEFAULT_SNIPPETS
            .iter()
            .filter_map(|(key, text)| key.parse().ok().map(|id| (id, text.to_string())))
            .collect()
    }

    pub fn get(&self, id: &ShortcutId) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, id: &ShortcutId) -> bool {
        self.entries.iter().any(|(key, _)| key == id)
    }

    /// Insert or replace. Returns the previous text, if any.
    pub fn set(&mut self, id: ShortcutId, text: impl Into<String>) -> Option<String> {
        let text = text.into();
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, existing)) => Some(std::mem::replace(existing, text)),
            None => {
                self.entries.push((id, text));
                None
            }
        }
    }

    /// Append an empty entry for every predefined shortcut that is missing.
    /// Returns how many were added.
    pub fn fill_missing(&mut self) -> usize {
        let mut added = 0;
        for id in ShortcutId::predefined() {
            if !self.contains(id) {
                self.entries.push((*id, String::new()));
                added += 1;
            }
        }
        added
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShortcutId, &str)> {
        self.entries.iter().map(|(id, text)| (id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Immutable copy of every entry, shared cheaply with other threads.
    pub fn snapshot(&self) -> Vec<(ShortcutId, Arc<str>)> {
        self.entries
            .iter()
            .map(|(id, text)| (*id, Arc::from(text.as_str())))
            .collect()
    }
}

impl FromIterator<(ShortcutId, String)> for SnippetMap {
    fn from_iter<I: IntoIterator<Item = (ShortcutId, String)>>(iter: I) -> Self {
        let mut map = SnippetMap::new();
        for (id, text) in iter {
            map.set(id, text);
        }
        map
    }
}
