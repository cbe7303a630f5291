//! Editor model behind the snippet window.
//!
//! One [`SnippetField`] per predefined shortcut, each with its own unlimited
//! undo/redo history, plus the clipboard operations the toolbar and context
//! menu offer. Selections and cursors are char indices, matching egui's
//! `CCursor`.
//!
//! Editing operations never fail loudly: a missing clipboard, an empty
//! selection or an empty history just makes the operation a no-op.

use std::ops::Range;

use crate::config::SnippetMap;
use crate::logging;
use crate::shortcuts::ShortcutId;

pub const STATUS_READY: &str = "Ready";

/// Clipboard access used by cut/copy/paste. Implemented for
/// [`arboard::Clipboard`]; tests use an in-memory fake.
pub trait ClipboardAccess {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str) -> bool;
}

impl ClipboardAccess for arboard::Clipboard {
    fn get_text(&mut self) -> Option<String> {
        arboard::Clipboard::get_text(self).ok()
    }

    fn set_text(&mut self, text: &str) -> bool {
        arboard::Clipboard::set_text(self, text.to_string()).is_ok()
    }
}

/// Undo/redo stacks of whole-text snapshots.
#[derive(Debug, Default, Clone)]
pub struct EditHistory {
    undo: Vec<String>,
    redo: Vec<String>,
}

impl EditHistory {
    fn record(&mut self, before: String) {
        self.undo.push(before);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

/// The text bound to one shortcut, as currently edited.
#[derive(Debug, Clone)]
pub struct SnippetField {
    shortcut: ShortcutId,
    pub text: String,
    history: EditHistory,
}

impl SnippetField {
    pub fn new(shortcut: ShortcutId, text: impl Into<String>) -> Self {
        Self {
            shortcut,
            text: text.into(),
            history: EditHistory::default(),
        }
    }

    pub fn shortcut(&self) -> ShortcutId {
        self.shortcut
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Record an edit made directly to `text` (typing in the widget).
    pub fn commit_edit(&mut self, before: String) {
        if before != self.text {
            self.history.record(before);
        }
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.text, previous);
                self.history.redo.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.text, next);
                self.history.undo.push(current);
                true
            }
            None => false,
        }
    }

    /// Text covered by a char-index selection (clamped to the text).
    pub fn selected_text(&self, selection: &Range<usize>) -> &str {
        let bytes = self.byte_range(selection);
        &self.text[bytes]
    }

    /// Replace a char-index range and return the cursor position after the
    /// inserted text.
    fn replace_range(&mut self, selection: &Range<usize>, insert: &str) -> usize {
        let bytes = self.byte_range(selection);
        let before = self.text.clone();
        self.text.replace_range(bytes, insert);
        self.commit_edit(before);
        let start = selection.start.min(selection.end);
        start.min(self.char_len()) + insert.chars().count()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_range(&self, selection: &Range<usize>) -> Range<usize> {
        let start = selection.start.min(selection.end);
        let end = selection.start.max(selection.end);
        self.byte_offset(start)..self.byte_offset(end)
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Edit operations offered by the toolbar and the per-field context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
}

impl EditOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cut => "Cut",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::Undo => "Undo",
            Self::Redo => "Redo",
        }
    }
}

/// All snippet fields plus status-bar state.
#[derive(Debug, Clone)]
pub struct EditorModel {
    fields: Vec<SnippetField>,
    status: String,
    last_focused: Option<ShortcutId>,
}

impl EditorModel {
    /// One field per predefined shortcut, filled from `mapping`.
    pub fn from_mapping(mapping: &SnippetMap) -> Self {
        let fields = ShortcutId::predefined()
            .iter()
            .map(|id| SnippetField::new(*id, mapping.get(id).unwrap_or_default()))
            .collect();
        Self {
            fields,
            status: STATUS_READY.to_string(),
            last_focused: None,
        }
    }

    pub fn fields(&self) -> &[SnippetField] {
        &self.fields
    }

    pub fn field(&self, id: &ShortcutId) -> Option<&SnippetField> {
        self.fields.iter().find(|f| f.shortcut == *id)
    }

    pub fn field_mut(&mut self, id: &ShortcutId) -> Option<&mut SnippetField> {
        self.fields.iter_mut().find(|f| f.shortcut == *id)
    }

    /// Write every field's text into `mapping`. Entries without a field
    /// (non-predefined shortcuts from the file) are left untouched.
    pub fn apply_to(&self, mapping: &mut SnippetMap) {
        for field in &self.fields {
            mapping.set(field.shortcut, field.text.clone());
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn focus_gained(&mut self, id: ShortcutId) {
        self.last_focused = Some(id);
        self.status = format!("Editing {}", id);
    }

    pub fn focus_lost(&mut self) {
        self.status = STATUS_READY.to_string();
    }

    /// The field toolbar actions apply to.
    pub fn last_focused(&self) -> Option<ShortcutId> {
        self.last_focused
    }

    /// Run an edit operation on one field.
    ///
    /// `selection` is the widget's current char range (empty = cursor).
    /// Returns the new cursor position when the text changed.
    pub fn apply_op(
        &mut self,
        id: &ShortcutId,
        op: EditOp,
        selection: Range<usize>,
        clipboard: Option<&mut dyn ClipboardAccess>,
    ) -> Option<usize> {
        let field = self.field_mut(id)?;
        let outcome = match op {
            EditOp::Copy => {
                copy_selection(field, &selection, clipboard);
                None
            }
            EditOp::Cut => {
                if copy_selection(field, &selection, clipboard) {
                    Some(field.replace_range(&selection, ""))
                } else {
                    None
                }
            }
            EditOp::Paste => {
                let pasted = clipboard.and_then(|c| c.get_text());
                pasted.map(|text| field.replace_range(&selection, &text))
            }
            EditOp::Undo => field.undo().then(|| field.char_len()),
            EditOp::Redo => field.redo().then(|| field.char_len()),
        };

        if outcome.is_none() {
            logging::log_debug("EDITOR", &format!("{:?} on {} was a no-op", op, id));
        }
        outcome
    }
}

fn copy_selection(
    field: &SnippetField,
    selection: &Range<usize>,
    clipboard: Option<&mut dyn ClipboardAccess>,
) -> bool {
    if selection.start == selection.end {
        return false;
    }
    let selected = field.selected_text(selection);
    if selected.is_empty() {
        return false;
    }
    clipboard.is_some_and(|c| c.set_text(selected))
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
