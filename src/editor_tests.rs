use super::*;

#[derive(Default)]
struct FakeClipboard {
    contents: Option<String>,
    writable: bool,
}

impl FakeClipboard {
    fn holding(text: &str) -> Self {
        Self {
            contents: Some(text.to_string()),
            writable: true,
        }
    }

    fn empty() -> Self {
        Self {
            contents: None,
            writable: true,
        }
    }
}

impl ClipboardAccess for FakeClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &str) -> bool {
        if self.writable {
            self.contents = Some(text.to_string());
        }
        self.writable
    }
}

fn id(s: &str) -> ShortcutId {
    s.parse().unwrap()
}

fn model_with(shortcut: &str, text: &str) -> EditorModel {
    let mut mapping = SnippetMap::new();
    mapping.set(id(shortcut), text);
    EditorModel::from_mapping(&mapping)
}

fn text_of(model: &EditorModel, shortcut: &str) -> String {
    model.field(&id(shortcut)).unwrap().text.clone()
}

#[test]
fn test_from_mapping_has_one_field_per_predefined_shortcut() {
    let model = model_with("F2", "two");
    let ids: Vec<ShortcutId> = model.fields().iter().map(|f| f.shortcut()).collect();
    assert_eq!(ids, ShortcutId::predefined());
    assert_eq!(text_of(&model, "F2"), "two");
    assert_eq!(text_of(&model, "F1"), "");
    assert_eq!(model.status(), STATUS_READY);
}

#[test]
fn test_apply_to_keeps_non_predefined_entries() {
    let mut mapping = SnippetMap::new();
    mapping.set(id("F3"), "custom");
    mapping.set(id("F1"), "old");

    let mut model = EditorModel::from_mapping(&mapping);
    model.field_mut(&id("F1")).unwrap().text = "new".to_string();
    model.apply_to(&mut mapping);

    assert_eq!(mapping.get(&id("F1")), Some("new"));
    assert_eq!(mapping.get(&id("F3")), Some("custom"));
    assert_eq!(mapping.len(), ShortcutId::predefined().len() + 1);
}

#[test]
fn test_focus_updates_status() {
    let mut model = model_with("F1", "");
    model.focus_gained(id("Shift+F2"));
    assert_eq!(model.status(), "Editing Shift+F2");
    assert_eq!(model.last_focused(), Some(id("Shift+F2")));

    model.focus_lost();
    assert_eq!(model.status(), "Ready");
    // Toolbar actions still target the last field
    assert_eq!(model.last_focused(), Some(id("Shift+F2")));
}

#[test]
fn test_typing_then_undo_redo() {
    let mut field = SnippetField::new(id("F1"), "abc");
    let before = field.text.clone();
    field.text.push('d');
    field.commit_edit(before);

    assert!(field.undo());
    assert_eq!(field.text, "abc");
    assert!(field.redo());
    assert_eq!(field.text, "abcd");
    assert!(!field.redo());
}

#[test]
fn test_unchanged_commit_records_nothing() {
    let mut field = SnippetField::new(id("F1"), "abc");
    field.commit_edit("abc".to_string());
    assert!(!field.history().can_undo());
}

#[test]
fn test_undo_history_is_unlimited() {
    let mut field = SnippetField::new(id("F1"), "");
    for i in 0..500 {
        let before = field.text.clone();
        field.text.push_str(&i.to_string());
        field.commit_edit(before);
    }
    let mut undone = 0;
    while field.undo() {
        undone += 1;
    }
    assert_eq!(undone, 500);
    assert_eq!(field.text, "");
}

#[test]
fn test_new_edit_clears_redo() {
    let mut field = SnippetField::new(id("F1"), "a");
    let before = field.text.clone();
    field.text.push('b');
    field.commit_edit(before);
    field.undo();
    assert!(field.history().can_redo());

    let before = field.text.clone();
    field.text.push('c');
    field.commit_edit(before);
    assert!(!field.history().can_redo());
}

#[test]
fn test_copy_puts_selection_on_clipboard() {
    let mut model = model_with("F1", "hello world");
    let mut clipboard = FakeClipboard::empty();

    let cursor = model.apply_op(&id("F1"), EditOp::Copy, 6..11, Some(&mut clipboard));

    assert_eq!(cursor, None);
    assert_eq!(clipboard.contents.as_deref(), Some("world"));
    assert_eq!(text_of(&model, "F1"), "hello world");
}

#[test]
fn test_cut_removes_selection_and_is_undoable() {
    let mut model = model_with("F1", "hello world");
    let mut clipboard = FakeClipboard::empty();

    let cursor = model.apply_op(&id("F1"), EditOp::Cut, 5..11, Some(&mut clipboard));

    assert_eq!(cursor, Some(5));
    assert_eq!(text_of(&model, "F1"), "hello");
    assert_eq!(clipboard.contents.as_deref(), Some(" world"));

    model.apply_op(&id("F1"), EditOp::Undo, 0..0, None);
    assert_eq!(text_of(&model, "F1"), "hello world");
}

#[test]
fn test_cut_without_selection_does_nothing() {
    let mut model = model_with("F1", "hello");
    let mut clipboard = FakeClipboard::holding("keep");

    assert_eq!(
        model.apply_op(&id("F1"), EditOp::Cut, 3..3, Some(&mut clipboard)),
        None
    );
    assert_eq!(text_of(&model, "F1"), "hello");
    assert_eq!(clipboard.contents.as_deref(), Some("keep"));
}

#[test]
fn test_cut_keeps_text_when_clipboard_rejects_write() {
    let mut model = model_with("F1", "hello");
    let mut clipboard = FakeClipboard {
        contents: None,
        writable: false,
    };

    assert_eq!(
        model.apply_op(&id("F1"), EditOp::Cut, 0..5, Some(&mut clipboard)),
        None
    );
    assert_eq!(text_of(&model, "F1"), "hello");
}

#[test]
fn test_paste_inserts_at_cursor() {
    let mut model = model_with("F1", "helloworld");
    let mut clipboard = FakeClipboard::holding(", ");

    let cursor = model.apply_op(&id("F1"), EditOp::Paste, 5..5, Some(&mut clipboard));

    assert_eq!(cursor, Some(7));
    assert_eq!(text_of(&model, "F1"), "hello, world");
}

#[test]
fn test_paste_replaces_reversed_selection() {
    let mut model = model_with("F1", "hello world");
    let mut clipboard = FakeClipboard::holding("there");

    model.apply_op(&id("F1"), EditOp::Paste, 11..6, Some(&mut clipboard));

    assert_eq!(text_of(&model, "F1"), "hello there");
}

#[test]
fn test_paste_with_empty_clipboard_is_a_no_op() {
    let mut model = model_with("F1", "hello");
    let mut clipboard = FakeClipboard::empty();

    assert_eq!(
        model.apply_op(&id("F1"), EditOp::Paste, 0..0, Some(&mut clipboard)),
        None
    );
    assert_eq!(
        model.apply_op(&id("F1"), EditOp::Paste, 0..0, None),
        None
    );
    assert_eq!(text_of(&model, "F1"), "hello");
}

#[test]
fn test_selection_uses_char_indices() {
    let mut model = model_with("F4", "שלום world");
    let mut clipboard = FakeClipboard::empty();

    model.apply_op(&id("F4"), EditOp::Copy, 0..4, Some(&mut clipboard));
    assert_eq!(clipboard.contents.as_deref(), Some("שלום"));

    // Out-of-range ends clamp to the text
    model.apply_op(&id("F4"), EditOp::Copy, 5..99, Some(&mut clipboard));
    assert_eq!(clipboard.contents.as_deref(), Some("world"));
}

#[test]
fn test_ops_on_unknown_field_are_ignored() {
    let mut model = model_with("F1", "x");
    let mut clipboard = FakeClipboard::holding("y");
    assert_eq!(
        model.apply_op(&id("F3"), EditOp::Paste, 0..0, Some(&mut clipboard)),
        None
    );
}

#[test]
fn test_edit_op_labels() {
    let labels: Vec<&str> = [EditOp::Cut, EditOp::Copy, EditOp::Paste, EditOp::Undo, EditOp::Redo]
        .iter()
        .map(EditOp::label)
        .collect();
    assert_eq!(labels, vec!["Cut", "Copy", "Paste", "Undo", "Redo"]);
}
