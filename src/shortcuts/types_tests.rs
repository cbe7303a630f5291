use super::types::*;
use global_hotkey::hotkey::{Code, HotKey, Modifiers};

#[test]
fn parse_bare_function_key() {
    let id: ShortcutId = "F1".parse().unwrap();
    assert_eq!(id, ShortcutId::function(1).unwrap());
    assert_eq!(id.to_string(), "F1");
}

#[test]
fn parse_shift_function_key() {
    let id: ShortcutId = "Shift+F6".parse().unwrap();
    assert_eq!(id, ShortcutId::shift_function(6).unwrap());
    assert_eq!(id.to_string(), "Shift+F6");
}

#[test]
fn parse_ctrl_digit() {
    let id: ShortcutId = "Ctrl+0".parse().unwrap();
    assert_eq!(id, ShortcutId::ctrl_digit(0).unwrap());
    assert_eq!(id.to_string(), "Ctrl+0");
}

#[test]
fn parse_is_case_insensitive_and_trims() {
    assert_eq!(
        " shift + f2 ".parse::<ShortcutId>().unwrap(),
        ShortcutId::shift_function(2).unwrap()
    );
    assert_eq!(
        "CTRL+7".parse::<ShortcutId>().unwrap(),
        ShortcutId::ctrl_digit(7).unwrap()
    );
    assert_eq!(
        "f10".parse::<ShortcutId>().unwrap(),
        ShortcutId::function(10).unwrap()
    );
}

#[test]
fn parse_errors() {
    assert_eq!("".parse::<ShortcutId>(), Err(ShortcutParseError::Empty));
    assert_eq!(
        "F13".parse::<ShortcutId>(),
        Err(ShortcutParseError::UnknownKey("F13".to_string()))
    );
    assert_eq!(
        "F0".parse::<ShortcutId>(),
        Err(ShortcutParseError::UnknownKey("F0".to_string()))
    );
    assert_eq!(
        "Alt+F1".parse::<ShortcutId>(),
        Err(ShortcutParseError::UnknownModifier("alt".to_string()))
    );
    assert_eq!(
        "Ctrl+F1".parse::<ShortcutId>(),
        Err(ShortcutParseError::InvalidCombination("F1".to_string()))
    );
    assert_eq!(
        "Ctrl+12".parse::<ShortcutId>(),
        Err(ShortcutParseError::UnknownKey("12".to_string()))
    );
    assert!("hello".parse::<ShortcutId>().is_err());
}

#[test]
fn display_parses_back_for_every_predefined_shortcut() {
    for id in ShortcutId::predefined() {
        assert_eq!(id.to_string().parse::<ShortcutId>().as_ref(), Ok(id));
    }
}

#[test]
fn combo_strings() {
    assert_eq!(ShortcutId::function(1).unwrap().combo(), "f1");
    assert_eq!(ShortcutId::function(10).unwrap().combo(), "f10");
    assert_eq!(ShortcutId::shift_function(3).unwrap().combo(), "shift+f3");
    assert_eq!(ShortcutId::ctrl_digit(9).unwrap().combo(), "ctrl+9");
}

#[test]
fn hotkeys_match_modifiers_and_codes() {
    assert_eq!(
        ShortcutId::function(4).unwrap().hotkey(),
        HotKey::new(None, Code::F4)
    );
    assert_eq!(
        ShortcutId::shift_function(12).unwrap().hotkey(),
        HotKey::new(Some(Modifiers::SHIFT), Code::F12)
    );
    assert_eq!(
        ShortcutId::ctrl_digit(5).unwrap().hotkey(),
        HotKey::new(Some(Modifiers::CONTROL), Code::Digit5)
    );
}

#[test]
fn predefined_hotkey_ids_are_unique() {
    let mut ids: Vec<u32> = ShortcutId::predefined()
        .iter()
        .map(|id| id.hotkey().id())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), ShortcutId::predefined().len());
}

#[test]
fn predefined_set_layout() {
    let predefined = ShortcutId::predefined();
    assert_eq!(predefined.len(), 24);
    assert_eq!(predefined[0].to_string(), "F1");
    assert!(!ShortcutId::function(3).unwrap().is_predefined());
    assert!(!ShortcutId::function(5).unwrap().is_predefined());
    assert!(ShortcutId::shift_function(6).unwrap().is_predefined());
    assert!(!ShortcutId::shift_function(7).unwrap().is_predefined());
}

#[test]
fn groups_partition_predefined_set() {
    let fkeys: Vec<String> = ShortcutGroup::FunctionKeys
        .members()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(fkeys, ["F1", "F2", "F4", "F6", "F7", "F8", "F9", "F10"]);

    assert_eq!(ShortcutGroup::ShiftFunctionKeys.members().count(), 6);
    assert_eq!(ShortcutGroup::CtrlDigits.members().count(), 10);

    let total: usize = ShortcutGroup::ALL.iter().map(|g| g.members().count()).sum();
    assert_eq!(total, ShortcutId::predefined().len());
}

#[test]
fn group_labels() {
    assert_eq!(ShortcutGroup::FunctionKeys.label(), "F-keys");
    assert_eq!(ShortcutGroup::ShiftFunctionKeys.label(), "Shift + F-keys");
    assert_eq!(ShortcutGroup::CtrlDigits.label(), "Ctrl + Numbers");
}
