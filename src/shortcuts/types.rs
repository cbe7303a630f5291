//! Shortcut identifiers for snippet bindings.
//!
//! This module provides:
//! - `ShortcutId` - One bindable key combination (F-key, Shift+F-key, Ctrl+digit)
//! - `ShortcutGroup` - The editor tab a shortcut belongs to
//! - `ShortcutParseError` - Detailed parse errors for config file keys
//!
//! The display form (`F1`, `Shift+F1`, `Ctrl+0`) is the key written to the
//! snippet file. The combo form (`f1`, `shift+f1`, `ctrl+0`) is the OS-level
//! key-combination string.

use std::fmt;
use std::str::FromStr;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use thiserror::Error;

/// Errors that can occur when parsing a shortcut identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("shortcut identifier is empty")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("'{0}' cannot be combined with this modifier")]
    InvalidCombination(String),
}

const FUNCTION_CODES: [Code; 12] = [
    Code::F1,
    Code::F2,
    Code::F3,
    Code::F4,
    Code::F5,
    Code::F6,
    Code::F7,
    Code::F8,
    Code::F9,
    Code::F10,
    Code::F11,
    Code::F12,
];

const DIGIT_CODES: [Code; 10] = [
    Code::Digit0,
    Code::Digit1,
    Code::Digit2,
    Code::Digit3,
    Code::Digit4,
    Code::Digit5,
    Code::Digit6,
    Code::Digit7,
    Code::Digit8,
    Code::Digit9,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum ShortcutKind {
    Function,
    ShiftFunction,
    CtrlDigit,
}

/// A bindable key combination.
///
/// Function keys are numbered 1..=12, digits 0..=9. The fields are private so
/// every value maps to exactly one OS hotkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShortcutId {
    kind: ShortcutKind,
    number: u8,
}

impl ShortcutId {
    /// Bare function key `F<n>`.
    pub fn function(n: u8) -> Result<Self, ShortcutParseError> {
        if (1..=12).contains(&n) {
            Ok(Self::new(ShortcutKind::Function, n))
        } else {
            Err(ShortcutParseError::UnknownKey(format!("F{}", n)))
        }
    }

    /// `Shift+F<n>`.
    pub fn shift_function(n: u8) -> Result<Self, ShortcutParseError> {
        if (1..=12).contains(&n) {
            Ok(Self::new(ShortcutKind::ShiftFunction, n))
        } else {
            Err(ShortcutParseError::UnknownKey(format!("F{}", n)))
        }
    }

    /// `Ctrl+<d>`.
    pub fn ctrl_digit(d: u8) -> Result<Self, ShortcutParseError> {
        if d <= 9 {
            Ok(Self::new(ShortcutKind::CtrlDigit, d))
        } else {
            Err(ShortcutParseError::UnknownKey(d.to_string()))
        }
    }

    const fn new(kind: ShortcutKind, number: u8) -> Self {
        Self { kind, number }
    }

    /// The fixed, ordered set of shortcuts the editor offers.
    pub fn predefined() -> &'static [ShortcutId] {
        &PREDEFINED
    }

    pub fn is_predefined(&self) -> bool {
        PREDEFINED.contains(self)
    }

    pub fn group(&self) -> ShortcutGroup {
        match self.kind {
            ShortcutKind::Function => ShortcutGroup::FunctionKeys,
            ShortcutKind::ShiftFunction => ShortcutGroup::ShiftFunctionKeys,
            ShortcutKind::CtrlDigit => ShortcutGroup::CtrlDigits,
        }
    }

    /// OS key-combination string: `f1`, `shift+f1`, `ctrl+0`.
    pub fn combo(&self) -> String {
        match self.kind {
            ShortcutKind::Function => format!("f{}", self.number),
            ShortcutKind::ShiftFunction => format!("shift+f{}", self.number),
            ShortcutKind::CtrlDigit => format!("ctrl+{}", self.number),
        }
    }

    fn code(&self) -> Code {
        match self.kind {
            ShortcutKind::Function | ShortcutKind::ShiftFunction => {
                FUNCTION_CODES[usize::from(self.number - 1)]
            }
            ShortcutKind::CtrlDigit => DIGIT_CODES[usize::from(self.number)],
        }
    }

    fn modifiers(&self) -> Option<Modifiers> {
        match self.kind {
            ShortcutKind::Function => None,
            ShortcutKind::ShiftFunction => Some(Modifiers::SHIFT),
            ShortcutKind::CtrlDigit => Some(Modifiers::CONTROL),
        }
    }

    /// The global hotkey this shortcut registers.
    pub fn hotkey(&self) -> HotKey {
        HotKey::new(self.modifiers(), self.code())
    }
}

impl fmt::Display for ShortcutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ShortcutKind::Function => write!(f, "F{}", self.number),
            ShortcutKind::ShiftFunction => write!(f, "Shift+F{}", self.number),
            ShortcutKind::CtrlDigit => write!(f, "Ctrl+{}", self.number),
        }
    }
}

fn parse_function_key(key: &str) -> Result<u8, ShortcutParseError> {
    let digits = key
        .strip_prefix('F')
        .or_else(|| key.strip_prefix('f'))
        .ok_or_else(|| ShortcutParseError::UnknownKey(key.to_string()))?;
    digits
        .parse::<u8>()
        .map_err(|_| ShortcutParseError::UnknownKey(key.to_string()))
}

impl FromStr for ShortcutId {
    type Err = ShortcutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }

        let Some((modifier, key)) = s.split_once('+') else {
            return parse_function_key(s).and_then(Self::function);
        };

        let key = key.trim();
        match modifier.trim().to_ascii_lowercase().as_str() {
            "shift" => parse_function_key(key).and_then(Self::shift_function),
            "ctrl" | "control" => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::ctrl_digit(c as u8 - b'0'),
                    _ if parse_function_key(key).is_ok() => {
                        Err(ShortcutParseError::InvalidCombination(key.to_string()))
                    }
                    _ => Err(ShortcutParseError::UnknownKey(key.to_string())),
                }
            }
            other => Err(ShortcutParseError::UnknownModifier(other.to_string())),
        }
    }
}

const PREDEFINED: [ShortcutId; 24] = [
    ShortcutId::new(ShortcutKind::Function, 1),
    ShortcutId::new(ShortcutKind::Function, 2),
    ShortcutId::new(ShortcutKind::Function, 4),
    ShortcutId::new(ShortcutKind::Function, 6),
    ShortcutId::new(ShortcutKind::Function, 7),
    ShortcutId::new(ShortcutKind::Function, 8),
    ShortcutId::new(ShortcutKind::Function, 9),
    ShortcutId::new(ShortcutKind::Function, 10),
    ShortcutId::new(ShortcutKind::ShiftFunction, 1),
    ShortcutId::new(ShortcutKind::ShiftFunction, 2),
    ShortcutId::new(ShortcutKind::ShiftFunction, 3),
    ShortcutId::new(ShortcutKind::ShiftFunction, 4),
    ShortcutId::new(ShortcutKind::ShiftFunction, 5),
    ShortcutId::new(ShortcutKind::ShiftFunction, 6),
    ShortcutId::new(ShortcutKind::CtrlDigit, 0),
    ShortcutId::new(ShortcutKind::CtrlDigit, 1),
    ShortcutId::new(ShortcutKind::CtrlDigit, 2),
    ShortcutId::new(ShortcutKind::CtrlDigit, 3),
    ShortcutId::new(ShortcutKind::CtrlDigit, 4),
    ShortcutId::new(ShortcutKind::CtrlDigit, 5),
    ShortcutId::new(ShortcutKind::CtrlDigit, 6),
    ShortcutId::new(ShortcutKind::CtrlDigit, 7),
    ShortcutId::new(ShortcutKind::CtrlDigit, 8),
    ShortcutId::new(ShortcutKind::CtrlDigit, 9),
];

/// Editor tab grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShortcutGroup {
    FunctionKeys,
    ShiftFunctionKeys,
    CtrlDigits,
}

impl ShortcutGroup {
    pub const ALL: [ShortcutGroup; 3] = [
        ShortcutGroup::FunctionKeys,
        ShortcutGroup::ShiftFunctionKeys,
        ShortcutGroup::CtrlDigits,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FunctionKeys => "F-keys",
            Self::ShiftFunctionKeys => "Shift + F-keys",
            Self::CtrlDigits => "Ctrl + Numbers",
        }
    }

    /// Predefined shortcuts of this group, in editor order.
    pub fn members(&self) -> impl Iterator<Item = ShortcutId> + '_ {
        PREDEFINED
            .iter()
            .copied()
            .filter(move |id| id.group() == *self)
    }
}
