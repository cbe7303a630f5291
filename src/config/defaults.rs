//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Snippet file, relative to the working directory
pub const DEFAULT_SNIPPETS_PATH: &str = "config.txt";

/// Pause before typing so the hotkey's own key-up doesn't race the injection
pub const DEFAULT_INJECT_DELAY_MS: u64 = 100;

/// Show the "saved" notice after each save
pub const DEFAULT_CONFIRM_SAVE: bool = true;

/// Separates the shortcut identifier from its text in the snippet file
pub const RECORD_DELIMITER: &str = "@@";

/// Built-in snippets written on first run, as (identifier, text) pairs.
/// Every predefined shortcut appears exactly once, in editor order.
pub const DEFAULT_SNIPPETS: &[(&str, &str)] = &[
    ("F1", "ערב טוב כאן עומר מתכנית עמית במה אוכל לעזור?"),
    ("F2", "היי,  האם קיבלת SMS שמודיע כי נוספת למערכת?"),
    (
        "F4",
        ".אם עשית מעל 30 ימי מילואים, אתה זכאי לתכנית.\n\
         עם זאת, טרם נפתח חשבון  לכל הזכאים.\n\
         בחודש הקרוב לכל הזכאים הנותרים יקבלו SMS שמודיע להם כי חשבונתם התווסף למערכת.",
    ),
    ("F6", ""),
    ("F7", ""),
    ("F8", "משהו נוסף שאוכל לעזור?"),
    ("F9", ""),
    ("F10", "המשך יום מקסים!"),
    ("Shift+F1", ""),
    ("Shift+F2", ""),
    ("Shift+F3", ""),
    ("Shift+F4", ""),
    ("Shift+F5", ""),
    ("Shift+F6", ""),
    ("Ctrl+0", ""),
    ("Ctrl+1", ""),
    ("Ctrl+2", ""),
    ("Ctrl+3", ""),
    ("Ctrl+4", ""),
    ("Ctrl+5", ""),
    ("Ctrl+6", ""),
    ("Ctrl+7", ""),
    ("Ctrl+8", ""),
    ("Ctrl+9", ""),
];
