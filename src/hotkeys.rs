use global_hotkey::{
    hotkey::HotKey, Error as HotkeyError, GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::config::SnippetMap;
use crate::logging;
use crate::shortcuts::ShortcutId;
use crate::text_injector::TextSink;

// =============================================================================
// OS backend
// =============================================================================

/// The OS-level hotkey facility. Implemented for [`GlobalHotKeyManager`];
/// tests substitute a recording fake.
pub trait HotkeyBackend {
    fn register(&self, hotkey: HotKey) -> Result<(), HotkeyError>;
    fn unregister(&self, hotkey: HotKey) -> Result<(), HotkeyError>;
}

impl HotkeyBackend for GlobalHotKeyManager {
    fn register(&self, hotkey: HotKey) -> Result<(), HotkeyError> {
        GlobalHotKeyManager::register(self, hotkey)
    }

    fn unregister(&self, hotkey: HotKey) -> Result<(), HotkeyError> {
        GlobalHotKeyManager::unregister(self, hotkey)
    }
}

/// Format a hotkey registration error with helpful context
fn format_hotkey_error(e: &HotkeyError, shortcut: &ShortcutId) -> String {
    match e {
        HotkeyError::AlreadyRegistered(hk) => format!(
            "Hotkey '{}' is already registered by another application (ID: {}). \
             Close the conflicting app or leave this snippet unused.",
            shortcut,
            hk.id()
        ),
        HotkeyError::FailedToRegister(msg) => format!(
            "System rejected hotkey '{}': {}. This shortcut may be reserved by the OS.",
            shortcut, msg
        ),
        HotkeyError::OsError(os_err) => {
            format!("OS error registering '{}': {}", shortcut, os_err)
        }
        other => format!("Failed to register hotkey '{}': {}", shortcut, other),
    }
}

// =============================================================================
// Dispatch table
// =============================================================================

/// What a registered hotkey types: the shortcut and the snippet text as it
/// was when `register` ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub shortcut: ShortcutId,
    pub text: Arc<str>,
}

/// Hotkey id → binding, shared between the GUI thread (writer) and the
/// listener thread (reader). Replaced wholesale on every registration.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    inner: Arc<RwLock<HashMap<u32, Binding>>>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, hotkey_id: u32) -> Option<Binding> {
        self.inner.read().get(&hotkey_id).cloned()
    }

    fn replace(&self, bindings: HashMap<u32, Binding>) {
        *self.inner.write() = bindings;
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Route one hotkey event. Only presses dispatch; the lock is released
/// before typing starts. Returns the shortcut that fired, if any.
pub fn dispatch_event(
    table: &DispatchTable,
    sink: &dyn TextSink,
    hotkey_id: u32,
    state: HotKeyState,
) -> Option<ShortcutId> {
    if state != HotKeyState::Pressed {
        return None;
    }

    let binding = table.lookup(hotkey_id)?;
    logging::log(
        "HOTKEY",
        &format!(
            "{} pressed (id: {}) - typing {} chars",
            binding.shortcut,
            hotkey_id,
            binding.text.chars().count()
        ),
    );
    sink.type_text(&binding.text);
    Some(binding.shortcut)
}

/// Spawn the thread that drains OS hotkey events and types the bound
/// snippets. Runs for the rest of the process.
pub fn spawn_listener(
    table: DispatchTable,
    sink: Arc<dyn TextSink>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("hotkey-listener".to_string())
        .spawn(move || {
            logging::log("HOTKEY", "Hotkey listener started");
            let receiver = GlobalHotKeyEvent::receiver();
            while let Ok(event) = receiver.recv() {
                dispatch_event(&table, sink.as_ref(), event.id, event.state);
            }
            logging::log("HOTKEY", "Hotkey event channel closed, listener exiting");
        })
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Outcome of one `register` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistrationReport {
    pub registered: Vec<ShortcutId>,
    /// Shortcuts the OS refused, with a readable reason
    pub failed: Vec<(ShortcutId, String)>,
}

/// Owns the OS hotkey registrations for every snippet.
///
/// NOTE: With the real backend this must be created and used on the main
/// thread.
pub struct HotkeyDispatcher<B: HotkeyBackend = GlobalHotKeyManager> {
    backend: B,
    /// Hotkeys installed by the last `register` call
    installed: Vec<(ShortcutId, HotKey)>,
    table: DispatchTable,
}

impl HotkeyDispatcher<GlobalHotKeyManager> {
    /// Create a dispatcher backed by the OS hotkey manager.
    pub fn system() -> crate::error::Result<Self> {
        Ok(Self::with_backend(GlobalHotKeyManager::new()?))
    }
}

impl<B: HotkeyBackend> HotkeyDispatcher<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            installed: Vec::new(),
            table: DispatchTable::new(),
        }
    }

    /// Handle to the dispatch table for the listener thread.
    pub fn table(&self) -> DispatchTable {
        self.table.clone()
    }

    /// Replace every registration with one per mapping entry.
    ///
    /// Previous hotkeys are unregistered first; the new table is swapped in
    /// at the end, so a stale binding can't be looked up once this returns.
    pub fn register(&mut self, mapping: &SnippetMap) -> RegistrationReport {
        self.unregister_os_hotkeys();

        let mut report = RegistrationReport::default();
        let mut bindings = HashMap::with_capacity(mapping.len());

        for (shortcut, text) in mapping.snapshot() {
            let hotkey = shortcut.hotkey();
            match self.backend.register(hotkey) {
                Ok(()) => {
                    bindings.insert(hotkey.id(), Binding { shortcut, text });
                    self.installed.push((shortcut, hotkey));
                    report.registered.push(shortcut);
                    logging::log_debug(
                        "HOTKEY",
                        &format!(
                            "Registered '{}' for {} (id: {})",
                            shortcut.combo(),
                            shortcut,
                            hotkey.id()
                        ),
                    );
                }
                Err(e) => {
                    let message = format_hotkey_error(&e, &shortcut);
                    logging::log("HOTKEY", &message);
                    report.failed.push((shortcut, message));
                }
            }
        }

        self.table.replace(bindings);
        logging::log(
            "HOTKEY",
            &format!(
                "Registered {} snippet hotkeys ({} failed)",
                report.registered.len(),
                report.failed.len()
            ),
        );
        report
    }

    /// Drop every OS registration and clear the dispatch table.
    pub fn unregister_all(&mut self) {
        self.unregister_os_hotkeys();
        self.table.clear();
        logging::log("HOTKEY", "Unregistered all snippet hotkeys");
    }

    fn unregister_os_hotkeys(&mut self) {
        for (shortcut, hotkey) in self.installed.drain(..) {
            if let Err(e) = self.backend.unregister(hotkey) {
                // Continue anyway - the next registration starts clean
                logging::log(
                    "HOTKEY",
                    &format!(
                        "Warning: Failed to unregister {} (id: {}): {}",
                        shortcut,
                        hotkey.id(),
                        e
                    ),
                );
            }
        }
    }

    /// Shortcuts currently registered with the OS, in registration order.
    pub fn registered_shortcuts(&self) -> Vec<ShortcutId> {
        self.installed.iter().map(|(shortcut, _)| *shortcut).collect()
    }
}

#[cfg(test)]
#[path = "hotkeys_tests.rs"]
mod tests;
