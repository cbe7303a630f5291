//! Live editing session shared by the window and the tray.
//!
//! The tray's Exit runs on the menu-event thread while the window may be
//! hidden, so the mapping and the editor drafts sit behind locks that either
//! side can take.
//!
//! The session also holds the process-lifetime guards (PID file, log
//! writer). Exit ends with `process::exit`, which runs no destructors, so
//! they are released explicitly first.

use parking_lot::Mutex;
use tracing::{info, instrument};

use crate::config::{SnippetMap, SnippetStore};
use crate::editor::EditorModel;
use crate::error::Result;
use crate::hotkeys::DispatchTable;
use crate::logging::LoggingGuard;
use crate::single_instance::InstanceGuard;

/// Guards that must be dropped before the process ends.
#[derive(Default)]
pub struct ExitGuards {
    pub instance: Option<InstanceGuard>,
    pub logging: Option<LoggingGuard>,
}

pub struct Session {
    store: SnippetStore,
    mapping: Mutex<SnippetMap>,
    editor: Mutex<EditorModel>,
    exit_guards: Mutex<ExitGuards>,
}

impl Session {
    pub fn new(store: SnippetStore, mapping: SnippetMap) -> Self {
        let editor = EditorModel::from_mapping(&mapping);
        Self {
            store,
            mapping: Mutex::new(mapping),
            editor: Mutex::new(editor),
            exit_guards: Mutex::new(ExitGuards::default()),
        }
    }

    pub fn store(&self) -> &SnippetStore {
        &self.store
    }

    /// Copy of the last saved mapping.
    pub fn mapping(&self) -> SnippetMap {
        self.mapping.lock().clone()
    }

    pub fn editor(&self) -> &Mutex<EditorModel> {
        &self.editor
    }

    /// Fold every editor field into the mapping and write it to disk.
    /// Returns the mapping that was saved.
    #[instrument(skip(self))]
    pub fn save(&self) -> Result<SnippetMap> {
        let mut mapping = self.mapping.lock();
        self.editor.lock().apply_to(&mut mapping);
        self.store.save(&mapping)?;
        Ok(mapping.clone())
    }

    /// Persist unsaved edits and stop dispatching hotkeys.
    ///
    /// The table is cleared even when the save fails.
    pub fn shutdown(&self, table: Option<&DispatchTable>) -> Result<()> {
        let saved = self.save();
        if let Some(table) = table {
            table.clear();
        }
        info!(saved = saved.is_ok(), "Session shut down");
        saved.map(|_| ())
    }

    pub fn hold_until_exit(&self, guards: ExitGuards) {
        *self.exit_guards.lock() = guards;
    }

    /// Remove the PID file, then flush and close the log file. Later calls
    /// do nothing.
    pub fn release_exit_guards(&self) {
        let ExitGuards { instance, logging } = std::mem::take(&mut *self.exit_guards.lock());
        if let Some(instance) = instance {
            info!(path = %instance.path().display(), "Releasing instance lock");
            drop(instance);
        }
        drop(logging);
    }
}
