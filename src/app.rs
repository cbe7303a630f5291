//! The snippet editor window.
//!
//! Layout: toolbar (Save / Paste / Undo / Redo), one tab per shortcut group
//! with a multiline field and a Test button per shortcut, and a status bar.
//! Closing the window hides it while a tray icon exists; the tray's Exit
//! is the only way out in that case.

use std::fs;
use std::ops::Range;
use std::sync::Arc;

use eframe::egui::{
    self,
    text::{CCursor, CCursorRange},
    Context, Id, Key, Modifiers, TextEdit, ViewportCommand,
};
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::editor::{ClipboardAccess, EditOp, EditorModel};
use crate::error::ResultExt;
use crate::hotkeys::{spawn_listener, DispatchTable, HotkeyDispatcher};
use crate::logging;
use crate::session::Session;
use crate::shortcuts::{ShortcutGroup, ShortcutId};
use crate::text_injector::{TextInjector, TextSink};
use crate::tray::{self, TrayMenuAction, TrayMenuIds};

pub const APP_TITLE: &str = "Text Typer";
const SAVED_MESSAGE: &str = "Configuration saved successfully!";

/// Fraction of the monitor the window takes on first show.
const WINDOW_WIDTH_FRACTION: f32 = 0.6;
const WINDOW_HEIGHT_FRACTION: f32 = 0.8;

/// System fonts with Hebrew coverage, tried in order.
const FALLBACK_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// User actions collected while drawing, applied once the frame's editor
/// lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiAction {
    Save,
    Edit(ShortcutId, EditOp),
    /// Toolbar edit on whichever field was focused last
    EditFocused(EditOp),
    Test(ShortcutId),
    Focused(ShortcutId),
    Unfocused,
}

pub struct TextTyperApp {
    session: Arc<Session>,
    injector: Arc<TextInjector>,
    /// None when the OS refused a hotkey manager
    dispatcher: Option<HotkeyDispatcher>,
    clipboard: Option<arboard::Clipboard>,
    active_tab: ShortcutGroup,
    confirm_save: bool,
    notice: Option<String>,
    has_tray: bool,
    sized: bool,
    #[cfg(not(target_os = "linux"))]
    _tray: Option<tray::TrayManager>,
}

impl TextTyperApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: Arc<Session>,
        injector: Arc<TextInjector>,
        settings: &Settings,
    ) -> Self {
        setup_fonts(&cc.egui_ctx);

        let dispatcher = start_hotkeys(&session, &injector);
        let table = dispatcher.as_ref().map(HotkeyDispatcher::table);

        #[cfg(not(target_os = "linux"))]
        let tray_manager = tray::TrayManager::new().log_err();
        #[cfg(not(target_os = "linux"))]
        let tray_ids = tray_manager.as_ref().map(tray::TrayManager::menu_ids);
        #[cfg(target_os = "linux")]
        let tray_ids = tray::spawn_gtk_tray().log_err();

        let has_tray = tray_ids.is_some();
        if let Some(ids) = tray_ids {
            install_tray_handler(ids, cc.egui_ctx.clone(), Arc::clone(&session), table);
        } else {
            warn!("No tray icon, closing the window will exit");
        }

        Self {
            session,
            injector,
            dispatcher,
            clipboard: arboard::Clipboard::new().warn_on_err(),
            active_tab: ShortcutGroup::FunctionKeys,
            confirm_save: settings.confirm_save,
            notice: None,
            has_tray,
            sized: false,
            #[cfg(not(target_os = "linux"))]
            _tray: tray_manager,
        }
    }

    fn draw_toolbar(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                actions.push(UiAction::Save);
            }
            ui.separator();
            for op in [EditOp::Paste, EditOp::Undo, EditOp::Redo] {
                if ui.button(op.label()).clicked() {
                    actions.push(UiAction::EditFocused(op));
                }
            }
        });
    }

    fn draw_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for group in ShortcutGroup::ALL {
                ui.selectable_value(&mut self.active_tab, group, group.label());
            }
        });
    }

    fn draw_fields(
        &self,
        ui: &mut egui::Ui,
        editor: &mut EditorModel,
        actions: &mut Vec<UiAction>,
    ) {
        let group = self.active_tab;
        let field_width = (ui.available_width() - 160.0).max(240.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                egui::Grid::new(("snippet-grid", group.label()))
                    .num_columns(3)
                    .spacing([12.0, 10.0])
                    .show(ui, |ui| {
                        for shortcut in group.members() {
                            let Some(field) = editor.field_mut(&shortcut) else {
                                continue;
                            };
                            let id = field_id(shortcut);

                            ui.label(format!("{}:", shortcut));

                            // Undo/redo go through the field history, not egui's
                            if ui.ctx().memory(|m| m.has_focus(id)) {
                                if let Some(op) = consume_history_keys(ui.ctx()) {
                                    actions.push(UiAction::Edit(shortcut, op));
                                }
                            }

                            let before = field.text.clone();
                            let response = ui.add(
                                TextEdit::multiline(&mut field.text)
                                    .id(id)
                                    .desired_rows(4)
                                    .desired_width(field_width),
                            );
                            if response.changed() {
                                field.commit_edit(before);
                            }
                            if response.gained_focus() {
                                actions.push(UiAction::Focused(shortcut));
                            }
                            if response.lost_focus() {
                                actions.push(UiAction::Unfocused);
                            }
                            response.context_menu(|ui| {
                                for op in [EditOp::Cut, EditOp::Copy, EditOp::Paste] {
                                    if ui.button(op.label()).clicked() {
                                        actions.push(UiAction::Edit(shortcut, op));
                                        ui.close();
                                    }
                                }
                                ui.separator();
                                for op in [EditOp::Undo, EditOp::Redo] {
                                    if ui.button(op.label()).clicked() {
                                        actions.push(UiAction::Edit(shortcut, op));
                                        ui.close();
                                    }
                                }
                            });

                            if ui.button("Test").clicked() {
                                actions.push(UiAction::Test(shortcut));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_notice(&mut self, ctx: &Context) {
        let Some(message) = self.notice.as_deref() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Success")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.notice = None;
        }
    }

    fn apply_actions(&mut self, ctx: &Context, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::Save => self.save(),
                UiAction::Edit(shortcut, op) => self.edit(ctx, shortcut, op),
                UiAction::EditFocused(op) => {
                    let focused = self.session.editor().lock().last_focused();
                    if let Some(shortcut) = focused {
                        self.edit(ctx, shortcut, op);
                    }
                }
                UiAction::Test(shortcut) => self.test(shortcut),
                UiAction::Focused(shortcut) => self.session.editor().lock().focus_gained(shortcut),
                UiAction::Unfocused => self.session.editor().lock().focus_lost(),
            }
        }
    }

    /// Persist the drafts, then re-register every hotkey with the saved text.
    fn save(&mut self) {
        match self.session.save() {
            Ok(mapping) => {
                if let Some(dispatcher) = self.dispatcher.as_mut() {
                    let report = dispatcher.register(&mapping);
                    for (shortcut, reason) in &report.failed {
                        warn!(%shortcut, %reason, "Hotkey not registered");
                    }
                }
                if self.confirm_save {
                    self.notice = Some(SAVED_MESSAGE.to_string());
                }
                info!("Configuration saved");
            }
            Err(e) => {
                error!(error = %e, "Save failed");
                self.session.editor().lock().set_status(e.user_message());
            }
        }
    }

    fn edit(&mut self, ctx: &Context, shortcut: ShortcutId, op: EditOp) {
        let id = field_id(shortcut);
        let mut state = TextEdit::load_state(ctx, id).unwrap_or_default();
        let selection = state
            .cursor
            .char_range()
            .map(|range| ordered(range.primary.index, range.secondary.index))
            .unwrap_or(0..0);

        let clipboard = self
            .clipboard
            .as_mut()
            .map(|c| c as &mut dyn ClipboardAccess);
        let cursor = self
            .session
            .editor()
            .lock()
            .apply_op(&shortcut, op, selection, clipboard);

        if let Some(cursor) = cursor {
            state
                .cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(cursor))));
            state.store(ctx, id);
        }
        ctx.memory_mut(|m| m.request_focus(id));
    }

    /// Type the field's current (possibly unsaved) text.
    fn test(&self, shortcut: ShortcutId) {
        let text = self
            .session
            .editor()
            .lock()
            .field(&shortcut)
            .map(|f| f.text.clone())
            .unwrap_or_default();
        let injector = Arc::clone(&self.injector);
        let spawned = std::thread::Builder::new()
            .name("snippet-test".to_string())
            .spawn(move || injector.type_text(&text));
        if let Err(e) = spawned {
            error!(error = %e, %shortcut, "Failed to start test typing");
        }
    }

    fn size_to_monitor(&mut self, ctx: &Context) {
        if self.sized {
            return;
        }
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let size = egui::vec2(
                monitor.x * WINDOW_WIDTH_FRACTION,
                monitor.y * WINDOW_HEIGHT_FRACTION,
            );
            ctx.send_viewport_cmd(ViewportCommand::InnerSize(size));
            self.sized = true;
        }
    }

    fn handle_close(&mut self, ctx: &Context) {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return;
        }
        if self.has_tray {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(ViewportCommand::Visible(false));
            logging::log("APP", "Window hidden to tray");
            return;
        }
        // No tray to come back from: shut down for real
        self.session
            .shutdown(self.dispatcher.as_ref().map(HotkeyDispatcher::table).as_ref())
            .log_err();
        if let Some(dispatcher) = self.dispatcher.as_mut() {
            dispatcher.unregister_all();
        }
    }
}

impl eframe::App for TextTyperApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.size_to_monitor(ctx);
        self.handle_close(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &mut actions);
        });

        let status = self.session.editor().lock().status().to_string();
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_tabs(ui);
            ui.separator();
            let session = Arc::clone(&self.session);
            let mut editor = session.editor().lock();
            self.draw_fields(ui, &mut editor, &mut actions);
        });

        self.draw_notice(ctx);
        self.apply_actions(ctx, actions);
    }
}

fn field_id(shortcut: ShortcutId) -> Id {
    Id::new(("snippet", shortcut))
}

fn ordered(a: usize, b: usize) -> Range<usize> {
    a.min(b)..a.max(b)
}

/// Ctrl+Z undoes; Ctrl+Y and Ctrl+Shift+Z redo.
fn consume_history_keys(ctx: &Context) -> Option<EditOp> {
    ctx.input_mut(|i| {
        if i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
            || i.consume_key(Modifiers::COMMAND, Key::Y)
        {
            Some(EditOp::Redo)
        } else if i.consume_key(Modifiers::COMMAND, Key::Z) {
            Some(EditOp::Undo)
        } else {
            None
        }
    })
}

fn start_hotkeys(session: &Session, injector: &Arc<TextInjector>) -> Option<HotkeyDispatcher> {
    let mut dispatcher = HotkeyDispatcher::system().log_err()?;
    let report = dispatcher.register(&session.mapping());
    for (shortcut, reason) in &report.failed {
        warn!(%shortcut, %reason, "Hotkey not registered");
    }

    let sink: Arc<dyn TextSink> = Arc::clone(injector) as Arc<dyn TextSink>;
    spawn_listener(dispatcher.table(), sink).log_err();
    Some(dispatcher)
}

/// Tray clicks arrive off the UI thread, possibly while the window is hidden
/// and not repainting, so they act through the shared session and viewport
/// commands directly.
fn install_tray_handler(
    ids: TrayMenuIds,
    ctx: Context,
    session: Arc<Session>,
    table: Option<DispatchTable>,
) {
    tray::set_menu_handler(ids, move |action| match action {
        TrayMenuAction::ShowConfig => {
            ctx.send_viewport_cmd(ViewportCommand::Visible(true));
            ctx.send_viewport_cmd(ViewportCommand::Minimized(false));
            ctx.send_viewport_cmd(ViewportCommand::Focus);
            ctx.request_repaint();
        }
        TrayMenuAction::Exit => {
            session.shutdown(table.as_ref()).log_err();
            logging::log("APP", "Exiting from tray");
            session.release_exit_guards();
            // OS hotkey registrations are released with the process
            std::process::exit(0);
        }
    });
}

/// Add a system font with Hebrew coverage behind egui's defaults.
fn setup_fonts(ctx: &Context) {
    let mut fonts = egui::FontDefinitions::default();

    let loaded = FALLBACK_FONTS
        .iter()
        .find_map(|path| fs::read(path).ok().map(|data| (*path, data)));

    match loaded {
        Some((path, data)) => {
            fonts.font_data.insert(
                "system-fallback".to_owned(),
                egui::FontData::from_owned(data).into(),
            );
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                fonts
                    .families
                    .entry(family)
                    .or_default()
                    .push("system-fallback".to_owned());
            }
            info!(path, "Loaded fallback font");
        }
        None => warn!("No fallback font found, non-Latin snippets may not render"),
    }

    ctx.set_fonts(fonts);
}
