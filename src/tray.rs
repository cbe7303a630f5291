//! System tray icon management for Text Typer
//!
//! Provides a TrayManager with a two-item context menu ("Show Config" and
//! "Exit"). The icon is rendered from an embedded SVG.

use anyhow::{Context, Result};
use tray_icon::{
    menu::{Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem},
    Icon, TrayIcon, TrayIconBuilder,
};

use crate::logging;

/// SVG logo (64x64): blue key cap with a text cursor
const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
  <rect x="4" y="4" width="56" height="56" rx="10" fill="#1f5fd6"/>
  <rect x="12" y="12" width="40" height="40" rx="6" fill="#3b7bf0"/>
  <path fill="#ffffff" d="M20 22h24v5H34.5v19h-5V27H20z"/>
</svg>"##;

const TOOLTIP: &str = "Text Typer";

/// Menu item identifiers for matching events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    ShowConfig,
    Exit,
}

/// Menu ids, separate from the icon so they can be matched from any thread.
#[derive(Debug, Clone)]
pub struct TrayMenuIds {
    show_config: MenuId,
    exit: MenuId,
}

impl TrayMenuIds {
    pub fn new(show_config: MenuId, exit: MenuId) -> Self {
        Self { show_config, exit }
    }

    /// Matches a menu event id to a TrayMenuAction
    pub fn match_id(&self, id: &MenuId) -> Option<TrayMenuAction> {
        if id == &self.show_config {
            Some(TrayMenuAction::ShowConfig)
        } else if id == &self.exit {
            Some(TrayMenuAction::Exit)
        } else {
            None
        }
    }
}

/// Manages the system tray icon and menu
pub struct TrayManager {
    _tray_icon: TrayIcon,
    ids: TrayMenuIds,
}

impl TrayManager {
    /// Creates the tray icon and its menu
    ///
    /// # Errors
    /// Returns an error if the icon can't be rendered or the OS refuses the
    /// tray icon.
    pub fn new() -> Result<Self> {
        let icon = Self::create_icon_from_svg()?;
        let (menu, ids) = Self::create_menu()?;

        let tray_icon = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(TOOLTIP)
            .with_menu(Box::new(menu))
            .build()
            .context("Failed to create tray icon")?;

        logging::log("TRAY", "Tray icon created");
        Ok(Self {
            _tray_icon: tray_icon,
            ids,
        })
    }

    /// Converts the embedded SVG logo to an RGBA icon
    fn create_icon_from_svg() -> Result<Icon> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_str(LOGO_SVG, &opts).context("Failed to parse SVG")?;

        let size = tree.size();
        let width = size.width() as u32;
        let height = size.height() as u32;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).context("Failed to create pixmap")?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Icon::from_rgba(pixmap.take(), width, height)
            .context("Failed to create icon from RGBA data")
    }

    /// Menu structure:
    /// 1. Show Config
    /// 2. ---
    /// 3. Exit
    fn create_menu() -> Result<(Menu, TrayMenuIds)> {
        let menu = Menu::new();

        let show_item = MenuItem::new("Show Config", true, None);
        let exit_item = MenuItem::new("Exit", true, None);
        let ids = TrayMenuIds::new(show_item.id().clone(), exit_item.id().clone());

        menu.append(&show_item)
            .context("Failed to add Show Config item")?;
        menu.append(&PredefinedMenuItem::separator())
            .context("Failed to add separator")?;
        menu.append(&exit_item).context("Failed to add Exit item")?;

        Ok((menu, ids))
    }

    pub fn menu_ids(&self) -> TrayMenuIds {
        self.ids.clone()
    }
}

/// Route tray menu clicks to `handler`, on whatever thread the menu system
/// delivers them.
pub fn set_menu_handler<F>(ids: TrayMenuIds, handler: F)
where
    F: Fn(TrayMenuAction) + Send + Sync + 'static,
{
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        match ids.match_id(&event.id) {
            Some(action) => {
                logging::log("TRAY", &format!("Menu action: {:?}", action));
                handler(action);
            }
            None => logging::log_debug("TRAY", &format!("Unknown menu id: {:?}", event.id)),
        }
    }));
}

/// On Linux the tray needs a GTK main loop, so it lives on its own thread.
/// The menu ids are sent back once the icon exists.
#[cfg(target_os = "linux")]
pub fn spawn_gtk_tray() -> Result<TrayMenuIds> {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::Builder::new()
        .name("tray-gtk".to_string())
        .spawn(move || {
            if let Err(e) = gtk::init() {
                let _ = tx.send(Err(anyhow::anyhow!("Failed to initialize GTK: {}", e)));
                return;
            }
            match TrayManager::new() {
                Ok(tray) => {
                    let _ = tx.send(Ok(tray.menu_ids()));
                    // Keep the icon alive for the GTK loop's lifetime
                    let _tray = tray;
                    gtk::main();
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                }
            }
        })
        .context("Failed to spawn tray thread")?;

    rx.recv().context("Tray thread exited before creating the icon")?
}
