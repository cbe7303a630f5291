use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use text_typer::app::{TextTyperApp, APP_TITLE};
use text_typer::config::{load_settings, SnippetStore};
use text_typer::error::TextTyperError;
use text_typer::logging;
use text_typer::session::{ExitGuards, Session};
use text_typer::single_instance::{default_pid_path, InstanceGuard};
use text_typer::text_injector::{TextInjector, TextInjectorConfig};

fn main() -> Result<()> {
    let log_guard = logging::init();
    let settings = load_settings();

    let instance = match InstanceGuard::acquire(default_pid_path()) {
        Ok(guard) => guard,
        Err(e @ TextTyperError::AlreadyRunning { .. }) => {
            show_error(&e.user_message());
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to acquire the instance lock"),
    };

    let store = SnippetStore::new(&settings.snippets_path);
    let mapping = store
        .load()
        .with_context(|| format!("Failed to load snippets from {}", store.path().display()))?;
    logging::log(
        "APP",
        &format!(
            "Loaded {} snippets from {}",
            mapping.len(),
            store.path().display()
        ),
    );

    let session = Arc::new(Session::new(store, mapping));
    session.hold_until_exit(ExitGuards {
        instance: Some(instance),
        logging: Some(log_guard),
    });
    let app_session = Arc::clone(&session);
    let injector = Arc::new(TextInjector::with_config(TextInjectorConfig {
        pre_delay_ms: settings.inject_delay_ms,
    }));

    let result = eframe::run_native(
        APP_TITLE,
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(APP_TITLE)
                .with_inner_size([960.0, 720.0]),
            ..Default::default()
        },
        Box::new(move |cc| {
            Ok(Box::new(TextTyperApp::new(
                cc,
                app_session,
                injector,
                &settings,
            )))
        }),
    )
    .map_err(|e| anyhow!("Editor window failed: {}", e));

    logging::log("APP", "Exited");
    session.release_exit_guards();
    result
}

fn show_error(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
