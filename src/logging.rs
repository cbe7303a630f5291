//! Log setup for Text Typer.
//!
//! Every event goes to two places: a JSON-lines file under
//! `~/.text-typer/logs/` (one object per event, UTC timestamps) and a compact
//! stderr stream. `RUST_LOG` filters both; the default level is `info`.
//!
//! Hold the [`LoggingGuard`] returned by [`init`] until exit. Dropping it
//! flushes the file writer.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "text-typer.jsonl";

/// Keeps the background file writer alive.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber. Falls back to stderr only when the log
/// file can't be opened.
pub fn init() -> LoggingGuard {
    let path = log_path();
    let (file_layer, file_guard) = match open_log_file(&path) {
        Some(file) => {
            let (layer, guard) = jsonl_layer(file);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!(
        category = "APP",
        log_file = %path.display(),
        file_logging = file_guard.is_some(),
        "Logging ready"
    );

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// JSON-lines layer over a non-blocking writer, so hotkey threads never
/// wait on disk.
fn jsonl_layer<S>(file: File) -> (Box<dyn Layer<S> + Send + Sync>, WorkerGuard)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let (writer, guard) = tracing_appender::non_blocking(file);
    let layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_thread_names(true)
        .with_file(false)
        .with_line_number(false)
        .boxed();
    (layer, guard)
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("text-typer: cannot create {}: {}", dir.display(), e);
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| eprintln!("text-typer: cannot open {}: {}", path.display(), e))
        .ok()
}

/// Application data directory (~/.text-typer/).
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".text-typer"))
        .unwrap_or_else(|| std::env::temp_dir().join("text-typer"))
}

pub fn log_path() -> PathBuf {
    app_dir().join("logs").join(LOG_FILE_NAME)
}

/// One info line tagged with a category (`APP`, `HOTKEY`, `TRAY`, ...).
pub fn log(category: &str, message: &str) {
    tracing::info!(category, "{}", message);
}

/// Like [`log`] at debug level; compiled out of release builds.
#[cfg(debug_assertions)]
pub fn log_debug(category: &str, message: &str) {
    tracing::debug!(category, "{}", message);
}

#[cfg(not(debug_assertions))]
pub fn log_debug(_category: &str, _message: &str) {}
