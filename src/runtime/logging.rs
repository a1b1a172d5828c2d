//! Tracing setup. Output goes to a file: the terminal belongs to the TUI.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, default_log_path};

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
///
/// Returns the log file in use, if one could be opened.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let path = settings.file.clone().or_else(default_log_path);
    let file = path.as_ref().and_then(|p| match open_log(p) {
        Ok(f) => Some(f),
        Err(e) => {
            eprintln!("nocturne: cannot open log file {}: {e}", p.display());
            None
        }
    });

    let registry = tracing_subscriber::registry().with(filter);
    let opened = file.is_some();
    let result = match file {
        Some(f) => registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(f)))
            .try_init(),
        None => registry
            .with(fmt::layer().with_writer(io::sink))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("nocturne: logging already initialised: {e}");
    }

    if opened { path } else { None }
}

fn open_log(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
