use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::session::{FolderChoice, Intent, SessionEvent, spawn_session};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings::Loaded {
        settings,
        fallback_reason,
    } = settings::load_settings();
    let log_file = logging::init(&settings.logging);
    info!(log = ?log_file, "starting nocturne");
    if let Some(reason) = fallback_reason {
        warn!(%reason, "running with default settings");
    }

    let (events_tx, events_rx) = mpsc::channel::<SessionEvent>();
    let session = spawn_session(&settings, events_tx);

    // CLI argument first, then the configured start folder.
    let start_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.start_dir.clone());
    if let Some(dir) = start_dir {
        let _ = session.send(Intent::LoadFolder(FolderChoice::Chosen(dir)));
    }

    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &session, &events_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    session.shutdown();
    info!("bye");

    run_result
}
