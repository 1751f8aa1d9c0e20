use std::env;

use anyhow::Context;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::logging;
use crate::media::RodioElement;
use crate::picker::DirectoryPicker;
use crate::player::PlaylistController;
use crate::playlist::{Playlist, transient_handle};
use crate::ui::TerminalView;

mod cover;
mod event_loop;
mod keys;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let startup = settings::load_settings(env::args().skip(1));
    let settings = startup.settings;

    // Logging is optional; a broken log directory should not stop playback.
    let _log_guard = match logging::init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("cadenza: logging disabled: {e:#}");
            None
        }
    };

    if let Some(reason) = &startup.fallback {
        tracing::warn!(%reason, "using default settings");
    }

    let base_dir = settings.playlist.resolved_base_dir();
    tracing::info!(
        base_dir = %base_dir.display(),
        tracks = settings.playlist.tracks.len(),
        "starting"
    );

    let transients = transient_handle();
    let media = RodioElement::new(base_dir.clone(), transients.clone());
    let picker = DirectoryPicker::new(settings.upload.clone());
    let mut controller = PlaylistController::new(
        Playlist::from_seed(&settings.playlist.tracks),
        settings.player.clone(),
        media,
        TerminalView::new(),
        picker,
        transients,
    );

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &base_dir, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
