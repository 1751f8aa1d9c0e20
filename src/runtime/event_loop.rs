use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::media::RodioElement;
use crate::picker::DirectoryPicker;
use crate::player::{Command, PlaylistController};
use crate::runtime::cover::resolve_pending_cover;
use crate::runtime::keys::{KeyAction, action_for_key};
use crate::ui::{self, DrawnLayout, TerminalView};

/// The controller as wired up by the terminal front-end.
pub type TerminalController = PlaylistController<RodioElement, TerminalView, DirectoryPicker>;

/// Main terminal event loop: drains element notifications, redraws and
/// dispatches input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    base_dir: &Path,
    controller: &mut TerminalController,
) -> anyhow::Result<()> {
    let tick = Duration::from_millis(settings.ui.tick_ms);
    let mut layout = DrawnLayout::default();

    loop {
        controller.pump();
        resolve_pending_cover(controller, base_dir);
        controller.view_mut().expire_toasts(Instant::now());

        terminal.draw(|f| {
            layout = ui::draw(f, controller.view(), &settings.ui, settings.player.volume_step);
        })?;

        if !event::poll(tick)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match action_for_key(key) {
                Some(KeyAction::Quit) => break,
                Some(KeyAction::Command(command)) => controller.apply(command),
                Some(KeyAction::PlayActive) => {
                    if let Some(index) = controller.state().current_index {
                        controller.apply(Command::Select(index));
                    }
                }
                None => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let track_count = controller.playlist().len();
                if let Some(command) = layout.command_at(mouse.column, mouse.row, track_count) {
                    controller.apply(command);
                }
            }
            _ => {}
        }
    }

    tracing::info!("quit requested");
    Ok(())
}
