//! UI rendering helpers for the terminal front-end.
//!
//! `TerminalView` is the `PlayerView` the controller renders into: it keeps the
//! latest snapshot and the visible toasts. `draw` turns that into `ratatui`
//! widgets and reports where the clickable regions ended up.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::player::{
    Command, CoverState, PlayButton, PlaybackPhase, PlayerSnapshot, PlayerView, Toast,
};

struct ActiveToast {
    message: String,
    expires_at: Instant,
}

/// `PlayerView` that buffers state for the next terminal draw.
#[derive(Default)]
pub struct TerminalView {
    snapshot: Option<PlayerSnapshot>,
    toasts: Vec<ActiveToast>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&PlayerSnapshot> {
        self.snapshot.as_ref()
    }

    /// Drop toasts whose time is up.
    pub fn expire_toasts(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Messages of the toasts still on screen, oldest first.
    pub fn toast_messages(&self) -> impl Iterator<Item = &str> {
        self.toasts.iter().map(|t| t.message.as_str())
    }
}

impl PlayerView for TerminalView {
    fn render(&mut self, snapshot: &PlayerSnapshot) {
        self.snapshot = Some(snapshot.clone());
    }

    fn toast(&mut self, toast: Toast) {
        self.toasts.push(ActiveToast {
            message: toast.message,
            expires_at: Instant::now() + toast.ttl,
        });
    }
}

/// Screen regions produced by the last draw, used for mouse hit-testing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawnLayout {
    pub progress: Rect,
    pub playlist: Rect,
    /// Playlist index of the first visible row.
    pub playlist_start: usize,
}

impl DrawnLayout {
    /// Map a left click to a command: seek on the progress bar, select on a playlist row.
    pub fn command_at(&self, column: u16, row: u16, track_count: usize) -> Option<Command> {
        if let Some(fraction) = fraction_at(self.progress, column, row) {
            return Some(Command::SeekTo(fraction));
        }
        row_at(self.playlist, column, row)
            .map(|r| self.playlist_start + r)
            .filter(|&i| i < track_count)
            .map(Command::Select)
    }
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Click position inside a bordered gauge as a fraction of its width.
fn fraction_at(area: Rect, column: u16, row: u16) -> Option<f64> {
    let bar = inner(area);
    if bar.width == 0 || !contains(bar, column, row) {
        return None;
    }
    Some(f64::from(column - bar.x) / f64::from(bar.width))
}

/// Row offset of a click inside a bordered list.
fn row_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let rows = inner(area);
    if !contains(rows, column, row) {
        return None;
    }
    Some(usize::from(row - rows.y))
}

/// Window of `total` rows of which `height` fit, keeping `active` centered when possible.
pub fn visible_window(total: usize, height: usize, active: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = active.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the controls help text, incorporating the volume step.
fn controls_text(volume_step: u8) -> String {
    [
        "[space] play/pause".to_string(),
        "[←/→] prev/next".to_string(),
        "[ctrl+←/→] mute/max".to_string(),
        format!("[↑/↓] volume ±{volume_step}%"),
        "[a] add files".to_string(),
        "[click] seek / play row".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn phase_text(phase: PlaybackPhase) -> &'static str {
    match phase {
        PlaybackPhase::Idle => "Idle",
        PlaybackPhase::Loading => "Loading…",
        PlaybackPhase::Paused => "Paused",
        PlaybackPhase::Playing => "Playing",
    }
}

fn button_icon(button: PlayButton) -> &'static str {
    match button {
        PlayButton::Play => "▶",
        PlayButton::Pause => "⏸",
    }
}

fn cover_text(cover: &CoverState) -> String {
    match cover {
        CoverState::Placeholder => "♪".to_string(),
        CoverState::Loading(_) => "♪ (loading cover)".to_string(),
        CoverState::Loaded(locator) => format!("♪ {locator}"),
    }
}

/// Left text and right-aligned duration in one row of `width` cells.
fn playlist_row(left: &str, duration: &str, width: usize) -> String {
    let used = left.chars().count() + duration.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{left}{}{duration}", " ".repeat(gap))
}

/// Anchor a `width` x `height` rectangle to the top-right corner of `r`.
fn top_right_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width.saturating_sub(2)).max(10).min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + r.width.saturating_sub(width + 1),
        y: r.y + 1.min(r.height.saturating_sub(height)),
        width,
        height,
    }
}

/// Render the whole widget from `view` and return the clickable regions.
pub fn draw(
    frame: &mut Frame,
    view: &TerminalView,
    ui_settings: &UiSettings,
    volume_step: u8,
) -> DrawnLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut drawn = DrawnLayout {
        progress: chunks[2],
        playlist: chunks[3],
        playlist_start: 0,
    };

    let Some(snap) = view.snapshot() else {
        return drawn;
    };

    // Now playing
    let (title, artist) = match &snap.now_playing {
        Some(np) => (np.title.as_str(), np.artist.as_str()),
        None => ("No track loaded", ""),
    };
    let now_playing = vec![
        Line::from(vec![
            Span::raw(format!("{} ", button_icon(snap.play_button))),
            Span::raw(title).bold(),
        ]),
        Line::from(artist),
        Line::from(cover_text(&snap.cover)),
        Line::from(format!(
            "{} • Volume: {}%",
            phase_text(snap.phase),
            snap.volume
        )),
    ];
    let now_playing = Paragraph::new(now_playing)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Progress
    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .ratio(snap.progress.clamp(0.0, 1.0))
        .label(format!("{} / {}", snap.elapsed, snap.total));
    frame.render_widget(gauge, chunks[2]);

    // Playlist
    {
        let rows = inner(chunks[3]);
        let total = snap.entries.len();
        let active = snap.active_index.unwrap_or(0);
        let (start, end) = visible_window(total, usize::from(rows.height), active);
        drawn.playlist_start = start;

        let row_width = usize::from(rows.width).saturating_sub(2);
        let items: Vec<ListItem> = if total == 0 {
            vec![
                ListItem::new("No songs in playlist"),
                ListItem::new("Press [a] to add audio files"),
            ]
        } else {
            snap.entries[start..end]
                .iter()
                .map(|e| {
                    let left = format!("{} - {}", e.title, e.artist);
                    ListItem::new(playlist_row(&left, &e.duration, row_width))
                })
                .collect()
        };

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if let Some(active) = snap.active_index.filter(|&i| i >= start && i < end) {
            state.select(Some(active - start));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let footer = Paragraph::new(controls_text(volume_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    // Toasts stack down from the top-right corner.
    let mut y_offset = 0u16;
    for message in view.toast_messages() {
        let width = u16::try_from(message.chars().count() + 4).unwrap_or(u16::MAX);
        let mut area = top_right_rect(width, 3, frame.area());
        area.y = area.y.saturating_add(y_offset);
        if area.y.saturating_add(area.height) > frame.area().height {
            break;
        }
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(message).block(Block::bordered()).bold(),
            area,
        );
        y_offset = y_offset.saturating_add(area.height);
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn visible_window_centers_active_row() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(20, 5, 0), (0, 5));
        assert_eq!(visible_window(20, 5, 10), (8, 13));
        assert_eq!(visible_window(20, 5, 19), (15, 20));
        assert_eq!(visible_window(20, 0, 3), (0, 20));
    }

    #[test]
    fn clicks_map_to_seek_and_select() {
        let layout = DrawnLayout {
            progress: Rect::new(0, 10, 22, 3),
            playlist: Rect::new(0, 13, 40, 6),
            playlist_start: 2,
        };

        // Gauge interior spans columns 1..=20 on row 11.
        assert_eq!(layout.command_at(1, 11, 9), Some(Command::SeekTo(0.0)));
        assert_eq!(layout.command_at(11, 11, 9), Some(Command::SeekTo(0.5)));
        assert_eq!(layout.command_at(0, 11, 9), None);
        assert_eq!(layout.command_at(5, 10, 9), None);

        // First list row sits under the border at y=14.
        assert_eq!(layout.command_at(3, 14, 9), Some(Command::Select(2)));
        assert_eq!(layout.command_at(3, 16, 9), Some(Command::Select(4)));
        // Row exists on screen but not in the playlist.
        assert_eq!(layout.command_at(3, 17, 4), None);
    }

    #[test]
    fn playlist_row_right_aligns_duration() {
        assert_eq!(playlist_row("Song - Artist", "3:05", 20), "Song - Artist   3:05");
        assert_eq!(playlist_row("A very long title", "3:05", 10), "A very long title 3:05");
    }

    #[test]
    fn toasts_expire_after_their_ttl() {
        let mut view = TerminalView::new();
        view.toast(Toast {
            message: "2 song(s) added to playlist!".into(),
            ttl: Duration::from_secs(3),
        });
        let now = Instant::now();
        view.expire_toasts(now);
        assert_eq!(view.toast_messages().count(), 1);

        view.expire_toasts(now + Duration::from_secs(4));
        assert_eq!(view.toast_messages().count(), 0);
    }
}
