//! What the controller publishes for the presentation layer.

use std::time::Duration;

use super::state::{CoverState, PlaybackPhase};

/// One playlist row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub title: String,
    pub artist: String,
    pub duration: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
}

/// Icon shown on the play/pause button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayButton {
    /// Paused: the button offers "play".
    Play,
    /// Playing: the button offers "pause".
    Pause,
}

/// Full render state of the widget.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub entries: Vec<PlaylistEntry>,
    pub active_index: Option<usize>,
    pub now_playing: Option<NowPlaying>,
    pub phase: PlaybackPhase,
    pub play_button: PlayButton,
    /// Playback progress in `[0, 1]`.
    pub progress: f64,
    pub elapsed: String,
    pub total: String,
    pub volume: u8,
    pub cover: CoverState,
    /// True until the loaded track can play through.
    pub loading: bool,
}

/// A transient notification for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    /// How long the toast stays visible.
    pub ttl: Duration,
}

/// Presentation layer the controller renders into.
pub trait PlayerView {
    fn render(&mut self, snapshot: &PlayerSnapshot);
    fn toast(&mut self, toast: Toast);
}
