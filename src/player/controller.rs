use std::sync::PoisonError;
use std::time::Duration;

use crate::config::PlayerSettings;
use crate::format::format_time;
use crate::media::{MediaElement, MediaError, MediaEvent};
use crate::picker::{FileHandle, FilePicker};
use crate::playlist::{Playlist, Track, TransientHandle, UNKNOWN_DURATION};

use super::command::Command;
use super::state::{CoverState, LoadCycle, OneShot, PlaybackPhase, PlayerState};
use super::view::{NowPlaying, PlayButton, PlayerSnapshot, PlayerView, PlaylistEntry, Toast};

const PLAY_ERROR_MESSAGE: &str = "Error playing audio. Please check if audio files are available.";

/// Mediates between user commands, the media element and the view.
///
/// `is_playing` only ever changes on the element's own `Play`/`Pause`
/// notifications, so commands issued while an earlier request is still in
/// flight cannot leave the state out of sync with the element.
pub struct PlaylistController<M, V, P> {
    playlist: Playlist,
    state: PlayerState,
    settings: PlayerSettings,

    media: M,
    view: V,
    picker: P,
    transients: TransientHandle,

    load: Option<LoadCycle>,
    cover: CoverState,
    progress: f64,
    elapsed: String,
    total: String,
}

impl<M, V, P> PlaylistController<M, V, P>
where
    M: MediaElement,
    V: PlayerView,
    P: FilePicker,
{
    /// Build a controller and load the first track of `playlist`, if any.
    pub fn new(
        playlist: Playlist,
        settings: PlayerSettings,
        media: M,
        view: V,
        picker: P,
        transients: TransientHandle,
    ) -> Self {
        let mut controller = Self {
            playlist,
            state: PlayerState::new(settings.initial_volume),
            settings,
            media,
            view,
            picker,
            transients,
            load: None,
            cover: CoverState::Placeholder,
            progress: 0.0,
            elapsed: UNKNOWN_DURATION.to_string(),
            total: UNKNOWN_DURATION.to_string(),
        };

        controller.media.set_volume(controller.state.volume_fraction());
        if controller.playlist.is_empty() {
            controller.render();
        } else {
            controller.load_track(0);
        }
        controller
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn load_cycle(&self) -> Option<&LoadCycle> {
        self.load.as_ref()
    }

    pub fn cover(&self) -> &CoverState {
        &self.cover
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn phase(&self) -> PlaybackPhase {
        match self.state.current_index {
            None => PlaybackPhase::Idle,
            Some(_) if self.state.is_playing => PlaybackPhase::Playing,
            Some(_)
                if self
                    .load
                    .as_ref()
                    .is_some_and(|c| c.is_pending(OneShot::CanPlayThrough)) =>
            {
                PlaybackPhase::Loading
            }
            Some(_) => PlaybackPhase::Paused,
        }
    }

    /// Load the track at `index` without starting playback. Out of range is a no-op.
    pub fn load_track(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            tracing::trace!(index, len = self.playlist.len(), "ignoring load of invalid index");
            return;
        };
        let source = track.source.clone();
        let cover = track.cover.clone();
        tracing::debug!(index, title = %track.title, %source, "loading track");

        self.state.current_index = Some(index);
        self.media.set_source(&source);
        self.load = Some(LoadCycle::arm(index));
        self.cover = match cover {
            Some(locator) => CoverState::Loading(locator),
            None => CoverState::Placeholder,
        };
        self.progress = 0.0;
        self.elapsed = format_time(0.0);
        self.total = UNKNOWN_DURATION.to_string();
        self.render();
    }

    /// Request playback. The state flips once the element confirms with `Play`.
    pub fn play(&mut self) {
        self.media.play();
    }

    pub fn pause(&mut self) {
        self.media.pause();
    }

    pub fn toggle_play(&mut self) {
        if !self.media.has_source() {
            return;
        }
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn previous(&mut self) {
        let current = self.state.current_index.unwrap_or(0);
        if let Some(index) = self.playlist.prev_index(current) {
            self.switch_to(index);
        }
    }

    pub fn next(&mut self) {
        let current = self.state.current_index.unwrap_or(0);
        if let Some(index) = self.playlist.next_index(current) {
            self.switch_to(index);
        }
    }

    /// Load `index`, resuming playback only if it was already running.
    fn switch_to(&mut self, index: usize) {
        let was_playing = self.state.is_playing;
        self.load_track(index);
        if was_playing {
            self.play();
        }
    }

    /// Load a playlist row and play it.
    pub fn select_track(&mut self, index: usize) {
        if index >= self.playlist.len() {
            return;
        }
        self.load_track(index);
        self.play();
    }

    /// Seek to `fraction` of the current track. No-op while the duration is unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let duration = self.media.duration();
        if !(duration.is_finite() && duration > 0.0) || fraction.is_nan() {
            tracing::debug!(fraction, duration, "ignoring seek");
            return;
        }
        self.media.set_current_time(fraction.clamp(0.0, 1.0) * duration);
    }

    /// Set the volume in percent, clamped to 100.
    pub fn set_volume(&mut self, percent: u8) {
        self.state.volume = percent.min(100);
        self.media.set_volume(self.state.volume_fraction());
        self.render();
    }

    pub fn increase_volume(&mut self) {
        self.increase_volume_by(self.settings.volume_step);
    }

    pub fn decrease_volume(&mut self) {
        self.decrease_volume_by(self.settings.volume_step);
    }

    pub fn increase_volume_by(&mut self, step: u8) {
        self.set_volume(self.state.volume.saturating_add(step).min(100));
    }

    pub fn decrease_volume_by(&mut self, step: u8) {
        self.set_volume(self.state.volume.saturating_sub(step));
    }

    pub fn mute_to_zero(&mut self) {
        self.set_volume(0);
    }

    pub fn max_volume(&mut self) {
        self.set_volume(100);
    }

    /// Append uploaded files to the playlist and return how many were added.
    ///
    /// When the playlist was empty the first new track is loaded, not played.
    pub fn add_files(&mut self, files: Vec<FileHandle>) -> usize {
        if files.is_empty() {
            return 0;
        }
        let was_empty = self.playlist.is_empty();
        let count = files.len();

        {
            let mut store = self
                .transients
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            for file in &files {
                let source = store.register(file.data.clone());
                self.playlist.push(Track::uploaded(
                    file,
                    &self.settings.uploaded_artist,
                    source,
                ));
            }
        }

        tracing::info!(count, total = self.playlist.len(), "files added to playlist");
        self.render();
        self.toast(format!("{count} song(s) added to playlist!"));

        if was_empty {
            self.load_track(0);
        }
        count
    }

    /// Ask the picker for files and add them.
    pub fn open_upload(&mut self) {
        match self.picker.pick() {
            Ok(files) if files.is_empty() => tracing::debug!("file selection was empty"),
            Ok(files) => {
                self.add_files(files);
            }
            Err(e) => {
                tracing::warn!(error = %e, "file picker failed");
                self.toast(format!("Could not add files: {e}"));
            }
        }
    }

    /// Report the outcome of fetching the cover of track `index`.
    pub fn cover_resolved(&mut self, index: usize, loaded: bool) {
        if self.state.current_index != Some(index) {
            return;
        }
        let CoverState::Loading(locator) = &self.cover else {
            return;
        };
        let locator = locator.clone();
        self.cover = if loaded {
            CoverState::Loaded(locator)
        } else {
            tracing::debug!(index, cover = %locator, "cover unavailable, using placeholder");
            CoverState::Placeholder
        };
        self.render();
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePlay => self.toggle_play(),
            Command::Previous => self.previous(),
            Command::Next => self.next(),
            Command::VolumeUp => self.increase_volume(),
            Command::VolumeDown => self.decrease_volume(),
            Command::Mute => self.mute_to_zero(),
            Command::MaxVolume => self.max_volume(),
            Command::SeekTo(fraction) => self.seek_to_fraction(fraction),
            Command::Select(index) => self.select_track(index),
            Command::Upload => self.open_upload(),
        }
    }

    /// Dispatch every notification the element emitted since the last pump.
    pub fn pump(&mut self) {
        for event in self.media.drain_events() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.update_progress(),
            MediaEvent::LoadedMetadata => self.on_metadata_loaded(),
            MediaEvent::CanPlayThrough => {
                if let Some(cycle) = self.load.as_mut() {
                    cycle.take(OneShot::CanPlayThrough);
                }
            }
            MediaEvent::Ended => {
                self.on_ended();
                return;
            }
            MediaEvent::Play => self.state.is_playing = true,
            MediaEvent::Pause => self.state.is_playing = false,
            MediaEvent::PlayRejected(err) => self.on_play_rejected(err),
        }
        self.render();
    }

    fn update_progress(&mut self) {
        let duration = self.media.duration();
        if !(duration.is_finite() && duration > 0.0) {
            return;
        }
        let current = self.media.current_time();
        self.progress = (current / duration).clamp(0.0, 1.0);
        self.elapsed = format_time(current);
    }

    fn on_metadata_loaded(&mut self) {
        let duration = self.media.duration();
        self.total = format_time(duration);

        if let Some(cycle) = self.load.as_mut() {
            if cycle.take(OneShot::MetadataLoaded) && !duration.is_nan() {
                self.playlist.set_duration(cycle.index(), format_time(duration));
            }
        }
    }

    fn on_ended(&mut self) {
        let current = self.state.current_index.unwrap_or(0);
        if let Some(next) = self.playlist.next_index(current) {
            tracing::debug!(from = current, to = next, "track ended, advancing");
            self.load_track(next);
            self.play();
        }
    }

    fn on_play_rejected(&mut self, err: MediaError) {
        tracing::warn!(error = %err, index = ?self.state.current_index, "playback failed");
        self.toast(PLAY_ERROR_MESSAGE.to_string());
    }

    fn toast(&mut self, message: String) {
        self.view.toast(Toast {
            message,
            ttl: Duration::from_secs(self.settings.toast_secs),
        });
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let now_playing = self
            .state
            .current_index
            .and_then(|i| self.playlist.get(i))
            .map(|t| NowPlaying {
                title: t.title.clone(),
                artist: t.artist.clone(),
            });

        PlayerSnapshot {
            entries: self
                .playlist
                .iter()
                .map(|t| PlaylistEntry {
                    title: t.title.clone(),
                    artist: t.artist.clone(),
                    duration: t.duration.clone(),
                })
                .collect(),
            active_index: self.state.current_index,
            now_playing,
            phase: self.phase(),
            play_button: if self.state.is_playing {
                PlayButton::Pause
            } else {
                PlayButton::Play
            },
            progress: self.progress,
            elapsed: self.elapsed.clone(),
            total: self.total.clone(),
            volume: self.state.volume,
            cover: self.cover.clone(),
            loading: self
                .load
                .as_ref()
                .is_some_and(|c| c.is_pending(OneShot::CanPlayThrough)),
        }
    }

    fn render(&mut self) {
        let snapshot = self.snapshot();
        self.view.render(&snapshot);
    }
}
