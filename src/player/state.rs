//! Player state types: `PlayerState`, `PlaybackPhase`, the per-load `LoadCycle`
//! and the cover art state.

/// Playback state owned by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    /// Index of the loaded track, `None` until something is loaded.
    pub current_index: Option<usize>,
    /// Mirrors the media element's play/pause notifications.
    pub is_playing: bool,
    /// Volume in percent, 0-100.
    pub volume: u8,
}

impl PlayerState {
    pub fn new(volume: u8) -> Self {
        Self {
            current_index: None,
            is_playing: false,
            volume: volume.min(100),
        }
    }

    /// The volume as applied to the media element.
    pub fn volume_fraction(&self) -> f32 {
        f32::from(self.volume) / 100.0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(100)
    }
}

/// The playback phase, as presented to the user.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Nothing loaded.
    Idle,
    /// A track is loaded but not yet ready to play through.
    Loading,
    Paused,
    Playing,
}

impl Default for PlaybackPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Notifications the controller subscribes to once per track load.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OneShot {
    /// Back-fills the loaded track's duration label.
    MetadataLoaded,
    /// Ends the loading indicator.
    CanPlayThrough,
}

/// The one-shot subscriptions armed by a single `load_track` call.
///
/// Every load arms a fresh cycle, so reloading the same track re-arms both
/// subscriptions. Each one is consumed by the first matching notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadCycle {
    index: usize,
    pending: Vec<OneShot>,
}

impl LoadCycle {
    pub fn arm(index: usize) -> Self {
        Self {
            index,
            pending: vec![OneShot::MetadataLoaded, OneShot::CanPlayThrough],
        }
    }

    /// Track index this cycle was armed for.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_pending(&self, which: OneShot) -> bool {
        self.pending.contains(&which)
    }

    /// Consume the subscription for `which`; `false` if it already fired.
    pub fn take(&mut self, which: OneShot) -> bool {
        match self.pending.iter().position(|&p| p == which) {
            Some(pos) => {
                self.pending.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Cover art of the loaded track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoverState {
    /// Generic placeholder icon.
    Placeholder,
    /// Waiting for the host to fetch the image at this locator.
    Loading(String),
    Loaded(String),
}

impl Default for CoverState {
    fn default() -> Self {
        Self::Placeholder
    }
}
