//! Playlist model types: `Track` and `Playlist`.

use super::locator::Locator;

/// Placeholder shown until the media element reports a real duration.
pub const UNKNOWN_DURATION: &str = "0:00";

/// One playable entry with its display metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: Locator,
    /// `M:SS` label, back-filled once metadata for this track loads.
    pub duration: String,
    pub cover: Option<String>,
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, source: Locator) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source,
            duration: UNKNOWN_DURATION.to_string(),
            cover: None,
        }
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }
}

/// Ordered, index-addressed collection of tracks. Insertion order is playback order.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Replace the duration label of the track at `index`.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn set_duration(&mut self, index: usize, duration: String) -> bool {
        match self.tracks.get_mut(index) {
            Some(track) => {
                track.duration = duration;
                true
            }
            None => false,
        }
    }

    /// Index after `current`, wrapping to the first track.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        if current + 1 < self.tracks.len() {
            Some(current + 1)
        } else {
            Some(0)
        }
    }

    /// Index before `current`, wrapping to the last track.
    pub fn prev_index(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match current {
            0 => Some(self.tracks.len() - 1),
            c => Some(c.min(self.tracks.len()) - 1),
        }
    }
}
