//! Building the startup playlist from configured seed entries.

use crate::config::SeedTrack;

use super::locator::Locator;
use super::model::{Playlist, Track};

impl Track {
    pub fn from_seed(seed: &SeedTrack) -> Self {
        let track = Track::new(
            seed.title.clone(),
            seed.artist.clone(),
            Locator::resource(seed.source.clone()),
        );
        match seed.cover.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(cover) => track.with_cover(cover),
            None => track,
        }
    }
}

impl Playlist {
    pub fn from_seed(seed: &[SeedTrack]) -> Self {
        Self::new(seed.iter().map(Track::from_seed).collect())
    }
}
