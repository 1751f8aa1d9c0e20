//! Turning uploaded files into playlist tracks.

use crate::picker::FileHandle;

use super::locator::Locator;
use super::model::Track;

/// Derive a track title from a file name by dropping its final extension.
///
/// Only the last `.<ext>` segment goes, and only when the extension is
/// non-empty and holds no `/` or `.`: `"track.two.wav"` becomes `"track.two"`,
/// `"notes."` stays as is. A bare extension such as `".mp3"` leaves an empty title.
pub fn title_from_file_name(name: &str) -> String {
    match name.rfind('.') {
        Some(dot) if !name[dot + 1..].is_empty() && !name[dot + 1..].contains('/') => {
            name[..dot].to_string()
        }
        _ => name.to_string(),
    }
}

impl Track {
    /// Track for an uploaded `file` whose bytes are reachable through `source`.
    pub fn uploaded(file: &FileHandle, artist: &str, source: Locator) -> Self {
        Track::new(title_from_file_name(&file.name), artist, source)
    }
}
