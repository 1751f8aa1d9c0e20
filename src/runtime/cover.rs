use std::path::Path;

use crate::media::MediaElement;
use crate::picker::FilePicker;
use crate::player::{CoverState, PlayerView, PlaylistController};

/// Whether the cover image at `locator` can be shown.
///
/// Only local files under `base_dir` are considered; remote images are
/// reported as unavailable and fall back to the placeholder.
pub fn cover_available(base_dir: &Path, locator: &str) -> bool {
    if locator.starts_with("http://") || locator.starts_with("https://") {
        return false;
    }
    base_dir.join(locator).is_file()
}

/// Settle a pending cover load for the active track.
pub fn resolve_pending_cover<M, V, P>(controller: &mut PlaylistController<M, V, P>, base_dir: &Path)
where
    M: MediaElement,
    V: PlayerView,
    P: FilePicker,
{
    let CoverState::Loading(locator) = controller.cover() else {
        return;
    };
    let Some(index) = controller.state().current_index else {
        return;
    };
    let loaded = cover_available(base_dir, locator);
    controller.cover_resolved(index, loaded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn cover_is_available_only_when_the_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images/sapphire.jpg"), b"jpeg").unwrap();

        assert!(cover_available(dir.path(), "images/sapphire.jpg"));
        assert!(!cover_available(dir.path(), "images/safari.jpg"));
        assert!(!cover_available(dir.path(), "images"));
        assert!(!cover_available(dir.path(), "https://example.com/cover.jpg"));
    }
}
