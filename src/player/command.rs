/// User-level commands a host can dispatch through `PlaylistController::apply`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    TogglePlay,
    Previous,
    Next,
    VolumeUp,
    VolumeDown,
    /// Volume to 0.
    Mute,
    /// Volume to 100.
    MaxVolume,
    /// Seek to a fraction of the track, e.g. from a click on the progress bar.
    SeekTo(f64),
    /// Load and play a playlist row.
    Select(usize),
    /// Ask the file picker for files and add them.
    Upload,
}
