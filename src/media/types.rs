//! Notification and error types shared by media element implementations.

use thiserror::Error;

/// Why the media element could not play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("no source loaded")]
    NoSource,
    #[error("cannot open {locator}: {reason}")]
    Unavailable { locator: String, reason: String },
    #[error("cannot decode {locator}: {reason}")]
    Unsupported { locator: String, reason: String },
    #[error("no audio output available: {0}")]
    NoOutput(String),
}

/// Lifecycle notifications emitted by a media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Periodic playback position update.
    TimeUpdate,
    /// Duration (and other metadata) for the current source is known.
    LoadedMetadata,
    /// The current source can be played to the end without stalling.
    CanPlayThrough,
    /// Playback reached the end of the current source.
    Ended,
    /// Playback started.
    Play,
    /// Playback paused.
    Pause,
    /// A play request failed; playback stays paused.
    PlayRejected(MediaError),
}
