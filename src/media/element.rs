use crate::playlist::Locator;

use super::types::MediaEvent;

/// Imperative playback API plus a queue of lifecycle notifications.
///
/// Commands never block and never report success directly: `play` returns at
/// once and its outcome shows up later as `MediaEvent::Play` or
/// `MediaEvent::PlayRejected` from `drain_events`.
pub trait MediaElement {
    /// Replace the current source and start loading it. Playback position resets to 0.
    fn set_source(&mut self, locator: &Locator);
    /// Whether a source has been assigned.
    fn has_source(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// Duration of the current source in seconds, `NaN` while unknown.
    fn duration(&self) -> f64;
    fn volume(&self) -> f32;
    /// Set the output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    /// Take the notifications emitted since the last call, in order.
    fn drain_events(&mut self) -> Vec<MediaEvent>;
}
