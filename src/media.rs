//! Media element: the playback capability the controller commands and observes.
//!
//! The controller only sees the `MediaElement` trait. `RodioElement` is the
//! implementation used by the terminal host; it decodes with `rodio` and
//! reports lifecycle notifications as queued `MediaEvent`s.

mod element;
mod rodio_element;
mod sink;
mod types;

pub use element::MediaElement;
pub use rodio_element::RodioElement;
pub use types::*;
