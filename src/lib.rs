//! cadenza: a terminal playlist player.
//!
//! The playback state machine lives in [`player`]; [`runtime`] and [`ui`]
//! wire it to a `rodio` output, a `crossterm` terminal and `ratatui` widgets.

pub mod config;
pub mod format;
pub mod logging;
pub mod media;
pub mod picker;
pub mod player;
pub mod playlist;
pub mod runtime;
pub mod ui;
