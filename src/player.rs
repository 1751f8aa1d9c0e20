//! Player module: the playlist/playback state machine and its view contract.
//!
//! `PlaylistController` owns the playlist and the play/pause/volume state,
//! commands a `MediaElement`, reacts to its notifications and publishes plain
//! `PlayerSnapshot`s to a `PlayerView`.

mod command;
mod controller;
mod state;
mod view;

pub use command::Command;
pub use controller::PlaylistController;
pub use state::*;
pub use view::*;
