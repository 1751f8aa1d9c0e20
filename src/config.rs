//! Settings for the player, the seed playlist, uploads, the terminal UI and logging.
//!
//! Values are layered: built-in defaults, then `config.toml` (from
//! `CADENZA_CONFIG_PATH` or the XDG config dir), then `CADENZA__SECTION__KEY`
//! environment variables.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
