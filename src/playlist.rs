//! Playlist module: the ordered track list and the locators tracks play from.
//!
//! Tracks are identified by their index only. The list is seeded at startup
//! and grows when the user uploads files; nothing is ever removed.

mod ingest;
mod locator;
mod model;
mod seed;

pub use ingest::title_from_file_name;
pub use locator::*;
pub use model::*;

#[cfg(test)]
mod tests;
