//! Playback navigator: the foreground half of the session.
//!
//! Holds the catalog snapshot of the current page and a 1-based selection
//! into it. Every operation that may start playback re-reads the player
//! after a short settle delay and, when it is playing, publishes a fresh
//! record into the candidate slot for the tracker.

mod catalog;
mod model;

pub use catalog::*;
pub use model::*;

#[cfg(test)]
mod tests;
