//! Session worker: runs navigator commands off the UI thread.
//!
//! Navigator operations sleep while the page settles, so the UI sends
//! `SessionCmd`s over a channel and reads back a published `SessionView`.

mod handle;
mod thread;
mod types;

pub use handle::*;
pub use types::*;

#[cfg(test)]
mod tests;
