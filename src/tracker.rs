//! Now-playing tracker: the background half of the session.
//!
//! Every poll interval the tracker looks at the current candidate (written
//! by the navigator), checks that the player really is playing, and commits
//! the candidate to the play history unless it repeats the last entry.

mod candidate;
mod cycle;
mod thread;

pub use candidate::*;
pub use cycle::*;
pub use thread::*;
