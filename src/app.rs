//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the catalog cursor,
//! prompt state and playback state mirrored from the session worker and
//! the tracker.

mod model;

pub use model::*;
