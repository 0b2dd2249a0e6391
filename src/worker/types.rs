//! Commands accepted by the session worker and the view it publishes.

use std::sync::{Arc, Mutex};

use crate::navigator::CatalogListing;
use crate::track::TrackRecord;
use crate::tracker::PlayReading;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCmd {
    /// Select catalog item `n` (1-based); `None` toggles play/pause.
    Select(Option<usize>),
    /// Toggle play/pause.
    Toggle,
    /// Pause if playing.
    Pause,
    /// Resume if paused.
    Resume,
    /// Next item, crossing pages as needed.
    PlayNext,
    /// Jump to the page control with this label.
    AdvanceCatalog(String),
    /// Re-read the visible catalog.
    Refresh,
    /// Re-read the page control labels.
    ListPages,
    /// Stop the tracker, close the page, exit the worker.
    Quit,
}

/// Navigator state published for the UI after every command.
#[derive(Debug, Clone, Default)]
pub struct SessionView {
    pub catalog: Vec<CatalogListing>,
    /// 1-based selection in `catalog`.
    pub selected: Option<usize>,
    pub pages: Vec<String>,
    pub now_playing: Option<TrackRecord>,
    /// Play state read back by the last command that touched the player.
    pub playing: Option<PlayReading>,
    /// A command is running.
    pub busy: bool,
    /// Short result of the last command, for the status line.
    pub message: Option<String>,
}

pub type ViewHandle = Arc<Mutex<SessionView>>;
