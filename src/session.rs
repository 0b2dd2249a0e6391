//! The command surface: one tracker and one navigator bound to the same
//! player, history file and candidate slot.

use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{InspectError, SessionError};
use crate::history::{HistoryStore, PlayHistory};
use crate::inspector::PageInspector;
use crate::navigator::{CatalogListing, Navigation, Navigator};
use crate::track::TrackRecord;
use crate::tracker::{CandidateSlot, StatusHandle, Tracker, TrackerHandle, spawn_tracker};

#[cfg(test)]
mod tests;

pub struct Session<I: PageInspector> {
    inspector: Arc<I>,
    navigator: Navigator<I>,
    tracker: TrackerHandle,
}

impl<I: PageInspector> Session<I> {
    /// Load the history at `store_path` (corruption is fatal), read the
    /// first catalog page, and start the tracker. The player is closed
    /// before any error is returned.
    pub fn initialize(
        inspector: I,
        store_path: &Path,
        settings: &Settings,
    ) -> Result<Self, SessionError> {
        let history = match PlayHistory::open(HistoryStore::new(store_path)) {
            Ok(h) => h,
            Err(e) => {
                close_after_failure(&inspector);
                return Err(e.into());
            }
        };
        tracing::info!(
            path = %store_path.display(),
            records = history.len(),
            "play history loaded"
        );

        let inspector = Arc::new(inspector);
        let candidate = CandidateSlot::new();

        let mut navigator = Navigator::new(
            inspector.clone(),
            candidate.clone(),
            settings.navigator.clone(),
        );
        if let Err(e) = navigator.refresh_catalog() {
            tracing::warn!(error = %e, "could not read the catalog yet");
        }

        let tracker = Tracker::new(
            inspector.clone(),
            history,
            candidate,
            settings.tracker.recent_limit,
        );
        let tracker = match spawn_tracker(tracker, settings.tracker.poll_interval()) {
            Ok(t) => t,
            Err(e) => {
                close_after_failure(inspector.as_ref());
                return Err(e.into());
            }
        };

        Ok(Self {
            inspector,
            navigator,
            tracker,
        })
    }

    pub fn select(&mut self, index: Option<usize>) -> Result<Navigation, InspectError> {
        self.navigator.select(index)
    }

    pub fn advance_catalog(&mut self, label: &str) -> Result<Navigation, InspectError> {
        self.navigator.advance_catalog(label)
    }

    pub fn play_next(&mut self) -> Result<Navigation, InspectError> {
        self.navigator.play_next()
    }

    pub fn pause(&mut self) -> Result<Navigation, InspectError> {
        self.navigator.pause()
    }

    pub fn resume(&mut self) -> Result<Navigation, InspectError> {
        self.navigator.resume()
    }

    pub fn toggle(&mut self) -> Result<Navigation, InspectError> {
        self.navigator.toggle()
    }

    pub fn refresh_catalog(&mut self) -> Result<Vec<CatalogListing>, InspectError> {
        self.navigator.refresh_catalog()
    }

    pub fn list_catalog(&self) -> Vec<CatalogListing> {
        self.navigator.list_catalog()
    }

    pub fn list_pages(&self) -> Result<Vec<String>, InspectError> {
        self.navigator.list_pages()
    }

    pub fn selected(&self) -> Option<usize> {
        self.navigator.selected()
    }

    pub fn now_playing(&self) -> Option<Arc<TrackRecord>> {
        self.navigator.candidate()
    }

    pub fn tracker_status(&self) -> StatusHandle {
        self.tracker.status_handle()
    }

    /// Stop the tracker (waits for the current cycle), then release the player.
    pub fn shutdown(self) {
        self.tracker.stop();
        if let Err(e) = self.inspector.close() {
            tracing::warn!(error = %e, "failed to close the player page");
        }
        tracing::info!("session shut down");
    }
}

fn close_after_failure<I: PageInspector>(inspector: &I) {
    if let Err(e) = inspector.close() {
        tracing::warn!(error = %e, "failed to close the player page after a failed start");
    }
}
