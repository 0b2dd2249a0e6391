use std::sync::Arc;
use std::thread;

use crate::config::NavigatorSettings;
use crate::error::InspectError;
use crate::inspector::{PageInspector, Selectable, playing_or_idle};
use crate::track::TrackRecord;
use crate::tracker::CandidateSlot;

use super::catalog::{CatalogEntry, CatalogListing, CatalogSnapshot};

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Out-of-range index, unmatched page label, or nothing to do.
    Ignored,
    /// A play/select instruction was issued; `playing` is the state read
    /// back after the settle delay.
    Played { playing: bool },
    /// The catalog moved to another page and now shows `items` entries.
    PageChanged { items: usize },
}

pub struct Navigator<I: PageInspector> {
    inspector: Arc<I>,
    settings: NavigatorSettings,
    catalog: CatalogSnapshot<I::Item>,
    selected: Option<usize>,
    candidate: CandidateSlot,
}

impl<I: PageInspector> Navigator<I> {
    /// Create a navigator with an empty catalog; call `refresh_catalog`
    /// once the page has loaded.
    pub fn new(inspector: Arc<I>, candidate: CandidateSlot, settings: NavigatorSettings) -> Self {
        Self {
            inspector,
            settings,
            catalog: Vec::new(),
            selected: None,
            candidate,
        }
    }

    /// 1-based index of the selected catalog item, if any since the last refresh.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn candidate(&self) -> Option<Arc<TrackRecord>> {
        self.candidate.snapshot()
    }

    pub fn list_catalog(&self) -> Vec<CatalogListing> {
        self.catalog.iter().map(|e| e.listing.clone()).collect()
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Select catalog item `index` (1-based), or toggle play/pause on the
    /// player's current selection when `index` is `None`.
    ///
    /// An index outside `1..=len` changes nothing and touches nothing.
    pub fn select(&mut self, index: Option<usize>) -> Result<Navigation, InspectError> {
        match index {
            None => self.inspector.play_control()?.activate()?,
            Some(i) if i == 0 || i > self.catalog.len() => {
                tracing::warn!(index = i, items = self.catalog.len(), "track number out of range");
                return Ok(Navigation::Ignored);
            }
            Some(i) => {
                self.catalog[i - 1].item.activate()?;
                self.selected = Some(i);
                tracing::debug!(index = i, listing = %self.catalog[i - 1].listing, "selected track");
            }
        }

        let playing = self.capture_now_playing();
        Ok(Navigation::Played { playing })
    }

    /// Toggle play/pause on whatever the player has selected.
    pub fn toggle(&mut self) -> Result<Navigation, InspectError> {
        self.select(None)
    }

    /// Pause only if the player reports playing.
    pub fn pause(&mut self) -> Result<Navigation, InspectError> {
        if !playing_or_idle(self.inspector.as_ref()) {
            tracing::debug!("pause requested while not playing");
            return Ok(Navigation::Ignored);
        }
        self.select(None)
    }

    /// Resume only if the player reports not playing.
    pub fn resume(&mut self) -> Result<Navigation, InspectError> {
        if playing_or_idle(self.inspector.as_ref()) {
            tracing::debug!("resume requested while already playing");
            return Ok(Navigation::Ignored);
        }
        self.select(None)
    }

    /// Play the item after the selected one, crossing into the next catalog
    /// page when the current one is exhausted.
    pub fn play_next(&mut self) -> Result<Navigation, InspectError> {
        let next = self.selected.map_or(1, |s| s + 1);
        if next <= self.catalog.len() {
            return self.select(Some(next));
        }

        let label = self.settings.next_page_label.clone();
        if self.advance_catalog(&label)? == Navigation::Ignored {
            tracing::warn!(label = %label, "no next page, starting over on this page");
        }
        self.select(Some(1))
    }

    /// Move the catalog to the page control labelled `label` (trimmed,
    /// case-insensitive) and rebuild the snapshot.
    pub fn advance_catalog(&mut self, label: &str) -> Result<Navigation, InspectError> {
        let wanted = label.trim().to_lowercase();
        let control = self.inspector.page_controls()?.into_iter().find(|c| match c.text() {
            Ok(text) => text.trim().to_lowercase() == wanted,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable page control");
                false
            }
        });

        let Some(control) = control else {
            tracing::warn!(label = %label, "no page control with that label");
            return Ok(Navigation::Ignored);
        };

        control.activate()?;
        let items = self.refresh_catalog()?.len();
        Ok(Navigation::PageChanged { items })
    }

    /// Re-read the visible catalog, keeping only items whose left edge lies
    /// inside the catalog container. Resets the selection.
    pub fn refresh_catalog(&mut self) -> Result<Vec<CatalogListing>, InspectError> {
        thread::sleep(self.settings.render());

        let region = self.inspector.catalog_region()?;
        let mut entries = Vec::new();
        for item in self.inspector.catalog_items()? {
            match item.bounding_box() {
                Ok(rect) if region.contains_x(rect.x) => {}
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping catalog item without bounds");
                    continue;
                }
            }

            let listing = match item.text() {
                Ok(text) => CatalogListing::parse(&text),
                Err(e) => {
                    tracing::debug!(error = %e, "catalog item text unreadable");
                    CatalogListing::default()
                }
            };
            entries.push(CatalogEntry::new(item, listing));
        }

        self.catalog = entries;
        self.selected = None;

        tracing::info!(items = self.catalog.len(), "catalog refreshed");
        for (i, entry) in self.catalog.iter().enumerate() {
            let l = &entry.listing;
            tracing::info!(
                "[{}] title: {} | artist: {} | genre: {}",
                i + 1,
                l.title,
                l.artist,
                l.genre.as_deref().unwrap_or("-")
            );
        }

        Ok(self.list_catalog())
    }

    /// Labels of the page controls currently visible.
    pub fn list_pages(&self) -> Result<Vec<String>, InspectError> {
        let pages: Vec<String> = self
            .inspector
            .page_controls()?
            .iter()
            .filter_map(|c| c.text().ok())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        tracing::info!(pages = %pages.join(", "), "catalog pages");
        Ok(pages)
    }

    /// After a player command: wait to settle, then if playing, publish
    /// the current track to the candidate slot. Returns the play state read.
    fn capture_now_playing(&self) -> bool {
        thread::sleep(self.settings.settle());

        if !playing_or_idle(self.inspector.as_ref()) {
            return false;
        }

        match self.inspector.current_track_metadata() {
            Ok(Some(meta)) => {
                let record = meta.observed_now();
                tracing::info!(track = %record, "now playing");
                self.candidate.replace(record);
            }
            Ok(None) => tracing::warn!("player is playing but reports no track"),
            Err(e) => tracing::warn!(error = %e, "could not read now-playing track"),
        }
        true
    }
}
