//! The capability the tracker and navigator consume to see and poke the
//! rendered player.
//!
//! Implementations live elsewhere (`webdriver` for a real browser, a
//! scripted player under test). Every call is fallible and may be slow.

use crate::error::InspectError;
use crate::track::TrackMetadata;

#[cfg(test)]
pub mod fake;

/// Position and size of a rendered element, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Whether `x` lies within `[self.x, self.x + self.width)`.
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// A clickable thing on the page: a catalog item, a page control, the
/// play button.
pub trait Selectable: Send {
    fn activate(&self) -> Result<(), InspectError>;
    fn text(&self) -> Result<String, InspectError>;
    fn bounding_box(&self) -> Result<Rect, InspectError>;
}

/// Read/act access to the player page.
pub trait PageInspector: Send + Sync + 'static {
    type Item: Selectable + 'static;

    /// Whether playback is active right now.
    fn is_playing(&self) -> Result<bool, InspectError>;

    /// Metadata of the current track, or `None` when nothing is loaded.
    fn current_track_metadata(&self) -> Result<Option<TrackMetadata>, InspectError>;

    /// Bounds of the visible catalog container.
    fn catalog_region(&self) -> Result<Rect, InspectError>;

    /// Every catalog item in the DOM, including ones scrolled off-screen.
    fn catalog_items(&self) -> Result<Vec<Self::Item>, InspectError>;

    /// Labeled page controls ("1", "2", "next", ...).
    fn page_controls(&self) -> Result<Vec<Self::Item>, InspectError>;

    /// The play/pause toggle for whatever the player has selected.
    fn play_control(&self) -> Result<Self::Item, InspectError>;

    /// Release the underlying page. Default: nothing to release.
    fn close(&self) -> Result<(), InspectError> {
        Ok(())
    }
}

/// `is_playing` with failures degraded to "not playing".
pub fn playing_or_idle<I: PageInspector + ?Sized>(inspector: &I) -> bool {
    match inspector.is_playing() {
        Ok(playing) => playing,
        Err(e) => {
            tracing::warn!(error = %e, "could not read play state, treating as not playing");
            false
        }
    }
}
