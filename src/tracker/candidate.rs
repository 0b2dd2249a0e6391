//! The single slot shared by the navigator (writer) and tracker (reader).

use std::sync::{Arc, Mutex};

use crate::track::TrackRecord;

/// "What is believed to be playing right now."
///
/// The lock only guards a pointer swap or clone, so neither side ever waits
/// on the other's inspector calls.
#[derive(Debug, Clone, Default)]
pub struct CandidateSlot {
    inner: Arc<Mutex<Option<Arc<TrackRecord>>>>,
}

impl CandidateSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot. Only the navigator calls this.
    pub fn replace(&self, record: TrackRecord) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(Arc::new(record));
        }
    }

    /// Point-in-time copy of the slot. A poisoned lock reads as empty.
    pub fn snapshot(&self) -> Option<Arc<TrackRecord>> {
        self.inner.lock().ok().and_then(|slot| slot.clone())
    }
}
