use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::history::{Commit, PlayHistory};
use crate::inspector::{PageInspector, playing_or_idle};
use crate::track::TrackRecord;

use super::candidate::CandidateSlot;

/// What a single reconciliation cycle ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The navigator has not confirmed anything playing yet.
    NoCandidate,
    /// The candidate equals the last history entry.
    Duplicate,
    /// The player is not playing (or could not be read).
    NotPlaying,
    /// The candidate was appended and written to disk.
    Committed,
    /// The candidate was appended in memory but the file write failed.
    PersistFailed,
}

/// One read of the player's play state and when it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayReading {
    pub playing: bool,
    pub at: Instant,
}

impl PlayReading {
    pub fn now(playing: bool) -> Self {
        Self {
            playing,
            at: Instant::now(),
        }
    }

    /// The more recent of two optional readings.
    pub fn newest(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Some(if b.at > a.at { b } else { a }),
            (a, b) => a.or(b),
        }
    }
}

/// Tracker state published for the front end after every cycle.
#[derive(Debug, Clone, Default)]
pub struct TrackerStatus {
    pub history_len: usize,
    /// Most recent records, newest first.
    pub recent: Vec<TrackRecord>,
    pub last_outcome: Option<CycleOutcome>,
    pub unflushed: bool,
    pub cycles: u64,
    /// Play state read by the last cycle that had a candidate.
    pub playing: Option<PlayReading>,
}

pub type StatusHandle = Arc<Mutex<TrackerStatus>>;

/// Owns the play history and reconciles it with the candidate slot.
pub struct Tracker<I: PageInspector> {
    inspector: Arc<I>,
    history: PlayHistory,
    candidate: CandidateSlot,
    status: StatusHandle,
    recent_limit: usize,
    last_reading: Option<PlayReading>,
}

impl<I: PageInspector> Tracker<I> {
    pub fn new(
        inspector: Arc<I>,
        history: PlayHistory,
        candidate: CandidateSlot,
        recent_limit: usize,
    ) -> Self {
        let tracker = Self {
            inspector,
            history,
            candidate,
            status: Arc::new(Mutex::new(TrackerStatus::default())),
            recent_limit,
            last_reading: None,
        };
        tracker.publish(None, 0);
        tracker
    }

    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }

    pub fn history(&self) -> &PlayHistory {
        &self.history
    }

    /// Run one reconciliation step. Never panics on inspector or storage
    /// failures; they are logged and reflected in the outcome.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        match self.history.retry_flush() {
            Ok(true) => tracing::info!(
                records = self.history.len(),
                "history flushed after earlier persist failure"
            ),
            Ok(false) => {}
            Err(e) => tracing::error!(error = %e, "history is still not persisted"),
        }

        let outcome = self.reconcile();
        let cycles = self
            .status
            .lock()
            .map(|s| s.cycles + 1)
            .unwrap_or_default();
        self.publish(Some(outcome), cycles);
        outcome
    }

    fn reconcile(&mut self) -> CycleOutcome {
        let Some(candidate) = self.candidate.snapshot() else {
            return CycleOutcome::NoCandidate;
        };

        let playing = playing_or_idle(self.inspector.as_ref());
        self.last_reading = Some(PlayReading::now(playing));

        if !self.history.accepts(&candidate) {
            return CycleOutcome::Duplicate;
        }

        if !playing {
            tracing::debug!(track = %candidate, "candidate not committed, player is not playing");
            return CycleOutcome::NotPlaying;
        }

        match self.history.commit(candidate.as_ref().clone()) {
            Ok(Commit::Appended) => {
                tracing::info!(track = %candidate, total = self.history.len(), "play recorded");
                CycleOutcome::Committed
            }
            Ok(Commit::Duplicate) => CycleOutcome::Duplicate,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    track = %candidate,
                    "play kept in memory but NOT written to disk"
                );
                CycleOutcome::PersistFailed
            }
        }
    }

    fn publish(&self, outcome: Option<CycleOutcome>, cycles: u64) {
        if let Ok(mut status) = self.status.lock() {
            status.history_len = self.history.len();
            status.recent = self.history.recent(self.recent_limit);
            status.last_outcome = outcome;
            status.unflushed = self.history.has_unflushed();
            status.cycles = cycles;
            status.playing = self.last_reading;
        }
    }
}
