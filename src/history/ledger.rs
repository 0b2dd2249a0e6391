use crate::error::HistoryError;
use crate::track::TrackRecord;

use super::store::HistoryStore;

/// Result of offering a record to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// The record was appended and is on disk.
    Appended,
    /// The record equals the last entry; nothing changed.
    Duplicate,
}

/// In-memory play history mirrored to a `HistoryStore`.
///
/// Invariant: no two adjacent records are equal.
#[derive(Debug)]
pub struct PlayHistory {
    store: HistoryStore,
    records: Vec<TrackRecord>,
    unflushed: bool,
}

impl PlayHistory {
    /// Load the history behind `store`. Corruption is returned to the caller.
    pub fn open(store: HistoryStore) -> Result<Self, HistoryError> {
        let records = store.load()?;
        Ok(Self {
            store,
            records,
            unflushed: false,
        })
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn records(&self) -> &[TrackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TrackRecord> {
        self.records.last()
    }

    /// Up to `n` most recent records, newest first.
    pub fn recent(&self, n: usize) -> Vec<TrackRecord> {
        self.records.iter().rev().take(n).cloned().collect()
    }

    /// Whether the in-memory history holds records the file does not.
    pub fn has_unflushed(&self) -> bool {
        self.unflushed
    }

    /// Whether `record` would be appended (history empty or last entry differs).
    pub fn accepts(&self, record: &TrackRecord) -> bool {
        self.records.last() != Some(record)
    }

    /// Append `record` unless it repeats the last entry, then rewrite the file.
    ///
    /// On a persist failure the record stays in memory and the history is
    /// marked unflushed; the next successful persist carries it to disk.
    pub fn commit(&mut self, record: TrackRecord) -> Result<Commit, HistoryError> {
        if !self.accepts(&record) {
            return Ok(Commit::Duplicate);
        }

        self.records.push(record);
        self.flush()?;
        Ok(Commit::Appended)
    }

    /// Re-persist after an earlier failure. No-op when already in sync.
    pub fn retry_flush(&mut self) -> Result<bool, HistoryError> {
        if !self.unflushed {
            return Ok(false);
        }
        self.flush()?;
        Ok(true)
    }

    fn flush(&mut self) -> Result<(), HistoryError> {
        match self.store.persist(&self.records) {
            Ok(()) => {
                self.unflushed = false;
                Ok(())
            }
            Err(e) => {
                self.unflushed = true;
                Err(e)
            }
        }
    }
}
