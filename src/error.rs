//! Error types shared across the tracker, navigator and history store.
//!
//! Inspection errors are transient by nature: callers log them and treat
//! the affected cycle or operation as "nothing observed". History errors
//! split into load-time corruption (fatal at startup) and persist failures
//! (loud, but the process keeps running). Session errors wrap whatever
//! stops a session from starting.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while talking to the rendered player.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Transport-level failure (connection refused, timeout, bad body).
    #[error("webdriver request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The driver answered with a W3C error object.
    #[error("webdriver error `{error}`: {message}")]
    Driver { error: String, message: String },

    /// A selector matched nothing.
    #[error("no element matches `{0}`")]
    NoSuchElement(String),

    /// The driver answered with something we could not interpret.
    #[error("unexpected webdriver response: {0}")]
    Protocol(String),

    /// The player is not reachable at all (closed session, scripted outage).
    #[error("player unavailable: {0}")]
    Unavailable(String),
}

/// Failure while loading or persisting the play history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("history CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row has the wrong number of columns.
    #[error("corrupt history record on line {line}: expected {expected} fields, found {found}")]
    CorruptRecord {
        line: u64,
        found: usize,
        expected: usize,
    },

    /// A data row carries an `observed_at` value that is neither RFC 3339
    /// nor a `ctime` string.
    #[error(
        "corrupt history record on line {line}: bad timestamp `{value}` \
         (expected RFC 3339 like `2026-10-17T09:15:02+02:00` or ctime like `Sat Oct 17 09:15:02 2026`)"
    )]
    CorruptTimestamp { line: u64, value: String },

    /// Writing the history file failed; the in-memory history is ahead of disk.
    #[error("failed to persist history to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HistoryError {
    /// True for errors that mean the on-disk record cannot be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::CorruptRecord { .. } | Self::CorruptTimestamp { .. } | Self::Csv(_)
        )
    }
}

/// Failure while starting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("failed to start the tracker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl SessionError {
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::History(e) if e.is_corruption())
    }
}
