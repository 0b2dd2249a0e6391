use std::io;
use std::sync::Mutex;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::inspector::PageInspector;

use super::cycle::{StatusHandle, Tracker};

/// Owner-side handle of the tracker thread.
pub struct TrackerHandle {
    stop_tx: Sender<()>,
    status: StatusHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl TrackerHandle {
    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Ask the loop to exit at the next cycle boundary and wait for it.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(());
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                if h.join().is_err() {
                    tracing::error!("tracker thread panicked");
                }
            }
        }
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Run `tracker` on its own thread: one cycle immediately, then one per
/// `interval` (a sleep between cycles, not a deadline).
pub fn spawn_tracker<I: PageInspector>(
    mut tracker: Tracker<I>,
    interval: Duration,
) -> io::Result<TrackerHandle> {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let status = tracker.status_handle();

    let join = thread::Builder::new()
        .name("playlog-tracker".into())
        .spawn(move || {
            tracing::info!(interval_secs = interval.as_secs_f64(), "tracker started");
            loop {
                let outcome = tracker.run_cycle();
                tracing::trace!(?outcome, "tracker cycle finished");

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::info!(records = tracker.history().len(), "tracker stopped");
        })
        .inspect_err(|e| tracing::error!(error = %e, "failed to spawn tracker thread"))?;

    Ok(TrackerHandle {
        stop_tx,
        status,
        join: Mutex::new(Some(join)),
    })
}
