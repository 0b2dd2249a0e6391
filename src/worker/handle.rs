use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::inspector::PageInspector;
use crate::session::Session;
use crate::tracker::StatusHandle;

use super::thread::spawn_worker_thread;
use super::types::{SessionCmd, SessionView, ViewHandle};

pub struct SessionWorker {
    tx: Sender<SessionCmd>,
    view: ViewHandle,
    tracker: StatusHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl SessionWorker {
    /// Move `session` onto its own thread.
    pub fn spawn<I: PageInspector>(session: Session<I>) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<SessionCmd>();
        let view: ViewHandle = Arc::new(Mutex::new(SessionView::default()));
        let tracker = session.tracker_status();

        let join = spawn_worker_thread(session, rx, view.clone())?;

        Ok(Self {
            tx,
            view,
            tracker,
            join: Mutex::new(Some(join)),
        })
    }

    pub fn view_handle(&self) -> ViewHandle {
        self.view.clone()
    }

    pub fn tracker_handle(&self) -> StatusHandle {
        self.tracker.clone()
    }

    pub fn send(&self, cmd: SessionCmd) -> Result<(), mpsc::SendError<SessionCmd>> {
        self.tx.send(cmd)
    }

    /// Ask the worker to shut the session down and wait for it.
    pub fn quit(&self) {
        let _ = self.send(SessionCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
