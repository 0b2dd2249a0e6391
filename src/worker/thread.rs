use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use crate::inspector::PageInspector;
use crate::navigator::Navigation;
use crate::session::Session;
use crate::tracker::PlayReading;

use super::types::{SessionCmd, ViewHandle};

pub(super) fn spawn_worker_thread<I: PageInspector>(
    mut session: Session<I>,
    rx: Receiver<SessionCmd>,
    view: ViewHandle,
) -> std::io::Result<JoinHandle<()>> {
    update_pages(&session, &view);
    publish(&session, &view, None);

    thread::Builder::new()
        .name("playlog-session".into())
        .spawn(move || {
            // A closed channel means the UI is gone; shut down the same way.
            while let Ok(cmd) = rx.recv() {
                if cmd == SessionCmd::Quit {
                    break;
                }
                if let Ok(mut v) = view.lock() {
                    v.busy = true;
                }
                let moves_pages = matches!(
                    cmd,
                    SessionCmd::Refresh | SessionCmd::AdvanceCatalog(_) | SessionCmd::PlayNext
                );
                let message = run_command(&mut session, &view, cmd);
                if moves_pages {
                    update_pages(&session, &view);
                }
                publish(&session, &view, message);
            }
            session.shutdown();
        })
}

fn run_command<I: PageInspector>(
    session: &mut Session<I>,
    view: &ViewHandle,
    cmd: SessionCmd,
) -> Option<String> {
    let result = match &cmd {
        SessionCmd::Select(index) => session.select(*index),
        SessionCmd::Toggle => session.toggle(),
        SessionCmd::Pause => session.pause(),
        SessionCmd::Resume => session.resume(),
        SessionCmd::PlayNext => session.play_next(),
        SessionCmd::AdvanceCatalog(label) => session.advance_catalog(label),
        SessionCmd::Refresh => {
            return match session.refresh_catalog() {
                Ok(items) => Some(format!("catalog: {} items", items.len())),
                Err(e) => {
                    tracing::warn!(error = %e, "catalog refresh failed");
                    Some(format!("refresh failed: {e}"))
                }
            };
        }
        SessionCmd::ListPages => {
            return Some(match update_pages(session, view) {
                Some(pages) => format!("pages: {}", pages.join(" ")),
                None => "pages unavailable".to_string(),
            });
        }
        SessionCmd::Quit => return None,
    };

    match result {
        Ok(Navigation::Ignored) => Some(match &cmd {
            SessionCmd::Select(Some(i)) => format!("no track #{i} on this page"),
            SessionCmd::AdvanceCatalog(label) => format!("no page `{label}`"),
            SessionCmd::Pause => "already paused".to_string(),
            SessionCmd::Resume => "already playing".to_string(),
            _ => "nothing to do".to_string(),
        }),
        Ok(Navigation::Played { playing }) => {
            if let Ok(mut v) = view.lock() {
                v.playing = Some(PlayReading::now(playing));
            }
            Some(if playing { "playing" } else { "paused" }.to_string())
        }
        Ok(Navigation::PageChanged { items }) => {
            Some(format!("page changed: {items} items"))
        }
        Err(e) => {
            tracing::warn!(error = %e, command = ?cmd, "player command failed");
            Some(format!("player error: {e}"))
        }
    }
}

/// Re-read the page control labels into the view.
fn update_pages<I: PageInspector>(session: &Session<I>, view: &ViewHandle) -> Option<Vec<String>> {
    match session.list_pages() {
        Ok(pages) => {
            if let Ok(mut v) = view.lock() {
                v.pages = pages.clone();
            }
            Some(pages)
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not list pages");
            None
        }
    }
}

fn publish<I: PageInspector>(session: &Session<I>, view: &ViewHandle, message: Option<String>) {
    let catalog = session.list_catalog();
    let selected = session.selected();
    let now_playing = session.now_playing().map(|r| r.as_ref().clone());

    if let Ok(mut v) = view.lock() {
        v.catalog = catalog;
        v.selected = selected;
        v.now_playing = now_playing;
        v.busy = false;
        if message.is_some() {
            v.message = message;
        }
    }
}
