use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode, PlaybackState};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::track::TrackRecord;
use crate::ui;
use crate::worker::{SessionCmd, SessionView, SessionWorker};

/// What the loop should do after a key press or a control command.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Nothing,
    Send(SessionCmd),
    Quit,
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-known track as emitted to MPRIS.
    pub last_mpris_track: Option<TrackRecord>,
    /// Last-known playback state as emitted to MPRIS.
    pub last_mpris_playback: PlaybackState,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            last_mpris_track: None,
            last_mpris_playback: app.playback,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the
/// session worker and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    worker: &SessionWorker,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let view = app.view();
        let tracker = app.tracker_status();
        app.sync(&view, &tracker);

        // Keep MPRIS in sync even when playback changes come from media keys.
        if view.now_playing != state.last_mpris_track || app.playback != state.last_mpris_playback {
            update_mpris(mpris, app, &view);
            state.last_mpris_track = view.now_playing.clone();
            state.last_mpris_playback = app.playback;
        }

        terminal.draw(|f| ui::draw(f, app, &view, &tracker, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if dispatch(worker, control_action(cmd, app)) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = key_action(key, app, &view, settings);
                if dispatch(worker, action) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Forward an action to the worker. Returns true when the loop should exit.
fn dispatch(worker: &SessionWorker, action: Action) -> bool {
    match action {
        Action::Nothing => false,
        Action::Quit => true,
        Action::Send(cmd) => {
            if let Err(e) = worker.send(cmd) {
                tracing::error!(error = %e, "session worker is gone");
                return true;
            }
            false
        }
    }
}

/// Map an MPRIS request onto a session command.
pub fn control_action(cmd: ControlCmd, app: &mut App) -> Action {
    match cmd {
        ControlCmd::Quit => Action::Quit,
        ControlCmd::Play => Action::Send(SessionCmd::Resume),
        ControlCmd::Pause => Action::Send(SessionCmd::Pause),
        ControlCmd::PlayPause => Action::Send(SessionCmd::Toggle),
        ControlCmd::Next => {
            app.follow_playback_on();
            Action::Send(SessionCmd::PlayNext)
        }
    }
}

pub fn key_action(
    key: KeyEvent,
    app: &mut App,
    view: &SessionView,
    settings: &config::Settings,
) -> Action {
    if app.mode == InputMode::PagePrompt {
        match key.code {
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => {
                if let Some(label) = app.take_prompt() {
                    return Action::Send(SessionCmd::AdvanceCatalog(label));
                }
            }
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return Action::Nothing;
    }

    let len = view.catalog.len();
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback_off();
            app.next(len);
            Action::Nothing
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback_off();
            app.prev(len);
            Action::Nothing
        }
        KeyCode::Enter => {
            if len == 0 {
                return Action::Nothing;
            }
            app.follow_playback_on();
            Action::Send(SessionCmd::Select(Some(app.cursor_index())))
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => Action::Send(SessionCmd::Toggle),
        KeyCode::Char('l') => {
            app.follow_playback_on();
            Action::Send(SessionCmd::PlayNext)
        }
        KeyCode::Char('n') => Action::Send(SessionCmd::AdvanceCatalog(
            settings.navigator.next_page_label.clone(),
        )),
        KeyCode::Char(':') => {
            app.enter_page_prompt();
            Action::Nothing
        }
        KeyCode::Char('r') => Action::Send(SessionCmd::Refresh),
        _ => Action::Nothing,
    }
}
