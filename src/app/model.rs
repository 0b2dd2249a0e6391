//! Application model types: `App`, `PlaybackState` and `InputMode`.
//!
//! `App` owns nothing of the session itself. It holds the cursor over the
//! published catalog, the page prompt, and the handles the worker and the
//! tracker publish into.

use crate::tracker::{PlayReading, StatusHandle, TrackerStatus};
use crate::worker::{SessionView, ViewHandle};

/// The playback state of the player page as last observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    /// Derive the state from the newest play-state reading, whether the
    /// worker took it after a command or the tracker took it on a cycle.
    pub fn observe(view: &SessionView, tracker: &TrackerStatus) -> Self {
        let reading = PlayReading::newest(view.playing, tracker.playing);
        match (reading.map(|r| r.playing), view.now_playing.is_some()) {
            (Some(true), _) => Self::Playing,
            (Some(false), true) => Self::Paused,
            _ => Self::Stopped,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a page label after `:`.
    PagePrompt,
}

pub struct App {
    /// 0-based cursor into the published catalog.
    pub cursor: usize,
    pub playback: PlaybackState,
    pub follow_playback: bool,
    pub mode: InputMode,
    pub prompt: String,
    pub history_path: String,

    view: ViewHandle,
    tracker: StatusHandle,
    last_selected: Option<usize>,
}

impl App {
    pub fn new(view: ViewHandle, tracker: StatusHandle, history_path: String) -> Self {
        Self {
            cursor: 0,
            playback: PlaybackState::Stopped,
            follow_playback: true,
            mode: InputMode::Normal,
            prompt: String::new(),
            history_path,
            view,
            tracker,
            last_selected: None,
        }
    }

    /// Copy of the latest session view.
    pub fn view(&self) -> SessionView {
        self.view.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Copy of the latest tracker status.
    pub fn tracker_status(&self) -> TrackerStatus {
        self.tracker.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Fold freshly published state into the model: playback state,
    /// cursor bounds, and (when following) the navigator's selection.
    pub fn sync(&mut self, view: &SessionView, tracker: &TrackerStatus) {
        self.playback = PlaybackState::observe(view, tracker);

        if view.selected != self.last_selected {
            self.last_selected = view.selected;
            if self.follow_playback {
                if let Some(sel) = view.selected {
                    self.cursor = sel - 1;
                }
            }
        }

        let len = view.catalog.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// 1-based catalog index under the cursor, for `Select`.
    pub fn cursor_index(&self) -> usize {
        self.cursor + 1
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    pub fn enter_page_prompt(&mut self) {
        self.mode = InputMode::PagePrompt;
        self.prompt.clear();
    }

    pub fn push_prompt_char(&mut self, c: char) {
        self.prompt.push(c);
    }

    pub fn pop_prompt_char(&mut self) {
        self.prompt.pop();
    }

    pub fn cancel_prompt(&mut self) {
        self.mode = InputMode::Normal;
        self.prompt.clear();
    }

    /// Leave prompt mode and return the typed label, if any.
    pub fn take_prompt(&mut self) -> Option<String> {
        self.mode = InputMode::Normal;
        let label = std::mem::take(&mut self.prompt);
        let label = label.trim();
        if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        }
    }
}
