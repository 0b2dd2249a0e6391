//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, InputMode};
use crate::config::UiSettings;
use crate::tracker::{CycleOutcome, TrackerStatus};
use crate::worker::SessionView;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "play selected track");
    map.insert("space/p", "play/pause");
    map.insert("l", "next track");
    map.insert("n", "next page");
    map.insert(":", "go to page");
    map.insert("r", "reload catalog");
    map.insert("q", "quit");
    map
});

/// Render the controls help text in a stable order.
fn controls_text() -> String {
    let order = ["j/k", "enter", "space/p", "l", "n", ":", "r", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn outcome_text(outcome: CycleOutcome) -> &'static str {
    match outcome {
        CycleOutcome::NoCandidate => "waiting",
        CycleOutcome::Duplicate => "up to date",
        CycleOutcome::NotPlaying => "idle",
        CycleOutcome::Committed => "recorded",
        CycleOutcome::PersistFailed => "write failed",
    }
}

/// Status line parts, joined with a bullet.
fn status_text(app: &App, view: &SessionView, tracker: &TrackerStatus) -> String {
    let mut parts: Vec<String> = Vec::new();

    match &view.now_playing {
        Some(record) => parts.push(format!("Song: {}", record)),
        None => parts.push("Song: -".to_string()),
    }
    parts.push(app.playback.label().to_string());

    if app.follow_playback {
        parts.push("CURSOR: Follow".to_string());
    } else {
        parts.push("CURSOR: Free-roam".to_string());
    }

    if let Some(sel) = view.selected {
        parts.push(format!("Selected: #{}", sel));
    }
    if !view.pages.is_empty() {
        parts.push(format!("Pages: {}", view.pages.join(" ")));
    }

    let mut history = format!("History: {} plays", tracker.history_len);
    if let Some(outcome) = tracker.last_outcome {
        history.push_str(&format!(" ({})", outcome_text(outcome)));
    }
    parts.push(history);
    if tracker.unflushed {
        parts.push(format!("NOT SAVED: {}", app.history_path));
    }

    if view.busy {
        parts.push("working...".to_string());
    } else if let Some(msg) = &view.message {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    view: &SessionView,
    tracker: &TrackerStatus,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" playlog ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status_par = Paragraph::new(status_text(app, view, tracker))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    // Catalog, centered on the cursor when it does not fit.
    {
        let total = view.catalog.len();
        let list_height = columns[0].height.saturating_sub(2) as usize;
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, app.cursor)
        } else {
            let half = list_height / 2;
            let mut start = app.cursor.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, app.cursor - start)
        };

        let visible_items: Vec<ListItem> = view.catalog[start..end]
            .iter()
            .enumerate()
            .map(|(i, listing)| {
                let n = start + i + 1;
                let line = format!("{:>2}. {}", n, listing);
                if view.selected == Some(n) {
                    ListItem::new(line).bold()
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" catalog "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, columns[0], &mut state);
    }

    let recent: Vec<ListItem> = tracker
        .recent
        .iter()
        .map(|r| {
            ListItem::new(format!(
                "{}  {}",
                r.observed_at().format("%m-%d %H:%M"),
                r.display()
            ))
        })
        .collect();
    let recent_list = List::new(recent).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" recently played "),
    );
    frame.render_widget(recent_list, columns[1]);

    let footer_text = match app.mode {
        InputMode::PagePrompt => format!("page: {}_   [enter] go | [esc] cancel", app.prompt),
        InputMode::Normal => controls_text(),
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
