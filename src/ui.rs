//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::SessionState;
use crate::config::UiSettings;

/// Key bindings in the order they are shown.
const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("h/l", "prev/next"),
    ("f", "follow"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Status line: session state, cursor mode and directory.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = app.state();
    match state {
        SessionState::Empty => parts.push(state.label().to_string()),
        _ => {
            if let Some(i) = state.index() {
                parts.push(format!("{} [{}/{}]", state.label(), i + 1, app.tracks.len()));
            }
        }
    }

    if app.follow_playback {
        parts.push("CURSOR: Follow".to_string());
    } else {
        parts.push("CURSOR: Free-roam".to_string());
    }

    if let Some(dir) = &app.current_dir {
        parts.push(format!("Dir: {}", dir));
    }

    parts.join(" • ")
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" rawplayer ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing + status
    // Before the worker's first snapshot the title is blank; only an empty
    // list means there is nothing to play.
    let title = if app.title().is_empty() && !app.has_tracks() {
        ui_settings.no_music_text.as_str()
    } else {
        app.title()
    };
    let now_playing = Paragraph::new(format!("{}\n{}", title, status_text(app)))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, chunks[1]);

    // Track list, windowed around the cursor.
    {
        let total = app.tracks.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel = app.selected.min(total.saturating_sub(1));
        let (start, end) = if total <= list_height || list_height == 0 {
            (0, total)
        } else {
            let half = list_height / 2;
            let mut start = sel.saturating_sub(half);
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height)
        };

        let current = app.state().index();
        let visible_items: Vec<ListItem> = (start..end)
            .map(|i| {
                let name = app.tracks[i].as_str();
                if Some(i) == current {
                    ListItem::new(format!("♪ {}", name))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {}", name))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(sel - start));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text())
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
