//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::path::Path;

use crate::app::{App, InputMode};
use crate::config::{ControlsSettings, UiSettings};

const CONTROLS: [(&str, &str); 13] = [
    ("j/k", "up/down"),
    ("enter", "play selected"),
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("H/L", "seek"),
    ("-/+", "volume"),
    ("s", "shuffle"),
    ("r", "repeat"),
    ("x", "stop"),
    ("o", "open folder"),
    ("y", "history"),
    ("q", "quit"),
    ("esc", "cancel prompt"),
];

/// Render the controls help text, including the configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    CONTROLS
        .iter()
        .map(|(key, what)| match *key {
            "H/L" => format!("[H/L] seek -/+{}%", controls.seek_step_percent),
            "-/+" => format!("[-/+] volume -/+{}%", controls.volume_step_percent),
            _ => format!("[{key}] {what}"),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Status line: state, time, volume, repeat, folder and the last error.
fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    match app.now_playing_track() {
        Some(track) => parts.push(format!("{}: {}", app.state.label(), track.display)),
        None => parts.push(app.state.label().to_string()),
    }
    parts.push(app.time_info.clone());
    parts.push(format!("Vol: {}%", app.volume));
    parts.push(format!("Repeat: {}", if app.repeat { "ON" } else { "OFF" }));
    if let Some(dir) = &app.folder {
        parts.push(format!("Dir: {}", dir.display()));
    }
    if let Some(msg) = &app.status {
        parts.push(format!("! {msg}"));
    }

    parts.join(" • ")
}

/// Window of `total` rows of which `height` fit, keeping `selected` centred.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app))
        .block(Block::bordered().padding(left_pad()).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Track list; only the visible window is turned into ListItems.
    {
        let total = app.tracks.len();
        let (start, end) = visible_window(total, chunks[2].height as usize, app.selected);
        let items: Vec<ListItem> = app.tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let item = ListItem::new(track.display.as_str());
                if app.now_playing == Some(start + offset) {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    if app.show_history {
        let popup = centered_rect_sized(60, 14, chunks[2]);
        frame.render_widget(Clear, popup);

        let rows = popup.height.saturating_sub(2) as usize;
        let skip = app.history.len().saturating_sub(rows);
        let items: Vec<ListItem> = app.history[skip..]
            .iter()
            .enumerate()
            .map(|(i, path)| ListItem::new(format!("{:>3}. {}", skip + i + 1, file_name(path))))
            .collect();
        let history = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .padding(left_pad())
                .title(" history (y closes) "),
        );
        frame.render_widget(history, popup);
    }

    let prompt_text = match app.mode {
        InputMode::FolderPrompt => format!("{}_", app.prompt),
        InputMode::Normal => String::new(),
    };
    let prompt_title = match app.mode {
        InputMode::FolderPrompt => " open folder (enter loads, esc cancels) ",
        InputMode::Normal => " folder ",
    };
    let prompt = Paragraph::new(prompt_text).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(left_pad())
            .title(prompt_title),
    );
    frame.render_widget(prompt, chunks[3]);

    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
