//! Application model types: `App` and `InputMode`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::UiSettings;
use crate::library::Track;
use crate::player::{PlaybackState, UiUpdate, format_time};

/// Where key presses go.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a folder path into the prompt line.
    FolderPrompt,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub now_playing: Option<usize>,
    pub history: Vec<PathBuf>,
    pub time_info: String,
    pub state: PlaybackState,
    pub volume: u8,
    pub repeat: bool,
    pub folder: Option<PathBuf>,
    pub show_history: bool,
    pub mode: InputMode,
    pub prompt: String,
    /// Last error or notice, shown in the status line.
    pub status: Option<String>,
}

impl App {
    pub fn new(ui: &UiSettings) -> Self {
        Self {
            tracks: Vec::new(),
            selected: 0,
            now_playing: None,
            history: Vec::new(),
            time_info: format_time(Duration::ZERO, None, &ui.time_separator),
            state: PlaybackState::Stopped,
            volume: 0,
            repeat: false,
            folder: None,
            show_history: ui.show_history,
            mode: InputMode::Normal,
            prompt: String::new(),
            status: None,
        }
    }

    /// Fold one controller update into the model.
    pub fn apply(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::FolderOpened { folder, tracks } => {
                if tracks.is_empty() {
                    self.status = Some(format!("no playable files in {}", folder.display()));
                }
                self.tracks = tracks;
                self.folder = Some(folder);
                self.selected = 0;
                self.now_playing = None;
            }
            UiUpdate::TrackList(tracks) => {
                self.tracks = tracks;
                self.selected = 0;
                self.now_playing = None;
            }
            UiUpdate::NowPlaying { index, .. } => {
                self.now_playing = Some(index);
                if index < self.tracks.len() {
                    self.selected = index;
                }
            }
            UiUpdate::HistoryAppended(path) => self.history.push(path),
            UiUpdate::TimeInfo(text) => self.time_info = text,
            UiUpdate::State(state) => self.state = state,
            UiUpdate::Volume(v) => self.volume = v,
            UiUpdate::Repeat(on) => self.repeat = on,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn now_playing_track(&self) -> Option<&Track> {
        self.now_playing.and_then(|i| self.tracks.get(i))
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.tracks.len() - 1);
        }
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Open the folder prompt, prefilled with the current folder.
    pub fn begin_prompt(&mut self) {
        self.mode = InputMode::FolderPrompt;
        self.prompt = self
            .folder
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
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

    /// Close the prompt and return the entered folder, if any.
    ///
    /// A leading `~` expands to `$HOME`.
    pub fn take_prompt(&mut self) -> Option<PathBuf> {
        self.mode = InputMode::Normal;
        let raw = std::mem::take(&mut self.prompt);
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(expand_home(raw, std::env::var_os("HOME").as_deref().map(Path::new)))
    }
}

pub(super) fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(raw),
    }
}

