//! Audio-related small types and handles.
//!
//! This module defines the commands sent to the audio thread, the events it
//! sends back, and the playback snapshot it shares with the rest of the app.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Load a file, paused at the start. `duration_hint` is used when the
    /// decoder can't tell the length of the stream.
    Open {
        path: PathBuf,
        duration_hint: Option<Duration>,
    },
    /// Start or resume the loaded file.
    Play,
    /// Pause, keeping the position.
    Pause,
    /// Stop and rewind to the start.
    Stop,
    /// Jump to an absolute position in the loaded file.
    SeekTo(Duration),
    /// Set the output gain (0.0..=1.0).
    SetVolume(f32),
    /// Quit the audio thread.
    Quit,
}

/// Notifications from the audio thread, drained by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The loaded file played to its natural end.
    TrackEnded { path: PathBuf },
    /// The file could not be opened or decoded.
    Failed { path: PathBuf, message: String },
}

/// Playback snapshot shared between the audio thread and its readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackInfo {
    /// File currently loaded, if any.
    pub path: Option<PathBuf>,
    /// Current position in the loaded file.
    pub position: Duration,
    /// Natural duration of the loaded file, when known.
    pub duration: Option<Duration>,
    /// Whether audio is currently being produced.
    pub playing: bool,
    /// Set once the loaded file has played to its end.
    pub finished: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
