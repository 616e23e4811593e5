//! Error types surfaced by the player.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by folder loading, the controller and the audio engine.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The selected folder could not be listed.
    #[error("cannot read folder {path:?}: {source}")]
    FolderUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The folder contains no playable tracks.
    #[error("no playable tracks")]
    EmptyTrackList,

    /// The active track is not part of the track list.
    #[error("current track not found in track list")]
    TrackNotFound,

    /// A track index past the end of the track list.
    #[error("track index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// No track is loaded, or its duration is unknown.
    #[error("no track loaded")]
    NoTrackLoaded,

    #[error("cannot decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The audio output device could not be opened.
    #[error("audio device unavailable: {0}")]
    AudioDevice(String),

    /// The audio thread has exited.
    #[error("audio engine disconnected")]
    EngineDisconnected,
}

pub type Result<T> = std::result::Result<T, PlayerError>;
