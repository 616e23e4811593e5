use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::library::Track;

use super::state::PlaybackState;

/// A change for the presentation layer.
///
/// Every view-visible change, including the watcher's time refreshes, travels
/// through one `Sender<UiUpdate>`; only the event loop reads the other end.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// A folder was listed; `tracks` is its (possibly empty) track list.
    FolderOpened { folder: PathBuf, tracks: Vec<Track> },
    /// The track list was reordered in place.
    TrackList(Vec<Track>),
    NowPlaying { index: usize, path: PathBuf },
    HistoryAppended(PathBuf),
    /// Formatted `mm:ss / mm:ss` position text.
    TimeInfo(String),
    State(PlaybackState),
    /// Volume in percent.
    Volume(u8),
    Repeat(bool),
}

pub type UpdateSender = Sender<UiUpdate>;
