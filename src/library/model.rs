use std::path::PathBuf;
use std::time::Duration;

/// One playable file in the selected folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// Text shown in the track list.
    pub display: String,
    /// Duration read from the file's tags, used when the decoder can't report one.
    pub duration: Option<Duration>,
}

impl Track {
    /// A track with no tag information; the display falls back to the file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = super::display::display_title(&path, None, None);
        Self {
            path,
            display,
            duration: None,
        }
    }
}
