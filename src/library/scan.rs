use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::{PlayerError, Result};

use super::display::display_title;
use super::model::Track;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn read_track(path: &Path) -> Track {
    let mut title: Option<String> = None;
    let mut artist: Option<String> = None;
    let mut duration: Option<Duration> = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        let d = tagged.properties().duration();
        if !d.is_zero() {
            duration = Some(d);
        }
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            title = tag.title().map(|v| v.into_owned());
            artist = tag.artist().map(|v| v.into_owned());
        }
    }

    Track {
        path: path.to_path_buf(),
        display: display_title(path, title.as_deref(), artist.as_deref()),
        duration,
    }
}

/// List the playable files directly inside `dir`, in directory enumeration order.
///
/// Subdirectories are not entered. A folder that exists but has no matching
/// files yields an empty list; a folder that can't be listed is an error.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>> {
    let unreadable = |source: io::Error| PlayerError::FolderUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let meta = fs::metadata(dir).map_err(unreadable)?;
    if !meta.is_dir() {
        return Err(unreadable(io::Error::new(
            io::ErrorKind::Other,
            "not a directory",
        )));
    }

    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .min_depth(1)
        .max_depth(1);

    let mut tracks: Vec<Track> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) if err.depth() == 0 => {
                let source = err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "walk error"));
                return Err(unreadable(source));
            }
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            tracks.push(read_track(path));
        }
    }

    tracing::info!(folder = %dir.display(), tracks = tracks.len(), "folder scanned");
    Ok(tracks)
}
