use std::path::Path;

/// Build the list text for a track: `Artist - Title` when both tags are
/// present, the title alone, or the file stem when the file has no usable tags.
pub fn display_title(path: &Path, title: Option<&str>, artist: Option<&str>) -> String {
    let title = title.map(str::trim).filter(|s| !s.is_empty());
    let artist = artist.map(str::trim).filter(|s| !s.is_empty());

    match (artist, title) {
        (Some(a), Some(t)) => format!("{a} - {t}"),
        (None, Some(t)) => t.to_string(),
        _ => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string(),
    }
}
