//! Utilities for creating `rodio` sinks from file paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` positioned at the start.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::{PlayerError, Result};

/// Open and probe `path`, mapping every failure to [`PlayerError::Decode`].
pub(super) fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let decode_err = |message: String| PlayerError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|e| decode_err(e.to_string()))?;
    Decoder::new(BufReader::new(file)).map_err(|e| decode_err(e.to_string()))
}

/// Create a paused `Sink` for `path` at `volume`, returning it with the
/// decoder's reported duration.
pub(super) fn create_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<(Sink, Option<Duration>)> {
    let source = decode(path)?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.pause();
    sink.append(source);
    Ok((sink, duration))
}
