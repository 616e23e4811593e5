use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::audio::{EngineEvent, Transport};
use crate::config::{LibrarySettings, Settings};
use crate::error::{PlayerError, Result};
use crate::library::{self, Track};

use super::state::{PlaybackState, Toggle};
use super::updates::{UiUpdate, UpdateSender};
use super::watcher::{PositionWatcher, format_time};

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Map a 0..=100 volume percentage to a 0.0..=1.0 gain.
pub fn gain_for_percent(percent: f64) -> f32 {
    (clamp_percent(percent) / 100.0) as f32
}

/// Map a 0..=100 percentage to an absolute position within `duration`.
pub fn position_for_percent(duration: Duration, percent: f64) -> Duration {
    duration.mul_f64(clamp_percent(percent) / 100.0)
}

/// Transport operations over a folder's track list.
///
/// Owns the track list, the current index, the play history and the single
/// position watcher. Lives on the event-loop thread.
pub struct PlayerController<T: Transport> {
    transport: T,
    library: LibrarySettings,
    folder: Option<PathBuf>,
    tracks: Vec<Track>,
    current: Option<usize>,
    history: Vec<PathBuf>,
    state: PlaybackState,
    repeat: bool,
    auto_advance: bool,
    volume: f64,
    poll_interval: Duration,
    time_separator: String,
    watcher: Option<PositionWatcher>,
    updates: UpdateSender,
}

impl<T: Transport> PlayerController<T> {
    /// Wrap `transport`, applying the configured initial volume.
    pub fn new(transport: T, settings: &Settings, updates: UpdateSender) -> Result<Self> {
        let mut controller = Self {
            transport,
            library: settings.library.clone(),
            folder: None,
            tracks: Vec::new(),
            current: None,
            history: Vec::new(),
            state: PlaybackState::Stopped,
            repeat: settings.playback.repeat,
            auto_advance: settings.playback.auto_advance,
            volume: 0.0,
            poll_interval: Duration::from_millis(settings.audio.poll_interval_ms.max(1)),
            time_separator: settings.ui.time_separator.clone(),
            watcher: None,
            updates,
        };
        controller.set_volume(f64::from(settings.audio.initial_volume))?;
        controller.publish(UiUpdate::Repeat(controller.repeat));
        Ok(controller)
    }

    fn publish(&self, update: UiUpdate) {
        // The receiver only disappears while the app is shutting down.
        let _ = self.updates.send(update);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            tracing::debug!(from = ?self.state, to = ?state, "state change");
        }
        self.state = state;
        self.publish(UiUpdate::State(state));
    }

    fn current_path(&self) -> Option<&Path> {
        self.current
            .and_then(|i| self.tracks.get(i))
            .map(|t| t.path.as_path())
    }

    fn start_watcher(&mut self) {
        self.stop_watcher();
        let Some(path) = self.current_path().map(Path::to_path_buf) else {
            return;
        };
        self.watcher = Some(PositionWatcher::spawn(
            self.transport.playback_handle(),
            path,
            self.poll_interval,
            self.time_separator.clone(),
            self.updates.clone(),
        ));
    }

    fn ensure_watcher(&mut self) {
        if !self.watcher.as_ref().is_some_and(PositionWatcher::is_running) {
            self.start_watcher();
        }
    }

    fn stop_watcher(&mut self) {
        if let Some(mut w) = self.watcher.take() {
            w.cancel();
        }
    }

    /// Replace the track list with the playable files in `dir`.
    ///
    /// Returns the number of tracks found. On `FolderUnreadable` nothing
    /// changes; on `EmptyTrackList` the folder is still selected, with no tracks.
    pub fn load_folder(&mut self, dir: &Path) -> Result<usize> {
        let tracks = library::scan(dir, &self.library)?;

        self.stop_watcher();
        if self.current.take().is_some() {
            self.transport.stop()?;
        }
        self.tracks = tracks;
        self.folder = Some(dir.to_path_buf());
        self.publish(UiUpdate::FolderOpened {
            folder: dir.to_path_buf(),
            tracks: self.tracks.clone(),
        });
        self.publish(UiUpdate::TimeInfo(format_time(
            Duration::ZERO,
            None,
            &self.time_separator,
        )));
        self.set_state(PlaybackState::Stopped);

        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyTrackList);
        }
        Ok(self.tracks.len())
    }

    /// Load `dir` and start its first track.
    pub fn open_folder(&mut self, dir: &Path) -> Result<()> {
        self.load_folder(dir)?;
        self.play(0)
    }

    /// Load and start the track at `index`, recording it in the history.
    pub fn play(&mut self, index: usize) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyTrackList);
        }
        let Some(track) = self.tracks.get(index).cloned() else {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            });
        };

        let started = self
            .transport
            .open(&track)
            .and_then(|()| self.transport.play());
        self.stop_watcher();
        if let Err(e) = started {
            self.current = None;
            self.set_state(PlaybackState::Stopped);
            return Err(e);
        }
        self.current = Some(index);
        tracing::info!(index, path = %track.path.display(), "playing");

        self.history.push(track.path.clone());
        self.publish(UiUpdate::NowPlaying {
            index,
            path: track.path.clone(),
        });
        self.publish(UiUpdate::HistoryAppended(track.path));
        self.set_state(PlaybackState::Playing);
        self.start_watcher();
        Ok(())
    }

    /// Index of the loaded track.
    pub fn current_index(&self) -> Result<usize> {
        match self.current {
            Some(i) if i < self.tracks.len() => Ok(i),
            _ => Err(PlayerError::TrackNotFound),
        }
    }

    fn step(&mut self, forward: bool) -> Result<()> {
        let len = self.tracks.len();
        if len == 0 {
            return Err(PlayerError::EmptyTrackList);
        }
        let target = match self.current_index() {
            Ok(i) if forward => (i + 1) % len,
            Ok(0) => len - 1,
            Ok(i) => i - 1,
            Err(PlayerError::TrackNotFound) => {
                tracing::debug!("no current track, starting from the first");
                0
            }
            Err(e) => return Err(e),
        };
        self.play(target)
    }

    /// Play the following track, wrapping from the last to the first.
    pub fn next(&mut self) -> Result<()> {
        self.step(true)
    }

    /// Play the preceding track, wrapping from the first to the last.
    pub fn previous(&mut self) -> Result<()> {
        self.step(false)
    }

    pub fn play_pause(&mut self) -> Result<()> {
        let (toggle, next) = self.state.on_play_pause();
        match toggle {
            Toggle::Start if self.current.is_none() => return self.play(0),
            Toggle::Start | Toggle::Resume => {
                self.transport.play()?;
                self.set_state(next);
                self.ensure_watcher();
            }
            Toggle::Pause => {
                self.transport.pause()?;
                self.set_state(next);
            }
            Toggle::Rewind => {
                self.transport.stop()?;
                self.set_state(next);
                self.ensure_watcher();
            }
        }
        Ok(())
    }

    /// Stop and rewind the loaded track.
    pub fn stop(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }
        self.transport.stop()?;
        self.set_state(PlaybackState::Stopped);
        self.ensure_watcher();
        Ok(())
    }

    /// Flip repeat; returns the new setting.
    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.publish(UiUpdate::Repeat(self.repeat));
        self.repeat
    }

    /// Randomly reorder the track list and start its new first track.
    pub fn shuffle(&mut self) -> Result<()> {
        if self.tracks.is_empty() {
            return Err(PlayerError::EmptyTrackList);
        }
        self.tracks.shuffle(&mut rand::rng());
        self.current = None;
        self.publish(UiUpdate::TrackList(self.tracks.clone()));
        self.play(0)
    }

    /// Natural duration of the loaded track, from the engine or the tags.
    pub fn duration(&self) -> Option<Duration> {
        let current = self.current_path()?;
        let engine = self
            .transport
            .playback_handle()
            .lock()
            .ok()
            .filter(|info| info.path.as_deref() == Some(current))
            .and_then(|info| info.duration);
        engine.or_else(|| self.current.and_then(|i| self.tracks[i].duration))
    }

    pub fn position(&self) -> Duration {
        self.transport
            .playback_handle()
            .lock()
            .map(|info| info.position)
            .unwrap_or_default()
    }

    /// Position as a percentage of the duration.
    pub fn position_percent(&self) -> Option<f64> {
        let d = self.duration().filter(|d| !d.is_zero())?;
        Some((self.position().as_secs_f64() / d.as_secs_f64() * 100.0).min(100.0))
    }

    /// Jump to `percent` (0..=100) of the loaded track.
    pub fn seek(&mut self, percent: f64) -> Result<()> {
        let duration = self.duration().ok_or(PlayerError::NoTrackLoaded)?;
        let target = position_for_percent(duration, percent);
        self.transport.seek(target)?;
        self.publish(UiUpdate::TimeInfo(format_time(
            target,
            Some(duration),
            &self.time_separator,
        )));
        let next = self.state.on_seek();
        self.set_state(next);
        self.ensure_watcher();
        Ok(())
    }

    /// Seek relative to the current position, in percent of the track.
    pub fn seek_by(&mut self, delta_percent: f64) -> Result<()> {
        let now = self.position_percent().ok_or(PlayerError::NoTrackLoaded)?;
        self.seek(now + delta_percent)
    }

    /// Set the output volume from a 0..=100 percentage.
    pub fn set_volume(&mut self, percent: f64) -> Result<()> {
        let percent = clamp_percent(percent);
        self.transport.set_volume(gain_for_percent(percent))?;
        self.volume = percent;
        self.publish(UiUpdate::Volume(percent.round() as u8));
        Ok(())
    }

    pub fn adjust_volume(&mut self, delta_percent: f64) -> Result<()> {
        self.set_volume(self.volume + delta_percent)
    }

    /// React to a notification from the audio engine.
    ///
    /// Events about a file that is no longer loaded are ignored.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> Result<()> {
        match event {
            EngineEvent::TrackEnded { path } => {
                if self.current_path() != Some(path.as_path()) {
                    tracing::debug!(path = %path.display(), "ignoring stale track end");
                    return Ok(());
                }
                let next = self.state.on_track_end();
                self.set_state(next);

                if self.repeat {
                    self.transport.seek(Duration::ZERO)?;
                    self.transport.play()?;
                    self.set_state(PlaybackState::Playing);
                    self.start_watcher();
                } else if self.auto_advance {
                    self.next()?;
                }
                Ok(())
            }
            EngineEvent::Failed { path, message } => {
                if self.current_path() == Some(path.as_path()) {
                    self.stop_watcher();
                    self.set_state(PlaybackState::Stopped);
                }
                Err(PlayerError::Decode { path, message })
            }
        }
    }
}

#[cfg(test)]
impl<T: Transport> PlayerController<T> {
    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn history(&self) -> &[PathBuf] {
        &self.history
    }

    pub(crate) fn state(&self) -> PlaybackState {
        self.state
    }

    pub(crate) fn repeat(&self) -> bool {
        self.repeat
    }

    pub(crate) fn volume(&self) -> f64 {
        self.volume
    }

    pub(crate) fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub(crate) fn watcher_running(&self) -> bool {
        self.watcher.as_ref().is_some_and(PositionWatcher::is_running)
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Install a track list without touching the filesystem.
    pub(crate) fn replace_tracks(&mut self, tracks: Vec<Track>) {
        self.stop_watcher();
        self.tracks = tracks;
        self.current = None;
        self.state = PlaybackState::Stopped;
    }
}
