//! In-memory [`Transport`] for driving the controller without a sound card.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::transport::Transport;
use super::types::{EngineEvent, PlaybackHandle, PlaybackInfo};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(Duration),
    Volume(f32),
}

pub struct FakeTransport {
    pub calls: Vec<Call>,
    playback: PlaybackHandle,
    /// Length reported for files that carry no duration of their own.
    pub default_duration: Duration,
    /// Make the next `open` fail as if the audio thread had gone away.
    pub fail_open: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            playback: Arc::new(Mutex::new(PlaybackInfo::default())),
            default_duration: Duration::from_secs(180),
            fail_open: false,
        }
    }

    pub fn info(&self) -> PlaybackInfo {
        self.playback.lock().unwrap().clone()
    }

    pub fn set_position(&self, position: Duration) {
        self.playback.lock().unwrap().position = position;
    }

    /// Play the loaded file to its end and return the event the engine would send.
    pub fn finish(&self) -> EngineEvent {
        let mut info = self.playback.lock().unwrap();
        info.position = info.duration.unwrap_or_default();
        info.playing = false;
        info.finished = true;
        EngineEvent::TrackEnded {
            path: info.path.clone().unwrap_or_default(),
        }
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Open(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Transport for FakeTransport {
    fn open(&mut self, track: &Track) -> Result<()> {
        if std::mem::take(&mut self.fail_open) {
            return Err(PlayerError::EngineDisconnected);
        }
        self.calls.push(Call::Open(track.path.clone()));
        let mut info = self.playback.lock().unwrap();
        *info = PlaybackInfo {
            path: Some(track.path.clone()),
            position: Duration::ZERO,
            duration: Some(track.duration.unwrap_or(self.default_duration)),
            playing: false,
            finished: false,
        };
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.calls.push(Call::Play);
        let mut info = self.playback.lock().unwrap();
        info.playing = info.path.is_some();
        info.finished = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.calls.push(Call::Pause);
        self.playback.lock().unwrap().playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.calls.push(Call::Stop);
        let mut info = self.playback.lock().unwrap();
        info.position = Duration::ZERO;
        info.playing = false;
        info.finished = false;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.calls.push(Call::Seek(position));
        let mut info = self.playback.lock().unwrap();
        info.position = position;
        info.finished = false;
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.calls.push(Call::Volume(gain));
        Ok(())
    }

    fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }
}

/// Transport whose commands land on the shared info only after `lag`, like
/// the audio thread working through its queue.
///
/// Until a command lands, readers keep seeing the previous snapshot.
pub struct LaggingTransport {
    playback: PlaybackHandle,
    lag: Duration,
    pending: Vec<JoinHandle<()>>,
    pub default_duration: Duration,
}

impl LaggingTransport {
    pub fn new(lag: Duration) -> Self {
        Self {
            playback: Arc::new(Mutex::new(PlaybackInfo::default())),
            lag,
            pending: Vec::new(),
            default_duration: Duration::from_secs(180),
        }
    }

    fn later(&mut self, apply: impl FnOnce(&mut PlaybackInfo) + Send + 'static) {
        let playback = self.playback.clone();
        let lag = self.lag;
        self.pending.push(thread::spawn(move || {
            thread::sleep(lag);
            apply(&mut playback.lock().unwrap());
        }));
    }

    /// Wait for every queued command to land.
    pub fn settle(&mut self) {
        for h in self.pending.drain(..) {
            h.join().unwrap();
        }
    }

    /// Play the loaded file to its end right away.
    pub fn finish(&self) -> EngineEvent {
        let mut info = self.playback.lock().unwrap();
        info.position = info.duration.unwrap_or_default();
        info.playing = false;
        info.finished = true;
        EngineEvent::TrackEnded {
            path: info.path.clone().unwrap_or_default(),
        }
    }
}

impl Transport for LaggingTransport {
    fn open(&mut self, track: &Track) -> Result<()> {
        let path = track.path.clone();
        let duration = Some(track.duration.unwrap_or(self.default_duration));
        self.later(move |info| {
            *info = PlaybackInfo {
                path: Some(path),
                position: Duration::ZERO,
                duration,
                playing: false,
                finished: false,
            }
        });
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.later(|info| {
            info.playing = info.path.is_some();
            info.finished = false;
        });
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.later(|info| info.playing = false);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.later(|info| {
            info.position = Duration::ZERO;
            info.playing = false;
            info.finished = false;
        });
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.later(move |info| {
            info.position = position;
            info.finished = false;
        });
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) -> Result<()> {
        Ok(())
    }

    fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }
}
