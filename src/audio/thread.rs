use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::error::{PlayerError, Result};

use super::sink::create_sink;
use super::types::{AudioCmd, EngineEvent, PlaybackHandle};

/// How often the thread refreshes the shared position and checks for track end.
const TICK: Duration = Duration::from_millis(200);

/// State owned by the audio thread.
struct Engine {
    stream: OutputStream,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration_hint: Option<Duration>,
    playing: bool,
    volume: f32,
    playback: PlaybackHandle,
    events: Sender<EngineEvent>,
}

impl Engine {
    /// Build a fresh paused sink for the current path, at position zero.
    fn reload(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Err(PlayerError::NoTrackLoaded);
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let (sink, duration) = match create_sink(&self.stream, &path, self.volume) {
            Ok(v) => v,
            Err(e) => {
                let _ = self.events.send(EngineEvent::Failed {
                    path: path.clone(),
                    message: e.to_string(),
                });
                self.path = None;
                self.playing = false;
                if let Ok(mut info) = self.playback.lock() {
                    *info = Default::default();
                }
                return Err(e);
            }
        };

        self.sink = Some(sink);
        self.playing = false;
        if let Ok(mut info) = self.playback.lock() {
            info.path = Some(path);
            info.position = Duration::ZERO;
            info.duration = duration.or(self.duration_hint);
            info.playing = false;
            info.finished = false;
        }
        Ok(())
    }

    /// Make sure there is a sink with audio left in it.
    fn ensure_loaded(&mut self) -> bool {
        let drained = self.sink.as_ref().is_none_or(|s| s.empty());
        if drained && self.path.is_some() {
            return self.reload().is_ok();
        }
        self.sink.is_some()
    }

    fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::Open {
                path,
                duration_hint,
            } => {
                self.path = Some(path);
                self.duration_hint = duration_hint;
                if let Err(e) = self.reload() {
                    tracing::warn!(error = %e, "open failed");
                }
            }
            AudioCmd::Play => {
                if self.ensure_loaded() {
                    if let Some(s) = self.sink.as_ref() {
                        s.play();
                    }
                    self.playing = true;
                    if let Ok(mut info) = self.playback.lock() {
                        info.playing = true;
                        info.finished = false;
                    }
                }
            }
            AudioCmd::Pause => {
                if let Some(s) = self.sink.as_ref() {
                    s.pause();
                    self.playing = false;
                    if let Ok(mut info) = self.playback.lock() {
                        info.position = s.get_pos();
                        info.playing = false;
                    }
                }
            }
            AudioCmd::Stop => {
                // A stopped rodio sink drops its sources, so rebuild paused at zero.
                if self.path.is_some() {
                    let _ = self.reload();
                }
            }
            AudioCmd::SeekTo(pos) => {
                if !self.ensure_loaded() {
                    return true;
                }
                if let Some(s) = self.sink.as_ref() {
                    if let Err(e) = s.try_seek(pos) {
                        tracing::warn!(error = ?e, position = ?pos, "seek failed");
                        return true;
                    }
                    if self.playing {
                        s.play();
                    }
                }
                if let Ok(mut info) = self.playback.lock() {
                    info.position = pos;
                    info.finished = false;
                }
            }
            AudioCmd::SetVolume(gain) => {
                self.volume = gain.clamp(0.0, 1.0);
                if let Some(s) = self.sink.as_ref() {
                    s.set_volume(self.volume);
                }
            }
            AudioCmd::Quit => {
                if let Some(s) = self.sink.take() {
                    s.stop();
                }
                if let Ok(mut info) = self.playback.lock() {
                    info.playing = false;
                }
                return false;
            }
        }
        true
    }

    /// Publish the position and report a natural end of track.
    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(s) = self.sink.as_ref() else {
            return;
        };

        let Ok(mut info) = self.playback.lock() else {
            return;
        };
        // The handle may already announce a file this thread hasn't loaded yet.
        if info.path != self.path {
            return;
        }

        if s.empty() {
            self.playing = false;
            if let Some(d) = info.duration {
                info.position = d;
            }
            info.playing = false;
            info.finished = true;
            drop(info);
            if let Some(path) = self.path.clone() {
                let _ = self.events.send(EngineEvent::TrackEnded { path });
            }
        } else {
            info.position = s.get_pos();
        }
    }
}

/// Spawn the thread that owns the output stream.
///
/// `ready` receives the outcome of opening the default output device before
/// any command is processed.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback: PlaybackHandle,
    events: Sender<EngineEvent>,
    ready: SyncSender<Result<()>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(PlayerError::AudioDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which garbles the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut engine = Engine {
            stream,
            sink: None,
            path: None,
            duration_hint: None,
            playing: false,
            volume: 1.0,
            playback,
            events,
        };

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => {
                    if !engine.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => engine.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("audio thread exiting");
    })
}
