use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::error::{PlayerError, Result};
use crate::library::Track;

use super::thread::spawn_audio_thread;
use super::transport::Transport;
use super::types::{AudioCmd, EngineEvent, PlaybackHandle, PlaybackInfo};

/// Handle to the audio thread; the rodio-backed [`Transport`].
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Open the default output device and start the audio thread.
    ///
    /// Track-end and decode-failure notifications are delivered on `events`.
    pub fn new(events: Sender<EngineEvent>) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<()>>(1);
        let playback: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let handle = spawn_audio_thread(rx, playback.clone(), events, ready_tx);
        ready_rx
            .recv()
            .map_err(|_| PlayerError::EngineDisconnected)??;

        Ok(Self {
            tx,
            playback,
            join: Mutex::new(Some(handle)),
        })
    }

    fn send(&self, cmd: AudioCmd) -> Result<()> {
        self.tx.send(cmd).map_err(|_| PlayerError::EngineDisconnected)
    }

    /// Publish the state a command will lead to before the audio thread gets
    /// to it, so readers never see the previous end-of-track snapshot.
    fn announce(&self, update: impl FnOnce(&mut PlaybackInfo)) {
        if let Ok(mut info) = self.playback.lock() {
            update(&mut info);
        }
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn shutdown(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Transport for AudioPlayer {
    fn open(&mut self, track: &Track) -> Result<()> {
        self.announce(|info| {
            *info = PlaybackInfo {
                path: Some(track.path.clone()),
                position: Duration::ZERO,
                duration: track.duration,
                playing: false,
                finished: false,
            }
        });
        self.send(AudioCmd::Open {
            path: track.path.clone(),
            duration_hint: track.duration,
        })
    }

    fn play(&mut self) -> Result<()> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioCmd::Pause)
    }

    fn stop(&mut self) -> Result<()> {
        self.announce(|info| {
            info.position = Duration::ZERO;
            info.finished = false;
        });
        self.send(AudioCmd::Stop)
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        self.announce(|info| {
            info.position = position;
            info.finished = false;
        });
        self.send(AudioCmd::SeekTo(position))
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.send(AudioCmd::SetVolume(gain))
    }

    fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
