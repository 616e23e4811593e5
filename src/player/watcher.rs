//! Background position polling.
//!
//! One watcher thread per controller: it samples the shared playback info
//! every poll interval and sends the formatted time to the update channel,
//! until the engine reports the end of the track or the watcher is cancelled.

use std::path::PathBuf;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::audio::PlaybackHandle;

use super::updates::{UiUpdate, UpdateSender};

/// Format a `Duration` as `MM:SS` (minutes keep counting past 59).
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `position / duration`, with `--:--` standing in for an unknown duration.
pub fn format_time(position: Duration, duration: Option<Duration>, separator: &str) -> String {
    let total = duration.map_or_else(|| "--:--".to_string(), format_mmss);
    format!("{}{}{}", format_mmss(position), separator, total)
}

pub struct PositionWatcher {
    cancel: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl PositionWatcher {
    /// Start polling `playback` for the file at `path`.
    ///
    /// Until the engine reports `path` as loaded, the watcher shows zero. It
    /// only exits on an end of track it saw happen: a `finished` flag already
    /// set when polling starts belongs to an earlier play of the file.
    pub fn spawn(
        playback: PlaybackHandle,
        path: PathBuf,
        interval: Duration,
        separator: String,
        updates: UpdateSender,
    ) -> Self {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();

        let join = thread::spawn(move || {
            tracing::debug!(path = %path.display(), "watcher started");
            let mut armed = false;
            loop {
                let (position, duration, loaded, finished) = match playback.lock() {
                    Ok(info) => (
                        info.position,
                        info.duration,
                        info.path.as_deref() == Some(path.as_path()),
                        info.finished,
                    ),
                    Err(_) => break,
                };

                let text = if loaded {
                    format_time(position, duration, &separator)
                } else {
                    format_time(Duration::ZERO, None, &separator)
                };
                if updates.send(UiUpdate::TimeInfo(text)).is_err() {
                    break;
                }

                if loaded && !finished {
                    armed = true;
                } else if loaded && armed {
                    tracing::debug!(path = %path.display(), "watcher reached end of track");
                    break;
                }

                match cancel_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            cancel: Some(cancel_tx),
            join: Some(join),
        }
    }

    /// Whether the polling thread is still alive.
    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Signal the thread and wait for it to exit.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

impl Drop for PositionWatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}
