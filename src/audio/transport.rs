use std::time::Duration;

use crate::error::Result;
use crate::library::Track;

use super::types::PlaybackHandle;

/// The playback engine as seen by the controller.
///
/// Commands are fire-and-forget; observable state (position, duration,
/// whether the file finished) is read back through [`Transport::playback_handle`].
pub trait Transport {
    fn open(&mut self, track: &Track) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    /// Stop and rewind to zero.
    fn stop(&mut self) -> Result<()>;
    fn seek(&mut self, position: Duration) -> Result<()>;
    /// `gain` is in `0.0..=1.0`.
    fn set_volume(&mut self, gain: f32) -> Result<()>;
    fn playback_handle(&self) -> PlaybackHandle;
}
