//! Playback engine.
//!
//! A dedicated thread owns the rodio output stream and the current sink.
//! [`AudioPlayer`] sends it commands and implements [`Transport`]; the
//! thread publishes position/duration into a shared [`PlaybackInfo`] and
//! reports track end or decode failure as [`EngineEvent`]s.

mod player;
mod sink;
mod thread;
mod transport;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use player::AudioPlayer;
pub use transport::Transport;
pub use types::{EngineEvent, PlaybackHandle, PlaybackInfo};

#[cfg(test)]
mod tests;
