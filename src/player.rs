//! Player controller: track list, transport operations, play history and the
//! position watcher.

mod controller;
mod state;
mod updates;
mod watcher;

pub use controller::{PlayerController, gain_for_percent, position_for_percent};
pub use state::PlaybackState;
pub use updates::{UiUpdate, UpdateSender};
pub use watcher::{PositionWatcher, format_mmss, format_time};
