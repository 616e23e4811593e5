/// The playback state of the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing playing; a loaded track sits at position zero.
    #[default]
    Stopped,
    Playing,
    /// Position frozen somewhere inside the track.
    Paused,
    /// The track played to its natural end.
    Ended,
}

/// Transport action taken by a play/pause press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Start the loaded track (or the first one if nothing is loaded).
    Start,
    Pause,
    Resume,
    /// Rewind a finished track to zero without playing it.
    Rewind,
}

impl PlaybackState {
    /// The action a play/pause press performs and the state it leads to.
    pub fn on_play_pause(self) -> (Toggle, PlaybackState) {
        match self {
            Self::Stopped => (Toggle::Start, Self::Playing),
            Self::Playing => (Toggle::Pause, Self::Paused),
            Self::Paused => (Toggle::Resume, Self::Playing),
            Self::Ended => (Toggle::Rewind, Self::Stopped),
        }
    }

    /// State after the engine reports the end of the track.
    pub fn on_track_end(self) -> PlaybackState {
        match self {
            Self::Playing => Self::Ended,
            other => other,
        }
    }

    /// State after jumping to a new position.
    pub fn on_seek(self) -> PlaybackState {
        match self {
            Self::Ended => Self::Paused,
            other => other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Ended => "Ended",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_pause_cycles_through_every_state() {
        use PlaybackState::*;
        assert_eq!(Stopped.on_play_pause(), (Toggle::Start, Playing));
        assert_eq!(Playing.on_play_pause(), (Toggle::Pause, Paused));
        assert_eq!(Paused.on_play_pause(), (Toggle::Resume, Playing));
        assert_eq!(Ended.on_play_pause(), (Toggle::Rewind, Stopped));
    }

    #[test]
    fn only_playing_can_end_and_only_ended_changes_on_seek() {
        use PlaybackState::*;
        for s in [Stopped, Paused, Ended] {
            assert_eq!(s.on_track_end(), s);
        }
        assert_eq!(Playing.on_track_end(), Ended);
        assert_eq!(Ended.on_seek(), Paused);
        assert_eq!(Playing.on_seek(), Playing);
        assert_eq!(Stopped.on_seek(), Stopped);
    }
}
