use super::model::expand_home;
use super::*;
use crate::config::UiSettings;
use crate::library::Track;
use crate::player::{PlaybackState, UiUpdate};
use std::path::{Path, PathBuf};

fn t(path: &str) -> Track {
    Track::from_path(path)
}

fn app_with(paths: &[&str]) -> App {
    let mut app = App::new(&UiSettings::default());
    app.apply(UiUpdate::FolderOpened {
        folder: PathBuf::from("/music"),
        tracks: paths.iter().map(|p| t(p)).collect(),
    });
    app
}

#[test]
fn new_app_starts_empty_with_zero_time() {
    let app = App::new(&UiSettings::default());
    assert!(!app.has_tracks());
    assert_eq!(app.time_info, "00:00 / --:--");
    assert_eq!(app.state, PlaybackState::Stopped);
    assert_eq!(app.mode, InputMode::Normal);
}

#[test]
fn folder_opened_replaces_tracks_and_resets_selection() {
    let mut app = app_with(&["/music/a.mp3", "/music/b.mp3"]);
    app.selected = 1;
    app.apply(UiUpdate::FolderOpened {
        folder: PathBuf::from("/other"),
        tracks: vec![t("/other/c.mp3")],
    });
    assert_eq!(app.tracks.len(), 1);
    assert_eq!(app.selected, 0);
    assert_eq!(app.folder.as_deref(), Some(Path::new("/other")));
    assert!(app.status.is_none());
}

#[test]
fn empty_folder_sets_a_notice() {
    let app = app_with(&[]);
    assert!(app.status.as_deref().unwrap().contains("/music"));
}

#[test]
fn now_playing_moves_selection_and_history_accumulates() {
    let mut app = app_with(&["/music/a.mp3", "/music/b.mp3"]);
    app.apply(UiUpdate::NowPlaying {
        index: 1,
        path: PathBuf::from("/music/b.mp3"),
    });
    app.apply(UiUpdate::HistoryAppended(PathBuf::from("/music/b.mp3")));
    app.apply(UiUpdate::HistoryAppended(PathBuf::from("/music/a.mp3")));

    assert_eq!(app.selected, 1);
    assert_eq!(app.now_playing_track().unwrap().path, PathBuf::from("/music/b.mp3"));
    assert_eq!(
        app.history,
        vec![PathBuf::from("/music/b.mp3"), PathBuf::from("/music/a.mp3")]
    );
}

#[test]
fn scalar_updates_are_mirrored() {
    let mut app = app_with(&["/music/a.mp3"]);
    app.apply(UiUpdate::TimeInfo("01:02 / 03:04".into()));
    app.apply(UiUpdate::State(PlaybackState::Paused));
    app.apply(UiUpdate::Volume(35));
    app.apply(UiUpdate::Repeat(true));

    assert_eq!(app.time_info, "01:02 / 03:04");
    assert_eq!(app.state, PlaybackState::Paused);
    assert_eq!(app.volume, 35);
    assert!(app.repeat);
}

#[test]
fn reordered_list_clears_now_playing() {
    let mut app = app_with(&["/music/a.mp3", "/music/b.mp3"]);
    app.apply(UiUpdate::NowPlaying {
        index: 1,
        path: PathBuf::from("/music/b.mp3"),
    });
    app.apply(UiUpdate::TrackList(vec![t("/music/b.mp3"), t("/music/a.mp3")]));
    assert_eq!(app.now_playing, None);
    assert_eq!(app.selected, 0);
}

#[test]
fn selection_wraps_both_ways() {
    let mut app = app_with(&["/music/a.mp3", "/music/b.mp3", "/music/c.mp3"]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);

    let mut empty = app_with(&[]);
    empty.next();
    empty.prev();
    assert_eq!(empty.selected, 0);
}

#[test]
fn prompt_is_prefilled_and_trimmed() {
    let mut app = app_with(&["/music/a.mp3"]);
    app.begin_prompt();
    assert_eq!(app.mode, InputMode::FolderPrompt);
    assert_eq!(app.prompt, "/music");

    for _ in 0.."/music".len() {
        app.pop_prompt_char();
    }
    for c in "  /srv/audio ".chars() {
        app.push_prompt_char(c);
    }
    assert_eq!(app.take_prompt(), Some(PathBuf::from("/srv/audio")));
    assert_eq!(app.mode, InputMode::Normal);
    assert!(app.prompt.is_empty());
}

#[test]
fn blank_or_cancelled_prompt_yields_nothing() {
    let mut app = App::new(&UiSettings::default());
    app.begin_prompt();
    app.push_prompt_char(' ');
    assert_eq!(app.take_prompt(), None);

    app.begin_prompt();
    app.push_prompt_char('x');
    app.cancel_prompt();
    assert_eq!(app.mode, InputMode::Normal);
    assert!(app.prompt.is_empty());
}

#[test]
fn tilde_expands_to_home() {
    let home = Path::new("/home/me");
    assert_eq!(expand_home("~", Some(home)), PathBuf::from("/home/me"));
    assert_eq!(expand_home("~/Music", Some(home)), PathBuf::from("/home/me/Music"));
    assert_eq!(expand_home("~other", Some(home)), PathBuf::from("~other"));
    assert_eq!(expand_home("~/Music", None), PathBuf::from("~/Music"));
}

#[test]
fn history_panel_toggles_from_configured_default() {
    let ui = UiSettings {
        show_history: true,
        ..UiSettings::default()
    };
    let mut app = App::new(&ui);
    assert!(app.show_history);
    app.toggle_history();
    assert!(!app.show_history);
}
