use super::sink::decode;
use super::fake::{Call, FakeTransport};
use super::transport::Transport;
use crate::error::PlayerError;
use crate::library::Track;
use std::time::Duration;

#[test]
fn decode_reports_missing_file_with_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.mp3");
    match decode(&path) {
        Err(PlayerError::Decode { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected decode error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn decode_rejects_files_that_are_not_audio() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.mp3");
    std::fs::write(&path, b"definitely not an mpeg stream").unwrap();
    assert!(matches!(decode(&path), Err(PlayerError::Decode { .. })));
}

#[test]
fn fake_transport_prefers_the_tagged_duration() {
    let mut t = FakeTransport::new();
    let mut track = Track::from_path("/m/a.mp3");
    track.duration = Some(Duration::from_secs(42));

    t.open(&track).unwrap();
    t.play().unwrap();
    let info = t.info();
    assert_eq!(info.duration, Some(Duration::from_secs(42)));
    assert!(info.playing);

    t.set_position(Duration::from_secs(10));
    t.stop().unwrap();
    assert_eq!(t.info().position, Duration::ZERO);
    assert_eq!(t.calls, vec![Call::Open(track.path.clone()), Call::Play, Call::Stop]);
}
