use super::player::fade_millis;
use super::types::PlaybackInfo;
use super::volume::Volume;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn volume_steps_are_clamped() {
    let mut v = Volume::new(0.9, 0.25);
    v.up();
    assert_eq!(v.level(), 1.0);
    v.down();
    v.down();
    v.down();
    v.down();
    v.down();
    assert_eq!(v.level(), 0.0);
}

#[test]
fn mute_remembers_level() {
    let mut v = Volume::new(0.5, 0.1);
    v.toggle_mute();
    assert!(v.muted());
    assert_eq!(v.effective(), 0.0);
    assert_eq!(v.level(), 0.5);

    v.toggle_mute();
    assert_eq!(v.effective(), 0.5);
}

#[test]
fn volume_steps_while_muted_move_the_remembered_level() {
    let mut v = Volume::new(0.5, 0.5);
    v.toggle_mute();
    v.up();
    assert_eq!(v.effective(), 0.0);
    v.toggle_mute();
    assert_eq!(v.effective(), 1.0);
}

#[test]
fn initial_level_is_clamped() {
    assert_eq!(Volume::new(3.0, 0.1).level(), 1.0);
    assert_eq!(Volume::new(-1.0, 0.1).level(), 0.0);
}

#[test]
fn playing_requires_a_loaded_unpaused_unfinished_track() {
    let mut info = PlaybackInfo::default();
    assert!(!info.is_playing());

    info.path = Some(PathBuf::from("/music/a.mp3"));
    assert!(info.is_playing());

    info.paused = true;
    assert!(!info.is_playing());

    info.paused = false;
    info.finished = true;
    assert!(!info.is_playing());
}

#[test]
fn fade_length_converts_to_millis_without_wrapping() {
    assert_eq!(fade_millis(Duration::from_millis(300)), 300);
    assert_eq!(fade_millis(Duration::ZERO), 0);
    assert_eq!(fade_millis(Duration::MAX), u64::MAX);
}
