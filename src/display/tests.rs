use super::*;
use std::path::PathBuf;

fn record() -> TrackInfo {
    TrackInfo {
        title: "  Song With Spaces  ".into(),
        album: "Album".into(),
        artist: "Artist".into(),
        album_artist: "Various Artists".into(),
        composer: "Composer".into(),
        genre: "Ambient".into(),
        year: Some(1997),
    }
}

#[test]
fn progress_zero_state_is_literal() {
    for pct in [0, 50, 100] {
        assert_eq!(format_progress("", "", pct), "00:00:00/00:00:00");
    }
}

#[test]
fn progress_joins_elapsed_and_duration() {
    assert_eq!(format_progress("00:01:02", "00:03:04", 50), "00:01:02/00:03:04");
    assert_eq!(format_progress("00:00:05", "", 0), "00:00:05/");
}

#[test]
fn clock_formats_hours_minutes_seconds() {
    assert_eq!(format_clock(Duration::ZERO), "00:00:00");
    assert_eq!(format_clock(Duration::from_secs(62)), "00:01:02");
    assert_eq!(format_clock(Duration::from_millis(3_723_900)), "01:02:03");
    assert_eq!(format_clock(Duration::from_secs(100 * 3600)), "100:00:00");
}

#[test]
fn percentage_is_clamped_and_safe_without_duration() {
    let secs = Duration::from_secs;
    assert_eq!(percentage(secs(30), Some(secs(60))), 50);
    assert_eq!(percentage(secs(90), Some(secs(60))), 100);
    assert_eq!(percentage(secs(0), Some(secs(60))), 0);
    assert_eq!(percentage(secs(30), Some(Duration::ZERO)), 0);
    assert_eq!(percentage(secs(30), None), 0);
}

#[test]
fn metadata_absent_renders_every_label_empty() {
    assert_eq!(
        format_metadata(None),
        "Title: \n\nAlbum: \n\nArtist: \n\nAlbumArtist: \n\nComposer: \n\nGenre: \n\nYear: \n\n"
    );
}

#[test]
fn metadata_embeds_fields_verbatim() {
    assert_eq!(
        format_metadata(Some(&record())),
        "Title: \n  Song With Spaces  \n\
         Album: \nAlbum\n\
         Artist: \nArtist\n\
         AlbumArtist: \nVarious Artists\n\
         Composer: \nComposer\n\
         Genre: \nAmbient\n\
         Year: \n1997\n"
    );
}

#[test]
fn metadata_without_year_leaves_year_empty() {
    let info = TrackInfo {
        year: None,
        ..record()
    };
    assert!(format_metadata(Some(&info)).ends_with("Year: \n\n"));
}

#[test]
fn metadata_does_not_truncate_long_values() {
    let long = "x".repeat(4096);
    let info = TrackInfo {
        title: long.clone(),
        ..TrackInfo::default()
    };
    assert!(format_metadata(Some(&info)).contains(&long));
}

#[test]
fn display_state_idle_when_nothing_is_loaded() {
    let state = DisplayState::from_playback(&PlaybackInfo::default(), None);
    assert_eq!(state, DisplayState::idle());
    assert_eq!(state.progress, "00:00:00/00:00:00");
    assert_eq!(state.percentage, 0);
}

#[test]
fn display_state_reflects_playback() {
    let info = PlaybackInfo {
        path: Some(PathBuf::from("/music/a.flac")),
        elapsed: Duration::from_secs(62),
        duration: Some(Duration::from_secs(184)),
        ..PlaybackInfo::default()
    };
    let track = record();
    let state = DisplayState::from_playback(&info, Some(&track));
    assert_eq!(state.progress, "00:01:02/00:03:04");
    assert_eq!(state.percentage, 33);
    assert!(state.metadata.starts_with("Title: \n  Song With Spaces  \n"));
}

#[test]
fn controls_help_lists_every_binding() {
    let help = controls_help();
    assert_eq!(help.lines().count(), 6);
    assert!(help.contains("(Enter) Play Selected Track"));
    assert!(help.contains("(Ctrl+C) Quit"));
}
