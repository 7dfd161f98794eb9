//! Tag extraction for the track info pane.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use lofty::tag::{ItemKey, Tag};
use tracing::debug;

/// Descriptive fields of a track, as read from its tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub album_artist: String,
    pub composer: String,
    pub genre: String,
    pub year: Option<u32>,
}

fn tag_string(tag: &Tag, key: &ItemKey) -> String {
    tag.get_string(*key).map(str::to_string).unwrap_or_default()
}

/// Leading four digits of a year or date item ("1999", "1999-04-01").
fn parse_year(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return None;
    }
    digits[..4].parse().ok()
}

fn info_from_tag(tag: &Tag) -> TrackInfo {
    let year = [ItemKey::Year, ItemKey::RecordingDate]
        .iter()
        .find_map(|key| tag.get_string(*key).and_then(parse_year));

    TrackInfo {
        title: tag_string(tag, &ItemKey::TrackTitle),
        album: tag_string(tag, &ItemKey::AlbumTitle),
        artist: tag_string(tag, &ItemKey::TrackArtist),
        album_artist: tag_string(tag, &ItemKey::AlbumArtist),
        composer: tag_string(tag, &ItemKey::Composer),
        genre: tag_string(tag, &ItemKey::Genre),
        year,
    }
}

/// Read the primary (or first) tag of `path`.
///
/// Files without tags yield a record whose title is the file stem; files
/// that cannot be parsed at all yield `None`.
pub fn read_track_info(path: &Path) -> Option<TrackInfo> {
    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no readable tags");
            return None;
        }
    };

    let mut info = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .map(info_from_tag)
        .unwrap_or_default();

    if info.title.trim().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            info.title = stem.to_string();
        }
    }
    Some(info)
}

/// Duration as reported by the container, when it can be parsed.
pub fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_year_accepts_years_and_dates() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year(" 2004-05-01 "), Some(2004));
        assert_eq!(parse_year("20040501"), Some(2004));
        assert_eq!(parse_year("99"), None);
        assert_eq!(parse_year("unknown"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn unreadable_files_have_no_info() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mp3");
        std::fs::write(&path, b"definitely not audio").unwrap();

        assert_eq!(read_track_info(&path), None);
        assert_eq!(probe_duration(&path), None);
        assert_eq!(read_track_info(&dir.path().join("missing.mp3")), None);
    }
}
