//! Presentation strings derived from playback values.
//!
//! Everything here is a pure function of its arguments.

use std::time::Duration;

use crate::audio::PlaybackInfo;
use crate::metadata::TrackInfo;

pub const BANNER: &str = r"
    _    _                  __  __ ____
   / \  | | ___  _ __   ___|  \/  |  _ \
  / _ \ | |/ _ \| '_ \ / _ \ |\/| | |_) |
 / ___ \| | (_) | | | |  __/ |  | |  __/
/_/   \_\_|\___/|_| |_|\___|_|  |_|_|
";

const ZERO_PROGRESS: &str = "00:00:00/00:00:00";

const CONTROLS: [(&str, &str); 6] = [
    ("(↑)(↓)", "Browse Track"),
    ("(←)(→)", "Volume"),
    ("(Enter)", "Play Selected Track"),
    ("(Ctrl+P)", "Pause/Resume"),
    ("(Ctrl+Space)", "Mute"),
    ("(Ctrl+C)", "Quit"),
];

/// Key legend shown in the command pane, one binding per line.
pub fn controls_help() -> String {
    CONTROLS
        .iter()
        .map(|(keys, action)| format!("{keys} {action}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a `Duration` as `HH:MM:SS`.
pub fn format_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Whole percent of `duration` covered by `elapsed`, clamped to 0..=100.
pub fn percentage(elapsed: Duration, duration: Option<Duration>) -> u16 {
    match duration {
        Some(total) if !total.is_zero() => {
            let pct = elapsed.as_millis().saturating_mul(100) / total.as_millis().max(1);
            pct.min(100) as u16
        }
        _ => 0,
    }
}

/// `elapsed/duration`, or the all-zero label when neither is known.
///
/// `_percentage` is what the gauge fills to; it never changes the label.
pub fn format_progress(elapsed: &str, duration: &str, _percentage: u16) -> String {
    if elapsed.is_empty() && duration.is_empty() {
        ZERO_PROGRESS.to_string()
    } else {
        format!("{elapsed}/{duration}")
    }
}

/// Seven labeled fields, each label followed by its value on the next line.
pub fn format_metadata(info: Option<&TrackInfo>) -> String {
    let year = info.and_then(|i| i.year).map(|y| y.to_string());
    let values: [&str; 7] = match info {
        Some(i) => [
            i.title.as_str(),
            i.album.as_str(),
            i.artist.as_str(),
            i.album_artist.as_str(),
            i.composer.as_str(),
            i.genre.as_str(),
            year.as_deref().unwrap_or(""),
        ],
        None => [""; 7],
    };
    let labels = [
        "Title",
        "Album",
        "Artist",
        "AlbumArtist",
        "Composer",
        "Genre",
        "Year",
    ];

    let mut out = String::new();
    for (label, value) in labels.iter().zip(values) {
        out.push_str(label);
        out.push_str(": \n");
        out.push_str(value);
        out.push('\n');
    }
    out
}

/// What the renderer needs to draw the info pane and the progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub progress: String,
    pub percentage: u16,
    pub metadata: String,
}

impl DisplayState {
    /// Nothing loaded.
    pub fn idle() -> Self {
        Self {
            progress: format_progress("", "", 0),
            percentage: 0,
            metadata: format_metadata(None),
        }
    }

    pub fn from_playback(info: &PlaybackInfo, track: Option<&TrackInfo>) -> Self {
        if info.path.is_none() {
            return Self {
                metadata: format_metadata(track),
                ..Self::idle()
            };
        }

        let elapsed = format_clock(info.elapsed);
        let duration = info.duration.map(format_clock).unwrap_or_default();
        let percentage = percentage(info.elapsed, info.duration);
        Self {
            progress: format_progress(&elapsed, &duration, percentage),
            percentage,
            metadata: format_metadata(track),
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests;
