//! Audio-related small types and handles.
//!
//! This module defines the commands understood by the engine thread, the
//! playback snapshot it publishes, and the trait the consumer loop drives.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCmd {
    /// Start playing the file at the given path, replacing the current track.
    Play(PathBuf),
    /// Toggle pause/resume.
    TogglePause,
    /// Toggle mute without losing the volume level.
    ToggleMute,
    /// Raise the volume by one step.
    VolumeUp,
    /// Lower the volume by one step.
    VolumeDown,
    /// Quit the engine thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(String),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("audio engine is not running")]
    Disconnected,
}

/// Runtime playback information shared with the consumer loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackInfo {
    /// Path of the loaded track (if any).
    pub path: Option<PathBuf>,
    /// Elapsed playback time for the current track.
    pub elapsed: Duration,
    /// Total length of the current track, when known.
    pub duration: Option<Duration>,
    pub paused: bool,
    pub muted: bool,
    /// Volume level (0.0 - 1.0), kept while muted.
    pub volume: f32,
    /// Bumped on every successful `Play`.
    pub generation: u64,
    /// Set when the current track ran out on its own.
    pub finished: bool,
    /// Last engine-side failure, cleared on the next successful `Play`.
    pub last_error: Option<String>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            path: None,
            elapsed: Duration::ZERO,
            duration: None,
            paused: false,
            muted: false,
            volume: 1.0,
            generation: 0,
            finished: false,
            last_error: None,
        }
    }
}

impl PlaybackInfo {
    /// True while a track is loaded and audibly advancing.
    pub fn is_playing(&self) -> bool {
        self.path.is_some() && !self.paused && !self.finished
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// The seam between the consumer loop and whatever produces sound.
pub trait PlaybackEngine {
    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError>;
    fn snapshot(&self) -> PlaybackInfo;
}
