use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioError, PlaybackEngine, PlaybackHandle, PlaybackInfo};

/// Whole milliseconds of `d`, saturating at `u64::MAX`.
pub(super) fn fade_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Handle to the engine thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo {
            volume: audio_settings.initial_volume,
            ..PlaybackInfo::default()
        }));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), audio_settings);

        Self {
            tx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    /// Ask the engine to fade out and stop, then wait for its thread.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_millis(fade_out),
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                if h.join().is_err() {
                    warn!("audio thread panicked");
                }
            }
        }
    }
}

impl PlaybackEngine for AudioPlayer {
    fn send(&self, cmd: AudioCmd) -> Result<(), AudioError> {
        self.tx.send(cmd).map_err(|_| AudioError::Disconnected)
    }

    fn snapshot(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }
}
