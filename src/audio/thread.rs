use std::path::Path;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::config::AudioSettings;

use super::sink::create_sink;
use super::types::{AudioCmd, AudioError, PlaybackHandle, PlaybackInfo};
use super::volume::Volume;

const FADE_STEPS: u64 = 10;

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let err = AudioError::NoDevice(e.to_string());
                error!(error = %err, "audio engine unavailable");
                publish(&playback_info, |info| info.last_error = Some(err.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut engine = Engine {
            stream,
            sink: None,
            volume: Volume::new(audio_settings.initial_volume, audio_settings.volume_step),
            info: playback_info,
        };
        let poll = Duration::from_millis(audio_settings.poll_ms.max(1));

        loop {
            match rx.recv_timeout(poll) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    engine.fade_out(Duration::from_millis(fade_out_ms));
                    break;
                }
                Ok(cmd) => engine.apply(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            engine.refresh();
        }
        debug!("audio thread exiting");
    })
}

fn publish(handle: &PlaybackHandle, update: impl FnOnce(&mut PlaybackInfo)) {
    if let Ok(mut info) = handle.lock() {
        update(&mut info);
    }
}

struct Engine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: Volume,
    info: PlaybackHandle,
}

impl Engine {
    fn apply(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Play(path) => self.play(&path),
            AudioCmd::TogglePause => self.toggle_pause(),
            AudioCmd::ToggleMute => {
                self.volume.toggle_mute();
                self.apply_volume();
            }
            AudioCmd::VolumeUp => {
                self.volume.up();
                self.apply_volume();
            }
            AudioCmd::VolumeDown => {
                self.volume.down();
                self.apply_volume();
            }
            AudioCmd::Quit { .. } => {}
        }
    }

    fn play(&mut self, path: &Path) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        match create_sink(&self.stream, path) {
            Ok((sink, duration)) => {
                sink.set_volume(self.volume.effective());
                sink.play();
                self.sink = Some(sink);
                info!(path = %path.display(), "playing");
                publish(&self.info, |info| {
                    info.path = Some(path.to_path_buf());
                    info.elapsed = Duration::ZERO;
                    info.duration = duration;
                    info.paused = false;
                    info.finished = false;
                    info.generation += 1;
                    info.last_error = None;
                });
            }
            Err(err) => {
                warn!(error = %err, "cannot play track");
                publish(&self.info, |info| {
                    info.path = None;
                    info.elapsed = Duration::ZERO;
                    info.duration = None;
                    info.paused = false;
                    info.finished = false;
                    info.last_error = Some(err.to_string());
                });
            }
        }
    }

    fn toggle_pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if sink.is_paused() {
            sink.play();
        } else {
            sink.pause();
        }
        let paused = sink.is_paused();
        publish(&self.info, |info| info.paused = paused);
    }

    fn apply_volume(&self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume.effective());
        }
        let (level, muted) = (self.volume.level(), self.volume.muted());
        publish(&self.info, |info| {
            info.volume = level;
            info.muted = muted;
        });
    }

    /// Update elapsed time and notice tracks that ran out.
    fn refresh(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let elapsed = sink.get_pos();
        let drained = sink.empty();
        publish(&self.info, |info| {
            info.elapsed = elapsed;
            if drained && !info.finished {
                info.finished = true;
                debug!(generation = info.generation, "track finished");
            }
        });
    }

    fn fade_out(&mut self, fade_out: Duration) {
        let Some(sink) = self.sink.take() else {
            return;
        };
        if !sink.is_paused() && !fade_out.is_zero() {
            let start = sink.volume();
            let pause = (fade_out / FADE_STEPS as u32).max(Duration::from_millis(1));
            for step in 1..=FADE_STEPS {
                let t = step as f32 / FADE_STEPS as f32;
                sink.set_volume(start * (1.0 - t));
                thread::sleep(pause);
            }
        }
        sink.stop();
    }
}
