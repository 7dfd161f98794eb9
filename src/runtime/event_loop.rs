use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::audio::{AudioCmd, PlaybackEngine};
use crate::bus::{ControlReceivers, ControlSignal, KeyReceiver, Wakeup};
use crate::config::{PlaybackSettings, Settings};
use crate::metadata;
use crate::ui;

/// Whether the consumer loop keeps going after a wakeup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Consumer loop: draw, wait for the next signal, key or tick, react.
/// Returns once Quit is received or every producer is gone.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: &Settings,
    app: &mut App,
    engine: &dyn PlaybackEngine,
    bus: &ControlReceivers,
    passthrough: &KeyReceiver,
) -> Result<()> {
    let tick = Duration::from_millis(settings.ui.tick_ms);

    loop {
        terminal
            .draw(|f| ui::draw(f, app, &settings.ui))
            .context("Failed to draw frame")?;

        let flow = handle_wakeup(bus.wait(passthrough, tick), app, engine, passthrough);
        sync_playback(app, engine, &settings.playback);

        if flow == Flow::Quit {
            info!("quit requested");
            return Ok(());
        }
    }
}

/// React to one wakeup. A forwarded key is acknowledged only after the
/// navigation it causes has been published, so the input thread cannot
/// dispatch its next key against a stale selection.
pub fn handle_wakeup(
    wakeup: Wakeup,
    app: &mut App,
    engine: &dyn PlaybackEngine,
    passthrough: &KeyReceiver,
) -> Flow {
    match wakeup {
        Wakeup::Signal(signal) => handle_signal(signal, app, engine),
        Wakeup::Key(key) => {
            app.handle_navigation(&key);
            passthrough.applied();
            Flow::Continue
        }
        Wakeup::Tick => Flow::Continue,
        Wakeup::Closed => {
            warn!("control bus closed");
            Flow::Quit
        }
    }
}

pub fn handle_signal(signal: ControlSignal, app: &mut App, engine: &dyn PlaybackEngine) -> Flow {
    debug!(?signal, "control signal received");
    match signal {
        ControlSignal::TrackSelected(path) => {
            // A natural end still pending from the previous track must not
            // skip past the one just chosen.
            app.mark_advanced();
            app.select_path(&path);
            play(app, engine, path);
        }
        ControlSignal::Paused => send(engine, AudioCmd::TogglePause),
        ControlSignal::Muted => send(engine, AudioCmd::ToggleMute),
        ControlSignal::VolumeUp => send(engine, AudioCmd::VolumeUp),
        ControlSignal::VolumeDown => send(engine, AudioCmd::VolumeDown),
        ControlSignal::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Take a fresh engine snapshot; when the playing track ended on its own,
/// move to the next one (wrapping) and play it.
pub fn sync_playback(app: &mut App, engine: &dyn PlaybackEngine, settings: &PlaybackSettings) {
    app.refresh_playback(engine.snapshot());
    if !app.needs_advance() {
        return;
    }
    app.mark_advanced();
    if !settings.auto_advance {
        return;
    }

    app.next_track();
    if let Some(path) = app.selected_path() {
        info!(path = %path.display(), "advancing to next track");
        play(app, engine, path);
    }
}

fn play(app: &mut App, engine: &dyn PlaybackEngine, path: PathBuf) {
    app.set_track_info(metadata::read_track_info(&path));
    send(engine, AudioCmd::Play(path));
}

fn send(engine: &dyn PlaybackEngine, cmd: AudioCmd) {
    if let Err(e) = engine.send(cmd) {
        warn!("audio command failed: {e}");
    }
}
