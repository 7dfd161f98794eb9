use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::bus::{Dispatcher, SelectionHandle, control_bus, passthrough_channel};
use crate::config::LibrarySettings;

mod event_loop;
mod input;
mod logging;
mod settings;

#[cfg(test)]
mod tests;

use input::InputThread;

pub fn run() -> Result<()> {
    let (settings, fallback) = settings::load_settings();

    match logging::init(&settings.log) {
        Ok(Some(path)) => info!(log = %path.display(), "alonemp starting"),
        Ok(None) => {}
        Err(e) => eprintln!("alonemp: logging disabled: {e:#}"),
    }
    if let Some(reason) = fallback {
        warn!("{reason}");
    }

    let root = resolve_root(env::args_os().nth(1).map(PathBuf::from), &settings.library);
    info!(root = %root.display(), "using library root");

    let selection: SelectionHandle = Arc::new(Mutex::new(None));
    let mut app = App::new(selection.clone());
    app.populate(&root, &settings.library);

    let audio_player = AudioPlayer::new(settings.audio.clone());

    let (senders, receivers) = control_bus();
    let (pass_tx, pass_rx) = passthrough_channel();

    let mut terminal = match setup_terminal() {
        Ok(t) => t,
        Err(e) => {
            audio_player.quit_softly(Duration::ZERO);
            return Err(e);
        }
    };

    let input = InputThread::spawn(Dispatcher::new(senders, selection), pass_tx);

    let loop_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &audio_player,
        &receivers,
        &pass_rx,
    );

    // Drop the consumer ends first so a blocked dispatch wakes up.
    drop(receivers);
    drop(pass_rx);
    let input_result = input.stop().context("Failed to read terminal events");

    audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    restore_terminal(&mut terminal);
    info!("alonemp stopped");

    loop_result.and(input_result)
}

/// First CLI argument, then the configured root, then the working directory.
fn resolve_root(arg: Option<PathBuf>, settings: &LibrarySettings) -> PathBuf {
    arg.or_else(|| settings.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e).context("Failed to enter alternate screen");
    }

    let backend = CrosstermBackend::new(stdout);
    match Terminal::new(backend) {
        Ok(t) => Ok(t),
        Err(e) => {
            disable_raw_mode().ok();
            execute!(io::stdout(), LeaveAlternateScreen).ok();
            Err(e).context("Failed to create terminal")
        }
    }
}

/// Best effort: undo raw mode and the alternate screen.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}
