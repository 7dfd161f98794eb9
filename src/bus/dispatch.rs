use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::channels::{BusClosed, ControlSenders, ControlSignal, KeyForwarder};

/// The selected track's path, published by the consumer loop after every
/// cursor change and read by the dispatcher on Enter.
pub type SelectionHandle = Arc<Mutex<Option<PathBuf>>>;

/// Map a key to the signal it stands for.
///
/// Enter only maps when a track is selected. Keys that are not listed here
/// belong to the navigation layer.
pub fn route_key(key: &KeyEvent, selected: Option<&Path>) -> Option<ControlSignal> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => selected.map(|p| ControlSignal::TrackSelected(p.to_path_buf())),
        KeyCode::Char('p') | KeyCode::Char('P') if ctrl => Some(ControlSignal::Paused),
        KeyCode::Char(' ') if ctrl => Some(ControlSignal::Muted),
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => Some(ControlSignal::Quit),
        KeyCode::Left => Some(ControlSignal::VolumeDown),
        KeyCode::Right => Some(ControlSignal::VolumeUp),
        _ => None,
    }
}

/// Routes raw input onto the control bus.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    senders: ControlSenders,
    selection: SelectionHandle,
}

impl Dispatcher {
    pub fn new(senders: ControlSenders, selection: SelectionHandle) -> Self {
        Self { senders, selection }
    }

    fn selected_path(&self) -> Option<PathBuf> {
        self.selection.lock().ok().and_then(|s| s.clone())
    }

    /// Send the signal `key` maps to, blocking until the consumer takes it.
    ///
    /// Returns whether the key was consumed. Unconsumed keys must be handed
    /// on unchanged by the caller.
    pub fn dispatch(&self, key: &KeyEvent) -> bool {
        let selected = match key.code {
            KeyCode::Enter => self.selected_path(),
            _ => None,
        };
        let Some(signal) = route_key(key, selected.as_deref()) else {
            return false;
        };

        debug!(?signal, "dispatching control signal");
        if self.senders.send(signal).is_err() {
            debug!("control bus closed, signal dropped");
        }
        true
    }

    /// Dispatch `key`, or forward it unchanged to the consumer when no
    /// control channel takes it. A forwarded key has been applied by the
    /// time this returns.
    pub fn route(&self, key: KeyEvent, forwarder: &KeyForwarder) -> Result<(), BusClosed> {
        if self.dispatch(&key) {
            Ok(())
        } else {
            forwarder.forward(key)
        }
    }
}
