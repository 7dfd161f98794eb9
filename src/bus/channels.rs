use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded, select};
use crossterm::event::KeyEvent;
use thiserror::Error;

/// User intent delivered to the consumer loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlSignal {
    TrackSelected(PathBuf),
    Paused,
    Muted,
    VolumeUp,
    VolumeDown,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("control bus receiver disconnected")]
pub struct BusClosed;

/// Sending half: one rendezvous channel per signal kind.
#[derive(Debug, Clone)]
pub struct ControlSenders {
    track_selected: Sender<PathBuf>,
    paused: Sender<()>,
    mute: Sender<()>,
    volume_up: Sender<()>,
    volume_down: Sender<()>,
    quit: Sender<()>,
}

/// Receiving half, owned by the consumer loop.
#[derive(Debug)]
pub struct ControlReceivers {
    track_selected: Receiver<PathBuf>,
    paused: Receiver<()>,
    mute: Receiver<()>,
    volume_up: Receiver<()>,
    volume_down: Receiver<()>,
    quit: Receiver<()>,
}

/// Input side of the pass-through channel, for keys the bus did not consume.
#[derive(Debug)]
pub struct KeyForwarder {
    keys: Sender<KeyEvent>,
    applied: Receiver<()>,
}

/// Consumer side of the pass-through channel.
#[derive(Debug)]
pub struct KeyReceiver {
    keys: Receiver<KeyEvent>,
    applied: Sender<()>,
}

/// Why the consumer loop woke up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Wakeup {
    Signal(ControlSignal),
    /// An input event the bus did not consume.
    Key(KeyEvent),
    Tick,
    /// Every sender is gone.
    Closed,
}

/// Create the six unbuffered control channels.
///
/// Each channel has capacity zero: a send completes only once the consumer
/// has taken the value, so input is throttled to the consumer's pace.
pub fn control_bus() -> (ControlSenders, ControlReceivers) {
    let (track_selected_tx, track_selected_rx) = bounded(0);
    let (paused_tx, paused_rx) = bounded(0);
    let (mute_tx, mute_rx) = bounded(0);
    let (volume_up_tx, volume_up_rx) = bounded(0);
    let (volume_down_tx, volume_down_rx) = bounded(0);
    let (quit_tx, quit_rx) = bounded(0);

    (
        ControlSenders {
            track_selected: track_selected_tx,
            paused: paused_tx,
            mute: mute_tx,
            volume_up: volume_up_tx,
            volume_down: volume_down_tx,
            quit: quit_tx,
        },
        ControlReceivers {
            track_selected: track_selected_rx,
            paused: paused_rx,
            mute: mute_rx,
            volume_up: volume_up_rx,
            volume_down: volume_down_rx,
            quit: quit_rx,
        },
    )
}

/// Create the pass-through channel.
///
/// A forwarded key is only handed over once the consumer has applied it
/// (see [`KeyReceiver::applied`]), so a control key read right after a
/// navigation key always sees the selection that navigation produced.
pub fn passthrough_channel() -> (KeyForwarder, KeyReceiver) {
    let (keys_tx, keys_rx) = bounded(0);
    let (applied_tx, applied_rx) = bounded(1);
    (
        KeyForwarder {
            keys: keys_tx,
            applied: applied_rx,
        },
        KeyReceiver {
            keys: keys_rx,
            applied: applied_tx,
        },
    )
}

impl KeyForwarder {
    /// Hand `key` to the consumer and block until it has been applied.
    pub fn forward(&self, key: KeyEvent) -> Result<(), BusClosed> {
        self.keys.send(key).map_err(|_| BusClosed)?;
        self.applied.recv().map_err(|_| BusClosed)
    }
}

impl KeyReceiver {
    /// Release the forwarder waiting on the key just received.
    pub fn applied(&self) {
        let _ = self.applied.send(());
    }
}

impl ControlSenders {
    /// Send `signal` on its channel, blocking until it is received.
    pub fn send(&self, signal: ControlSignal) -> Result<(), BusClosed> {
        let sent = match signal {
            ControlSignal::TrackSelected(path) => self.track_selected.send(path).is_ok(),
            ControlSignal::Paused => self.paused.send(()).is_ok(),
            ControlSignal::Muted => self.mute.send(()).is_ok(),
            ControlSignal::VolumeUp => self.volume_up.send(()).is_ok(),
            ControlSignal::VolumeDown => self.volume_down.send(()).is_ok(),
            ControlSignal::Quit => self.quit.send(()).is_ok(),
        };
        if sent { Ok(()) } else { Err(BusClosed) }
    }
}

fn signal_or_closed<T>(
    msg: Result<T, crossbeam_channel::RecvError>,
    f: impl FnOnce(T) -> ControlSignal,
) -> Wakeup {
    match msg {
        Ok(v) => Wakeup::Signal(f(v)),
        Err(_) => Wakeup::Closed,
    }
}

impl ControlReceivers {
    /// Block until any channel delivers. Ready channels are picked at random,
    /// none has priority.
    #[cfg(test)]
    pub fn recv(&self) -> Result<ControlSignal, BusClosed> {
        let wakeup = select! {
            recv(self.track_selected) -> msg => signal_or_closed(msg, ControlSignal::TrackSelected),
            recv(self.paused) -> msg => signal_or_closed(msg, |()| ControlSignal::Paused),
            recv(self.mute) -> msg => signal_or_closed(msg, |()| ControlSignal::Muted),
            recv(self.volume_up) -> msg => signal_or_closed(msg, |()| ControlSignal::VolumeUp),
            recv(self.volume_down) -> msg => signal_or_closed(msg, |()| ControlSignal::VolumeDown),
            recv(self.quit) -> msg => signal_or_closed(msg, |()| ControlSignal::Quit),
        };
        match wakeup {
            Wakeup::Signal(signal) => Ok(signal),
            _ => Err(BusClosed),
        }
    }

    /// Block until a control channel or the pass-through key channel
    /// delivers, or `timeout` elapses. No channel has priority.
    ///
    /// A [`Wakeup::Key`] must be answered with [`KeyReceiver::applied`] once
    /// the key has been handled.
    pub fn wait(&self, passthrough: &KeyReceiver, timeout: Duration) -> Wakeup {
        select! {
            recv(self.track_selected) -> msg => signal_or_closed(msg, ControlSignal::TrackSelected),
            recv(self.paused) -> msg => signal_or_closed(msg, |()| ControlSignal::Paused),
            recv(self.mute) -> msg => signal_or_closed(msg, |()| ControlSignal::Muted),
            recv(self.volume_up) -> msg => signal_or_closed(msg, |()| ControlSignal::VolumeUp),
            recv(self.volume_down) -> msg => signal_or_closed(msg, |()| ControlSignal::VolumeDown),
            recv(self.quit) -> msg => signal_or_closed(msg, |()| ControlSignal::Quit),
            recv(passthrough.keys) -> msg => match msg {
                Ok(key) => Wakeup::Key(key),
                Err(_) => Wakeup::Closed,
            },
            default(timeout) => Wakeup::Tick,
        }
    }
}
