use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tracing::debug;

use crate::bus::{Dispatcher, KeyForwarder};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The thread reading terminal events and feeding the control bus.
pub struct InputThread {
    stop: Arc<AtomicBool>,
    join: Option<JoinHandle<io::Result<()>>>,
}

impl InputThread {
    /// Start reading key presses. Keys the dispatcher does not consume go to
    /// `passthrough` unchanged.
    pub fn spawn(dispatcher: Dispatcher, passthrough: KeyForwarder) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let join = thread::spawn(move || read_loop(&dispatcher, &passthrough, &flag));
        Self {
            stop,
            join: Some(join),
        }
    }

    /// Ask the thread to stop and wait for it. Any read error it hit is
    /// returned here.
    ///
    /// The consumer side of the bus must already be dropped, otherwise a
    /// thread blocked on a rendezvous send never wakes up.
    pub fn stop(mut self) -> io::Result<()> {
        self.stop.store(true, Ordering::Relaxed);
        match self.join.take().map(JoinHandle::join) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(io::Error::other("input thread panicked")),
            None => Ok(()),
        }
    }
}

fn read_loop(
    dispatcher: &Dispatcher,
    passthrough: &KeyForwarder,
    stop: &AtomicBool,
) -> io::Result<()> {
    while !stop.load(Ordering::Relaxed) {
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if dispatcher.route(key, passthrough).is_err() {
            debug!("consumer gone, input thread exiting");
            break;
        }
    }
    Ok(())
}
