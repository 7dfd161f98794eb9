//! Control channel bus.
//!
//! Input events are routed onto six named, unbuffered channels
//! (track-selected, pause, mute, volume up/down, quit). The dispatching side
//! blocks until the consumer loop receives, so nothing is buffered or lost.

mod channels;
mod dispatch;

pub use channels::*;
pub use dispatch::*;
