//! Default playback engine.
//!
//! A dedicated thread owns the `rodio` output stream and executes
//! [`AudioCmd`]s; the consumer loop only sees the [`PlaybackEngine`] trait
//! and the published [`PlaybackInfo`] snapshot.

mod player;
mod sink;
mod thread;
mod types;
mod volume;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
