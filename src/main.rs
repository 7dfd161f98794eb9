//! alonemp: a terminal music player for a local directory tree.
//!
//! The input thread routes control keys onto a bus of unbuffered channels;
//! the main thread consumes them, owns the catalog and the terminal, and
//! drives the audio engine thread.

mod app;
mod audio;
mod bus;
mod catalog;
mod config;
mod cursor;
mod display;
mod metadata;
mod runtime;
mod ui;

fn main() -> anyhow::Result<()> {
    runtime::run()
}
