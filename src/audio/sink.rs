//! Utilities for creating `rodio` sinks from track paths.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` together with the track length, when it can be known.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::metadata::probe_duration;

use super::types::AudioError;

/// Create a paused `Sink` playing `path` from the start.
pub(super) fn create_sink(
    stream: &OutputStream,
    path: &Path,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    // Many mp3 streams cannot report their length; the container usually can.
    let duration = source.total_duration().or_else(|| probe_duration(path));

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}
