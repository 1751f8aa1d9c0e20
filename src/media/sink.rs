//! Utilities for creating `rodio` sinks from in-memory audio.
//!
//! The helper here encapsulates decoding a buffer and preparing a paused
//! `Sink` ready to play.

use std::io::Cursor;
use std::sync::Arc;

use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink};

/// Create a paused `Sink` playing `data` at `volume`.
pub(super) fn create_sink(
    stream: &OutputStream,
    data: Arc<[u8]>,
    volume: f32,
) -> Result<Sink, DecoderError> {
    let source = Decoder::new(Cursor::new(data))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
