use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::AudioFile;
use lofty::probe::Probe;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::playlist::{Locator, TransientHandle};

use super::element::MediaElement;
use super::sink::create_sink;
use super::types::{MediaError, MediaEvent};

/// A decoded-and-validated source, ready to be turned into a sink.
struct Loaded {
    data: Arc<[u8]>,
    duration: Option<Duration>,
}

/// `MediaElement` backed by a `rodio` output stream.
///
/// The output device is opened on the first play request, so loading sources
/// works without audio hardware. Notifications are queued and handed out by
/// `drain_events`, which the host calls once per tick.
///
/// Loading is synchronous: `set_source` reads, decodes and probes the whole
/// file on the caller's thread before queueing `LoadedMetadata`. That is fine
/// for local files and in-memory uploads; a remote source would need a
/// loader thread in front of it.
pub struct RodioElement {
    base_dir: PathBuf,
    transients: TransientHandle,

    stream: Option<OutputStream>,
    sink: Option<Sink>,

    source: Option<Locator>,
    loaded: Option<Loaded>,
    load_error: Option<MediaError>,

    playing: bool,
    /// Position to apply once a sink exists (seeks before the first play).
    pending_seek: Duration,
    volume: f32,
    events: VecDeque<MediaEvent>,
}

impl RodioElement {
    pub fn new(base_dir: PathBuf, transients: TransientHandle) -> Self {
        Self {
            base_dir,
            transients,
            stream: None,
            sink: None,
            source: None,
            loaded: None,
            load_error: None,
            playing: false,
            pending_seek: Duration::ZERO,
            volume: 1.0,
            events: VecDeque::new(),
        }
    }

    fn read_locator(&self, locator: &Locator) -> Result<Arc<[u8]>, MediaError> {
        match locator {
            Locator::Resource(res) => {
                if res.starts_with("http://") || res.starts_with("https://") {
                    return Err(MediaError::Unavailable {
                        locator: res.clone(),
                        reason: "remote sources are not supported".to_string(),
                    });
                }
                let path = self.base_dir.join(res);
                fs::read(&path)
                    .map(|bytes| Arc::<[u8]>::from(bytes))
                    .map_err(|e| MediaError::Unavailable {
                        locator: res.clone(),
                        reason: e.to_string(),
                    })
            }
            Locator::Transient(id) => {
                let store = self.transients.lock().map_err(|_| MediaError::Unavailable {
                    locator: locator.to_string(),
                    reason: "transient store is poisoned".to_string(),
                })?;
                store.resolve(*id).ok_or_else(|| MediaError::Unavailable {
                    locator: locator.to_string(),
                    reason: "unknown transient locator".to_string(),
                })
            }
        }
    }

    fn load(&self, locator: &Locator) -> Result<Loaded, MediaError> {
        let data = self.read_locator(locator)?;

        // Decoding the header up front tells us whether the format is playable.
        let decoder =
            Decoder::new(Cursor::new(data.clone())).map_err(|e| MediaError::Unsupported {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        let duration = probe_duration(&data).or_else(|| decoder.total_duration());
        Ok(Loaded { data, duration })
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Make sure a sink exists for the loaded source, opening the output lazily.
    fn ensure_sink(&mut self) -> Result<(), MediaError> {
        if self.sink.is_some() {
            return Ok(());
        }
        if let Some(err) = &self.load_error {
            return Err(err.clone());
        }
        let Some(loaded) = self.loaded.as_ref() else {
            return Err(MediaError::NoSource);
        };

        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| MediaError::NoOutput(e.to_string()))?;
            // rodio logs to stderr when the stream is dropped; noisy under a TUI.
            stream.log_on_drop(false);
            self.stream = Some(stream);
        }
        let Some(stream) = self.stream.as_ref() else {
            return Err(MediaError::NoOutput("output stream missing".to_string()));
        };

        let sink = create_sink(stream, loaded.data.clone(), self.volume).map_err(|e| {
            MediaError::Unsupported {
                locator: self
                    .source
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                reason: e.to_string(),
            }
        })?;

        if !self.pending_seek.is_zero() {
            if let Err(e) = sink.try_seek(self.pending_seek) {
                tracing::warn!(error = %e, "seek before playback failed");
            }
            self.pending_seek = Duration::ZERO;
        }
        self.sink = Some(sink);
        Ok(())
    }

    /// Detect the end of the current source and queue the matching notifications.
    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let finished = self.sink.as_ref().map(Sink::empty).unwrap_or(true);
        if finished {
            tracing::debug!(source = ?self.source, "source ended");
            self.playing = false;
            self.stop_sink();
            self.pending_seek = Duration::ZERO;
            self.events.push_back(MediaEvent::Pause);
            self.events.push_back(MediaEvent::Ended);
        } else {
            self.events.push_back(MediaEvent::TimeUpdate);
        }
    }
}

#[cfg(test)]
impl RodioElement {
    /// Mark the element as playing without opening an output device.
    pub(super) fn assume_playing(&mut self) {
        self.playing = true;
    }
}

/// Read the duration from the container headers with `lofty`.
fn probe_duration(data: &Arc<[u8]>) -> Option<Duration> {
    let probe = Probe::new(Cursor::new(&data[..])).guess_file_type().ok()?;
    let tagged = probe.read().ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}

impl MediaElement for RodioElement {
    fn set_source(&mut self, locator: &Locator) {
        self.stop_sink();
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Pause);
        }
        self.pending_seek = Duration::ZERO;
        self.source = Some(locator.clone());

        match self.load(locator) {
            Ok(loaded) => {
                tracing::debug!(%locator, duration = ?loaded.duration, "source loaded");
                self.loaded = Some(loaded);
                self.load_error = None;
                self.events.push_back(MediaEvent::LoadedMetadata);
                self.events.push_back(MediaEvent::CanPlayThrough);
            }
            Err(e) => {
                tracing::warn!(%locator, error = %e, "source failed to load");
                self.loaded = None;
                self.load_error = Some(e);
            }
        }
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn play(&mut self) {
        if self.playing {
            return;
        }
        match self.ensure_sink() {
            Ok(()) => {
                if let Some(sink) = self.sink.as_ref() {
                    sink.play();
                }
                self.playing = true;
                self.events.push_back(MediaEvent::Play);
            }
            Err(e) => self.events.push_back(MediaEvent::PlayRejected(e)),
        }
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
        self.playing = false;
        self.events.push_back(MediaEvent::Pause);
    }

    fn current_time(&self) -> f64 {
        match self.sink.as_ref() {
            Some(sink) => sink.get_pos().as_secs_f64(),
            None => self.pending_seek.as_secs_f64(),
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds < 0.0 {
            return;
        }
        let target = Duration::from_secs_f64(seconds);
        match self.sink.as_ref() {
            Some(sink) => {
                if let Err(e) = sink.try_seek(target) {
                    tracing::warn!(error = %e, seconds, "seek failed");
                }
            }
            None => self.pending_seek = target,
        }
        self.events.push_back(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> f64 {
        self.loaded
            .as_ref()
            .and_then(|l| l.duration)
            .map(|d| d.as_secs_f64())
            .unwrap_or(f64::NAN)
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(self.volume);
        }
    }

    fn drain_events(&mut self) -> Vec<MediaEvent> {
        self.tick();
        self.events.drain(..).collect()
    }
}
