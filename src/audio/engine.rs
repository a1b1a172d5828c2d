//! `rodio`-backed engine.
//!
//! Owns:
//! - OutputStream (must stay alive for as long as anything plays)
//! - Sink (per loaded track)
//! - the volume, which outlives individual sinks

use std::path::Path;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use super::sink::create_sink;
use super::types::{AudioEngine, EngineError};

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl RodioEngine {
    /// Open the default output device.
    ///
    /// `OutputStream` is not `Send` on every platform, so call this on the
    /// thread that will own the engine.
    pub fn open(volume: f32) -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::NoOutput(e.to_string()))?;
        // rodio prints to stderr when the stream is dropped, which would
        // scribble over the terminal UI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let sink = create_sink(&self.stream, path, self.volume)?;
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        debug!(path = %path.display(), "engine loaded track");
        Ok(())
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn unpause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    fn is_busy(&self) -> bool {
        self.sink
            .as_ref()
            .map(|s| !s.empty() && !s.is_paused())
            .unwrap_or(false)
    }

    fn position_millis(&self) -> u64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_millis() as u64)
            .unwrap_or(0)
    }
}
