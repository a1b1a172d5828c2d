//! The audio engine contract.
//!
//! The session controller only talks to audio output through
//! [`AudioEngine`]; the engine holds at most one loaded track.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("no audio output available: {0}")]
    NoOutput(String),
}

/// Single-track playback engine.
///
/// Queries (`is_busy`, `position_millis`) must be safe to call at any time,
/// including before anything was loaded.
pub trait AudioEngine {
    /// Replace the current track with `path`. The new track does not start
    /// until [`AudioEngine::play`] is called.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    /// `volume` is a gain in `0.0..=1.0`; it survives track changes.
    fn set_volume(&mut self, volume: f32);
    /// True while audio is actually being produced.
    fn is_busy(&self) -> bool;
    /// Playback position of the current track.
    fn position_millis(&self) -> u64;
}

/// Stand-in used when no output device could be opened.
///
/// Every load fails, so the session reports the problem instead of
/// pretending to play.
#[derive(Debug)]
pub struct SilentEngine {
    reason: String,
}

impl SilentEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl AudioEngine for SilentEngine {
    fn load(&mut self, _path: &Path) -> Result<(), EngineError> {
        Err(EngineError::NoOutput(self.reason.clone()))
    }

    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn unpause(&mut self) {}
    fn stop(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}

    fn is_busy(&self) -> bool {
        false
    }

    fn position_millis(&self) -> u64 {
        0
    }
}

impl<E: AudioEngine + ?Sized> AudioEngine for Box<E> {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        (**self).load(path)
    }
    fn play(&mut self) {
        (**self).play()
    }
    fn pause(&mut self) {
        (**self).pause()
    }
    fn unpause(&mut self) {
        (**self).unpause()
    }
    fn stop(&mut self) {
        (**self).stop()
    }
    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }
    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }
    fn position_millis(&self) -> u64 {
        (**self).position_millis()
    }
}
