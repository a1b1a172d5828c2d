//! The session thread.
//!
//! Owns the controller and the audio engine; everything else talks to it
//! through an `Intent` channel and listens on a `SessionEvent` channel.
//! Ticks are generated here, between intents, so a tick never interleaves
//! with a user action.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SendError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::artwork::{self, ArtworkAsset};
use crate::audio::{AudioEngine, RodioEngine, SilentEngine};
use crate::config::{ArtworkSettings, Settings};
use crate::metadata::{LoftyExtractor, MetadataExtractor};

use super::controller::{ArtworkRenderer, Controller};
use super::intent::{Intent, SessionEvent, supersede_selections};
use super::model::LoadTicket;

pub struct SessionHandle {
    tx: Sender<Intent>,
    join: Option<JoinHandle<()>>,
}

impl SessionHandle {
    pub fn send(&self, intent: Intent) -> Result<(), SendError<Intent>> {
        self.tx.send(intent)
    }

    /// Ask the session to stop playback and wait for its thread.
    pub fn shutdown(mut self) {
        let _ = self.tx.send(Intent::Shutdown);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

/// Spawn the session thread. The audio device is opened on that thread.
pub fn spawn_session(settings: &Settings, events: Sender<SessionEvent>) -> SessionHandle {
    let (tx, rx) = mpsc::channel::<Intent>();
    let renderer = ThreadedRenderer::new(tx.clone(), settings.artwork.clone());
    let library = settings.library.clone();
    let volume = settings.audio.initial_volume.min(100);
    let tick = Duration::from_millis(settings.playback.tick_ms.max(1));

    let join = thread::Builder::new()
        .name("nocturne-session".into())
        .spawn(move || {
            let engine: Box<dyn AudioEngine> = match RodioEngine::open(f32::from(volume) / 100.0) {
                Ok(engine) => Box::new(engine),
                Err(err) => {
                    warn!(%err, "audio output unavailable, playback disabled");
                    Box::new(SilentEngine::new(err.to_string()))
                }
            };

            let mut controller =
                Controller::new(engine, LoftyExtractor, renderer, library, volume, events);
            controller.announce();
            run(&mut controller, &rx, tick);
            info!("session stopped");
        });

    let join = match join {
        Ok(h) => Some(h),
        Err(err) => {
            warn!(%err, "could not spawn session thread");
            None
        }
    };

    SessionHandle { tx, join }
}

/// Serve intents until shutdown, ticking every `tick`.
///
/// Each wake-up drains whatever is queued, drops superseded selections,
/// then applies the rest in order.
pub fn run<E, M, R>(controller: &mut Controller<E, M, R>, rx: &Receiver<Intent>, tick: Duration)
where
    E: AudioEngine,
    M: MetadataExtractor,
    R: ArtworkRenderer,
{
    let mut next_tick = Instant::now() + tick;

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match rx.recv_timeout(wait) {
            Ok(first) => {
                let mut batch = vec![first];
                batch.extend(rx.try_iter());
                for intent in supersede_selections(batch) {
                    if controller.handle(intent) {
                        return;
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }

        let now = Instant::now();
        if now >= next_tick {
            controller.handle(Intent::Tick);
            next_tick = now + tick;
        }
    }
}

/// Renders artwork on a short-lived thread per request and posts the result
/// back into the session as `Intent::ArtworkRendered`.
pub struct ThreadedRenderer {
    intents: Sender<Intent>,
    settings: ArtworkSettings,
}

impl ThreadedRenderer {
    pub fn new(intents: Sender<Intent>, settings: ArtworkSettings) -> Self {
        Self { intents, settings }
    }
}

impl ArtworkRenderer for ThreadedRenderer {
    fn request(&mut self, ticket: LoadTicket, asset: ArtworkAsset) {
        let intents = self.intents.clone();
        let settings = self.settings.clone();
        let spawned = thread::Builder::new()
            .name("nocturne-artwork".into())
            .spawn(move || {
                let bitmap = Arc::new(artwork::render(&asset, &settings));
                let _ = intents.send(Intent::ArtworkRendered { ticket, bitmap });
            });

        if let Err(err) = spawned {
            warn!(%err, "could not spawn artwork thread, drawing placeholder inline");
            let bitmap = Arc::new(artwork::render(&ArtworkAsset::Placeholder, &self.settings));
            let _ = self.intents.send(Intent::ArtworkRendered { ticket, bitmap });
        }
    }
}
