//! Playback session: the state machine behind the transport controls.
//!
//! `Controller` owns playback state and is only ever driven through
//! `Controller::handle`. `worker` runs it on its own thread next to the
//! audio engine and feeds it intents and polling ticks.

mod clock;
mod controller;
mod intent;
mod model;
mod worker;

pub use clock::{EngineProbe, format_mmss, reconcile};
pub use controller::{ArtworkRenderer, Controller};
pub use intent::{FolderChoice, Intent, SessionEvent, supersede_selections};
pub use model::{ElapsedDisplay, LoadTicket, PlaybackState, Status, Track};
pub use worker::{SessionHandle, ThreadedRenderer, run, spawn_session};
