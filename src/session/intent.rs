//! Messages into and out of the session.

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use super::model::{ElapsedDisplay, LoadTicket, PlaybackState, Status, Track};

/// Result of the folder picker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FolderChoice {
    Chosen(PathBuf),
    Cancelled,
}

/// Everything that can change the session. All of it goes through
/// `Controller::handle`, one at a time.
#[derive(Clone, Debug)]
pub enum Intent {
    /// Play the playlist entry at `index`, as numbered in playlist `generation`.
    SelectAndPlay { index: usize, generation: u64 },
    Pause,
    Stop,
    Resume,
    LoadFolder(FolderChoice),
    /// Volume in percent, `0..=100`.
    VolumeChanged(u8),
    /// Polling-loop heartbeat.
    Tick,
    /// A background artwork render finished.
    ArtworkRendered {
        ticket: LoadTicket,
        bitmap: Arc<RgbaImage>,
    },
    Shutdown,
}

impl Intent {
    /// Short name for logs (the artwork variant is too large to print).
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectAndPlay { .. } => "select-and-play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Resume => "resume",
            Self::LoadFolder(_) => "load-folder",
            Self::VolumeChanged(_) => "volume",
            Self::Tick => "tick",
            Self::ArtworkRendered { .. } => "artwork-rendered",
            Self::Shutdown => "shutdown",
        }
    }
}

/// What the presentation layer is told.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    StatusChanged(Status),
    TrackChanged(Option<Track>),
    ElapsedChanged(ElapsedDisplay),
    ArtworkChanged(Arc<RgbaImage>),
    ResumeEnabledChanged(bool),
    StateChanged(PlaybackState),
    PlaylistChanged {
        entries: Vec<PathBuf>,
        generation: u64,
    },
    VolumeChanged(u8),
    /// Needs the user's acknowledgement.
    Error(String),
}

/// Drop every `SelectAndPlay` that has a newer one queued behind it.
///
/// Other intents keep their relative order.
pub fn supersede_selections(batch: Vec<Intent>) -> Vec<Intent> {
    let newest = batch
        .iter()
        .rposition(|i| matches!(i, Intent::SelectAndPlay { .. }));

    batch
        .into_iter()
        .enumerate()
        .filter(|(pos, intent)| {
            !matches!(intent, Intent::SelectAndPlay { .. }) || Some(*pos) == newest
        })
        .map(|(_, intent)| intent)
        .collect()
}
