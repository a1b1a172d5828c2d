//! Session model types: `PlaybackState`, `Track`, `ElapsedDisplay`, `Status`.

use std::fmt;
use std::path::PathBuf;

use super::clock::format_mmss;

/// The playback state of the session.
///
/// Every state except `Idle` has a current [`Track`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded since the last folder change (or ever).
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
}

impl PlaybackState {
    pub fn is_loaded(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// A successfully loaded track. Replaced, never mutated, by the next load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display_name: String,
    pub duration_secs: u64,
}

/// The `elapsed / total` pair shown to the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ElapsedDisplay {
    pub elapsed_secs: u64,
    pub total_secs: u64,
}

impl ElapsedDisplay {
    pub fn new(elapsed_secs: u64, total_secs: u64) -> Self {
        Self {
            elapsed_secs,
            total_secs,
        }
    }

    pub fn elapsed_text(&self) -> String {
        format_mmss(self.elapsed_secs)
    }

    pub fn total_text(&self) -> String {
        format_mmss(self.total_secs)
    }
}

impl fmt::Display for ElapsedDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.elapsed_text(), self.total_text())
    }
}

/// User-facing status line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Welcome,
    DirectoryLoaded,
    /// Play was requested without a usable selection.
    SelectPrompt,
    Playing,
    Paused,
    Stopped,
    /// Resume was requested while there was nothing to resume.
    ResumeWithoutTrack,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Welcome => "Welcome! Load a directory to start.",
            Self::DirectoryLoaded => "Directory loaded. Select a song to play.",
            Self::SelectPrompt => "Please select a song!",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::ResumeWithoutTrack => "Please Select a song!",
        };
        f.write_str(text)
    }
}

/// Identifies one load (or folder change). Results tagged with an older
/// ticket are discarded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
