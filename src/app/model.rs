//! Presentation-side view of the session: `App` and `InputMode`.
//!
//! `App` mirrors whatever the session thread last published and adds the
//! purely local bits (cursor, folder prompt, pending error popup).

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use crate::library::display_name;
use crate::session::{
    ElapsedDisplay, FolderChoice, Intent, PlaybackState, SessionEvent, Status, Track,
};

/// What keystrokes are currently routed to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a folder path.
    FolderPrompt,
}

/// The view model drawn by `ui::draw`.
#[derive(Debug, Default)]
pub struct App {
    pub entries: Vec<PathBuf>,
    pub names: Vec<String>,
    pub generation: u64,
    pub selected: usize,

    pub status: Status,
    pub state: PlaybackState,
    pub track: Option<Track>,
    pub elapsed: ElapsedDisplay,
    pub artwork: Option<Arc<RgbaImage>>,
    pub resume_enabled: bool,
    pub volume: u8,

    /// Blocking notification; cleared by any key.
    pub error: Option<String>,
    pub mode: InputMode,
    pub folder_input: String,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one session event into the view.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StatusChanged(status) => self.status = status,
            SessionEvent::TrackChanged(track) => self.track = track,
            SessionEvent::ElapsedChanged(elapsed) => self.elapsed = elapsed,
            SessionEvent::ArtworkChanged(bitmap) => self.artwork = Some(bitmap),
            SessionEvent::ResumeEnabledChanged(enabled) => self.resume_enabled = enabled,
            SessionEvent::StateChanged(state) => self.state = state,
            SessionEvent::PlaylistChanged {
                entries,
                generation,
            } => {
                self.names = entries.iter().map(|p| display_name(p)).collect();
                self.entries = entries;
                self.generation = generation;
                self.selected = 0;
            }
            SessionEvent::VolumeChanged(volume) => self.volume = volume,
            SessionEvent::Error(msg) => self.error = Some(msg),
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.entries.len() - 1);
        }
    }

    /// Selection as numbered in the playlist the cursor is looking at.
    ///
    /// Sent even for an empty playlist; the session answers with a prompt.
    pub fn select_intent(&self) -> Intent {
        Intent::SelectAndPlay {
            index: self.selected,
            generation: self.generation,
        }
    }

    /// Raise the shown volume right away and return the new target; the
    /// session's `VolumeChanged` echo confirms it later.
    pub fn volume_up(&mut self, step: u8) -> u8 {
        self.volume = self.volume.saturating_add(step).min(100);
        self.volume
    }

    pub fn volume_down(&mut self, step: u8) -> u8 {
        self.volume = self.volume.saturating_sub(step);
        self.volume
    }

    pub fn open_folder_prompt(&mut self) {
        self.mode = InputMode::FolderPrompt;
        self.folder_input.clear();
    }

    pub fn push_folder_char(&mut self, c: char) {
        self.folder_input.push(c);
    }

    pub fn pop_folder_char(&mut self) {
        self.folder_input.pop();
    }

    /// Close the prompt and turn it into the picker result.
    pub fn close_folder_prompt(&mut self, confirmed: bool) -> FolderChoice {
        self.mode = InputMode::Normal;
        let input = std::mem::take(&mut self.folder_input);
        let input = input.trim();
        if confirmed && !input.is_empty() {
            FolderChoice::Chosen(PathBuf::from(input))
        } else {
            FolderChoice::Cancelled
        }
    }

    /// Returns true if a popup was actually dismissed.
    pub fn dismiss_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    pub fn now_playing_name(&self) -> &str {
        self.track
            .as_ref()
            .map_or("No song selected", |t| t.display_name.as_str())
    }

    pub fn elapsed_text(&self) -> String {
        format!("Time Elapsed: {}", self.elapsed)
    }
}
