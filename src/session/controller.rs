//! The playback session controller.
//!
//! Owns the playback state machine, the current track, the playlist and the
//! derived display values. The engine, the metadata extractor and the
//! artwork renderer are injected; results flow out as [`SessionEvent`]s.

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::artwork::ArtworkAsset;
use crate::audio::AudioEngine;
use crate::config::LibrarySettings;
use crate::library::{Playlist, display_name, scan_folder};
use crate::metadata::MetadataExtractor;

use super::clock::{EngineProbe, reconcile};
use super::intent::{FolderChoice, Intent, SessionEvent};
use super::model::{ElapsedDisplay, LoadTicket, PlaybackState, Status, Track};

/// Turns an [`ArtworkAsset`] into a bitmap, possibly later and elsewhere.
///
/// Implementations hand the result back as `Intent::ArtworkRendered`
/// carrying the same ticket.
pub trait ArtworkRenderer {
    fn request(&mut self, ticket: LoadTicket, asset: ArtworkAsset);
}

pub struct Controller<E, M, R> {
    engine: E,
    extractor: M,
    renderer: R,
    library: LibrarySettings,
    events: Sender<SessionEvent>,

    playlist: Playlist,
    state: PlaybackState,
    track: Option<Track>,
    status: Status,
    elapsed: ElapsedDisplay,
    volume: u8,
    has_ever_loaded: bool,
    ticket: LoadTicket,
}

impl<E, M, R> Controller<E, M, R>
where
    E: AudioEngine,
    M: MetadataExtractor,
    R: ArtworkRenderer,
{
    pub fn new(
        engine: E,
        extractor: M,
        renderer: R,
        library: LibrarySettings,
        volume: u8,
        events: Sender<SessionEvent>,
    ) -> Self {
        Self {
            engine,
            extractor,
            renderer,
            library,
            events,
            playlist: Playlist::new(),
            state: PlaybackState::Idle,
            track: None,
            status: Status::Welcome,
            elapsed: ElapsedDisplay::default(),
            volume: volume.min(100),
            has_ever_loaded: false,
            ticket: LoadTicket::default(),
        }
    }

    /// Publish the initial values and push the starting volume to the engine.
    pub fn announce(&mut self) {
        self.engine.set_volume(f32::from(self.volume) / 100.0);
        self.emit(SessionEvent::StatusChanged(self.status));
        self.emit(SessionEvent::StateChanged(self.state));
        self.emit(SessionEvent::TrackChanged(None));
        self.emit(SessionEvent::ElapsedChanged(self.elapsed));
        self.emit(SessionEvent::ResumeEnabledChanged(self.has_ever_loaded));
        self.emit(SessionEvent::VolumeChanged(self.volume));
        self.renderer.request(self.ticket, ArtworkAsset::Placeholder);
    }

    /// Apply one intent. Returns `true` once shutdown was requested.
    pub fn handle(&mut self, intent: Intent) -> bool {
        if !matches!(intent, Intent::Tick | Intent::ArtworkRendered { .. }) {
            debug!(intent = intent.name(), state = ?self.state, "handling intent");
        }

        match intent {
            Intent::SelectAndPlay { index, generation } => self.select_and_play(index, generation),
            Intent::Pause => self.pause(),
            Intent::Stop => self.stop(),
            Intent::Resume => self.resume(),
            Intent::LoadFolder(choice) => self.load_folder(choice),
            Intent::VolumeChanged(percent) => self.set_volume(percent),
            Intent::Tick => self.tick(),
            Intent::ArtworkRendered { ticket, bitmap } => self.artwork_rendered(ticket, bitmap),
            Intent::Shutdown => {
                self.engine.stop();
                return true;
            }
        }
        false
    }

    /// The load pipeline. Either everything is updated for the new track,
    /// or nothing except the status line / an error notification.
    fn select_and_play(&mut self, index: usize, generation: u64) {
        let path = match self.playlist.resolve(index, generation) {
            Ok(p) => p.to_path_buf(),
            Err(err) => {
                debug!(%err, "selection rejected");
                self.set_status(Status::SelectPrompt);
                return;
            }
        };
        let name = display_name(&path);

        if let Err(err) = self.engine.load(&path) {
            warn!(%err, "engine could not load track");
            self.emit(SessionEvent::Error(format!("Could not play song:\n{err}")));
            return;
        }
        self.engine.play();

        let (duration_secs, asset) = self.read_metadata(&path);

        let track = Track {
            path,
            display_name: name,
            duration_secs,
        };
        info!(track = %track.path.display(), duration_secs, "playing");

        self.ticket = self.ticket.next();
        self.track = Some(track.clone());
        self.emit(SessionEvent::TrackChanged(Some(track)));
        self.set_state(PlaybackState::Playing);
        self.set_status(Status::Playing);
        self.set_elapsed(ElapsedDisplay::new(0, duration_secs));
        if !self.has_ever_loaded {
            self.has_ever_loaded = true;
            self.emit(SessionEvent::ResumeEnabledChanged(true));
        }
        self.renderer.request(self.ticket, asset);
    }

    /// Metadata never blocks playback: failures mean zero length and no art.
    fn read_metadata(&self, path: &Path) -> (u64, ArtworkAsset) {
        match self.extractor.extract(path) {
            Ok(meta) => (
                meta.duration_secs,
                ArtworkAsset::from_embedded(meta.artwork),
            ),
            Err(err) => {
                debug!(%err, "metadata unavailable");
                (0, ArtworkAsset::Placeholder)
            }
        }
    }

    fn pause(&mut self) {
        if !self.state.is_loaded() {
            return;
        }
        self.engine.pause();
        self.set_state(PlaybackState::Paused);
        self.set_status(Status::Paused);
    }

    fn resume(&mut self) {
        match self.state {
            PlaybackState::Idle => {
                self.set_status(Status::ResumeWithoutTrack);
                return;
            }
            PlaybackState::Playing => {}
            // A stopped engine has nothing left to unpause; the state is nominal.
            PlaybackState::Paused | PlaybackState::Stopped => {
                self.engine.unpause();
                self.set_state(PlaybackState::Playing);
            }
        }

        // After a stop or a rejected selection the status keeps asking for a song.
        let status = if matches!(self.status, Status::Stopped | Status::SelectPrompt) {
            Status::ResumeWithoutTrack
        } else {
            Status::Playing
        };
        if status != self.status {
            self.set_status(status);
        }
    }

    fn stop(&mut self) {
        self.engine.stop();
        if self.state.is_loaded() {
            self.set_state(PlaybackState::Stopped);
        }
        self.set_status(Status::Stopped);
        self.set_elapsed(ElapsedDisplay::new(0, self.elapsed.total_secs));
    }

    fn load_folder(&mut self, choice: FolderChoice) {
        let dir = match choice {
            FolderChoice::Chosen(dir) if !dir.as_os_str().is_empty() => dir,
            _ => return,
        };

        let entries = match scan_folder(&dir, &self.library) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, "folder scan failed");
                self.emit(SessionEvent::Error(format!("Could not open folder:\n{err}")));
                return;
            }
        };

        self.engine.stop();
        self.playlist.rebuild(entries);
        self.emit(SessionEvent::PlaylistChanged {
            entries: self.playlist.entries().to_vec(),
            generation: self.playlist.generation(),
        });

        self.track = None;
        self.emit(SessionEvent::TrackChanged(None));
        self.set_state(PlaybackState::Idle);
        self.set_status(Status::DirectoryLoaded);
        self.set_elapsed(ElapsedDisplay::default());

        self.ticket = self.ticket.next();
        self.renderer.request(self.ticket, ArtworkAsset::Placeholder);
    }

    fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.engine.set_volume(f32::from(percent) / 100.0);
        if percent != self.volume {
            self.volume = percent;
            self.emit(SessionEvent::VolumeChanged(percent));
        }
    }

    fn tick(&mut self) {
        let busy = self.engine.is_busy();
        let probe = EngineProbe {
            busy,
            position_ms: if busy { self.engine.position_millis() } else { 0 },
        };
        let total = self.track.as_ref().map_or(0, |t| t.duration_secs);

        if let Some(next) = reconcile(probe, self.state, total, self.elapsed) {
            self.set_elapsed(next);
        }
    }

    fn artwork_rendered(&mut self, ticket: LoadTicket, bitmap: Arc<RgbaImage>) {
        if ticket != self.ticket {
            debug!(?ticket, current = ?self.ticket, "dropping stale artwork");
            return;
        }
        self.emit(SessionEvent::ArtworkChanged(bitmap));
    }

    fn set_state(&mut self, state: PlaybackState) {
        if state != self.state {
            self.state = state;
            self.emit(SessionEvent::StateChanged(state));
        }
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
        self.emit(SessionEvent::StatusChanged(status));
    }

    fn set_elapsed(&mut self, elapsed: ElapsedDisplay) {
        if elapsed != self.elapsed {
            self.elapsed = elapsed;
            self.emit(SessionEvent::ElapsedChanged(elapsed));
        }
    }

    /// Best-effort: a closed presentation channel is not an error here.
    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn elapsed(&self) -> ElapsedDisplay {
        self.elapsed
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Resume stays available once anything has played this session.
    pub fn resume_enabled(&self) -> bool {
        self.has_ever_loaded
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
