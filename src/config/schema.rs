use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/nocturne/config.toml` or `~/.config/nocturne/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `NOCTURNE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub artwork: ArtworkSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume (0..=100) applied to the engine at startup.
    pub initial_volume: u8,
    /// Step used by the `+` / `-` keys.
    pub volume_step: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 30,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Period of the elapsed-time polling loop (milliseconds).
    pub tick_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as playable (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
    /// Folder loaded at startup when none is given on the command line.
    pub start_dir: Option<PathBuf>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into()],
            include_hidden: true,
            start_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// Edge length of the square artwork, in pixels.
    pub size: u32,
    /// Transparent border around the artwork that holds the halo.
    pub margin: u32,
    /// Gaussian sigma of the halo.
    pub blur_sigma: f32,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            size: 220,
            margin: 20,
            blur_sigma: 12.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether to draw the artwork panel at all.
    pub show_artwork: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ nocturne ~ ".to_string(),
            show_artwork: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file. Falls back to the XDG state directory when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
