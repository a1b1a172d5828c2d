use std::{env, path::PathBuf};

use super::schema::Settings;
use crate::artwork::{MAX_ART_SIZE, MAX_HALO_MARGIN};

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `NOCTURNE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("NOCTURNE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.tick_ms == 0 {
            return Err("playback.tick_ms must be >= 1".to_string());
        }
        if self.audio.initial_volume > 100 {
            return Err("audio.initial_volume must be within 0..=100".to_string());
        }
        if self.artwork.size == 0 || self.artwork.size > MAX_ART_SIZE {
            return Err(format!("artwork.size must be within 1..={MAX_ART_SIZE}"));
        }
        if self.artwork.margin > MAX_HALO_MARGIN {
            return Err(format!("artwork.margin must be at most {MAX_HALO_MARGIN}"));
        }
        if !(self.artwork.blur_sigma >= 0.0) {
            return Err("artwork.blur_sigma must be a non-negative number".to_string());
        }
        if self
            .library
            .extensions
            .iter()
            .all(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err("library.extensions must name at least one extension".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `NOCTURNE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("NOCTURNE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/nocturne/config.toml`
/// or `~/.config/nocturne/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("nocturne").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/nocturne/nocturne.log`
/// or `~/.local/state/nocturne/nocturne.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("nocturne").join("nocturne.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
