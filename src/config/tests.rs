use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_nocturne_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("NOCTURNE_CONFIG_PATH", "/tmp/nocturne-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/nocturne-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("nocturne")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_home_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".local/state")
            .join("nocturne")
            .join("nocturne.log")
    );
}

#[test]
fn defaults_match_the_classic_player() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 30);
    assert_eq!(s.playback.tick_ms, 1000);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert_eq!(s.artwork.size, 220);
    assert_eq!(s.artwork.margin, 20);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_nonsense() {
    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.artwork.blur_sigma = f32::NAN;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.extensions = vec![" . ".into()];
    assert!(s.validate().is_err());
}

#[test]
fn validate_bounds_the_artwork_canvas() {
    let mut s = Settings::default();
    s.artwork.margin = u32::MAX;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.artwork.size = u32::MAX;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.artwork.size = crate::artwork::MAX_ART_SIZE;
    s.artwork.margin = crate::artwork::MAX_HALO_MARGIN;
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 55
volume_step = 10

[playback]
tick_ms = 250

[library]
extensions = ["mp3", "ogg"]
include_hidden = false
start_dir = "/srv/music"

[artwork]
size = 64
margin = 8
blur_sigma = 3.5

[ui]
header_text = "hello"
show_artwork = false

[logging]
level = "debug"
file = "/tmp/nocturne.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NOCTURNE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("NOCTURNE__PLAYBACK__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 55);
    assert_eq!(s.audio.volume_step, 10);
    assert_eq!(s.playback.tick_ms, 250);
    assert_eq!(s.library.extensions, vec!["mp3".to_string(), "ogg".to_string()]);
    assert!(!s.library.include_hidden);
    assert_eq!(
        s.library.start_dir,
        Some(std::path::PathBuf::from("/srv/music"))
    );
    assert_eq!(s.artwork.size, 64);
    assert_eq!(s.artwork.margin, 8);
    assert_eq!(s.artwork.blur_sigma, 3.5);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_artwork);
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.file,
        Some(std::path::PathBuf::from("/tmp/nocturne.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
tick_ms = 1000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("NOCTURNE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("NOCTURNE__PLAYBACK__TICK_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.tick_ms, 500);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let _g1 = EnvGuard::set("NOCTURNE_CONFIG_PATH", missing.to_str().unwrap());
    let _g2 = EnvGuard::remove("NOCTURNE__PLAYBACK__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.tick_ms, 1000);
    assert_eq!(s.audio.initial_volume, 30);
}
