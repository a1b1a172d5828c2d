use std::path::Path;

use super::sink::open_source;
use super::{AudioEngine, EngineError, SilentEngine};

#[test]
fn open_source_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone.mp3");
    let err = open_source(&missing).err().unwrap();
    assert!(matches!(err, EngineError::Open { ref path, .. } if path == &missing));
}

#[test]
fn open_source_reports_undecodable_files() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.mp3");
    std::fs::write(&junk, b"definitely not audio").unwrap();

    let err = open_source(&junk).err().unwrap();
    assert!(matches!(err, EngineError::Decode { ref path, .. } if path == &junk));
}

#[test]
fn silent_engine_refuses_to_load_and_is_never_busy() {
    let mut engine = SilentEngine::new("no device");
    let err = engine.load(Path::new("/music/a.mp3")).unwrap_err();
    assert!(matches!(err, EngineError::NoOutput(ref r) if r == "no device"));

    engine.play();
    assert!(!engine.is_busy());
    assert_eq!(engine.position_millis(), 0);
}
