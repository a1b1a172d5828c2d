//! Elapsed-time reconciliation for the polling loop.
//!
//! The engine never pushes progress, so every tick compares what it
//! reports against what is on screen. Nothing here touches the engine.

use super::model::{ElapsedDisplay, PlaybackState};

/// What the engine reported on one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineProbe {
    pub busy: bool,
    pub position_ms: u64,
}

/// Format whole seconds as `MM:SS`. Minutes are not wrapped at the hour.
pub fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Decide what the elapsed display should show after a tick.
///
/// - engine busy: position (truncated to seconds) over `total_secs`
/// - stopped: `00:00` over the last published total
/// - otherwise the display is frozen
///
/// Returns `None` when nothing needs to be published.
pub fn reconcile(
    probe: EngineProbe,
    state: PlaybackState,
    total_secs: u64,
    last: ElapsedDisplay,
) -> Option<ElapsedDisplay> {
    let next = if probe.busy {
        ElapsedDisplay::new(probe.position_ms / 1000, total_secs)
    } else if state == PlaybackState::Stopped {
        ElapsedDisplay::new(0, last.total_secs)
    } else {
        return None;
    };

    (next != last).then_some(next)
}
