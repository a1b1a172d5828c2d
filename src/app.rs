//! Application module: the view model the TUI draws from.
//!
//! `App` lives in `app::model` and is fed exclusively by `SessionEvent`s,
//! plus the cursor and prompt state only the terminal cares about.

mod model;

pub use model::*;
