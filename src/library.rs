//! Playlist store: folder scanning, the playlist itself and track labels.

mod display;
mod model;
mod scan;

use std::path::PathBuf;

use thiserror::Error;

pub use display::display_name;
pub use model::Playlist;
pub use scan::scan_folder;

/// Why a playlist selection could not be resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("the playlist is empty")]
    Empty,
    #[error("index {index} is outside the playlist ({len} entries)")]
    OutOfRange { index: usize, len: usize },
    #[error("selection was made against playlist {requested}, current is {current}")]
    Stale { requested: u64, current: u64 },
}

/// Why a folder could not be turned into a playlist.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("{0} is not a readable folder")]
    NotADirectory(PathBuf),
    #[error("could not list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
