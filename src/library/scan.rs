use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::LibraryError;

fn is_playable(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the playable files directly inside `dir`.
///
/// Subdirectories are not entered. Entries are ordered by file name,
/// compared case-insensitively. Unreadable entries are skipped; only a
/// missing or unreadable `dir` is an error.
pub fn scan_folder(dir: &Path, settings: &LibrarySettings) -> Result<Vec<PathBuf>, LibraryError> {
    if !dir.is_dir() {
        return Err(LibraryError::NotADirectory(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter();

    let mut paths: Vec<PathBuf> = Vec::new();
    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(err)) => {
                // Errors at depth 0 mean the folder itself could not be read.
                if err.depth() == 0 {
                    return Err(LibraryError::Walk {
                        path: dir.to_path_buf(),
                        source: err,
                    });
                }
                debug!(%err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_playable(path, settings)
        {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort_by_cached_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });

    info!(dir = %dir.display(), count = paths.len(), "scanned folder");
    Ok(paths)
}
