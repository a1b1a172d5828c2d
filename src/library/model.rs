use std::path::{Path, PathBuf};

use super::SelectionError;

/// Ordered list of playable files from one folder.
///
/// `generation` increases every time the list is rebuilt; selections made
/// against an older generation are rejected.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    entries: Vec<PathBuf>,
    generation: u64,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents wholesale and bump the generation.
    pub fn rebuild(&mut self, entries: Vec<PathBuf>) {
        self.entries = entries;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve `index` as seen by a caller holding `generation`.
    pub fn resolve(&self, index: usize, generation: u64) -> Result<&Path, SelectionError> {
        if generation != self.generation {
            return Err(SelectionError::Stale {
                requested: generation,
                current: self.generation,
            });
        }
        if self.entries.is_empty() {
            return Err(SelectionError::Empty);
        }
        self.entries
            .get(index)
            .map(PathBuf::as_path)
            .ok_or(SelectionError::OutOfRange {
                index,
                len: self.entries.len(),
            })
    }
}
