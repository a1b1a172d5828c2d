//! Track metadata: duration and embedded artwork.

use std::path::{Path, PathBuf};

use lofty::file::TaggedFile;
use lofty::prelude::{AudioFile, TaggedFileExt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("could not read metadata from {path}: {reason}")]
    Read { path: PathBuf, reason: String },
}

/// What the load pipeline needs to know about a file besides its audio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Whole seconds; fractional seconds are dropped.
    pub duration_secs: u64,
    /// Raw bytes of the first embedded picture, if any.
    pub artwork: Option<Vec<u8>>,
}

pub trait MetadataExtractor {
    fn extract(&self, path: &Path) -> Result<TrackMetadata, MetadataError>;
}

/// Reads tags and stream properties with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyExtractor;

impl MetadataExtractor for LoftyExtractor {
    fn extract(&self, path: &Path) -> Result<TrackMetadata, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(TrackMetadata {
            duration_secs: tagged.properties().duration().as_secs(),
            artwork: first_picture(&tagged),
        })
    }
}

/// First picture of the primary tag, then of any other tag.
fn first_picture(tagged: &TaggedFile) -> Option<Vec<u8>> {
    let primary = tagged.primary_tag();
    primary
        .into_iter()
        .chain(tagged.tags().iter())
        .find_map(|tag| tag.pictures().first())
        .map(|picture| picture.data().to_vec())
}
