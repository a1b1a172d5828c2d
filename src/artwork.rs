//! Artwork assets and the halo renderer.
//!
//! Rendering is pure: the same asset and settings always give the same
//! pixels, which is what the tests rely on.

mod font;
mod render;

use thiserror::Error;

pub use render::{MAX_ART_SIZE, MAX_HALO_MARGIN, render};

/// Where a track's artwork comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkAsset {
    /// First image embedded in the track's tags.
    Embedded(Vec<u8>),
    /// No metadata, no embedded image, or extraction failed.
    Placeholder,
}

impl ArtworkAsset {
    pub fn from_embedded(bytes: Option<Vec<u8>>) -> Self {
        match bytes {
            Some(b) if !b.is_empty() => Self::Embedded(b),
            _ => Self::Placeholder,
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("could not decode embedded image: {0}")]
    Decode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests;
