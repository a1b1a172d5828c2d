use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::config::ArtworkSettings;

use super::font;
use super::{ArtworkAsset, ArtworkError};

const PLACEHOLDER_BG: Rgba<u8> = Rgba([0x23, 0x25, 0x26, 0xff]);
const PLACEHOLDER_FG: Rgba<u8> = Rgba([0xbb, 0xbb, 0xbb, 0xff]);
const PLACEHOLDER_TEXT: &str = "No Art";

/// Largest accepted `artwork.size`.
pub const MAX_ART_SIZE: u32 = 4096;
/// Largest accepted `artwork.margin`.
pub const MAX_HALO_MARGIN: u32 = 1024;

/// Produce the displayable bitmap for `asset`.
///
/// The result is `(size + 2 * margin)` pixels square: the art, masked to a
/// circle, sits at `(margin, margin)` over a blurred copy of itself.
/// Embedded images that cannot be decoded are drawn as the placeholder.
/// Size and margin are clamped to [`MAX_ART_SIZE`] and [`MAX_HALO_MARGIN`].
pub fn render(asset: &ArtworkAsset, settings: &ArtworkSettings) -> RgbaImage {
    let size = settings.size.clamp(1, MAX_ART_SIZE);
    let margin = settings.margin.min(MAX_HALO_MARGIN);
    let art = match asset {
        ArtworkAsset::Embedded(bytes) => decode_square(bytes, size).unwrap_or_else(|err| {
            debug!(%err, "embedded artwork unusable, drawing placeholder");
            placeholder_square(size)
        }),
        ArtworkAsset::Placeholder => placeholder_square(size),
    };
    compose_halo(&mask_circle(art), margin, settings.blur_sigma)
}

fn decode_square(bytes: &[u8], size: u32) -> Result<RgbaImage, ArtworkError> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8())
}

fn placeholder_square(size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, PLACEHOLDER_BG);
    let scale = (size / 110).max(1);
    let (w, h) = font::measure(PLACEHOLDER_TEXT, scale);
    let x = (i64::from(size) - i64::from(w)) / 2;
    let y = (i64::from(size) - i64::from(h)) / 2;
    font::draw_text(&mut img, PLACEHOLDER_TEXT, x, y, scale, PLACEHOLDER_FG);
    img
}

/// Clear every pixel outside the inscribed circle.
fn mask_circle(mut img: RgbaImage) -> RgbaImage {
    let r = img.width().min(img.height()) as f32 / 2.0;
    let (cx, cy) = (img.width() as f32 / 2.0, img.height() as f32 / 2.0);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        if dx * dx + dy * dy > r * r {
            px.0[3] = 0;
        }
    }
    img
}

fn compose_halo(art: &RgbaImage, margin: u32, sigma: f32) -> RgbaImage {
    let side_w = art.width() + 2 * margin;
    let side_h = art.height() + 2 * margin;
    let offset = i64::from(margin);

    let mut layer = RgbaImage::new(side_w, side_h);
    imageops::overlay(&mut layer, art, offset, offset);

    let mut canvas = if sigma > 0.0 {
        imageops::blur(&layer, sigma)
    } else {
        layer
    };
    imageops::overlay(&mut canvas, art, offset, offset);
    canvas
}
