use image::{Rgba, RgbaImage};

use super::*;
use crate::config::ArtworkSettings;

fn small() -> ArtworkSettings {
    ArtworkSettings {
        size: 40,
        margin: 6,
        blur_sigma: 2.0,
    }
}

fn png_bytes(color: [u8; 4], side: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(side, side, Rgba(color));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

#[test]
fn from_embedded_treats_missing_or_empty_bytes_as_placeholder() {
    assert_eq!(ArtworkAsset::from_embedded(None), ArtworkAsset::Placeholder);
    assert_eq!(
        ArtworkAsset::from_embedded(Some(Vec::new())),
        ArtworkAsset::Placeholder
    );
    assert_eq!(
        ArtworkAsset::from_embedded(Some(vec![1, 2, 3])),
        ArtworkAsset::Embedded(vec![1, 2, 3])
    );
}

#[test]
fn canvas_is_larger_than_the_art_by_the_halo_margin() {
    let out = render(&ArtworkAsset::Placeholder, &small());
    assert_eq!(out.dimensions(), (52, 52));

    let out = render(&ArtworkAsset::Placeholder, &ArtworkSettings::default());
    assert_eq!(out.dimensions(), (260, 260));
}

#[test]
fn placeholder_is_a_dark_disc_lettered_no_art() {
    let s = small();
    let out = render(&ArtworkAsset::Placeholder, &s);
    let m = s.margin;

    // Near the top of the disc, clear of the lettering.
    assert_eq!(*out.get_pixel(m + 20, m + 2), Rgba([0x23, 0x25, 0x26, 0xff]));
    // Top-left stroke of the `N`.
    assert_eq!(*out.get_pixel(m + 2, m + 16), Rgba([0xbb, 0xbb, 0xbb, 0xff]));
}

#[test]
fn embedded_art_is_resized_into_the_disc() {
    let s = small();
    let bytes = png_bytes([255, 0, 0, 255], 7);
    let out = render(&ArtworkAsset::Embedded(bytes), &s);

    let center = out.get_pixel(s.margin + 20, s.margin + 20);
    assert_eq!(center.0[3], 255);
    assert!(center.0[0] > 240, "{center:?}");
    assert!(center.0[1] < 15 && center.0[2] < 15, "{center:?}");
}

#[test]
fn corners_stay_transparent_and_the_edge_glows() {
    let s = small();
    for asset in [
        ArtworkAsset::Placeholder,
        ArtworkAsset::Embedded(png_bytes([0, 200, 255, 255], 16)),
    ] {
        let out = render(&asset, &s);
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
        assert_eq!(out.get_pixel(51, 51).0[3], 0);

        // Just above the disc: only the blurred halo reaches here.
        let halo = out.get_pixel(s.margin + 20, s.margin - 3).0[3];
        assert!(halo > 0 && halo < 255, "halo alpha {halo}");
    }
}

#[test]
fn undecodable_embedded_bytes_fall_back_to_placeholder() {
    let s = small();
    let broken = render(&ArtworkAsset::Embedded(b"not an image".to_vec()), &s);
    let placeholder = render(&ArtworkAsset::Placeholder, &s);
    assert_eq!(broken, placeholder);
}

#[test]
fn rendering_is_deterministic() {
    let s = small();
    let bytes = png_bytes([10, 120, 30, 255], 9);
    let a = render(&ArtworkAsset::Embedded(bytes.clone()), &s);
    let b = render(&ArtworkAsset::Embedded(bytes), &s);
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn zero_sigma_disables_the_halo() {
    let s = ArtworkSettings {
        blur_sigma: 0.0,
        ..small()
    };
    let out = render(&ArtworkAsset::Placeholder, &s);
    assert_eq!(out.get_pixel(s.margin + 20, s.margin - 3).0[3], 0);
}

#[test]
fn oversized_margin_is_clamped_instead_of_overflowing() {
    let s = ArtworkSettings {
        size: 8,
        margin: u32::MAX,
        blur_sigma: 0.0,
    };
    let out = render(&ArtworkAsset::Placeholder, &s);
    let side = 8 + 2 * MAX_HALO_MARGIN;
    assert_eq!(out.dimensions(), (side, side));
}
