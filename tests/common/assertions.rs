//! Assertion helpers for tests.

use std::path::Path;

use color_transfer::RgbImage;
use pretty_assertions::assert_eq;
use recolor::services::{read_png, DecodedImage};

/// Assert the file is a color PNG of the given size and return its pixels.
pub fn assert_rgb_png(path: &Path, width: usize, height: usize) -> RgbImage {
    let bytes = std::fs::read(path).expect("Output PNG missing");
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG signature, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..bytes.len().min(8)]
    );
    match read_png(path).expect("Output PNG unreadable") {
        DecodedImage::Rgb(image) => {
            assert_eq!((image.width(), image.height()), (width, height));
            image
        }
        DecodedImage::Gray(_) => panic!("Expected an RGB PNG, got grayscale"),
    }
}

/// Assert at least one pixel has distinct channels.
pub fn assert_has_color(image: &RgbImage) {
    let colored = image
        .pixels()
        .iter()
        .filter(|[r, g, b]| r != g || g != b)
        .count();
    assert!(colored > 0, "Expected some colored pixels, image is gray");
}
