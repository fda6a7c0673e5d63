//! Test fixtures: synthetic images written as PNG files into a temp dir.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use color_transfer::{GrayImage, RgbImage};
use tempfile::TempDir;

/// Image side used by most fixtures
pub const SIZE: usize = 24;

/// Left half red-ish, right half blue-ish, with a luminance ramp down the rows.
pub fn two_tone_source() -> RgbImage {
    RgbImage::from_fn(SIZE, SIZE, |row, col| {
        let shade = (row * 4) as u8;
        if col < SIZE / 2 {
            [180u8.saturating_add(shade / 2), 40 + shade / 4, 40]
        } else {
            [30, 60 + shade / 4, 160u8.saturating_add(shade / 2)]
        }
    })
}

/// Horizontal gray gradient
pub fn gradient_target() -> GrayImage {
    GrayImage::from_fn(SIZE, SIZE, |_, col| (40 + col * 7) as u8)
}

/// Temporary working directory that removes itself on drop
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a color PNG and return its path.
    pub fn write_rgb(&self, name: &str, image: &RgbImage) -> PathBuf {
        let path = self.path(name);
        let bytes = recolor::services::encode_png(image).expect("Failed to encode PNG");
        std::fs::write(&path, bytes).expect("Failed to write PNG");
        path
    }

    /// Write an 8-bit grayscale PNG and return its path.
    pub fn write_gray(&self, name: &str, image: &GrayImage) -> PathBuf {
        let path = self.path(name);
        write_png(
            &path,
            image.width(),
            image.height(),
            png::ColorType::Grayscale,
            image.pixels(),
        );
        path
    }

    /// Write a text file (config) and return its path.
    pub fn write_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write the standard source/target pair.
    pub fn standard_inputs(&self) -> (PathBuf, PathBuf) {
        (
            self.write_rgb("source.png", &two_tone_source()),
            self.write_gray("target.png", &gradient_target()),
        )
    }
}

/// Write raw 8-bit samples with the given color type.
pub fn write_png(path: &Path, width: usize, height: usize, color: png::ColorType, data: &[u8]) {
    let file = File::create(path).expect("Failed to create PNG file");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("Failed to write PNG header");
    writer
        .write_image_data(data)
        .expect("Failed to write PNG data");
}
