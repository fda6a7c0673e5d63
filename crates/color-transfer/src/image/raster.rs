//! 8-bit display rasters exchanged with the caller.

use crate::api::TransferError;
use crate::image::Plane;

fn check_len(len: usize, width: usize, height: usize) -> Result<(), TransferError> {
    if len != width * height {
        return Err(TransferError::InvalidConfig(format!(
            "image has {len} pixels, expected {width}x{height}"
        )));
    }
    Ok(())
}

/// An 8-bit sRGB image, one `[R, G, B]` triple per pixel in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl RgbImage {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self, TransferError> {
        check_len(pixels.len(), width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from packed `RGBRGB...` bytes.
    pub fn from_raw(width: usize, height: usize, bytes: &[u8]) -> Result<Self, TransferError> {
        if bytes.len() != width * height * 3 {
            return Err(TransferError::InvalidConfig(format!(
                "RGB buffer has {} bytes, expected {}",
                bytes.len(),
                width * height * 3
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> [u8; 3] {
        self.pixels[row * self.width + col]
    }

    /// Packed `RGBRGB...` bytes, e.g. for PNG encoding.
    pub fn to_raw(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

/// An 8-bit single-channel luminance image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Wrap row-major pixels.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] if `pixels.len() != width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, TransferError> {
        check_len(pixels.len(), width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Collapse a color image to luminance with the ITU-R BT.601 weights.
    ///
    /// # Example
    ///
    /// ```
    /// use color_transfer::{GrayImage, RgbImage};
    ///
    /// let rgb = RgbImage::new(1, 1, vec![[255, 0, 0]]).unwrap();
    /// assert_eq!(GrayImage::from_rgb(&rgb).get(0, 0), 76);
    /// ```
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let pixels = rgb
            .pixels
            .iter()
            .map(|&[r, g, b]| {
                let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect();
        Self {
            width: rgb.width,
            height: rgb.height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.pixels[row * self.width + col]
    }

    /// The luminance values as a floating point plane.
    pub fn to_plane(&self) -> Plane {
        Plane::from_fn(self.width, self.height, |row, col| self.get(row, col) as f64)
    }
}
