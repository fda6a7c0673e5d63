//! Boolean coverage masks.

use crate::image::plane::pad_replicate;
use crate::image::Rect;

/// Marks which output pixels already received chrominance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl Mask {
    /// A mask with no pixel set.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![false; width * height],
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
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.data[row * self.width + col] = value;
    }

    /// Mark every pixel of `rect` (clipped to the mask).
    pub fn fill_rect(&mut self, rect: Rect) {
        let rect = rect.clip(self.width, self.height);
        for row in rect.y1..rect.y2 {
            let start = row * self.width;
            self.data[start + rect.x1..start + rect.x2].fill(true);
        }
    }

    /// Number of marked pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Grow the mask by `margin` on every side, replicating edge values.
    pub fn pad_replicate(&self, margin: usize) -> Mask {
        Mask {
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
            data: pad_replicate(&self.data, self.width, self.height, margin),
        }
    }
}
