//! Single-channel floating point image planes.

use crate::api::TransferError;
use crate::image::Rect;

/// A dense, row-major grid of `f64` samples.
///
/// Planes carry luminance, chrominance and feature values through the
/// pipeline. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

/// Per-pixel local standard deviation, congruent with its source plane.
pub type FeatureMap = Plane;

impl Plane {
    /// Wrap row-major samples.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self, TransferError> {
        if data.len() != width * height {
            return Err(TransferError::InvalidConfig(format!(
                "plane data has {} samples, expected {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A plane with every sample set to `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a plane by evaluating `f(row, col)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            data,
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

    /// True when the plane has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major samples.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.width + col] = value;
    }

    /// One row of samples.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    /// Copy out the pixels covered by `rect`, which must lie inside the plane.
    pub fn crop(&self, rect: Rect) -> Plane {
        let mut data = Vec::with_capacity(rect.width() * rect.height());
        for row in rect.y1..rect.y2 {
            data.extend_from_slice(&self.row(row)[rect.x1..rect.x2]);
        }
        Plane {
            width: rect.width(),
            height: rect.height(),
            data,
        }
    }

    /// Overwrite the pixels starting at `(row, col)` with `other`.
    ///
    /// `other` must fit inside the plane at that offset.
    pub fn paste(&mut self, row: usize, col: usize, other: &Plane) {
        for r in 0..other.height {
            let start = (row + r) * self.width + col;
            self.data[start..start + other.width].copy_from_slice(other.row(r));
        }
    }

    /// Grow the plane by `margin` pixels on every side, replicating edge pixels.
    pub fn pad_replicate(&self, margin: usize) -> Plane {
        Plane {
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
            data: pad_replicate(&self.data, self.width, self.height, margin),
        }
    }
}

/// Replicate-pad a row-major buffer by `margin` on every side.
///
/// The buffer must be non-empty.
pub(crate) fn pad_replicate<T: Copy>(data: &[T], width: usize, height: usize, margin: usize) -> Vec<T> {
    let padded_width = width + 2 * margin;
    let padded_height = height + 2 * margin;
    let mut out = Vec::with_capacity(padded_width * padded_height);
    for row in 0..padded_height {
        let src_row = row.saturating_sub(margin).min(height - 1);
        let line = &data[src_row * width..(src_row + 1) * width];
        for col in 0..padded_width {
            let src_col = col.saturating_sub(margin).min(width - 1);
            out.push(line[src_col]);
        }
    }
    out
}

/// Map a possibly out-of-range index onto `0..len` by symmetric reflection.
///
/// Follows the `d c b a | a b c d | d c b a` convention, repeating as often
/// as needed when the offset exceeds the length.
#[inline]
pub(crate) fn reflect_index(index: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let m = index.rem_euclid(period);
    if m < len {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}
