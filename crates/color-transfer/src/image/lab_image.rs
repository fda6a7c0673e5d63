//! Three-plane images in the 8-bit Lab working encoding.

use rayon::prelude::*;

use crate::api::TransferError;
use crate::color::{Lab, LinearRgb, Srgb};
use crate::image::{Plane, Rect, RgbImage};

/// A luminance plane plus two chrominance planes, all in 0..=255 scale.
///
/// See [`Lab::encode8`] for the scaling. Values stay floating point while
/// the pipeline runs and are only quantized by [`LabImage::to_rgb`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabImage {
    l: Plane,
    a: Plane,
    b: Plane,
}

impl LabImage {
    /// Assemble an image from three congruent planes.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] if the planes differ in size.
    pub fn new(l: Plane, a: Plane, b: Plane) -> Result<Self, TransferError> {
        let dims = (l.width(), l.height());
        if (a.width(), a.height()) != dims || (b.width(), b.height()) != dims {
            return Err(TransferError::InvalidConfig(format!(
                "Lab planes differ in size: L {}x{}, a {}x{}, b {}x{}",
                l.width(),
                l.height(),
                a.width(),
                a.height(),
                b.width(),
                b.height()
            )));
        }
        Ok(Self { l, a, b })
    }

    /// An image with constant 8-bit Lab values.
    pub fn filled(width: usize, height: usize, lab8: [f64; 3]) -> Self {
        Self {
            l: Plane::filled(width, height, lab8[0]),
            a: Plane::filled(width, height, lab8[1]),
            b: Plane::filled(width, height, lab8[2]),
        }
    }

    /// Convert a display image into the working encoding.
    ///
    /// Each pixel is encoded to 8-bit Lab (rounded), matching the precision
    /// of the stored representation.
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let encoded: Vec<[u8; 3]> = rgb
            .pixels()
            .par_iter()
            .map(|&px| Lab::from(LinearRgb::from(Srgb::from_bytes(px))).encode8())
            .collect();

        let (width, height) = (rgb.width(), rgb.height());
        let channel = |c: usize| {
            Plane::from_fn(width, height, |row, col| encoded[row * width + col][c] as f64)
        };
        Self {
            l: channel(0),
            a: channel(1),
            b: channel(2),
        }
    }

    /// Decode to 8-bit sRGB.
    ///
    /// Every channel is first cast to 8 bits (truncated toward zero and
    /// clamped to 0..=255), then decoded through Lab and linear RGB.
    pub fn to_rgb(&self) -> RgbImage {
        let cast = |v: f64| v.trunc().clamp(0.0, 255.0) as u8;
        let pixels: Vec<[u8; 3]> = (0..self.width() * self.height())
            .into_par_iter()
            .map(|i| {
                let lab = Lab::decode8([
                    cast(self.l.data()[i]),
                    cast(self.a.data()[i]),
                    cast(self.b.data()[i]),
                ]);
                Srgb::from(LinearRgb::from(lab)).to_bytes()
            })
            .collect();
        RgbImage::from_fn(self.width(), self.height(), |row, col| {
            pixels[row * self.width() + col]
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.l.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.l.height()
    }

    /// Luminance plane.
    #[inline]
    pub fn l(&self) -> &Plane {
        &self.l
    }

    /// First chrominance plane.
    #[inline]
    pub fn a(&self) -> &Plane {
        &self.a
    }

    /// Second chrominance plane.
    #[inline]
    pub fn b(&self) -> &Plane {
        &self.b
    }

    /// Chrominance `(a, b)` at a pixel.
    #[inline]
    pub fn chroma(&self, row: usize, col: usize) -> (f64, f64) {
        (self.a.get(row, col), self.b.get(row, col))
    }

    /// Mutable access to both chrominance planes.
    #[inline]
    pub(crate) fn chroma_planes_mut(&mut self) -> (&mut Plane, &mut Plane) {
        (&mut self.a, &mut self.b)
    }

    /// Split into `(l, a, b)` planes.
    pub fn into_planes(self) -> (Plane, Plane, Plane) {
        (self.l, self.a, self.b)
    }

    /// Copy out the pixels covered by `rect`, which must lie inside the image.
    pub fn crop(&self, rect: Rect) -> LabImage {
        LabImage {
            l: self.l.crop(rect),
            a: self.a.crop(rect),
            b: self.b.crop(rect),
        }
    }

    /// Overwrite all three channels starting at `(row, col)` with `other`.
    pub fn paste(&mut self, row: usize, col: usize, other: &LabImage) {
        self.l.paste(row, col, &other.l);
        self.a.paste(row, col, &other.a);
        self.b.paste(row, col, &other.b);
    }

    /// Grow the image by `margin` pixels on every side, replicating edges.
    pub fn pad_replicate(&self, margin: usize) -> LabImage {
        LabImage {
            l: self.l.pad_replicate(margin),
            a: self.a.pad_replicate(margin),
            b: self.b.pad_replicate(margin),
        }
    }
}
