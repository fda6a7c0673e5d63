//! The colorized image produced by either transfer mode.

use crate::image::{LabImage, Mask, RgbImage};

/// A colorized target.
///
/// The luminance plane is always the target's luminance, unchanged. For
/// swatch-guided results the mask of pixels colorized directly by a region
/// transfer (before synthesis) is kept alongside.
///
/// # Example
///
/// ```
/// use color_transfer::{ColorTransferResult, LabImage};
///
/// let result = ColorTransferResult::new(LabImage::filled(2, 2, [128.0, 128.0, 128.0]));
/// let rgb = result.to_rgb();
/// assert_eq!(rgb.width(), 2);
/// // neutral chroma decodes to (near) gray
/// assert!(rgb.pixels().iter().all(|px| px[0].abs_diff(px[2]) <= 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTransferResult {
    lab: LabImage,
    colorized: Option<Mask>,
}

impl ColorTransferResult {
    /// Wrap a whole-image result.
    pub fn new(lab: LabImage) -> Self {
        Self {
            lab,
            colorized: None,
        }
    }

    /// Wrap a swatch-guided result with its region mask.
    pub fn with_mask(lab: LabImage, colorized: Mask) -> Self {
        Self {
            lab,
            colorized: Some(colorized),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.lab.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.lab.height()
    }

    /// The result in the 8-bit Lab working encoding, before quantization.
    #[inline]
    pub fn lab(&self) -> &LabImage {
        &self.lab
    }

    /// Pixels colorized by a swatch region transfer, if any.
    #[inline]
    pub fn colorized(&self) -> Option<&Mask> {
        self.colorized.as_ref()
    }

    /// Quantize to 8 bits and convert to display sRGB.
    pub fn to_rgb(&self) -> RgbImage {
        self.lab.to_rgb()
    }

    /// Take the Lab image out of the result.
    pub fn into_lab(self) -> LabImage {
        self.lab
    }
}
