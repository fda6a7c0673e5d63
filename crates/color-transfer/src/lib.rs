#![allow(clippy::excessive_precision, clippy::needless_range_loop)]

//! color-transfer: colorize grayscale images from a color source
//!
//! Transfers chrominance from a colorful source image to a grayscale
//! target by matching pixels on luminance and local contrast. No pixel
//! correspondence between the two images is needed.
//!
//! # Quick Start
//!
//! The [`ColorTransfer`] builder is the primary entry point:
//!
//! ```
//! use color_transfer::{ColorTransfer, GrayImage, RgbImage};
//!
//! let source = RgbImage::from_fn(16, 16, |r, c| [(r * 15) as u8, 90, (c * 15) as u8]);
//! let target = GrayImage::from_fn(8, 8, |r, c| (r * 30 + c) as u8);
//!
//! let result = ColorTransfer::new().seed(1).colorize(&source, &target).unwrap();
//! let rgb = result.to_rgb();
//! assert_eq!((rgb.width(), rgb.height()), (8, 8));
//! ```
//!
//! # Modes
//!
//! - **Whole image** ([`ColorTransfer::colorize`]): every target pixel is
//!   matched against candidates sampled from the whole source.
//! - **Swatch guided** ([`ColorTransfer::colorize_swatches`]): the caller
//!   pairs source and target rectangles ([`SwatchSet`]). Each pair is
//!   transferred on its own, then texture synthesis spreads the colorized
//!   patches over the rest of the target.
//!
//! A [`Session`] keeps the two images, the swatches and the options between
//! runs for interactive front ends.
//!
//! # Pipeline
//!
//! ```text
//! source sRGB -> Lab (8-bit scale)
//!     |
//!     +-- L --> remap onto target mean/std --> local std-dev
//!     |                    |                        |
//!     |                    +--> jitter sample <-----+
//!     |                              |
//!     |   target L --> local std-dev |
//!     |       |             |        v
//!     |       +-------------+--> best match (per target pixel)
//!     |                              |
//!     +-- a, b at matched sample <---+
//!                 |
//!                 v
//!        target L + a, b --> sRGB
//! ```
//!
//! # Working Encoding
//!
//! All planes use the 8-bit Lab scaling (`L* · 255/100`, `a* + 128`,
//! `b* + 128`), so 8-bit gray target values compare directly with source
//! luminance. See [`Lab`].
//!
//! # Reproducibility
//!
//! Sampling is the only random step. With [`TransferOptions::seed`] set,
//! results are identical across runs and thread counts: every parallel
//! stage either writes disjoint pixels or uses its own pre-drawn seed.

pub mod api;
pub mod color;
pub mod image;
pub mod output;
pub mod swatch;
pub mod transfer;


pub use api::{
    run_swatch_guided_transfer, run_whole_image_transfer, ColorTransfer, Session, TransferError,
};
pub use color::{Lab, LinearRgb, Srgb};
pub use image::{FeatureMap, GrayImage, LabImage, Mask, Plane, Rect, RgbImage};
pub use output::ColorTransferResult;
pub use swatch::{
    pair_swatches, synthesize, transfer_regions, RegionTransfer, Swatch, SwatchPair, SwatchRole,
    SwatchSet, SwatchTag,
};
pub use transfer::{
    best_match, jitter_sample, local_std_dev, match_chrominance, moments, remap, transfer_lab,
    GridSize, Moments, Sample, SampleSet, TransferOptions,
};
