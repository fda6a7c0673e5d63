//! ColorTransfer builder, the main entry point for the crate.
//!
//! [`ColorTransfer`] wraps both transfer modes behind a fluent builder with
//! the defaults of [`TransferOptions`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::TransferError;
use crate::image::{GrayImage, LabImage, RgbImage};
use crate::output::ColorTransferResult;
use crate::swatch::{pair_swatches, synthesize, transfer_regions, SwatchSet};
use crate::transfer::{transfer_lab, TransferOptions};

/// Colorizes grayscale images from a color source.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`colorize()`](Self::colorize) and
///   [`colorize_swatches()`](Self::colorize_swatches) take `&self`, so one
///   builder can process many images
/// - With a fixed [`seed`](Self::seed) every run gives the same result;
///   without one, each run seeds from entropy
///
/// # Example
///
/// ```
/// use color_transfer::{ColorTransfer, GrayImage, RgbImage};
///
/// let source = RgbImage::new(2, 2, vec![[200, 40, 40]; 4]).unwrap();
/// let target = GrayImage::new(3, 3, vec![90; 9]).unwrap();
///
/// let result = ColorTransfer::new().grid(1, 1).seed(7).colorize(&source, &target).unwrap();
/// assert_eq!((result.width(), result.height()), (3, 3));
///
/// let rgb = result.to_rgb();
/// assert!(rgb.get(1, 1)[0] > rgb.get(1, 1)[1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTransfer {
    options: TransferOptions,
}

impl ColorTransfer {
    /// Create a builder with the whole-image defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the swatch-guided defaults (8×8 grid per pair).
    pub fn swatch_guided() -> Self {
        Self::with_options(TransferOptions::swatch_guided())
    }

    /// Create a builder from explicit options.
    pub fn with_options(options: TransferOptions) -> Self {
        Self { options }
    }

    /// Set the local-contrast window size.
    #[inline]
    pub fn neighborhood_window(mut self, size: usize) -> Self {
        self.options = self.options.neighborhood_window(size);
        self
    }

    /// Set the sampling grid.
    #[inline]
    pub fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.options = self.options.grid(rows, cols);
        self
    }

    /// Derive a square sampling grid from an approximate sample count.
    #[inline]
    pub fn samples(mut self, count: usize) -> Self {
        self.options = self.options.samples(count);
        self
    }

    /// Set the texture synthesis window size.
    #[inline]
    pub fn synthesis_window(mut self, size: usize) -> Self {
        self.options = self.options.synthesis_window(size);
        self
    }

    /// Fix the random seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.options = self.options.seed(seed);
        self
    }

    /// The configured options.
    #[inline]
    pub fn options(&self) -> &TransferOptions {
        &self.options
    }

    fn rng(&self) -> StdRng {
        match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Colorize `target` from the whole of `source`.
    ///
    /// Steps:
    /// 1. Convert `source` to Lab; use `target` as the luminance plane
    /// 2. Remap, extract features, sample and match (see [`transfer_lab`])
    /// 3. Wrap the Lab image in a [`ColorTransferResult`]
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] for invalid options or empty images.
    pub fn colorize(
        &self,
        source: &RgbImage,
        target: &GrayImage,
    ) -> Result<ColorTransferResult, TransferError> {
        self.colorize_with_rng(source, target, &mut self.rng())
    }

    /// [`colorize`](Self::colorize) with a caller-supplied generator.
    pub fn colorize_with_rng<R: Rng + ?Sized>(
        &self,
        source: &RgbImage,
        target: &GrayImage,
        rng: &mut R,
    ) -> Result<ColorTransferResult, TransferError> {
        self.options.validate()?;
        let samples = self.options.grid.block_count()?;
        let source_lab = LabImage::from_rgb(source);
        let lab = transfer_lab(&source_lab, &target.to_plane(), &self.options, rng)?;

        tracing::info!(
            width = lab.width(),
            height = lab.height(),
            samples,
            "whole-image transfer complete"
        );
        Ok(ColorTransferResult::new(lab))
    }

    /// Colorize `target` from paired swatches, then propagate by synthesis.
    ///
    /// # Errors
    ///
    /// - [`TransferError::SwatchCountMismatch`] if the roles hold different
    ///   numbers of swatches
    /// - [`TransferError::NoSwatches`] if there is no pair
    /// - [`TransferError::InvalidSwatch`] if a rectangle lies outside its image
    /// - [`TransferError::InvalidConfig`] for invalid options or empty images
    pub fn colorize_swatches(
        &self,
        source: &RgbImage,
        target: &GrayImage,
        swatches: &SwatchSet,
    ) -> Result<ColorTransferResult, TransferError> {
        self.colorize_swatches_with_rng(source, target, swatches, &mut self.rng())
    }

    /// [`colorize_swatches`](Self::colorize_swatches) with a caller-supplied
    /// generator.
    pub fn colorize_swatches_with_rng<R: Rng + ?Sized>(
        &self,
        source: &RgbImage,
        target: &GrayImage,
        swatches: &SwatchSet,
        rng: &mut R,
    ) -> Result<ColorTransferResult, TransferError> {
        self.options.validate()?;
        let pairs = pair_swatches(swatches)?;
        let source_lab = LabImage::from_rgb(source);
        let regions = transfer_regions(&source_lab, &target.to_plane(), &pairs, &self.options, rng)?;
        let lab = synthesize(
            &regions.image,
            &regions.colorized,
            &regions.patches,
            self.options.synthesis_window,
        )?;

        tracing::info!(
            width = lab.width(),
            height = lab.height(),
            pairs = pairs.len(),
            "swatch-guided transfer complete"
        );
        Ok(ColorTransferResult::with_mask(lab, regions.colorized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rect;
    use crate::swatch::SwatchRole;

    #[test]
    fn test_builder_forwards_options() {
        let builder = ColorTransfer::new()
            .neighborhood_window(3)
            .grid(2, 3)
            .synthesis_window(7)
            .seed(11);
        let opts = builder.options();
        assert_eq!(opts.neighborhood_window, 3);
        assert_eq!((opts.grid.rows, opts.grid.cols), (2, 3));
        assert_eq!(opts.synthesis_window, 7);
        assert_eq!(opts.seed, Some(11));
    }

    #[test]
    fn test_invalid_options_are_reported() {
        let source = RgbImage::new(1, 1, vec![[0, 0, 0]]).unwrap();
        let target = GrayImage::new(1, 1, vec![0]).unwrap();
        let err = ColorTransfer::new()
            .neighborhood_window(2)
            .colorize(&source, &target)
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidConfig(_)));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let source = RgbImage::from_fn(12, 12, |r, c| [(r * 20) as u8, (c * 20) as u8, 90]);
        let target = GrayImage::from_fn(10, 8, |r, c| ((r * 13 + c * 29) % 256) as u8);
        let builder = ColorTransfer::new().grid(3, 3).seed(42);
        assert_eq!(
            builder.colorize(&source, &target).unwrap(),
            builder.colorize(&source, &target).unwrap()
        );
    }

    #[test]
    fn test_swatch_result_carries_mask() {
        let source = RgbImage::new(4, 4, vec![[30, 160, 60]; 16]).unwrap();
        let target = GrayImage::new(6, 6, vec![100; 36]).unwrap();
        let mut swatches = SwatchSet::default();
        swatches
            .add(SwatchRole::Source, Rect::new(0, 0, 2, 2), 4, 4)
            .unwrap();
        swatches
            .add(SwatchRole::Target, Rect::new(0, 0, 3, 3), 6, 6)
            .unwrap();

        let result = ColorTransfer::swatch_guided()
            .seed(1)
            .colorize_swatches(&source, &target, &swatches)
            .unwrap();
        assert_eq!(result.colorized().map(|m| m.count()), Some(9));
        assert!(result.lab().l().data().iter().all(|&l| l == 100.0));
    }
}
