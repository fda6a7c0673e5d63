//! Transfer options and configuration.
//!
//! This module provides the [`TransferOptions`] struct for configuring the
//! tunable constants of both transfer modes.

use crate::api::TransferError;
use crate::transfer::GridSize;

/// Default side of the square window used for the local-contrast feature.
pub const DEFAULT_NEIGHBORHOOD_WINDOW: usize = 5;

/// Default side of the texture synthesis window.
pub const DEFAULT_SYNTHESIS_WINDOW: usize = 5;

/// Default number of jitter samples drawn in whole-image mode.
pub const WHOLE_IMAGE_SAMPLES: usize = 200;

/// Default number of jitter samples drawn per swatch pair.
pub const SWATCH_SAMPLES: usize = 50;

/// Default cap on swatches per role.
pub const DEFAULT_MAX_SWATCHES: usize = 10;

/// Configuration options for color transfer.
///
/// # Presets
///
/// - [`TransferOptions::whole_image()`]: 15×15 sample grid (≈200 samples),
///   the default
/// - [`TransferOptions::swatch_guided()`]: 8×8 sample grid (≈50 samples per
///   swatch pair)
///
/// # Example
///
/// ```
/// use color_transfer::TransferOptions;
///
/// let options = TransferOptions::swatch_guided()
///     .synthesis_window(7)
///     .seed(42);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOptions {
    /// Side of the square neighborhood for the local standard deviation.
    ///
    /// Must be odd. Default: `5`
    pub neighborhood_window: usize,

    /// Jitter sampling grid (rows × columns of blocks).
    ///
    /// Default: 15×15
    pub grid: GridSize,

    /// Side of the texture synthesis window; tiles are `2 * (w / 2)` wide.
    ///
    /// Must be odd. Default: `5`
    pub synthesis_window: usize,

    /// Seed for the jitter sampler. `None` seeds from entropy.
    ///
    /// Default: `None`
    pub seed: Option<u64>,

    /// Maximum number of swatches per role.
    ///
    /// Default: `10`
    pub max_swatches: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self::whole_image()
    }
}

impl TransferOptions {
    /// Create options with the whole-image defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-image preset: grid derived from 200 samples.
    pub fn whole_image() -> Self {
        Self {
            neighborhood_window: DEFAULT_NEIGHBORHOOD_WINDOW,
            grid: GridSize::from_sample_count(WHOLE_IMAGE_SAMPLES),
            synthesis_window: DEFAULT_SYNTHESIS_WINDOW,
            seed: None,
            max_swatches: DEFAULT_MAX_SWATCHES,
        }
    }

    /// Swatch-guided preset: grid derived from 50 samples per pair.
    pub fn swatch_guided() -> Self {
        Self {
            grid: GridSize::from_sample_count(SWATCH_SAMPLES),
            ..Self::whole_image()
        }
    }

    /// Set the neighborhood window size.
    #[inline]
    pub fn neighborhood_window(mut self, size: usize) -> Self {
        self.neighborhood_window = size;
        self
    }

    /// Set the sampling grid explicitly.
    #[inline]
    pub fn grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = GridSize::new(rows, cols);
        self
    }

    /// Derive a square sampling grid from an approximate sample count.
    #[inline]
    pub fn samples(mut self, count: usize) -> Self {
        self.grid = GridSize::from_sample_count(count);
        self
    }

    /// Set the texture synthesis window size.
    #[inline]
    pub fn synthesis_window(mut self, size: usize) -> Self {
        self.synthesis_window = size;
        self
    }

    /// Fix the random seed for reproducible runs.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the maximum number of swatches per role.
    #[inline]
    pub fn max_swatches(mut self, max: usize) -> Self {
        self.max_swatches = max;
        self
    }

    /// Check every tunable against its allowed range.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), TransferError> {
        check_odd_window("neighborhood window", self.neighborhood_window)?;
        check_odd_window("synthesis window", self.synthesis_window)?;
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(TransferError::InvalidConfig(format!(
                "sample grid must be at least 1x1, got {}x{}",
                self.grid.rows, self.grid.cols
            )));
        }
        self.grid.block_count()?;
        if self.max_swatches == 0 {
            return Err(TransferError::InvalidConfig(
                "maximum swatch count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_odd_window(name: &str, size: usize) -> Result<(), TransferError> {
    if size == 0 || size % 2 == 0 {
        return Err(TransferError::InvalidConfig(format!(
            "{name} must be an odd positive integer, got {size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = TransferOptions::default();
        assert_eq!(opts.neighborhood_window, 5);
        assert_eq!(opts.synthesis_window, 5);
        assert_eq!(opts.grid, GridSize::new(15, 15));
        assert_eq!(opts.seed, None);
        assert_eq!(opts.max_swatches, 10);
    }

    #[test]
    fn test_swatch_preset_grid() {
        assert_eq!(TransferOptions::swatch_guided().grid, GridSize::new(8, 8));
    }

    #[test]
    fn test_builder_chaining() {
        let opts = TransferOptions::new()
            .neighborhood_window(3)
            .grid(4, 6)
            .synthesis_window(7)
            .seed(9)
            .max_swatches(12);
        assert_eq!(opts.neighborhood_window, 3);
        assert_eq!(opts.grid, GridSize::new(4, 6));
        assert_eq!(opts.synthesis_window, 7);
        assert_eq!(opts.seed, Some(9));
        assert_eq!(opts.max_swatches, 12);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_even_and_zero_windows() {
        for opts in [
            TransferOptions::new().neighborhood_window(4),
            TransferOptions::new().neighborhood_window(0),
            TransferOptions::new().synthesis_window(2),
            TransferOptions::new().synthesis_window(0),
        ] {
            assert!(
                matches!(opts.validate(), Err(TransferError::InvalidConfig(_))),
                "{opts:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        assert!(TransferOptions::new().grid(0, 3).validate().is_err());
        assert!(TransferOptions::new().grid(3, 0).validate().is_err());
        assert!(TransferOptions::new().max_swatches(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_grid() {
        let err = TransferOptions::new().grid(usize::MAX, 3).validate().unwrap_err();
        assert!(matches!(err, TransferError::InvalidConfig(ref msg) if msg.contains("too large")));
        assert!(TransferOptions::new().samples(usize::MAX).validate().is_err());
    }

    #[test]
    fn test_window_of_one_is_valid() {
        let opts = TransferOptions::new()
            .neighborhood_window(1)
            .synthesis_window(1);
        assert!(opts.validate().is_ok());
    }
}
