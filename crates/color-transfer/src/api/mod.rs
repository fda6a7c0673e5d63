//! Public API for the color-transfer crate.
//!
//! - [`ColorTransfer`]: fluent builder running either mode
//! - [`Session`]: caller-owned images, swatches and options
//! - [`run_whole_image_transfer`] / [`run_swatch_guided_transfer`]: one-shot
//!   entry points that accept possibly missing inputs
//! - [`TransferError`]: the unified error type

mod builder;
mod error;
mod session;

pub use builder::ColorTransfer;
pub use error::TransferError;
pub use session::Session;

use crate::image::{GrayImage, RgbImage};
use crate::output::ColorTransferResult;
use crate::swatch::SwatchSet;
use crate::transfer::TransferOptions;

fn require<'a>(
    source: Option<&'a RgbImage>,
    target: Option<&'a GrayImage>,
) -> Result<(&'a RgbImage, &'a GrayImage), TransferError> {
    match (source, target) {
        (Some(source), Some(target)) => Ok((source, target)),
        (None, None) => Err(TransferError::MissingInput("source and target")),
        (None, Some(_)) => Err(TransferError::MissingInput("source")),
        (Some(_), None) => Err(TransferError::MissingInput("target")),
    }
}

/// Colorize `target` from the whole of `source`.
///
/// # Errors
///
/// - [`TransferError::MissingInput`] if either image is `None`
/// - [`TransferError::InvalidConfig`] for invalid options or empty images
///
/// # Example
///
/// ```
/// use color_transfer::{run_whole_image_transfer, TransferError, TransferOptions};
///
/// let err = run_whole_image_transfer(None, None, &TransferOptions::new()).unwrap_err();
/// assert_eq!(err, TransferError::MissingInput("source and target"));
/// ```
pub fn run_whole_image_transfer(
    source: Option<&RgbImage>,
    target: Option<&GrayImage>,
    options: &TransferOptions,
) -> Result<ColorTransferResult, TransferError> {
    let (source, target) = require(source, target)?;
    ColorTransfer::with_options(options.clone()).colorize(source, target)
}

/// Colorize `target` from paired swatches, then propagate by synthesis.
///
/// # Errors
///
/// - [`TransferError::MissingInput`] if either image is `None`
/// - [`TransferError::SwatchCountMismatch`] if the roles hold different
///   numbers of swatches
/// - [`TransferError::NoSwatches`] if no pair exists
/// - [`TransferError::InvalidConfig`] for invalid options or empty images
pub fn run_swatch_guided_transfer(
    source: Option<&RgbImage>,
    target: Option<&GrayImage>,
    swatches: &SwatchSet,
    options: &TransferOptions,
) -> Result<ColorTransferResult, TransferError> {
    let (source, target) = require(source, target)?;
    ColorTransfer::with_options(options.clone()).colorize_swatches(source, target, swatches)
}
