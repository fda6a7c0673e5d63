//! Whole-image color transfer.
//!
//! The pipeline runs in four stages, each in its own module:
//!
//! 1. [`remap`]: shift source luminance onto the target's mean and spread
//! 2. [`local_std_dev`]: local contrast of both images
//! 3. [`jitter_sample`]: one random candidate per source grid block
//! 4. [`match_chrominance`]: copy the chrominance of the closest candidate
//!    to every target pixel
//!
//! [`transfer_lab`] chains them and returns the colorized target in the
//! working Lab encoding. Swatch-guided transfer runs the same chain once per
//! region pair.
//!
//! # Example
//!
//! ```
//! use color_transfer::{transfer_lab, LabImage, Plane, TransferOptions};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let source = LabImage::filled(4, 4, [200.0, 10.0, 10.0]);
//! let target = Plane::filled(4, 4, 128.0);
//! let options = TransferOptions::new().grid(2, 2);
//!
//! let out = transfer_lab(&source, &target, &options, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert!(out.a().data().iter().all(|&a| a == 10.0));
//! assert!(out.l().data().iter().all(|&l| l == 128.0));
//! ```

mod features;
mod matching;
mod options;
mod remap;
mod sampling;

pub use features::local_std_dev;
pub use matching::{best_match, match_chrominance};
pub use options::{
    TransferOptions, DEFAULT_MAX_SWATCHES, DEFAULT_NEIGHBORHOOD_WINDOW, DEFAULT_SYNTHESIS_WINDOW,
    SWATCH_SAMPLES, WHOLE_IMAGE_SAMPLES,
};
pub use remap::{moments, remap, Moments};
pub use sampling::{jitter_sample, GridSize, Sample, SampleSet};

use rand::Rng;

use crate::api::TransferError;
use crate::image::{LabImage, Plane};

/// Colorize a luminance plane from a Lab source.
///
/// The result keeps `target` verbatim as its luminance plane and carries
/// chrominance taken from `source` pixels.
///
/// # Errors
///
/// [`TransferError::InvalidConfig`] if `options` fail validation or either
/// image has no pixels.
pub fn transfer_lab<R: Rng + ?Sized>(
    source: &LabImage,
    target: &Plane,
    options: &TransferOptions,
    rng: &mut R,
) -> Result<LabImage, TransferError> {
    options.validate()?;
    if source.l().is_empty() {
        return Err(TransferError::InvalidConfig(
            "source image has no pixels".to_string(),
        ));
    }
    if target.is_empty() {
        return Err(TransferError::InvalidConfig(
            "target image has no pixels".to_string(),
        ));
    }

    let source_lum = remap(source.l(), target);
    let source_features = local_std_dev(&source_lum, options.neighborhood_window)?;
    let target_features = local_std_dev(target, options.neighborhood_window)?;
    let samples = jitter_sample(&source_lum, &source_features, options.grid, rng)?;
    let (a, b) = match_chrominance(target, &target_features, &samples, source)?;

    LabImage::new(target.clone(), a, b)
}
