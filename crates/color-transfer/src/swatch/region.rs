//! Per-pair region transfer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::api::TransferError;
use crate::image::{LabImage, Mask, Plane, Rect};
use crate::swatch::SwatchPair;
use crate::transfer::{transfer_lab, TransferOptions};

/// Output of [`transfer_regions`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTransfer {
    /// Target luminance with chrominance inside every target swatch and
    /// zero chrominance elsewhere.
    pub image: LabImage,
    /// Pixels written by a region transfer.
    pub colorized: Mask,
    /// Colorized target patches in pair order, used as the synthesis library.
    pub patches: Vec<LabImage>,
}

fn clip_to(rect: Rect, width: usize, height: usize, what: &str) -> Result<Rect, TransferError> {
    let clipped = rect.clip(width, height);
    if clipped.is_empty() {
        return Err(TransferError::InvalidSwatch(format!(
            "{what} rectangle ({}, {})-({}, {}) lies outside the {width}x{height} image",
            rect.x1, rect.y1, rect.x2, rect.y2
        )));
    }
    Ok(clipped)
}

/// Colorize each target swatch from its paired source swatch.
///
/// Every pair runs the whole-image pipeline on its two crops only, so
/// sampling grids and feature maps are local to the regions. One seed per
/// pair is drawn from `rng` in pair order before any work starts, and pairs
/// are then processed in parallel; results are pasted in pair order, so a
/// later pair overwrites an earlier one where target swatches overlap.
///
/// # Errors
///
/// - [`TransferError::NoSwatches`] if `pairs` is empty
/// - [`TransferError::InvalidSwatch`] if a rectangle lies outside its image
/// - [`TransferError::InvalidConfig`] if `options` are invalid or the
///   target is empty
pub fn transfer_regions<R: Rng + ?Sized>(
    source: &LabImage,
    target: &Plane,
    pairs: &[SwatchPair],
    options: &TransferOptions,
    rng: &mut R,
) -> Result<RegionTransfer, TransferError> {
    if pairs.is_empty() {
        return Err(TransferError::NoSwatches);
    }
    options.validate()?;
    if target.is_empty() {
        return Err(TransferError::InvalidConfig(
            "target image has no pixels".to_string(),
        ));
    }

    let (width, height) = (target.width(), target.height());
    let mut jobs = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let src = clip_to(pair.source, source.width(), source.height(), "source")?;
        let dst = clip_to(pair.target, width, height, "target")?;
        jobs.push((src, dst, rng.gen::<u64>()));
    }

    let patches: Vec<LabImage> = jobs
        .par_iter()
        .map(|&(src, dst, seed)| {
            let mut pair_rng = StdRng::seed_from_u64(seed);
            transfer_lab(&source.crop(src), &target.crop(dst), options, &mut pair_rng)
        })
        .collect::<Result<_, _>>()?;

    let mut image = LabImage::new(
        target.clone(),
        Plane::filled(width, height, 0.0),
        Plane::filled(width, height, 0.0),
    )?;
    let mut colorized = Mask::new(width, height);
    for (&(_, dst, _), patch) in jobs.iter().zip(&patches) {
        image.paste(dst.y1, dst.x1, patch);
        colorized.fill_rect(dst);
    }

    tracing::debug!(
        pairs = pairs.len(),
        colorized = colorized.count(),
        "transferred swatch regions"
    );
    Ok(RegionTransfer {
        image,
        colorized,
        patches,
    })
}
