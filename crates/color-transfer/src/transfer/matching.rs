//! Nearest-candidate search in (luminance, local contrast) space.

use rayon::prelude::*;

use crate::api::TransferError;
use crate::image::{FeatureMap, LabImage, Plane};
use crate::transfer::{Sample, SampleSet};

/// Find the candidate closest to a target pixel.
///
/// Distance is `(s.luminance - luminance)² + (s.feature - feature)²`. The
/// first sample reaching the minimum wins, so the result depends only on
/// the order of `samples`. Returns `None` for an empty set.
///
/// # Example
///
/// ```
/// use color_transfer::{best_match, Sample, SampleSet};
///
/// let samples = SampleSet::new(vec![
///     Sample { row: 0, col: 0, luminance: 10.0, feature: 0.0 },
///     Sample { row: 3, col: 1, luminance: 90.0, feature: 2.0 },
/// ]);
/// let best = best_match(80.0, 1.0, &samples).unwrap();
/// assert_eq!((best.row, best.col), (3, 1));
/// ```
#[inline]
pub fn best_match(luminance: f64, feature: f64, samples: &SampleSet) -> Option<&Sample> {
    let mut best: Option<(&Sample, f64)> = None;
    for sample in samples {
        let dl = sample.luminance - luminance;
        let df = sample.feature - feature;
        let distance = dl * dl + df * df;
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((sample, distance)),
        }
    }
    best.map(|(sample, _)| sample)
}

/// Assign chrominance to every target pixel from its best-matching sample.
///
/// `source` supplies the `(a, b)` values at sample coordinates. Rows are
/// matched in parallel; each output pixel is written exactly once.
///
/// # Errors
///
/// [`TransferError::InvalidConfig`] if `samples` is empty or `features`
/// differs in size from `luminance`.
pub fn match_chrominance(
    luminance: &Plane,
    features: &FeatureMap,
    samples: &SampleSet,
    source: &LabImage,
) -> Result<(Plane, Plane), TransferError> {
    if samples.is_empty() {
        return Err(TransferError::InvalidConfig(
            "no candidate samples to match against".to_string(),
        ));
    }
    if (features.width(), features.height()) != (luminance.width(), luminance.height()) {
        return Err(TransferError::InvalidConfig(format!(
            "feature map is {}x{} but image is {}x{}",
            features.width(),
            features.height(),
            luminance.width(),
            luminance.height()
        )));
    }

    let (width, height) = (luminance.width(), luminance.height());
    let mut a = Plane::filled(width, height, 0.0);
    let mut b = Plane::filled(width, height, 0.0);
    if width == 0 {
        return Ok((a, b));
    }

    a.data_mut()
        .par_chunks_mut(width)
        .zip(b.data_mut().par_chunks_mut(width))
        .enumerate()
        .for_each(|(row, (a_row, b_row))| {
            for col in 0..width {
                // samples is non-empty, so a match always exists
                if let Some(s) = best_match(luminance.get(row, col), features.get(row, col), samples)
                {
                    let (ca, cb) = source.chroma(s.row, s.col);
                    a_row[col] = ca;
                    b_row[col] = cb;
                }
            }
        });

    tracing::debug!(width, height, samples = samples.len(), "matched chrominance");
    Ok((a, b))
}
