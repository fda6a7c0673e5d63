//! Luminance remapping.
//!
//! Shifts and scales one luminance distribution so its first two moments
//! match those of another. Source luminance is remapped onto the target's
//! statistics before matching, so that a dark source can still colorize a
//! bright target.

use crate::image::Plane;

/// Population mean and standard deviation of a set of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std_dev: f64,
}

/// Compute the mean and population standard deviation of `values`.
///
/// Summation runs sequentially in slice order so results do not depend on
/// thread scheduling. An empty slice yields zero for both moments.
pub fn moments(values: &[f64]) -> Moments {
    if values.is_empty() {
        return Moments {
            mean: 0.0,
            std_dev: 0.0,
        };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    Moments {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Remap `lum_a` onto the mean and spread of `lum_b`.
///
/// Returns `(std_b / std_a) * (lum_a - mean_a) + mean_b` for every sample,
/// with the same shape as `lum_a`. A zero `std_a` is replaced by 1. The
/// result is not clamped to the display range.
///
/// # Example
///
/// ```
/// use color_transfer::{remap, Plane};
///
/// let a = Plane::new(2, 1, vec![0.0, 10.0]).unwrap();
/// let b = Plane::new(2, 1, vec![100.0, 140.0]).unwrap();
/// assert_eq!(remap(&a, &b).data(), &[100.0, 140.0]);
/// ```
pub fn remap(lum_a: &Plane, lum_b: &Plane) -> Plane {
    let a = moments(lum_a.data());
    let b = moments(lum_b.data());
    let std_a = if a.std_dev == 0.0 { 1.0 } else { a.std_dev };
    let scale = b.std_dev / std_a;

    tracing::debug!(
        mean_a = a.mean,
        std_a = a.std_dev,
        mean_b = b.mean,
        std_b = b.std_dev,
        "remapping luminance"
    );

    let mut out = lum_a.clone();
    for v in out.data_mut() {
        *v = scale * (*v - a.mean) + b.mean;
    }
    out
}
