//! Neighborhood feature extraction.
//!
//! The only feature used for matching besides luminance is local contrast:
//! the standard deviation of a square window centered on each pixel.

use rayon::prelude::*;

use crate::api::TransferError;
use crate::image::plane::reflect_index;
use crate::image::{FeatureMap, Plane};

/// Compute the local standard deviation of every pixel of `plane`.
///
/// Each pixel uses a full `window × window` neighborhood. Coordinates that
/// fall outside the plane are mirrored with symmetric reflection
/// (`d c b a | a b c d | d c b a`), repeatedly if the window is larger than
/// the plane. The deviation is the population one (divided by the window
/// area).
///
/// # Errors
///
/// [`TransferError::InvalidConfig`] if `window` is even or zero, or if the
/// plane has no pixels.
pub fn local_std_dev(plane: &Plane, window: usize) -> Result<FeatureMap, TransferError> {
    if window == 0 || window % 2 == 0 {
        return Err(TransferError::InvalidConfig(format!(
            "neighborhood window must be an odd positive integer, got {window}"
        )));
    }
    if plane.is_empty() {
        return Err(TransferError::InvalidConfig(
            "cannot extract features from an empty image".to_string(),
        ));
    }

    let (width, height) = (plane.width(), plane.height());
    let half = (window / 2) as isize;

    // Precompute reflected offsets once per axis
    let col_index: Vec<Vec<usize>> = (0..width)
        .map(|c| {
            (-half..=half)
                .map(|d| reflect_index(c as isize + d, width))
                .collect()
        })
        .collect();
    let row_index: Vec<Vec<usize>> = (0..height)
        .map(|r| {
            (-half..=half)
                .map(|d| reflect_index(r as isize + d, height))
                .collect()
        })
        .collect();

    let area = (window * window) as f64;
    let mut out = Plane::filled(width, height, 0.0);
    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, line)| {
            let rows = &row_index[row];
            for (col, value) in line.iter_mut().enumerate() {
                let cols = &col_index[col];
                let mut sum = 0.0;
                for &r in rows {
                    for &c in cols {
                        sum += plane.get(r, c);
                    }
                }
                let mean = sum / area;
                let mut sq = 0.0;
                for &r in rows {
                    for &c in cols {
                        let d = plane.get(r, c) - mean;
                        sq += d * d;
                    }
                }
                *value = (sq / area).sqrt();
            }
        });

    tracing::debug!(width, height, window, "extracted local contrast");
    Ok(out)
}
