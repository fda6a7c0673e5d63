//! Stratified ("jittered") sampling of candidate source pixels.
//!
//! Matching every target pixel against every source pixel is quadratic in
//! image size. Instead the source is split into a grid of blocks and one
//! random pixel is drawn per block, which keeps the candidate set small
//! while still spreading it over the whole image.

use rand::Rng;

use crate::api::TransferError;
use crate::image::{FeatureMap, Plane};

/// Number of sampling blocks along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    /// Horizontal bands (blocks along the row axis).
    pub rows: usize,
    /// Vertical bands (blocks along the column axis).
    pub cols: usize,
}

impl GridSize {
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// A square grid with at least `count` blocks: `ceil(sqrt(count))` per side.
    ///
    /// # Example
    ///
    /// ```
    /// use color_transfer::GridSize;
    ///
    /// assert_eq!(GridSize::from_sample_count(200), GridSize::new(15, 15));
    /// assert_eq!(GridSize::from_sample_count(50), GridSize::new(8, 8));
    /// ```
    pub fn from_sample_count(count: usize) -> Self {
        let mut side = (count as f64).sqrt() as usize;
        // An overflowing square is necessarily >= count.
        while side.checked_mul(side).is_some_and(|square| square < count) {
            side += 1;
        }
        Self::new(side, side)
    }

    /// Total number of blocks, which is also the number of samples drawn.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidConfig`] if `rows * cols` overflows `usize`.
    #[inline]
    pub fn block_count(&self) -> Result<usize, TransferError> {
        self.rows.checked_mul(self.cols).ok_or_else(|| {
            TransferError::InvalidConfig(format!(
                "sample grid {}x{} is too large",
                self.rows, self.cols
            ))
        })
    }
}

/// One candidate source pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub row: usize,
    pub col: usize,
    /// (Remapped) luminance at the pixel.
    pub luminance: f64,
    /// Local standard deviation at the pixel.
    pub feature: f64,
}

/// Ordered candidate samples, one per grid block in row-major block order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Wrap samples in the given order.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Inclusive index range of band `index` when `len` is split with `step`.
///
/// Bands past the end collapse onto the last index.
#[inline]
fn band(index: usize, step: usize, len: usize) -> (usize, usize) {
    let last = len - 1;
    let lo = (index * step).min(last);
    let hi = ((index + 1) * step - 1).min(last);
    (lo, hi)
}

/// Draw one uniformly random pixel per grid block.
///
/// Band sizes are `max(height / grid.rows, 1)` and `max(width / grid.cols, 1)`;
/// bands are clamped to the image. When the size does not divide evenly the
/// remainder rows/columns past the last band are never sampled. Blocks are visited in row-major
/// order and, for each block, the row is drawn before the column. Always
/// returns exactly `grid.rows * grid.cols` samples.
///
/// # Errors
///
/// [`TransferError::InvalidConfig`] if the grid has a zero dimension or
/// overflows, the plane is empty, or `features` differs in size from
/// `luminance`.
pub fn jitter_sample<R: Rng + ?Sized>(
    luminance: &Plane,
    features: &FeatureMap,
    grid: GridSize,
    rng: &mut R,
) -> Result<SampleSet, TransferError> {
    if grid.rows == 0 || grid.cols == 0 {
        return Err(TransferError::InvalidConfig(format!(
            "sample grid must be at least 1x1, got {}x{}",
            grid.rows, grid.cols
        )));
    }
    let count = grid.block_count()?;
    if luminance.is_empty() {
        return Err(TransferError::InvalidConfig(
            "cannot sample an empty image".to_string(),
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
    let step_rows = (height / grid.rows).max(1);
    let step_cols = (width / grid.cols).max(1);

    let mut samples = Vec::with_capacity(count.min(width * height));
    for i in 0..grid.rows {
        let (row_lo, row_hi) = band(i, step_rows, height);
        for j in 0..grid.cols {
            let (col_lo, col_hi) = band(j, step_cols, width);
            let row = rng.gen_range(row_lo..=row_hi);
            let col = rng.gen_range(col_lo..=col_hi);
            samples.push(Sample {
                row,
                col,
                luminance: luminance.get(row, col),
                feature: features.get(row, col),
            });
        }
    }

    tracing::debug!(
        width,
        height,
        rows = grid.rows,
        cols = grid.cols,
        samples = samples.len(),
        "jitter sampled source"
    );
    Ok(SampleSet::new(samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ramp(width: usize, height: usize) -> Plane {
        Plane::from_fn(width, height, |r, c| (r * width + c) as f64)
    }

    #[test]
    fn test_grid_from_sample_count() {
        assert_eq!(GridSize::from_sample_count(1), GridSize::new(1, 1));
        assert_eq!(GridSize::from_sample_count(4), GridSize::new(2, 2));
        assert_eq!(GridSize::from_sample_count(5), GridSize::new(3, 3));
        assert_eq!(GridSize::from_sample_count(0), GridSize::new(0, 0));
        assert_eq!(GridSize::from_sample_count(200).block_count(), Ok(225));
    }

    #[test]
    fn test_grid_size_overflow() {
        let square = GridSize::from_sample_count(usize::MAX);
        assert!(square.block_count().map_or(true, |n| n == usize::MAX));

        let huge = GridSize::new(usize::MAX, 2);
        assert!(matches!(huge.block_count(), Err(TransferError::InvalidConfig(_))));

        let lum = ramp(4, 4);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            jitter_sample(&lum, &lum, huge, &mut rng),
            Err(TransferError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_remainder_rows_are_not_sampled() {
        // 10 rows in 3 bands of 3: rows 0-2, 3-5, 6-8; row 9 is left over
        let lum = ramp(1, 10);
        let features = Plane::filled(1, 10, 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 10];
        for _ in 0..200 {
            let set = jitter_sample(&lum, &features, GridSize::new(3, 1), &mut rng).unwrap();
            for (band, s) in set.iter().enumerate() {
                assert!(s.row >= band * 3 && s.row < band * 3 + 3, "{s:?} in band {band}");
                seen[s.row] = true;
            }
        }
        assert_eq!(seen, [true, true, true, true, true, true, true, true, true, false]);
    }

    #[test]
    fn test_one_sample_per_block_in_bounds() {
        let lum = ramp(20, 12);
        let features = Plane::filled(20, 12, 0.5);
        let mut rng = StdRng::seed_from_u64(7);
        let set = jitter_sample(&lum, &features, GridSize::new(3, 4), &mut rng).unwrap();
        assert_eq!(set.len(), 12);

        // 12 / 3 = 4 rows per band, 20 / 4 = 5 columns per band
        for (k, s) in set.iter().enumerate() {
            let (i, j) = (k / 4, k % 4);
            assert!(s.row >= i * 4 && s.row < (i + 1) * 4, "{s:?} in block {i},{j}");
            assert!(s.col >= j * 5 && s.col < (j + 1) * 5, "{s:?} in block {i},{j}");
            assert_eq!(s.luminance, lum.get(s.row, s.col));
            assert_eq!(s.feature, 0.5);
        }
    }

    #[test]
    fn test_grid_larger_than_image_stays_in_bounds() {
        let lum = ramp(3, 2);
        let features = Plane::filled(3, 2, 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        let set = jitter_sample(&lum, &features, GridSize::new(5, 6), &mut rng).unwrap();
        assert_eq!(set.len(), 30);
        assert!(set.iter().all(|s| s.row < 2 && s.col < 3));
    }

    #[test]
    fn test_same_seed_same_samples() {
        let lum = ramp(16, 16);
        let features = Plane::filled(16, 16, 0.0);
        let a = jitter_sample(&lum, &features, GridSize::new(4, 4), &mut StdRng::seed_from_u64(3))
            .unwrap();
        let b = jitter_sample(&lum, &features, GridSize::new(4, 4), &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_input() {
        let lum = ramp(4, 4);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(jitter_sample(&lum, &lum, GridSize::new(0, 2), &mut rng).is_err());
        assert!(jitter_sample(&lum, &Plane::filled(3, 4, 0.0), GridSize::new(2, 2), &mut rng).is_err());
        let empty = Plane::filled(0, 0, 0.0);
        assert!(jitter_sample(&empty, &empty, GridSize::new(2, 2), &mut rng).is_err());
    }
}
