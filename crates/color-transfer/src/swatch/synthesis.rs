//! Patch-based texture synthesis.
//!
//! Pixels outside every target swatch get their chrominance from the
//! colorized swatch patches. The image is walked in non-overlapping square
//! tiles; each tile that is not already colorized is compared, by luminance
//! only, against every tile-sized window of every patch, and the chrominance
//! of the closest window is copied over.

use rayon::prelude::*;

use crate::api::TransferError;
use crate::image::{LabImage, Mask, Plane, Rect};

/// Tile geometry for a synthesis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tiling {
    half: usize,
    tile: usize,
}

impl Tiling {
    fn new(window: usize) -> Self {
        let half = window / 2;
        Self {
            half,
            tile: (2 * half).max(1),
        }
    }

    /// Padding added on every side; also the first tile center.
    #[inline]
    fn margin(&self) -> usize {
        self.tile
    }

    /// Tile centers along an axis of padded length `len`.
    fn centers(&self, len: usize) -> impl Iterator<Item = usize> {
        (self.margin()..len.saturating_sub(self.half)).step_by(self.tile)
    }

    /// First row/column covered by the tile centered at `center`.
    #[inline]
    fn start(&self, center: usize) -> usize {
        center - self.half
    }
}

/// Closest library window for one output tile.
#[derive(Debug, Clone, Copy)]
struct Choice {
    patch: usize,
    row: usize,
    col: usize,
}

fn ssd(a: &Plane, a_row: usize, a_col: usize, b: &Plane, b_row: usize, b_col: usize, n: usize) -> f64 {
    let mut sum = 0.0;
    for r in 0..n {
        let ra = &a.row(a_row + r)[a_col..a_col + n];
        let rb = &b.row(b_row + r)[b_col..b_col + n];
        for (x, y) in ra.iter().zip(rb) {
            let d = x - y;
            sum += d * d;
        }
    }
    sum
}

/// Fill chrominance of uncolorized tiles from the best-matching patch window.
///
/// `image`, `colorized` and every patch are replicate-padded by one tile.
/// Tiles whose four corner mask samples are all set are left alone. For
/// every other tile, windows are scanned patch by patch in row-major order
/// and the first window with the smallest sum of squared luminance
/// differences wins. Only chrominance is copied; luminance is never
/// modified.
///
/// Tiles never overlap, so the search runs in parallel and the chosen
/// windows are written afterwards.
///
/// # Errors
///
/// [`TransferError::InvalidConfig`] if `window` is even or zero, the image is
/// empty, or `colorized` differs in size from `image`.
pub fn synthesize(
    image: &LabImage,
    colorized: &Mask,
    patches: &[LabImage],
    window: usize,
) -> Result<LabImage, TransferError> {
    if window == 0 || window % 2 == 0 {
        return Err(TransferError::InvalidConfig(format!(
            "synthesis window must be an odd positive integer, got {window}"
        )));
    }
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(TransferError::InvalidConfig(
            "cannot synthesize an empty image".to_string(),
        ));
    }
    if (colorized.width(), colorized.height()) != (width, height) {
        return Err(TransferError::InvalidConfig(format!(
            "mask is {}x{} but image is {width}x{height}",
            colorized.width(),
            colorized.height()
        )));
    }

    let tiling = Tiling::new(window);
    let margin = tiling.margin();
    let mut padded = image.pad_replicate(margin);
    let mask = colorized.pad_replicate(margin);
    let library: Vec<LabImage> = patches
        .iter()
        .filter(|p| p.width() > 0 && p.height() > 0)
        .map(|p| p.pad_replicate(margin))
        .collect();

    let half = tiling.half;
    let mut tiles = Vec::new();
    let mut skipped = 0usize;
    for i in tiling.centers(padded.height()) {
        for j in tiling.centers(padded.width()) {
            let done = mask.get(i - half, j - half)
                && mask.get(i - half, j + half)
                && mask.get(i + half, j - half)
                && mask.get(i + half, j + half);
            if done {
                skipped += 1;
            } else {
                tiles.push((i, j));
            }
        }
    }

    let n = tiling.tile;
    let choices: Vec<Option<Choice>> = tiles
        .par_iter()
        .map(|&(i, j)| {
            let (ti, tj) = (tiling.start(i), tiling.start(j));
            let mut best: Option<(Choice, f64)> = None;
            for (p, patch) in library.iter().enumerate() {
                for l in tiling.centers(patch.height()) {
                    for m in tiling.centers(patch.width()) {
                        let (row, col) = (tiling.start(l), tiling.start(m));
                        let error = ssd(padded.l(), ti, tj, patch.l(), row, col, n);
                        if best.map_or(true, |(_, e)| error < e) {
                            best = Some((Choice { patch: p, row, col }, error));
                        }
                    }
                }
            }
            best.map(|(choice, _)| choice)
        })
        .collect();

    let mut filled = 0usize;
    for (&(i, j), choice) in tiles.iter().zip(&choices) {
        let Some(choice) = choice else { continue };
        let source = &library[choice.patch];
        let window = Rect::from_origin_size(choice.col, choice.row, n, n);
        let (a, b) = padded.chroma_planes_mut();
        a.paste(tiling.start(i), tiling.start(j), &source.a().crop(window));
        b.paste(tiling.start(i), tiling.start(j), &source.b().crop(window));
        filled += 1;
    }

    tracing::debug!(
        window,
        tiles = tiles.len() + skipped,
        filled,
        skipped,
        library = library.len(),
        "synthesized texture"
    );
    Ok(padded.crop(Rect::new(margin, margin, margin + width, margin + height)))
}
