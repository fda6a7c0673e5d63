//! Swatch-guided color transfer.
//!
//! Instead of matching against the whole source, the caller marks pairs of
//! rectangles ("swatches"): a source region and the target region that
//! should receive its colors. Each pair is transferred independently with
//! [`transfer_regions`], then [`synthesize`] propagates the colorized
//! patches to the rest of the target.
//!
//! Swatches are collected in a [`SwatchSet`] and matched by palette tag with
//! [`pair_swatches`].

mod region;
mod swatch;
mod synthesis;

pub use region::{transfer_regions, RegionTransfer};
pub use swatch::{
    pair_swatches, Swatch, SwatchPair, SwatchRole, SwatchSet, SwatchTag, DEFAULT_SWATCH_SIZE,
    TAG_NAMES,
};
pub use synthesis::synthesize;
