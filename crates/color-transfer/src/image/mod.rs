//! Image containers used by the transfer pipeline.
//!
//! - [`RgbImage`] / [`GrayImage`]: 8-bit rasters exchanged with the caller
//! - [`Plane`]: one floating point channel (luminance, chroma or feature)
//! - [`LabImage`]: luminance plus two chrominance planes
//! - [`Mask`]: which output pixels are already colorized
//! - [`Rect`]: pixel rectangles for swatches and crops

mod lab_image;
mod mask;
pub(crate) mod plane;
mod raster;
mod rect;

pub use lab_image::LabImage;
pub use mask::Mask;
pub use plane::{FeatureMap, Plane};
pub use raster::{GrayImage, RgbImage};
pub use rect::Rect;
