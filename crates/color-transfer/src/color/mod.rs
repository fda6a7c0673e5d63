//! Color types and conversion utilities
//!
//! This module is the color space adapter of the transfer pipeline. It moves
//! pixels between the display encoding and a space where luminance is
//! independent of chrominance.
//!
//! # Color Spaces
//!
//! - [`Srgb`]: gamma-encoded display values. Use for I/O.
//! - [`LinearRgb`]: linear light, the only valid input to the XYZ matrices.
//! - [`Lab`]: CIE L\*a\*b\*, the working space; see [`Lab::encode8`] for the
//!   8-bit scaling the pipeline operates on.
//!
//! # Example
//!
//! ```
//! use color_transfer::{Lab, LinearRgb, Srgb};
//!
//! let srgb = Srgb::from_u8(200, 40, 40);
//! let lab = Lab::from(LinearRgb::from(srgb));
//! assert!(lab.a > 0.0, "red sits on the positive a axis");
//!
//! let back = Srgb::from(LinearRgb::from(lab)).to_bytes();
//! assert!((back[0] as i32 - 200).abs() <= 1);
//! ```

mod lab;
mod linear_rgb;
mod lut;
mod srgb;

pub use lab::{Lab, CHROMA_OFFSET};
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
