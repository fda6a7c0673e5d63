//! Output types for the transfer pipeline.
//!
//! [`ColorTransferResult`] holds the colorized image in the working Lab
//! encoding and converts it to display sRGB on demand.

mod transfer_result;

pub use transfer_result::ColorTransferResult;
