//! Unified error type for the color-transfer public API.
//!
//! Every failure is a recoverable validation result; nothing in the crate
//! panics on bad caller input.

use thiserror::Error;

use crate::swatch::SwatchRole;

/// Validation failure reported by a transfer operation.
///
/// # Example
///
/// ```
/// use color_transfer::{TransferError, TransferOptions};
///
/// let err = TransferOptions::new().neighborhood_window(4).validate().unwrap_err();
/// assert!(matches!(err, TransferError::InvalidConfig(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// One or both input images were not supplied.
    #[error("missing input image: {0}")]
    MissingInput(&'static str),

    /// Source and target roles hold different numbers of swatches.
    #[error("number of swatches must match: {sources} source, {targets} target")]
    SwatchCountMismatch { sources: usize, targets: usize },

    /// Swatch-guided transfer needs at least one source/target pair.
    #[error("at least one swatch pair is required")]
    NoSwatches,

    /// A tunable is out of range, or an image has no pixels.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A role already holds the maximum number of swatches.
    #[error("at most {max} {role} swatches can be selected")]
    SwatchLimit { role: SwatchRole, max: usize },

    /// A swatch rectangle covers no pixel of its image.
    #[error("invalid swatch: {0}")]
    InvalidSwatch(String),
}
