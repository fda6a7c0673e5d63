//! Explicit transfer session state.

use crate::api::{run_swatch_guided_transfer, run_whole_image_transfer, TransferError};
use crate::image::{GrayImage, Rect, RgbImage};
use crate::output::ColorTransferResult;
use crate::swatch::{Swatch, SwatchRole, SwatchSet, SwatchTag};
use crate::transfer::TransferOptions;

/// The inputs of an interactive colorization: two images, the swatches
/// marked on them, and the options for each mode.
///
/// A session is owned by the caller and never holds a result; every run
/// returns a new [`ColorTransferResult`].
///
/// # Example
///
/// ```
/// use color_transfer::{GrayImage, Rect, RgbImage, Session, SwatchRole};
///
/// let mut session = Session::new();
/// session.set_source(RgbImage::new(4, 4, vec![[20, 120, 200]; 16]).unwrap());
/// session.set_target(GrayImage::new(4, 4, vec![128; 16]).unwrap());
/// session.add_swatch(SwatchRole::Source, Rect::new(0, 0, 2, 2)).unwrap();
/// session.add_swatch(SwatchRole::Target, Rect::new(0, 0, 2, 2)).unwrap();
///
/// let result = session.run_swatch_guided().unwrap();
/// assert_eq!(result.width(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    source: Option<RgbImage>,
    target: Option<GrayImage>,
    swatches: SwatchSet,
    whole_image: TransferOptions,
    swatch_guided: TransferOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_options(TransferOptions::whole_image(), TransferOptions::swatch_guided())
    }
}

impl Session {
    /// An empty session with the preset options for both modes.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty session with explicit options per mode.
    ///
    /// The swatch limit is taken from `swatch_guided`.
    pub fn with_options(whole_image: TransferOptions, swatch_guided: TransferOptions) -> Self {
        Self {
            source: None,
            target: None,
            swatches: SwatchSet::new(swatch_guided.max_swatches),
            whole_image,
            swatch_guided,
        }
    }

    /// Load the color source. Existing source swatches are discarded.
    pub fn set_source(&mut self, image: RgbImage) {
        self.swatches.clear(SwatchRole::Source);
        self.source = Some(image);
    }

    /// Load the grayscale target. Existing target swatches are discarded.
    pub fn set_target(&mut self, image: GrayImage) {
        self.swatches.clear(SwatchRole::Target);
        self.target = Some(image);
    }

    #[inline]
    pub fn source(&self) -> Option<&RgbImage> {
        self.source.as_ref()
    }

    #[inline]
    pub fn target(&self) -> Option<&GrayImage> {
        self.target.as_ref()
    }

    #[inline]
    pub fn swatches(&self) -> &SwatchSet {
        &self.swatches
    }

    #[inline]
    pub fn whole_image_options(&self) -> &TransferOptions {
        &self.whole_image
    }

    #[inline]
    pub fn swatch_options(&self) -> &TransferOptions {
        &self.swatch_guided
    }

    pub fn set_whole_image_options(&mut self, options: TransferOptions) {
        self.whole_image = options;
    }

    /// Replace the swatch-guided options, including the swatch limit.
    pub fn set_swatch_options(&mut self, options: TransferOptions) {
        self.swatches.set_max_per_role(options.max_swatches);
        self.swatch_guided = options;
    }

    fn image_size(&self, role: SwatchRole) -> Result<(usize, usize), TransferError> {
        match role {
            SwatchRole::Source => self
                .source
                .as_ref()
                .map(|img| (img.width(), img.height()))
                .ok_or(TransferError::MissingInput("source")),
            SwatchRole::Target => self
                .target
                .as_ref()
                .map(|img| (img.width(), img.height()))
                .ok_or(TransferError::MissingInput("target")),
        }
    }

    /// Mark a region on the image of `role`, clipped to that image.
    ///
    /// # Errors
    ///
    /// [`TransferError::MissingInput`] if that image is not loaded, plus the
    /// errors of [`SwatchSet::add`].
    pub fn add_swatch(&mut self, role: SwatchRole, rect: Rect) -> Result<Swatch, TransferError> {
        let (width, height) = self.image_size(role)?;
        self.swatches.add(role, rect, width, height)
    }

    /// Mark a region with an explicit palette tag.
    pub fn add_tagged_swatch(
        &mut self,
        role: SwatchRole,
        rect: Rect,
        tag: SwatchTag,
    ) -> Result<Swatch, TransferError> {
        let (width, height) = self.image_size(role)?;
        self.swatches.add_tagged(role, rect, tag, width, height)
    }

    /// Mark a `width × height` region whose top-left corner is `(x, y)`.
    pub fn add_swatch_at(
        &mut self,
        role: SwatchRole,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<Swatch, TransferError> {
        let (image_width, image_height) = self.image_size(role)?;
        self.swatches
            .add_at(role, x, y, width, height, image_width, image_height)
    }

    /// Remove every swatch of `role`.
    pub fn clear_swatches(&mut self, role: SwatchRole) {
        self.swatches.clear(role);
    }

    /// Run whole-image transfer on the loaded images.
    pub fn run_whole_image(&self) -> Result<ColorTransferResult, TransferError> {
        run_whole_image_transfer(self.source.as_ref(), self.target.as_ref(), &self.whole_image)
    }

    /// Run swatch-guided transfer on the loaded images and swatches.
    pub fn run_swatch_guided(&self) -> Result<ColorTransferResult, TransferError> {
        run_swatch_guided_transfer(
            self.source.as_ref(),
            self.target.as_ref(),
            &self.swatches,
            &self.swatch_guided,
        )
    }
}
