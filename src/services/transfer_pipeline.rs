use std::path::Path;

use color_transfer::{ColorTransferResult, Session, SwatchRole, SwatchTag};

use crate::error::AppError;
use crate::models::{AppConfig, SwatchConfig, TransferMode};
use crate::services::image_io::{read_png, write_png};

/// Result from running the transfer pipeline
#[derive(Debug)]
pub struct TransferOutput {
    /// The colorized image
    pub result: ColorTransferResult,
    /// Which mode produced the result
    pub mode: TransferMode,
}

/// Transfer pipeline that orchestrates decode → session → transfer → encode
pub struct TransferPipeline {
    config: AppConfig,
}

impl TransferPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build a session holding both images and the configured swatches.
    pub fn session(&self, source: &Path, target: &Path) -> Result<Session, AppError> {
        let transfer = &self.config.transfer;
        let mut session = Session::with_options(
            transfer.to_options(TransferMode::WholeImage),
            transfer.to_options(TransferMode::SwatchGuided),
        );
        session.set_source(read_png(source)?.into_rgb());
        session.set_target(read_png(target)?.into_gray());

        for swatch in &self.config.swatches {
            add_swatch(&mut session, swatch)?;
        }
        Ok(session)
    }

    /// Run `mode` on two PNG files and write the colorized PNG.
    pub fn run(
        &self,
        mode: TransferMode,
        source: &Path,
        target: &Path,
        output: &Path,
    ) -> Result<TransferOutput, AppError> {
        let session = self.session(source, target)?;
        let result = match mode {
            TransferMode::WholeImage => session.run_whole_image()?,
            TransferMode::SwatchGuided => {
                tracing::info!(swatches = session.swatches().len(), "Running swatch-guided transfer");
                session.run_swatch_guided()?
            }
        };
        write_png(output, &result.to_rgb())?;
        Ok(TransferOutput { result, mode })
    }
}

fn add_swatch(session: &mut Session, swatch: &SwatchConfig) -> Result<(), AppError> {
    let role = SwatchRole::from(swatch.role);
    let added = match &swatch.tag {
        Some(name) => {
            let tag: SwatchTag = name.parse()?;
            session.add_tagged_swatch(role, swatch.rect(), tag)?
        }
        None => session.add_swatch(role, swatch.rect())?,
    };
    tracing::debug!(%role, tag = %added.tag, bounds = ?added.bounds, "Configured swatch");
    Ok(())
}
