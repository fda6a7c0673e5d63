use std::path::PathBuf;

use color_transfer::TransferError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {}", .path.display(), .source)]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedPng(String),

    #[error("Config parse error: {0}")]
    ConfigYaml(#[from] serde_yaml::Error),

    #[error("Config parse error: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Color transfer failed: {0}")]
    Transfer(#[from] TransferError),
}
