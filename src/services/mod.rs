pub mod image_io;
pub mod transfer_pipeline;

pub use image_io::{decode_png, encode_png, read_png, write_png, DecodedImage};
pub use transfer_pipeline::{TransferOutput, TransferPipeline};
