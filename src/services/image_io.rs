//! PNG decoding and encoding for source, target and result images.

use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use color_transfer::{GrayImage, RgbImage};

use crate::error::AppError;

/// A decoded 8-bit PNG, before role-specific conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedImage {
    Gray(GrayImage),
    Rgb(RgbImage),
}

impl DecodedImage {
    pub fn width(&self) -> usize {
        match self {
            DecodedImage::Gray(img) => img.width(),
            DecodedImage::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            DecodedImage::Gray(img) => img.height(),
            DecodedImage::Rgb(img) => img.height(),
        }
    }

    /// Use as a color source; gray pixels are replicated into all channels.
    pub fn into_rgb(self) -> RgbImage {
        match self {
            DecodedImage::Rgb(img) => img,
            DecodedImage::Gray(img) => {
                RgbImage::from_fn(img.width(), img.height(), |row, col| {
                    let v = img.get(row, col);
                    [v, v, v]
                })
            }
        }
    }

    /// Use as a grayscale target; color is collapsed to luminance.
    pub fn into_gray(self) -> GrayImage {
        match self {
            DecodedImage::Gray(img) => img,
            DecodedImage::Rgb(img) => {
                tracing::warn!(
                    width = img.width(),
                    height = img.height(),
                    "Target image has color, converting to grayscale"
                );
                GrayImage::from_rgb(&img)
            }
        }
    }
}

/// Decode PNG data from any reader.
///
/// Palette and low bit depth images are expanded and 16-bit channels are
/// stripped to 8 bits. Alpha is dropped.
pub fn decode_png<R: Read>(reader: R) -> Result<DecodedImage, AppError> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    let bytes = &buf[..frame.buffer_size()];
    let (width, height) = (frame.width as usize, frame.height as usize);

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(AppError::UnsupportedPng(format!(
            "bit depth {:?} after expansion",
            frame.bit_depth
        )));
    }

    let rows = bytes.chunks_exact(frame.line_size);
    let image = match frame.color_type {
        png::ColorType::Grayscale => {
            let pixels = rows.flat_map(|line| line[..width].iter().copied()).collect();
            DecodedImage::Gray(GrayImage::new(width, height, pixels)?)
        }
        png::ColorType::GrayscaleAlpha => {
            let pixels = rows
                .flat_map(|line| line[..width * 2].chunks_exact(2).map(|px| px[0]))
                .collect();
            DecodedImage::Gray(GrayImage::new(width, height, pixels)?)
        }
        png::ColorType::Rgb => {
            let pixels = rows
                .flat_map(|line| {
                    line[..width * 3]
                        .chunks_exact(3)
                        .map(|px| [px[0], px[1], px[2]])
                })
                .collect();
            DecodedImage::Rgb(RgbImage::new(width, height, pixels)?)
        }
        png::ColorType::Rgba => {
            let pixels = rows
                .flat_map(|line| {
                    line[..width * 4]
                        .chunks_exact(4)
                        .map(|px| [px[0], px[1], px[2]])
                })
                .collect();
            DecodedImage::Rgb(RgbImage::new(width, height, pixels)?)
        }
        other => {
            return Err(AppError::UnsupportedPng(format!(
                "color type {other:?} after expansion"
            )))
        }
    };

    tracing::debug!(width, height, color = ?frame.color_type, "Decoded PNG");
    Ok(image)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<DecodedImage, AppError> {
    let file = std::fs::File::open(path).map_err(|source| AppError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(BufReader::new(file))
}

/// Encode an RGB image as an 8-bit RGB PNG.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, AppError> {
    let width = u32::try_from(image.width())
        .map_err(|_| AppError::UnsupportedPng(format!("width {} too large", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| AppError::UnsupportedPng(format!("height {} too large", image.height())))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.to_raw())?;
    }
    Ok(buf.into_inner())
}

/// Encode and write an RGB PNG file.
pub fn write_png(path: &Path, image: &RgbImage) -> Result<(), AppError> {
    let data = encode_png(image)?;
    std::fs::write(path, data)?;
    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Wrote PNG"
    );
    Ok(())
}
