//! Writing RGB buffers to disk in the format implied by the file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur while writing an image.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The extension does not name a format we can write
    #[error("Cannot infer output format from path: {0}")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The encoder rejected the data
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode `image` and write it to `path`.
///
/// The output format is chosen from the extension (`.tif` and `.tiff` both
/// map to TIFF). JPEG output uses `jpeg_quality` (clamped to 1-100); the other
/// formats are lossless and ignore it.
pub fn save_image(image: &DecodedImage, path: &Path, jpeg_quality: u8) -> Result<(), EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let format = ImageFormat::from_path(path)
        .map_err(|_| EncodeError::UnknownFormat(path.display().to_string()))?;

    if format == ImageFormat::Jpeg {
        let mut writer = BufWriter::new(File::create(path)?);
        JpegEncoder::new_with_quality(&mut writer, jpeg_quality.clamp(1, 100))
            .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        writer.flush()?;
        return Ok(());
    }

    image::save_buffer_with_format(
        path,
        &image.pixels,
        width,
        height,
        ExtendedColorType::Rgb8,
        format,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => EncodeError::Io(io),
        other => EncodeError::EncodingFailed(other.to_string()),
    })
}
