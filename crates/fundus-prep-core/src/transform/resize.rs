//! Resampling to exact dimensions using the `image` crate's filters.

use super::{InterpolationFilter, TransformError};
use crate::decode::DecodedImage;

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` for a zero target size and
/// `TransformError::BufferMismatch` if the source buffer is malformed.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: InterpolationFilter,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(TransformError::BufferMismatch {
        width: image.width,
        height: image.height,
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}
