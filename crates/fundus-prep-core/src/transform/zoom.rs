//! Center zoom-in and the rotate-then-zoom combination.

use super::{crop_region, resize, rotate_about_center, InterpolationFilter, TransformError};
use crate::decode::DecodedImage;

/// Compute the centered window kept by a zoom of `factor`.
///
/// Returns `(left, top, width, height)`. The window size is the original
/// divided by the factor, truncated, and never smaller than one pixel; the
/// offset splits the remainder evenly with the extra pixel on the far side.
pub fn zoom_window(width: u32, height: u32, factor: f64) -> (u32, u32, u32, u32) {
    let new_width = ((width as f64 / factor) as u32).clamp(1, width.max(1));
    let new_height = ((height as f64 / factor) as u32).clamp(1, height.max(1));
    let left = (width - new_width) / 2;
    let top = (height - new_height) / 2;
    (left, top, new_width, new_height)
}

/// Magnify the center of the image by `factor`.
///
/// The centered window from [`zoom_window`] is upscaled back to the original
/// size with Lanczos3, so the output has the source dimensions.
///
/// # Errors
///
/// `TransformError::InvalidZoomFactor` unless `factor` is finite and >= 1.0.
pub fn apply_zoom_in(image: &DecodedImage, factor: f64) -> Result<DecodedImage, TransformError> {
    if !factor.is_finite() || factor < 1.0 {
        return Err(TransformError::InvalidZoomFactor(factor));
    }
    if image.is_empty() {
        return Err(TransformError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let (left, top, width, height) = zoom_window(image.width, image.height, factor);
    let window = crop_region(image, left, top, width, height)?;
    resize(
        &window,
        image.width,
        image.height,
        InterpolationFilter::Lanczos3,
    )
}

/// Rotate about the center, then zoom into the rotated result.
pub fn apply_combo(
    image: &DecodedImage,
    angle_degrees: f64,
    factor: f64,
) -> Result<DecodedImage, TransformError> {
    let rotated = rotate_about_center(image, angle_degrees, InterpolationFilter::Bicubic);
    apply_zoom_in(&rotated, factor)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
