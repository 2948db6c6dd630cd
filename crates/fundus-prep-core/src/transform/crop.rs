//! Pixel-window cropping.

use super::TransformError;
use crate::decode::DecodedImage;

/// Copy the `width x height` window whose top-left corner is `(x, y)`.
///
/// The window must be non-empty and lie entirely inside the image; callers
/// clamp beforehand.
///
/// # Example
///
/// ```ignore
/// // Keep the central 50x50 block of a 100x100 image
/// let cropped = crop_region(&image, 25, 25, 50, 50)?;
/// ```
pub fn crop_region(
    image: &DecodedImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<DecodedImage, TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }

    let fits_x = x.checked_add(width).is_some_and(|right| right <= image.width);
    let fits_y = y.checked_add(height).is_some_and(|bottom| bottom <= image.height);
    if !fits_x || !fits_y {
        return Err(TransformError::RegionOutOfBounds {
            x,
            y,
            width,
            height,
            image_width: image.width,
            image_height: image.height,
        });
    }

    if x == 0 && y == 0 && width == image.width && height == image.height {
        return Ok(image.clone());
    }

    let row_bytes = width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * height as usize);

    // Copy pixel data row by row
    for row in y..y + height {
        let start = image.index(x, row);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Ok(DecodedImage::new(width, height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for an image size plus a window that fits inside it.
    fn window_strategy() -> impl Strategy<Value = (u32, u32, u32, u32, u32, u32)> {
        (1u32..=40, 1u32..=40).prop_flat_map(|(w, h)| {
            (Just(w), Just(h), 0..w, 0..h).prop_flat_map(|(w, h, x, y)| {
                (Just(w), Just(h), Just(x), Just(y), 1..=(w - x), 1..=(h - y))
            })
        })
    }

    proptest! {
        /// Property: Output has exactly the requested size.
        #[test]
        fn prop_output_matches_window((w, h, x, y, cw, ch) in window_strategy()) {
            let img = DecodedImage::black(w, h);
            let result = crop_region(&img, x, y, cw, ch).unwrap();

            prop_assert_eq!((result.width, result.height), (cw, ch));
            prop_assert_eq!(result.pixels.len(), (cw * ch * 3) as usize);
        }

        /// Property: Every output pixel equals the source pixel at the offset position.
        #[test]
        fn prop_pixels_come_from_offset((w, h, x, y, cw, ch) in window_strategy()) {
            let pixels: Vec<u8> = (0..(w * h * 3)).map(|v| (v % 251) as u8).collect();
            let img = DecodedImage::new(w, h, pixels);
            let result = crop_region(&img, x, y, cw, ch).unwrap();

            for oy in 0..ch {
                for ox in 0..cw {
                    prop_assert_eq!(result.pixel(ox, oy), img.pixel(x + ox, y + oy));
                }
            }
        }
    }
}
