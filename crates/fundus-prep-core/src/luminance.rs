//! Intensity conversion using ITU-R BT.601 coefficients.
//!
//! Boundary detection works on a single intensity channel. The weights are
//! the BT.601 luma weights in 14-bit fixed point, which is the convention
//! used by most capture and scanning software that produced the source data.

use image::{GrayImage, Luma};

use crate::decode::DecodedImage;

/// BT.601 red weight, scaled by 2^14.
const LUMA_R: u32 = 4899;
/// BT.601 green weight, scaled by 2^14.
const LUMA_G: u32 = 9617;
/// BT.601 blue weight, scaled by 2^14.
const LUMA_B: u32 = 1868;

const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Calculate the intensity of an 8-bit RGB pixel.
///
/// Equivalent to `round(0.299 R + 0.587 G + 0.114 B)`.
#[inline]
pub fn intensity_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + LUMA_ROUND) >> LUMA_SHIFT).min(255) as u8
}

/// Convert an RGB image to a single-channel intensity image.
pub fn to_intensity(image: &DecodedImage) -> GrayImage {
    let mut gray = GrayImage::new(image.width, image.height);
    for (dst, px) in gray.pixels_mut().zip(image.pixels.chunks_exact(3)) {
        *dst = Luma([intensity_u8(px[0], px[1], px[2])]);
    }
    gray
}
