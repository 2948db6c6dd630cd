//! Fixed-canvas rotation with bicubic and Lanczos3 interpolation.
//!
//! The output has the same dimensions as the input. Content rotated past
//! the frame is lost, and areas with no source content are filled black.
//!
//! # Algorithm
//!
//! Inverse mapping: for each output pixel center we find the source point it
//! came from and interpolate around it. For a counter-clockwise rotation by
//! θ in y-down image coordinates the inverse transform is:
//! ```text
//! src_x = dx * cos(θ) - dy * sin(θ) + cx
//! src_y = dx * sin(θ) + dy * cos(θ) + cy
//! ```
//! with `(dx, dy)` the output pixel center relative to `(cx, cy)`.
//!
//! Source points outside the image area become black. Kernel taps that fall
//! just outside an edge reuse the nearest edge pixel.

use super::InterpolationFilter;
use crate::decode::DecodedImage;

const FILL: [u8; 3] = [0, 0, 0];

/// Rotate `image` about its center by `angle_degrees`, keeping the canvas size.
pub fn rotate_about_center(
    image: &DecodedImage,
    angle_degrees: f64,
    filter: InterpolationFilter,
) -> DecodedImage {
    if image.is_empty() || angle_degrees % 360.0 == 0.0 {
        return image.clone();
    }

    let (w, h) = (image.width as f64, image.height as f64);
    let (cx, cy) = (w / 2.0, h / 2.0);

    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..image.height {
        let dy = dst_y as f64 + 0.5 - cy;
        for dst_x in 0..image.width {
            let dx = dst_x as f64 + 0.5 - cx;

            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            let pixel = if src_x < 0.0 || src_x >= w || src_y < 0.0 || src_y >= h {
                FILL
            } else {
                // Shift from area coordinates to pixel-index coordinates
                sample(image, src_x - 0.5, src_y - 0.5, filter)
            };

            let idx = image.index(dst_x, dst_y);
            output[idx..idx + 3].copy_from_slice(&pixel);
        }
    }

    DecodedImage::new(image.width, image.height, output)
}

/// Interpolate the image at index coordinates `(x, y)` with a separable kernel.
fn sample(image: &DecodedImage, x: f64, y: f64, filter: InterpolationFilter) -> [u8; 3] {
    let (radius, kernel): (i64, fn(f64) -> f64) = match filter {
        InterpolationFilter::Bicubic => (2, cubic_weight),
        InterpolationFilter::Lanczos3 => (3, |t| lanczos_weight(t, 3.0)),
    };

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    for ky in (y0 - radius + 1)..=(y0 + radius) {
        let wy = kernel(y - ky as f64);
        if wy == 0.0 {
            continue;
        }
        let py = ky.clamp(0, max_y) as u32;

        for kx in (x0 - radius + 1)..=(x0 + radius) {
            let wx = kernel(x - kx as f64);
            if wx == 0.0 {
                continue;
            }
            let px = kx.clamp(0, max_x) as u32;

            let weight = wx * wy;
            let pixel = image.pixel(px, py);
            sum[0] += pixel[0] as f64 * weight;
            sum[1] += pixel[1] as f64 * weight;
            sum[2] += pixel[2] as f64 * weight;
            weight_sum += weight;
        }
    }

    let mut result = [0u8; 3];
    if weight_sum.abs() > f64::EPSILON {
        for i in 0..3 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }
    result
}

/// Keys cubic convolution kernel with a = -0.5.
fn cubic_weight(t: f64) -> f64 {
    const A: f64 = -0.5;
    let t = t.abs();
    if t <= 1.0 {
        ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((A * t - 5.0 * A) * t + 8.0 * A) * t - 4.0 * A
    } else {
        0.0
    }
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Rotation never changes the canvas size.
        #[test]
        fn prop_dimensions_preserved(
            (width, height) in (1u32..=40, 1u32..=40),
            angle in -180.0f64..180.0,
        ) {
            let img = DecodedImage::new(width, height, vec![77u8; (width * height * 3) as usize]);
            let result = rotate_about_center(&img, angle, InterpolationFilter::Bicubic);

            prop_assert_eq!((result.width, result.height), (width, height));
            prop_assert_eq!(result.pixels.len(), img.pixels.len());
        }

        /// Property: A black image stays black for every filter.
        #[test]
        fn prop_black_stays_black(
            (width, height) in (1u32..=30, 1u32..=30),
            angle in -30.0f64..30.0,
        ) {
            let img = DecodedImage::black(width, height);
            for filter in [InterpolationFilter::Bicubic, InterpolationFilter::Lanczos3] {
                let result = rotate_about_center(&img, angle, filter);
                prop_assert!(result.pixels.iter().all(|&v| v == 0));
            }
        }
    }
}
