//! Geometric transforms used by both pipeline stages.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - Crop windows are in whole pixels
//! - Rotation angles are in degrees, positive = counter-clockwise on screen
//! - Pixel centers sit at `(x + 0.5, y + 0.5)`; rotation is about
//!   `(width / 2, height / 2)`
//!
//! # Transform Order
//!
//! A combo derivative is rotation followed by zoom-in on the rotated canvas,
//! so the zoom also trims the black corners introduced by the rotation.

mod crop;
mod resize;
mod rotation;
mod zoom;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use crop::crop_region;
pub use resize::resize;
pub use rotation::rotate_about_center;
pub use zoom::{apply_combo, apply_zoom_in, zoom_window};

/// Interpolation filter for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// 4x4 Keys cubic (a = -0.5).
    #[default]
    Bicubic,
    /// 6x6 windowed sinc, sharpest.
    Lanczos3,
}

impl InterpolationFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            InterpolationFilter::Bicubic => image::imageops::FilterType::CatmullRom,
            InterpolationFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Errors raised by geometric transforms.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Region {width}x{height} at ({x}, {y}) exceeds image bounds {image_width}x{image_height}")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Zoom factor must be a finite ratio >= 1.0, got {0}")]
    InvalidZoomFactor(f64),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferMismatch { width: u32, height: u32 },
}
