//! Image encoding for pipeline outputs.
//!
//! Outputs keep the source filename, so the format is always taken from the
//! extension. Only JPEG is lossy; its quality is chosen per stage:
//! [`CROP_JPEG_QUALITY`] for cropped images and [`AUGMENT_JPEG_QUALITY`] for
//! augmentation derivatives.

mod writer;

pub use writer::{save_image, EncodeError};

/// JPEG quality for cropped images.
pub const CROP_JPEG_QUALITY: u8 = 95;

/// JPEG quality for augmentation derivatives.
pub const AUGMENT_JPEG_QUALITY: u8 = 75;
