//! Boundary cropping of fundus photographs.
//!
//! [`crop_to_foreground`] finds the largest bright region, crops the image
//! to its bounding box plus padding, and blackens pure-white artifacts left
//! in the margin. [`crop_directory`] runs it over a directory and writes one
//! [`CropRecord`] per cropped image to a CSV table.

mod pipeline;
mod record;

use serde::{Deserialize, Serialize};

use crate::boundary::{find_foreground_bounds, BoundingRect};
use crate::decode::DecodedImage;
use crate::encode::CROP_JPEG_QUALITY;
use crate::transform::crop_region;

pub use pipeline::{crop_directory, crop_file, CropFailure, CropRun};
pub use record::{write_crop_table, CropRecord, CROP_TABLE_HEADER};

/// Settings for the cropping stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropConfig {
    /// Extra pixels kept around the detected region on every side.
    pub padding: u32,
    /// Quality for JPEG outputs.
    pub jpeg_quality: u8,
}

impl CropConfig {
    pub fn with_padding(padding: u32) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            padding: 0,
            jpeg_quality: CROP_JPEG_QUALITY,
        }
    }
}

/// Crop window in pixel coordinates, half-open: `[x1, x2) x [y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropWindow {
    /// Grow `rect` by `padding` on every side, clamped to `width x height`.
    pub fn around(rect: BoundingRect, padding: u32, width: u32, height: u32) -> Self {
        Self {
            x1: rect.x.saturating_sub(padding),
            y1: rect.y.saturating_sub(padding),
            x2: rect.right().saturating_add(padding).min(width),
            y2: rect.bottom().saturating_add(padding).min(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// Pixels removed from each side of the original image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CropMargins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropMargins {
    pub fn from_window(window: &CropWindow, width: u32, height: u32) -> Self {
        Self {
            left: window.x1,
            top: window.y1,
            right: width - window.x2,
            bottom: height - window.y2,
        }
    }
}

/// Result of a successful boundary crop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForegroundCrop {
    pub image: DecodedImage,
    pub original_width: u32,
    pub original_height: u32,
    pub window: CropWindow,
    pub margins: CropMargins,
}

/// Crop `image` to its largest foreground region plus `padding`.
///
/// Returns `None` when no pixel is brighter than the foreground threshold.
/// Pure-white pixels in the result are replaced with black.
pub fn crop_to_foreground(image: &DecodedImage, padding: u32) -> Option<ForegroundCrop> {
    let rect = find_foreground_bounds(image)?;
    let window = CropWindow::around(rect, padding, image.width, image.height);

    // The window contains `rect`, which lies inside the image
    let mut cropped = crop_region(image, window.x1, window.y1, window.width(), window.height()).ok()?;
    blacken_white_pixels(&mut cropped);

    Some(ForegroundCrop {
        image: cropped,
        original_width: image.width,
        original_height: image.height,
        margins: CropMargins::from_window(&window, image.width, image.height),
        window,
    })
}

/// Replace every (255, 255, 255) pixel with (0, 0, 0). Returns the count.
pub fn blacken_white_pixels(image: &mut DecodedImage) -> usize {
    let mut replaced = 0;
    for px in image.pixels.chunks_exact_mut(3) {
        if *px == [255, 255, 255] {
            px.fill(0);
            replaced += 1;
        }
    }
    replaced
}


// ============================================================================
// Property-Based Tests
// ============================================================================
