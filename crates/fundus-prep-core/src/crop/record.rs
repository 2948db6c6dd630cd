//! Crop records and their CSV table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ForegroundCrop;

/// Column order of the crop table.
pub const CROP_TABLE_HEADER: [&str; 7] = [
    "filename",
    "original_width",
    "original_height",
    "left_crop",
    "top_crop",
    "right_crop",
    "bottom_crop",
];

/// One row of the crop table: how much was removed from one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecord {
    pub filename: String,
    pub original_width: u32,
    pub original_height: u32,
    pub left_crop: u32,
    pub top_crop: u32,
    pub right_crop: u32,
    pub bottom_crop: u32,
}

impl CropRecord {
    pub fn new(filename: impl Into<String>, crop: &ForegroundCrop) -> Self {
        Self {
            filename: filename.into(),
            original_width: crop.original_width,
            original_height: crop.original_height,
            left_crop: crop.margins.left,
            top_crop: crop.margins.top,
            right_crop: crop.margins.right,
            bottom_crop: crop.margins.bottom,
        }
    }

    /// Width of the written image.
    pub fn cropped_width(&self) -> u32 {
        self.original_width - self.left_crop - self.right_crop
    }

    /// Height of the written image.
    pub fn cropped_height(&self) -> u32 {
        self.original_height - self.top_crop - self.bottom_crop
    }
}

/// Write `records` as CSV to `path`, header first.
///
/// The header is written even when `records` is empty.
pub fn write_crop_table(records: &[CropRecord], path: &Path) -> crate::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(CROP_TABLE_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
