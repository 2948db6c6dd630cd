//! Directory-level cropping run.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::{crop_to_foreground, CropConfig, CropRecord};
use crate::decode::{decode_file, DecodeError, OrientationPolicy};
use crate::encode::{save_image, EncodeError};
use crate::error::Error;
use crate::fs::{has_supported_extension, list_files, CROP_EXTENSIONS};
use crate::report::{BatchReport, FailureKind, FileOutcome, SkipReason, Stage};

/// Why one file produced no cropped output.
#[derive(Debug, Error)]
pub enum CropFailure {
    #[error("Could not read image: {0}")]
    Decode(#[from] DecodeError),

    #[error("No region above the intensity threshold")]
    NoForeground,

    #[error("Could not write cropped image: {0}")]
    Write(#[from] EncodeError),
}

impl CropFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            CropFailure::Decode(_) => FailureKind::Decode,
            CropFailure::NoForeground => FailureKind::NoForeground,
            CropFailure::Write(_) => FailureKind::Io,
        }
    }
}

/// Everything a cropping run produced.
#[derive(Debug)]
pub struct CropRun {
    pub report: BatchReport,
    /// Rows of the crop table, in processing order.
    pub records: Vec<CropRecord>,
    /// Where the crop table was written. `None` when no supported image
    /// was found.
    pub table: Option<PathBuf>,
}

/// Crop one image file and write the result to `output`.
///
/// EXIF orientation is applied before detection so the recorded dimensions
/// describe the upright image.
pub fn crop_file(input: &Path, output: &Path, config: &CropConfig) -> Result<CropRecord, CropFailure> {
    let image = decode_file(input, OrientationPolicy::ApplyExif)?;
    let crop = crop_to_foreground(&image, config.padding).ok_or(CropFailure::NoForeground)?;
    save_image(&crop.image, output, config.jpeg_quality)?;

    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(CropRecord::new(filename, &crop))
}

/// Crop every supported image in `input_dir` into `output_dir` and write the
/// crop table to `table_path`.
///
/// A missing input directory fails before anything is created. Per-file
/// failures are logged and recorded in the report; they never stop the run.
pub fn crop_directory(
    input_dir: &Path,
    output_dir: &Path,
    table_path: &Path,
    config: &CropConfig,
) -> crate::Result<CropRun> {
    if !input_dir.is_dir() {
        return Err(Error::MissingInputDir(input_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir)?;
    info!("Cropped images will be saved to {}", output_dir.display());

    let mut report = BatchReport::new(Stage::Crop);
    let mut images = Vec::new();
    for name in list_files(input_dir)? {
        if has_supported_extension(&name, CROP_EXTENSIONS) {
            images.push(name);
        } else {
            debug!("Skipping {}: unsupported extension", name);
            report.push(
                name,
                FileOutcome::Skipped {
                    reason: SkipReason::UnsupportedExtension,
                },
            );
        }
    }

    if images.is_empty() {
        warn!("No supported image files found in {}", input_dir.display());
        return Ok(CropRun {
            report,
            records: Vec::new(),
            table: None,
        });
    }

    info!("Found {} images, cropping", images.len());
    let mut records = Vec::with_capacity(images.len());
    for name in images {
        let input = input_dir.join(&name);
        let output = output_dir.join(&name);
        match crop_file(&input, &output, config) {
            Ok(record) => {
                debug!(
                    "Cropped {} to {}x{}",
                    name,
                    record.cropped_width(),
                    record.cropped_height()
                );
                records.push(record);
                report.push(name, FileOutcome::Processed { artifacts: 1 });
            }
            Err(failure) => {
                warn!("Skipping {}: {}", name, failure);
                report.push(
                    name,
                    FileOutcome::Failed {
                        kind: failure.kind(),
                        message: failure.to_string(),
                        artifacts: 0,
                    },
                );
            }
        }
    }

    super::write_crop_table(&records, table_path)?;
    info!(
        "Cropped {} of {} images, crop table saved to {}",
        report.processed(),
        report.processed() + report.failed(),
        table_path.display()
    );

    Ok(CropRun {
        report,
        records,
        table: Some(table_path.to_path_buf()),
    })
}
