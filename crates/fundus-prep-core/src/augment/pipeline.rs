//! Directory-level augmentation run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::AugmentConfig;
use super::variant::sample_variants;
use crate::decode::{decode_file, DecodeError, OrientationPolicy};
use crate::encode::{save_image, EncodeError};
use crate::error::Error;
use crate::exclusion::ExclusionSet;
use crate::fs::{
    copy_into, has_supported_extension, list_files, split_extension, AUGMENT_EXTENSIONS,
};
use crate::report::{BatchReport, FailureKind, FileOutcome, SkipReason, Stage};
use crate::transform::TransformError;

#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("Could not copy original: {0}")]
    Copy(#[source] io::Error),

    #[error("Could not read image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Could not build {name}: {source}")]
    Transform {
        name: String,
        #[source]
        source: TransformError,
    },

    #[error("Could not write {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: EncodeError,
    },
}

impl AugmentError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AugmentError::Copy(_) | AugmentError::Write { .. } => FailureKind::Io,
            AugmentError::Decode(_) => FailureKind::Decode,
            AugmentError::Transform { .. } => FailureKind::Transform,
        }
    }
}

/// A source whose processing stopped early. Files in `written` stay on disk.
#[derive(Debug)]
pub struct AugmentFailure {
    pub error: AugmentError,
    pub written: Vec<PathBuf>,
}

/// Copy `input` into `output_dir` and write its six variants next to it.
///
/// Returns every path written, the copy first. Variant parameters are drawn
/// from `rng` only once the source has decoded.
pub fn augment_file<R: Rng + ?Sized>(
    input: &Path,
    output_dir: &Path,
    config: &AugmentConfig,
    rng: &mut R,
) -> Result<Vec<PathBuf>, AugmentFailure> {
    let mut written = Vec::new();

    match copy_into(input, output_dir) {
        Ok(dest) => written.push(dest),
        Err(err) => {
            return Err(AugmentFailure {
                error: AugmentError::Copy(err),
                written,
            })
        }
    }

    let image = match decode_file(input, OrientationPolicy::Ignore) {
        Ok(image) => image,
        Err(err) => {
            return Err(AugmentFailure {
                error: err.into(),
                written,
            })
        }
    };

    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (base, ext) = split_extension(&filename);

    for variant in sample_variants(rng, config) {
        let name = variant.file_name(base, ext);
        let derived = match variant.render(&image) {
            Ok(derived) => derived,
            Err(source) => {
                return Err(AugmentFailure {
                    error: AugmentError::Transform { name, source },
                    written,
                })
            }
        };

        let path = output_dir.join(&name);
        if let Err(source) = save_image(&derived, &path, config.jpeg_quality) {
            return Err(AugmentFailure {
                error: AugmentError::Write { name, source },
                written,
            });
        }
        written.push(path);
    }

    Ok(written)
}

/// Augment every eligible image in `input_dir` into `output_dir`.
///
/// Excluded filenames are checked first and never opened. Per-file failures
/// are logged and recorded; they never stop the run.
pub fn augment_directory<R: Rng + ?Sized>(
    input_dir: &Path,
    output_dir: &Path,
    config: &AugmentConfig,
    exclusions: &ExclusionSet,
    rng: &mut R,
) -> crate::Result<BatchReport> {
    config.validate()?;
    if !input_dir.is_dir() {
        return Err(Error::MissingInputDir(input_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir)?;
    info!("Augmented images will be saved to {}", output_dir.display());

    let mut report = BatchReport::new(Stage::Augment);
    for name in list_files(input_dir)? {
        if exclusions.contains(&name) {
            debug!("Skipping {}: in exclusion set", name);
            report.push(
                name,
                FileOutcome::Skipped {
                    reason: SkipReason::Excluded,
                },
            );
            continue;
        }
        if !has_supported_extension(&name, AUGMENT_EXTENSIONS) {
            debug!("Skipping {}: unsupported extension", name);
            report.push(
                name,
                FileOutcome::Skipped {
                    reason: SkipReason::UnsupportedExtension,
                },
            );
            continue;
        }

        match augment_file(&input_dir.join(&name), output_dir, config, rng) {
            Ok(written) => {
                debug!("Augmented {} ({} files)", name, written.len());
                report.push(
                    name,
                    FileOutcome::Processed {
                        artifacts: written.len(),
                    },
                );
            }
            Err(failure) => {
                warn!("Failed to augment {}: {}", name, failure.error);
                report.push(
                    name,
                    FileOutcome::Failed {
                        kind: failure.error.kind(),
                        message: failure.error.to_string(),
                        artifacts: failure.written.len(),
                    },
                );
            }
        }
    }

    info!(
        "Augmented {} images ({} skipped, {} failed), {} files written",
        report.processed(),
        report.skipped(),
        report.failed(),
        report.artifacts()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn write_fixture(path: &Path, w: u32, h: u32) {
        let img = RgbImage::from_fn(w, h, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(path).unwrap();
    }

    fn sorted_names(dir: &Path) -> Vec<String> {
        list_files(dir).unwrap()
    }

    fn run(input: &Path, output: &Path, exclusions: &ExclusionSet) -> BatchReport {
        let mut rng = StdRng::seed_from_u64(2024);
        augment_directory(input, output, &AugmentConfig::default(), exclusions, &mut rng).unwrap()
    }

    #[test]
    fn test_seven_outputs_same_size() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        let output = root.path().join("out");
        fs::create_dir(&input).unwrap();
        write_fixture(&input.join("a.png"), 48, 36);

        let report = run(&input, &output, &ExclusionSet::new());

        let names = sorted_names(&output);
        assert_eq!(names.len(), 7);
        for name in &names {
            let img = image::open(output.join(name)).unwrap();
            assert_eq!((img.width(), img.height()), (48, 36), "{name}");
        }
        assert_eq!(report.outcome("a.png"), Some(&FileOutcome::Processed { artifacts: 7 }));
    }

    #[test]
    fn test_output_names() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        let output = root.path().join("out");
        fs::create_dir(&input).unwrap();
        write_fixture(&input.join("a.png"), 32, 32);

        run(&input, &output, &ExclusionSet::new());

        let names = sorted_names(&output);
        let count = |prefix: &str, suffix: &str| {
            names
                .iter()
                .filter(|n| n.starts_with(prefix) && n.ends_with(suffix))
                .count()
        };
        assert!(names.contains(&"a.png".to_string()));
        assert_eq!(count("a_rot_1_", "deg.png"), 1);
        assert_eq!(count("a_rot_2_-", "deg.png"), 1);
        assert_eq!(count("a_zoom_1_", "pct.png"), 1);
        assert_eq!(count("a_zoom_2_", "pct.png"), 1);
        assert_eq!(count("a_combo_", "pct.png"), 2);

        for name in names.iter().filter(|n| n.starts_with("a_rot_")) {
            let deg: i64 = name
                .trim_end_matches("deg.png")
                .rsplit('_')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert!((5..=15).contains(&deg.abs()), "{name}");
        }
    }

    #[test]
    fn test_copy_is_verbatim() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        let output = root.path().join("out");
        fs::create_dir(&input).unwrap();
        write_fixture(&input.join("a.png"), 20, 20);

        run(&input, &output, &ExclusionSet::new());

        assert_eq!(
            fs::read(input.join("a.png")).unwrap(),
            fs::read(output.join("a.png")).unwrap()
        );
    }

    #[test]
    fn test_excluded_file_produces_nothing() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        let output = root.path().join("out");
        fs::create_dir(&input).unwrap();
        write_fixture(&input.join("a.png"), 16, 16);
        // Excluded files are never opened, so garbage content is fine
        fs::write(input.join("val.png"), b"not an image").unwrap();

        let exclusions: ExclusionSet = ["val.png"].into_iter().collect();
        let report = run(&input, &output, &exclusions);

        assert!(sorted_names(&output).iter().all(|n| !n.starts_with("val")));
        assert_eq!(
            report.outcome("val.png"),
            Some(&FileOutcome::Skipped {
                reason: SkipReason::Excluded
            })
        );
        assert_eq!(report.processed(), 1);
        assert_eq!(report.failed(), 0);
    }

    #[test]
    fn test_decode_failure_keeps_copy() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        let output = root.path().join("out");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("bad.jpg"), b"garbage").unwrap();
        write_fixture(&input.join("good.png"), 16, 16);

        let report = run(&input, &output, &ExclusionSet::new());

        assert!(output.join("bad.jpg").exists());
        assert!(matches!(
            report.outcome("bad.jpg"),
            Some(FileOutcome::Failed {
                kind: FailureKind::Decode,
                artifacts: 1,
                ..
            })
        ));
        assert_eq!(report.outcome("good.png"), Some(&FileOutcome::Processed { artifacts: 7 }));
        assert_eq!(sorted_names(&output).len(), 8);
    }

    #[test]
    fn test_output_dir_same_as_input_keeps_sources() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("images");
        fs::create_dir(&dir).unwrap();
        write_fixture(&dir.join("a.png"), 16, 16);
        let before = fs::read(dir.join("a.png")).unwrap();

        let report = run(&dir, &dir, &ExclusionSet::new());

        assert_eq!(fs::read(dir.join("a.png")).unwrap(), before);
        assert!(matches!(
            report.outcome("a.png"),
            Some(FileOutcome::Failed {
                kind: FailureKind::Io,
                artifacts: 0,
                ..
            })
        ));
        assert_eq!(sorted_names(&dir), vec!["a.png"]);
    }

    #[test]
    fn test_unsupported_extensions_skipped() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        let output = root.path().join("out");
        fs::create_dir(&input).unwrap();
        write_fixture(&input.join("a.tif"), 8, 8);
        fs::write(input.join("notes.txt"), b"x").unwrap();

        let report = run(&input, &output, &ExclusionSet::new());

        assert_eq!(report.skipped(), 2);
        assert!(sorted_names(&output).is_empty());
    }

    #[test]
    fn test_missing_input_dir() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("out");
        let mut rng = StdRng::seed_from_u64(0);

        let err = augment_directory(
            &root.path().join("missing"),
            &output,
            &AugmentConfig::default(),
            &ExclusionSet::new(),
            &mut rng,
        )
        .unwrap_err();

        assert!(matches!(err, Error::MissingInputDir(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("out");
        let config = AugmentConfig {
            rotation_range: 2.0,
            ..AugmentConfig::default()
        };

        let err = augment_directory(
            root.path(),
            &output,
            &config,
            &ExclusionSet::new(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_seeded_runs_match() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        fs::create_dir(&input).unwrap();
        write_fixture(&input.join("a.png"), 24, 24);
        write_fixture(&input.join("b.png"), 24, 24);

        let out1 = root.path().join("out1");
        let out2 = root.path().join("out2");
        run(&input, &out1, &ExclusionSet::new());
        run(&input, &out2, &ExclusionSet::new());

        assert_eq!(sorted_names(&out1), sorted_names(&out2));
    }

    #[test]
    fn test_augment_file_reports_paths() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("eye.left.JPG");
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();
        let img = RgbImage::from_pixel(16, 12, Rgb([90, 40, 20]));
        img.save_with_format(&src, image::ImageFormat::Jpeg).unwrap();

        let written = augment_file(
            &src,
            &out,
            &AugmentConfig::default(),
            &mut StdRng::seed_from_u64(9),
        )
        .unwrap();

        assert_eq!(written.len(), 7);
        assert_eq!(written[0], out.join("eye.left.JPG"));
        assert!(written[1..]
            .iter()
            .all(|p| p.to_string_lossy().ends_with(".JPG") && p.exists()));
    }
}
