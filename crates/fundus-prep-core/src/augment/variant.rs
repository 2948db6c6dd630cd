//! The six derived variants of one source image.

use rand::Rng;

use super::config::{AugmentConfig, MIN_ROTATION_DEGREES};
use crate::decode::DecodedImage;
use crate::transform::{
    apply_combo, apply_zoom_in, rotate_about_center, InterpolationFilter, TransformError,
};

/// Number of derived images per source, not counting the copy.
pub const VARIANTS_PER_SOURCE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Rotate,
    Zoom,
    Combo,
}

/// One derived image: its transform and sampled parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentationVariant {
    pub kind: VariantKind,
    /// 1 or 2, the position within its kind.
    pub index: u8,
    /// Degrees, positive = counter-clockwise. Set for rotate and combo.
    pub angle: Option<f64>,
    /// Set for zoom and combo.
    pub zoom: Option<f64>,
}

impl AugmentationVariant {
    pub fn rotate(index: u8, angle: f64) -> Self {
        Self {
            kind: VariantKind::Rotate,
            index,
            angle: Some(angle),
            zoom: None,
        }
    }

    pub fn zoom(index: u8, factor: f64) -> Self {
        Self {
            kind: VariantKind::Zoom,
            index,
            angle: None,
            zoom: Some(factor),
        }
    }

    pub fn combo(index: u8, angle: f64, factor: f64) -> Self {
        Self {
            kind: VariantKind::Combo,
            index,
            angle: Some(angle),
            zoom: Some(factor),
        }
    }

    /// Output filename for a source split into `base` and `ext`.
    ///
    /// Angles and percentages are truncated toward zero, so -7.9 degrees
    /// reads `-7deg` and 1.169 reads `116pct`. Combo names carry no index.
    pub fn file_name(&self, base: &str, ext: &str) -> String {
        let deg = self.angle.map(|a| a.trunc() as i64).unwrap_or(0);
        let pct = self.zoom.map(|z| (z * 100.0).trunc() as i64).unwrap_or(100);
        match self.kind {
            VariantKind::Rotate => format!("{base}_rot_{}_{deg}deg{ext}", self.index),
            VariantKind::Zoom => format!("{base}_zoom_{}_{pct}pct{ext}", self.index),
            VariantKind::Combo => format!("{base}_combo_{deg}deg_{pct}pct{ext}"),
        }
    }

    /// Produce this variant from `image`. The output has the source size.
    pub fn render(&self, image: &DecodedImage) -> Result<DecodedImage, TransformError> {
        let angle = self.angle.unwrap_or(0.0);
        let zoom = self.zoom.unwrap_or(1.0);
        match self.kind {
            VariantKind::Rotate => Ok(rotate_about_center(
                image,
                angle,
                InterpolationFilter::Bicubic,
            )),
            VariantKind::Zoom => apply_zoom_in(image, zoom),
            VariantKind::Combo => apply_combo(image, angle, zoom),
        }
    }
}

/// Draw the parameters of all six variants from `rng`.
///
/// Draw order is fixed so a seeded generator reproduces a run: rotate 1,
/// rotate 2, zoom 1, zoom 2, combo 1 angle, combo 1 zoom, combo 2 angle,
/// combo 2 zoom. First angles are positive, second angles negative.
///
/// `config` must have passed [`AugmentConfig::validate`].
pub fn sample_variants<R: Rng + ?Sized>(
    rng: &mut R,
    config: &AugmentConfig,
) -> [AugmentationVariant; VARIANTS_PER_SOURCE] {
    let r = config.rotation_range;
    let (zmin, zmax) = config.zoom_range;

    let rot1 = rng.random_range(MIN_ROTATION_DEGREES..=r);
    let rot2 = rng.random_range(-r..=-MIN_ROTATION_DEGREES);
    let zoom1 = rng.random_range(zmin..=zmax);
    let zoom2 = rng.random_range(zmin..=zmax);
    let combo_rot1 = rng.random_range(MIN_ROTATION_DEGREES..=r);
    let combo_zoom1 = rng.random_range(zmin..=zmax);
    let combo_rot2 = rng.random_range(-r..=-MIN_ROTATION_DEGREES);
    let combo_zoom2 = rng.random_range(zmin..=zmax);

    [
        AugmentationVariant::rotate(1, rot1),
        AugmentationVariant::rotate(2, rot2),
        AugmentationVariant::zoom(1, zoom1),
        AugmentationVariant::zoom(2, zoom2),
        AugmentationVariant::combo(1, combo_rot1, combo_zoom1),
        AugmentationVariant::combo(2, combo_rot2, combo_zoom2),
    ]
}
