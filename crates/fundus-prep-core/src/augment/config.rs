//! Augmentation parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::AUGMENT_JPEG_QUALITY;

/// Smallest magnitude a sampled rotation angle may have, in degrees.
pub const MIN_ROTATION_DEGREES: f64 = 5.0;

/// Rejected augmentation settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Rotation range must be finite and at least {MIN_ROTATION_DEGREES} degrees, got {0}")]
    RotationRange(f64),

    #[error("Zoom factors must be finite, got ({min}, {max})")]
    NonFiniteZoom { min: f64, max: f64 },

    #[error("Minimum zoom factor must be at least 1.0, got {0}")]
    ZoomBelowOne(f64),

    #[error("Minimum zoom factor {min} exceeds maximum {max}")]
    ZoomRangeInverted { min: f64, max: f64 },
}

/// Settings for the augmentation stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Largest rotation magnitude in degrees. Angles are drawn from
    /// `[5, rotation_range]` and `[-rotation_range, -5]`.
    pub rotation_range: f64,
    /// Inclusive `(min, max)` zoom factors.
    pub zoom_range: (f64, f64),
    /// Quality for JPEG outputs.
    pub jpeg_quality: u8,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            rotation_range: 15.0,
            zoom_range: (1.05, 1.17),
            jpeg_quality: AUGMENT_JPEG_QUALITY,
        }
    }
}

impl AugmentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = self.rotation_range;
        if !r.is_finite() || r < MIN_ROTATION_DEGREES {
            return Err(ConfigError::RotationRange(r));
        }

        let (min, max) = self.zoom_range;
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFiniteZoom { min, max });
        }
        if min < 1.0 {
            return Err(ConfigError::ZoomBelowOne(min));
        }
        if min > max {
            return Err(ConfigError::ZoomRangeInverted { min, max });
        }
        Ok(())
    }
}
