//! Randomized geometric augmentation of cropped fundus images.
//!
//! Every eligible source is copied forward unchanged and joined by six
//! derivatives: two rotations, two center zooms and two rotate-then-zoom
//! combos. Parameters are drawn from an injected [`rand::Rng`], so a seeded
//! generator reproduces a run exactly.
//!
//! Filenames encode the sampled parameters:
//!
//! | Variant | Name |
//! |---------|------|
//! | rotate  | `{base}_rot_{i}_{deg}deg{ext}` |
//! | zoom    | `{base}_zoom_{i}_{pct}pct{ext}` |
//! | combo   | `{base}_combo_{deg}deg_{pct}pct{ext}` |

mod config;
mod pipeline;
mod variant;

pub use config::{AugmentConfig, ConfigError, MIN_ROTATION_DEGREES};
pub use pipeline::{augment_directory, augment_file, AugmentError, AugmentFailure};
pub use variant::{sample_variants, AugmentationVariant, VariantKind, VARIANTS_PER_SOURCE};
