//! fundus-prep core - dataset preparation for retinal fundus photographs
//!
//! This crate provides the two preprocessing stages used to build a training
//! set from raw fundus images:
//!
//! - [`crop`]: trims the dark surround down to the largest bright region and
//!   records how much was removed from each side
//! - [`augment`]: copies each cropped image forward and adds six randomized
//!   rotation and zoom derivatives
//!
//! The stages hand off through a directory and share the decode, encode and
//! transform layers.

pub mod augment;
pub mod boundary;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod exclusion;
pub mod fs;
pub mod luminance;
pub mod report;
pub mod transform;

pub use augment::{augment_directory, AugmentConfig};
pub use crop::{crop_directory, crop_to_foreground, CropConfig, CropRecord};
pub use decode::DecodedImage;
pub use error::{Error, Result};
pub use exclusion::ExclusionSet;
pub use report::BatchReport;
pub use transform::InterpolationFilter;
