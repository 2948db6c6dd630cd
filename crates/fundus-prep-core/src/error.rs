//! Crate-level error type and `Result` alias.
//!
//! Per-file problems inside a batch are reported through
//! [`crate::report::FileOutcome`] and never surface here; this type is for
//! failures that stop a whole run before or after the per-file loop.
use std::path::PathBuf;

use thiserror::Error;

use crate::augment::ConfigError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory '{}' does not exist or is not a directory", .0.display())]
    MissingInputDir(PathBuf),

    #[error("Invalid augmentation settings: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_message_names_path() {
        let err = Error::MissingInputDir(PathBuf::from("csdi_datasets/original_images"));
        assert_eq!(
            err.to_string(),
            "Input directory 'csdi_datasets/original_images' does not exist or is not a directory"
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
