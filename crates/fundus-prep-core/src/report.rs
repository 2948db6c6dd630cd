//! Per-file outcomes collected into a batch report.
//!
//! Both stages push one [`FileReport`] per directory entry they look at, so a
//! run can be summarized in the log and also checked by a script through the
//! JSON form.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

/// Which pipeline produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Crop,
    Augment,
}

/// Why a file was deliberately not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedExtension,
    Excluded,
}

/// Failure taxonomy for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The file could not be read as an image.
    Decode,
    /// No foreground region above the intensity threshold.
    NoForeground,
    /// Copy or write failed.
    Io,
    /// A geometric transform rejected its input.
    Transform,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Decode => "decode failure",
            FailureKind::NoForeground => "no foreground detected",
            FailureKind::Io => "I/O failure",
            FailureKind::Transform => "transform failure",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file was handled; `artifacts` files were written for it.
    Processed { artifacts: usize },
    Skipped { reason: SkipReason },
    /// Processing stopped for this file. `artifacts` counts what was written
    /// before the failure; partial output is kept.
    Failed {
        kind: FailureKind,
        message: String,
        artifacts: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub filename: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub stage: Stage,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, filename: impl Into<String>, outcome: FileOutcome) {
        self.files.push(FileReport {
            filename: filename.into(),
            outcome,
        });
    }

    pub fn processed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Processed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Total files written across all entries, including partial output.
    pub fn artifacts(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.outcome {
                FileOutcome::Processed { artifacts } | FileOutcome::Failed { artifacts, .. } => {
                    artifacts
                }
                FileOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    /// Outcome recorded for `filename`, if any.
    pub fn outcome(&self, filename: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|f| f.filename == filename)
            .map(|f| &f.outcome)
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> crate::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}
