//! Types for the pipeline module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One lossless input file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTrack {
    /// Path to the source file.
    pub path: PathBuf,
}

impl SourceTrack {
    /// Creates a track for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Stage of the per-track pipeline that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Tag probing.
    Probe,
    /// Destination directory creation.
    Prepare,
    /// Audio encoding.
    Encode,
}

impl fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe => write!(f, "probe"),
            Self::Prepare => write!(f, "prepare"),
            Self::Encode => write!(f, "encode"),
        }
    }
}

/// Outcome of processing one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The track was encoded to its destination.
    Converted,
    /// The destination already existed; nothing was reprocessed.
    SkippedExisting,
    /// A pipeline stage failed; the rest of the batch is unaffected.
    Failed {
        stage: ConversionStage,
        reason: String,
    },
}

impl TrackOutcome {
    /// Whether this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Aggregate result of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Number of tracks discovered.
    pub total: usize,
    /// Tracks encoded in this run.
    pub converted: usize,
    /// Tracks skipped because their destination already existed.
    pub skipped: usize,
    /// Tracks that failed.
    pub failed: usize,
    /// Wall-clock batch duration in milliseconds.
    pub duration_ms: u64,
}

impl BatchSummary {
    /// Whether every discovered track failed.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.failed == self.total
    }
}

/// How per-file failures map to the batch result.
///
/// `Lenient` reproduces the historical behavior: per-file failures are
/// logged and the batch still succeeds. The stricter policies turn total or
/// any failure into a batch error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Per-file failures never fail the batch.
    #[default]
    Lenient,
    /// Fail the batch when every track failed.
    FailOnTotalFailure,
    /// Fail the batch when any track failed.
    FailOnAnyFailure,
}

impl ExitPolicy {
    /// Whether a finished batch counts as successful under this policy.
    pub fn accepts(&self, summary: &BatchSummary) -> bool {
        match self {
            Self::Lenient => true,
            Self::FailOnTotalFailure => !summary.all_failed(),
            Self::FailOnAnyFailure => summary.failed == 0,
        }
    }
}
