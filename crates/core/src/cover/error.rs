//! Error types for the cover module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during cover-art resolution.
///
/// Callers treat these as warnings: a track whose cover resolution fails is
/// still a successfully converted track.
#[derive(Debug, Error)]
pub enum CoverError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Embedded picture extraction failed.
    #[error("Cover extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    /// Resampling the cover failed.
    #[error("Cover resample failed: {reason}")]
    ResampleFailed { reason: String },

    /// External tool timed out.
    #[error("Cover tool timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error during cover handling.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoverError {
    /// Creates a new extraction failed error.
    pub fn extraction_failed(reason: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new resample failed error.
    pub fn resample_failed(reason: impl Into<String>) -> Self {
        Self::ResampleFailed {
            reason: reason.into(),
        }
    }
}
