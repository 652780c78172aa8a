//! Error types for the prober module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing a file for tags.
#[derive(Debug, Error)]
pub enum ProberError {
    /// FFprobe binary not found.
    #[error("FFprobe not found at path: {path}")]
    FfprobeNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Probing process failed.
    #[error("Failed to probe file: {reason}")]
    ProbeFailed { reason: String },

    /// Probe timed out.
    #[error("Probe timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Failed to parse FFprobe output.
    #[error("Failed to parse probe output: {reason}")]
    ParseError { reason: String },

    /// I/O error during probing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProberError {
    /// Creates a new probe failed error.
    pub fn probe_failed(reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse_error(reason: impl Into<String>) -> Self {
        Self::ParseError {
            reason: reason.into(),
        }
    }
}
