//! Trait definitions for the encoder module.

use async_trait::async_trait;

use super::error::EncoderError;
use super::types::{EncodeJob, EncodeOutcome};

/// An encoder that can transcode one file to the output format.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Returns the name of this encoder implementation.
    fn name(&self) -> &str;

    /// File extension of the files this encoder produces.
    fn output_extension(&self) -> &str;

    /// Encodes a file according to the job specification.
    ///
    /// If the destination already exists the job is reported as
    /// `SkippedExisting` and the external tool is not invoked.
    async fn encode(&self, job: EncodeJob) -> Result<EncodeOutcome, EncoderError>;

    /// Validates that the encoder is properly configured and ready.
    async fn validate(&self) -> Result<(), EncoderError>;
}
