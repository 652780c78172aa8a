//! Mock encoder for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::encoder::{EncodeJob, EncodeOutcome, Encoder, EncoderError};

/// A recorded encode request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedEncode {
    /// The job that was submitted.
    pub job: EncodeJob,
    /// Whether the job was skipped because the destination existed.
    pub skipped: bool,
}

/// Mock implementation of the `Encoder` trait.
///
/// Honors the skip-if-exists contract and actually creates destination
/// files, so rerun/idempotence behavior can be exercised against a real
/// temp directory. Also tracks how many encodes run concurrently, which the
/// pipeline tests use to assert the semaphore bound.
#[derive(Debug, Clone, Default)]
pub struct MockEncoder {
    encodes: Arc<RwLock<Vec<RecordedEncode>>>,
    next_error: Arc<RwLock<Option<EncoderError>>>,
    validation_error: Arc<RwLock<Option<EncoderError>>>,
    fail_all: Arc<RwLock<bool>>,
    delay_ms: Arc<RwLock<u64>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockEncoder {
    /// Creates a new mock encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded encode requests, including skips.
    pub async fn recorded_encodes(&self) -> Vec<RecordedEncode> {
        self.encodes.read().await.clone()
    }

    /// Number of encode requests received, including skips.
    pub async fn encode_call_count(&self) -> usize {
        self.encodes.read().await.len()
    }

    /// Number of encodes that actually produced a file.
    pub async fn encoded_count(&self) -> usize {
        self.encodes
            .read()
            .await
            .iter()
            .filter(|e| !e.skipped)
            .count()
    }

    /// Configures the next encode to fail with the given error.
    pub async fn set_next_error(&self, error: EncoderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configures validation to fail with the given error.
    pub async fn set_validation_error(&self, error: EncoderError) {
        *self.validation_error.write().await = Some(error);
    }

    /// Makes every encode fail until disabled.
    pub async fn set_fail_all(&self, fail: bool) {
        *self.fail_all.write().await = fail;
    }

    /// Sets a simulated encode duration.
    pub async fn set_encode_delay(&self, delay: Duration) {
        *self.delay_ms.write().await = delay.as_millis() as u64;
    }

    /// Highest number of encodes observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Encoder for MockEncoder {
    fn name(&self) -> &str {
        "mock"
    }

    fn output_extension(&self) -> &str {
        "opus"
    }

    async fn encode(&self, job: EncodeJob) -> Result<EncodeOutcome, EncoderError> {
        if let Some(error) = self.next_error.write().await.take() {
            self.encodes.write().await.push(RecordedEncode {
                job,
                skipped: false,
            });
            return Err(error);
        }

        if job.output_path.exists() {
            self.encodes.write().await.push(RecordedEncode {
                job,
                skipped: true,
            });
            return Ok(EncodeOutcome::SkippedExisting);
        }

        if *self.fail_all.read().await {
            self.encodes.write().await.push(RecordedEncode {
                job,
                skipped: false,
            });
            return Err(EncoderError::encode_failed("mock failure", None));
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay_ms = *self.delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let result = tokio::fs::write(&job.output_path, b"opus").await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result?;

        self.encodes.write().await.push(RecordedEncode {
            job,
            skipped: false,
        });

        Ok(EncodeOutcome::Encoded {
            output_size_bytes: 4,
            duration_ms: delay_ms,
        })
    }

    async fn validate(&self) -> Result<(), EncoderError> {
        if let Some(error) = self.validation_error.write().await.take() {
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn job(temp: &TempDir, name: &str) -> EncodeJob {
        EncodeJob {
            input_path: PathBuf::from("/input/test.flac"),
            output_path: temp.path().join(name),
        }
    }

    #[tokio::test]
    async fn test_encode_creates_destination() {
        let temp = TempDir::new().unwrap();
        let encoder = MockEncoder::new();

        let outcome = encoder.encode(job(&temp, "out.opus")).await.unwrap();
        assert!(matches!(outcome, EncodeOutcome::Encoded { .. }));
        assert!(temp.path().join("out.opus").exists());
        assert_eq!(encoder.encoded_count().await, 1);
    }

    #[tokio::test]
    async fn test_encode_skips_existing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("out.opus"), b"old").unwrap();
        let encoder = MockEncoder::new();

        let outcome = encoder.encode(job(&temp, "out.opus")).await.unwrap();
        assert_eq!(outcome, EncodeOutcome::SkippedExisting);
        assert_eq!(encoder.encoded_count().await, 0);
        assert_eq!(encoder.encode_call_count().await, 1);
    }

    #[tokio::test]
    async fn test_fail_all() {
        let temp = TempDir::new().unwrap();
        let encoder = MockEncoder::new();
        encoder.set_fail_all(true).await;

        let result = encoder.encode(job(&temp, "out.opus")).await;
        assert!(result.is_err());
        assert!(!temp.path().join("out.opus").exists());
    }
}
