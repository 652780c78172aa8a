//! Mock cover resolver for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::cover::{CoverError, CoverOutcome, CoverResolver};

/// Mock implementation of the `CoverResolver` trait.
#[derive(Debug, Clone)]
pub struct MockCoverResolver {
    calls: Arc<RwLock<Vec<(PathBuf, PathBuf)>>>,
    outcome: Arc<RwLock<CoverOutcome>>,
    next_error: Arc<RwLock<Option<CoverError>>>,
}

impl Default for MockCoverResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCoverResolver {
    /// Creates a new mock resolver that reports `NotFound`.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(RwLock::new(Vec::new())),
            outcome: Arc::new(RwLock::new(CoverOutcome::NotFound)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Sets the outcome returned by subsequent calls.
    pub async fn set_outcome(&self, outcome: CoverOutcome) {
        *self.outcome.write().await = outcome;
    }

    /// Configures the next call to fail with the given error.
    pub async fn set_next_error(&self, error: CoverError) {
        *self.next_error.write().await = Some(error);
    }

    /// Recorded `(source, album_dir)` pairs, in call order.
    pub async fn recorded_calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl CoverResolver for MockCoverResolver {
    fn name(&self) -> &str {
        "mock"
    }

    async fn resolve(&self, source: &Path, album_dir: &Path) -> Result<CoverOutcome, CoverError> {
        self.calls
            .write()
            .await
            .push((source.to_path_buf(), album_dir.to_path_buf()));

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(*self.outcome.read().await)
    }
}
