//! Mock tag prober for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::prober::{ProberError, TagMap, TagProber};

/// Mock implementation of the `TagProber` trait.
///
/// Unknown files probe to an empty tag mapping, mirroring the real prober's
/// behavior for untagged files.
#[derive(Debug, Clone, Default)]
pub struct MockProber {
    tags: Arc<RwLock<HashMap<PathBuf, TagMap>>>,
    reads: Arc<RwLock<Vec<PathBuf>>>,
    next_error: Arc<RwLock<Option<ProberError>>>,
    validation_error: Arc<RwLock<Option<ProberError>>>,
}

impl MockProber {
    /// Creates a new mock prober.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag mapping returned for a specific path.
    pub async fn set_tags(&self, path: impl AsRef<Path>, tags: TagMap) {
        self.tags
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), tags);
    }

    /// Configures the next read to fail with the given error.
    pub async fn set_next_error(&self, error: ProberError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configures validation to fail with the given error.
    pub async fn set_validation_error(&self, error: ProberError) {
        *self.validation_error.write().await = Some(error);
    }

    /// Paths that have been probed, in order.
    pub async fn recorded_reads(&self) -> Vec<PathBuf> {
        self.reads.read().await.clone()
    }

    /// Number of probes performed.
    pub async fn read_count(&self) -> usize {
        self.reads.read().await.len()
    }
}

#[async_trait]
impl TagProber for MockProber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn read_tags(&self, path: &Path) -> Result<TagMap, ProberError> {
        self.reads.write().await.push(path.to_path_buf());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self
            .tags
            .read()
            .await
            .get(path)
            .cloned()
            .unwrap_or_default())
    }

    async fn validate(&self) -> Result<(), ProberError> {
        if let Some(error) = self.validation_error.write().await.take() {
            return Err(error);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tag_map;

    #[tokio::test]
    async fn test_unknown_path_probes_to_empty_tags() {
        let prober = MockProber::new();
        let tags = prober.read_tags(Path::new("/any/file.flac")).await.unwrap();
        assert!(tags.is_empty());
        assert_eq!(prober.read_count().await, 1);
    }

    #[tokio::test]
    async fn test_configured_tags_are_returned() {
        let prober = MockProber::new();
        prober
            .set_tags("/music/a.flac", tag_map(&[("ARTIST", "Foo")]))
            .await;

        let tags = prober.read_tags(Path::new("/music/a.flac")).await.unwrap();
        assert_eq!(tags.get("ARTIST"), Some("Foo"));
    }

    #[tokio::test]
    async fn test_error_injection_is_consumed() {
        let prober = MockProber::new();
        prober
            .set_next_error(ProberError::probe_failed("boom"))
            .await;

        assert!(prober.read_tags(Path::new("/a.flac")).await.is_err());
        assert!(prober.read_tags(Path::new("/a.flac")).await.is_ok());
    }
}
