//! Trait definitions for the prober module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ProberError;
use super::types::TagMap;

/// A prober that can extract a tag mapping from one media file.
#[async_trait]
pub trait TagProber: Send + Sync {
    /// Returns the name of this prober implementation.
    fn name(&self) -> &str;

    /// Reads the tag mapping of a file.
    ///
    /// A file that carries no tags at all yields an empty mapping; only an
    /// actual invocation or parse failure is an error.
    async fn read_tags(&self, path: &Path) -> Result<TagMap, ProberError>;

    /// Validates that the prober is properly configured and ready.
    async fn validate(&self) -> Result<(), ProberError>;
}
