//! Trait definitions for the cover module.

use async_trait::async_trait;
use std::path::Path;

use super::error::CoverError;
use super::types::CoverOutcome;

/// A resolver that can obtain album artwork for one converted track.
#[async_trait]
pub trait CoverResolver: Send + Sync {
    /// Returns the name of this resolver implementation.
    fn name(&self) -> &str;

    /// Resolves cover art for the album directory a track was converted into.
    ///
    /// `source` is the original audio file (used for sibling scanning and
    /// embedded-picture extraction); `album_dir` is the output directory the
    /// track landed in. Expected to be called only after the track's encode
    /// has succeeded.
    async fn resolve(&self, source: &Path, album_dir: &Path) -> Result<CoverOutcome, CoverError>;
}
