//! Output-path construction.
//!
//! Derives the destination directory and filename for a track from its
//! resolved metadata. The mapping is a pure function: identical metadata and
//! output root always produce the identical location.

use std::path::{Path, PathBuf};

use crate::metadata::TrackMetadata;

/// Where one converted track lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    /// Album directory, shared by all tracks of the album.
    pub directory: PathBuf,
    /// Filename within the album directory, extension included.
    pub filename: String,
}

impl OutputLocation {
    /// Full path of the destination file.
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Builds the destination for a track:
/// `<root>/<artist>/<year - album>/<disc-track - title>.<ext>`.
///
/// Each composed field is sanitized on its own, before path assembly, so a
/// separator smuggled inside a tag value can never introduce an extra
/// directory level.
pub fn build(metadata: &TrackMetadata, output_root: &Path, extension: &str) -> OutputLocation {
    let directory = output_root
        .join(sanitize(&metadata.artist))
        .join(sanitize(&format!("{} - {}", metadata.year, metadata.album)));
    let filename = format!(
        "{}.{}",
        sanitize(&format!(
            "{}-{} - {}",
            metadata.disc, metadata.track, metadata.title
        )),
        extension
    );
    OutputLocation {
        directory,
        filename,
    }
}

/// Replaces every path-separator character in a field with an underscore.
pub fn sanitize(field: &str) -> String {
    field.replace(['/', '\\'], "_")
}
