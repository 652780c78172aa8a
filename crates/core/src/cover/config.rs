//! Configuration for the cover module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for cover-art resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverConfig {
    /// Path to ffmpeg binary (used for extraction and resampling).
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Name of the cover file written into each album directory.
    #[serde(default = "default_output_name")]
    pub output_name: String,

    /// Conventional sibling filenames scanned for, in priority order.
    #[serde(default = "default_sibling_names")]
    pub sibling_names: Vec<String>,

    /// Width covers are resampled to, preserving aspect ratio.
    #[serde(default = "default_target_width")]
    pub target_width: u32,

    /// Timeout for a single extraction or resample in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_output_name() -> String {
    "cover.jpg".to_string()
}

fn default_sibling_names() -> Vec<String> {
    [
        "cover.jpg",
        "folder.jpg",
        "Cover.jpg",
        "Folder.jpg",
        "cover.png",
        "folder.png",
        "albumart.jpg",
        "front.jpg",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_target_width() -> u32 {
    500
}

fn default_timeout() -> u64 {
    60
}

impl Default for CoverConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            output_name: default_output_name(),
            sibling_names: default_sibling_names(),
            target_width: default_target_width(),
            timeout_secs: default_timeout(),
        }
    }
}

impl CoverConfig {
    /// Creates a new config with a custom ffmpeg path.
    pub fn with_path(ffmpeg_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ..Default::default()
        }
    }

    /// Sets the resample target width.
    pub fn with_target_width(mut self, target_width: u32) -> Self {
        self.target_width = target_width;
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
