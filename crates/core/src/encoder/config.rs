//! Configuration for the encoder module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the ffmpeg/libopus encoder.
///
/// The encoding parameters default to the fixed profile the batch uses:
/// constant target bitrate, VBR mode, maximum compression effort, and the
/// audio-tuned encoder application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Path to ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Target bitrate in kbps.
    #[serde(default = "default_bitrate")]
    pub bitrate_kbps: u32,

    /// Whether to use variable bitrate mode.
    #[serde(default = "default_true")]
    pub vbr: bool,

    /// Opus compression effort (0-10, 10 = slowest/best).
    #[serde(default = "default_compression_level")]
    pub compression_level: u8,

    /// Opus encoder application profile.
    #[serde(default = "default_application")]
    pub application: String,

    /// File extension of produced files.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Timeout for a single encode in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[serde(default = "default_log_level")]
    pub ffmpeg_log_level: String,

    /// Additional global ffmpeg arguments.
    #[serde(default)]
    pub extra_ffmpeg_args: Vec<String>,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_bitrate() -> u32 {
    128
}

fn default_true() -> bool {
    true
}

fn default_compression_level() -> u8 {
    10
}

fn default_application() -> String {
    "audio".to_string()
}

fn default_extension() -> String {
    "opus".to_string()
}

fn default_timeout() -> u64 {
    600
}

fn default_log_level() -> String {
    "warning".to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            bitrate_kbps: default_bitrate(),
            vbr: true,
            compression_level: default_compression_level(),
            application: default_application(),
            extension: default_extension(),
            timeout_secs: default_timeout(),
            ffmpeg_log_level: default_log_level(),
            extra_ffmpeg_args: Vec::new(),
        }
    }
}

impl EncoderConfig {
    /// Creates a new config with a custom ffmpeg path.
    pub fn with_path(ffmpeg_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ..Default::default()
        }
    }

    /// Sets the target bitrate in kbps.
    pub fn with_bitrate(mut self, bitrate_kbps: u32) -> Self {
        self.bitrate_kbps = bitrate_kbps;
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.bitrate_kbps, 128);
        assert!(config.vbr);
        assert_eq!(config.compression_level, 10);
        assert_eq!(config.application, "audio");
        assert_eq!(config.extension, "opus");
        assert_eq!(config.timeout_secs, 600);
    }

    #[test]
    fn test_config_builder() {
        let config = EncoderConfig::with_path(PathBuf::from("/usr/local/bin/ffmpeg"))
            .with_bitrate(96)
            .with_timeout(120);
        assert_eq!(config.ffmpeg_path, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.bitrate_kbps, 96);
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_serialization() {
        let config = EncoderConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EncoderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.bitrate_kbps, config.bitrate_kbps);
        assert_eq!(parsed.extension, config.extension);
    }
}
