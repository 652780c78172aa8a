//! Opus encoder capability detection.

use std::process::Stdio;
use tokio::process::Command;

use super::config::EncoderConfig;

/// Opus encoders detected in the local ffmpeg build.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpusCapabilities {
    /// libopus encoder available.
    pub libopus: bool,
    /// Built-in (lower quality) opus encoder available.
    pub native: bool,
}

impl OpusCapabilities {
    /// Detect available Opus encoders by probing ffmpeg.
    pub async fn detect(config: &EncoderConfig) -> Self {
        let output = Command::new(&config.ffmpeg_path)
            .args(["-encoders"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await;

        let stdout = match output {
            Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).to_string(),
            _ => return Self::default(),
        };

        Self {
            libopus: stdout.contains("libopus"),
            native: stdout
                .lines()
                .any(|line| line.split_whitespace().nth(1) == Some("opus")),
        }
    }

    /// Whether the batch's encoding profile can run at all.
    pub fn can_encode(&self) -> bool {
        self.libopus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capabilities() {
        let caps = OpusCapabilities::default();
        assert!(!caps.libopus);
        assert!(!caps.native);
        assert!(!caps.can_encode());
    }

    #[test]
    fn test_libopus_enables_encoding() {
        let caps = OpusCapabilities {
            libopus: true,
            native: false,
        };
        assert!(caps.can_encode());
    }

    #[test]
    fn test_native_alone_is_not_enough() {
        let caps = OpusCapabilities {
            libopus: false,
            native: true,
        };
        assert!(!caps.can_encode());
    }
}
