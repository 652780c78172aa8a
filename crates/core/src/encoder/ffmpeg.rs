//! FFmpeg/libopus encoder implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::capabilities::OpusCapabilities;
use super::config::EncoderConfig;
use super::error::EncoderError;
use super::traits::Encoder;
use super::types::{EncodeJob, EncodeOutcome};

/// FFmpeg-based Opus encoder.
pub struct FfmpegEncoder {
    config: EncoderConfig,
}

impl FfmpegEncoder {
    /// Creates a new ffmpeg encoder with the given configuration.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Creates an encoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EncoderConfig::default())
    }

    /// Builds ffmpeg arguments for one encode.
    fn build_args(&self, input_path: &Path, output_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            // Embedded pictures arrive as a video stream the opus muxer
            // cannot carry.
            "-vn".to_string(),
            "-c:a".to_string(),
            "libopus".to_string(),
            "-b:a".to_string(),
            format!("{}k", self.config.bitrate_kbps),
            "-vbr".to_string(),
            if self.config.vbr { "on" } else { "off" }.to_string(),
            "-compression_level".to_string(),
            self.config.compression_level.to_string(),
            "-application".to_string(),
            self.config.application.clone(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
        ];

        args.extend(self.config.extra_ffmpeg_args.iter().cloned());
        args.push(output_path.to_string_lossy().to_string());

        args
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn output_extension(&self) -> &str {
        &self.config.extension
    }

    async fn encode(&self, job: EncodeJob) -> Result<EncodeOutcome, EncoderError> {
        if !job.input_path.exists() {
            return Err(EncoderError::InputNotFound {
                path: job.input_path.clone(),
            });
        }

        if job.output_path.exists() {
            debug!("Destination already exists: {}", job.output_path.display());
            return Ok(EncodeOutcome::SkippedExisting);
        }

        let start = Instant::now();
        let args = self.build_args(&job.input_path, &job.output_path);

        let output_fut = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let timeout_secs = self.config.timeout_secs;
        let output = timeout(Duration::from_secs(timeout_secs), output_fut)
            .await
            .map_err(|_| EncoderError::Timeout { timeout_secs })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EncoderError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    EncoderError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(EncoderError::encode_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                if stderr.is_empty() {
                    None
                } else {
                    Some(stderr)
                },
            ));
        }

        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| EncoderError::encode_failed("Output file not created", None))?;

        Ok(EncodeOutcome::Encoded {
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), EncoderError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => {}
            Ok(status) => {
                return Err(EncoderError::encode_failed(
                    format!("ffmpeg -version exited with code {:?}", status.code()),
                    None,
                ))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EncoderError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => return Err(EncoderError::Io(e)),
        }

        let capabilities = OpusCapabilities::detect(&self.config).await;
        if !capabilities.can_encode() {
            return Err(EncoderError::CodecUnavailable {
                codec: "libopus".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_build_args_default_profile() {
        let encoder = FfmpegEncoder::with_defaults();
        let args = encoder.build_args(Path::new("/in.flac"), Path::new("/out.opus"));

        assert!(args.contains(&"-c:a".to_string()));
        assert!(args.contains(&"libopus".to_string()));
        assert!(args.contains(&"-b:a".to_string()));
        assert!(args.contains(&"128k".to_string()));
        assert!(args.contains(&"-vbr".to_string()));
        assert!(args.contains(&"on".to_string()));
        assert!(args.contains(&"-compression_level".to_string()));
        assert!(args.contains(&"10".to_string()));
        assert!(args.contains(&"-application".to_string()));
        assert!(args.contains(&"audio".to_string()));
        assert!(args.contains(&"-vn".to_string()));
        assert_eq!(args.last(), Some(&"/out.opus".to_string()));
    }

    #[test]
    fn test_build_args_custom_bitrate_and_extra_args() {
        let mut config = EncoderConfig::default().with_bitrate(96);
        config.vbr = false;
        config.extra_ffmpeg_args = vec!["-threads".to_string(), "1".to_string()];
        let encoder = FfmpegEncoder::new(config);
        let args = encoder.build_args(Path::new("/in.flac"), Path::new("/out.opus"));

        assert!(args.contains(&"96k".to_string()));
        assert!(args.contains(&"off".to_string()));
        assert!(args.contains(&"-threads".to_string()));
    }

    #[tokio::test]
    async fn test_encode_missing_input() {
        let encoder = FfmpegEncoder::with_defaults();
        let result = encoder
            .encode(EncodeJob {
                input_path: PathBuf::from("/nonexistent/in.flac"),
                output_path: PathBuf::from("/nonexistent/out.opus"),
            })
            .await;
        assert!(matches!(result, Err(EncoderError::InputNotFound { .. })));
    }

    #[tokio::test]
    async fn test_encode_skips_existing_destination() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.flac");
        let output = temp.path().join("out.opus");
        std::fs::write(&input, b"flac").unwrap();
        std::fs::write(&output, b"opus").unwrap();

        let encoder = FfmpegEncoder::with_defaults();
        let outcome = encoder
            .encode(EncodeJob {
                input_path: input,
                output_path: output.clone(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, EncodeOutcome::SkippedExisting);
        assert_eq!(std::fs::read(&output).unwrap(), b"opus");
    }

    #[test]
    fn test_output_extension_follows_config() {
        let encoder = FfmpegEncoder::with_defaults();
        assert_eq!(encoder.output_extension(), "opus");
    }
}
