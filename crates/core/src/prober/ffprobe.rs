//! FFprobe-based tag prober implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::config::ProberConfig;
use super::error::ProberError;
use super::traits::TagProber;
use super::types::TagMap;

/// FFprobe-based tag prober.
pub struct FfprobeProber {
    config: ProberConfig,
}

impl FfprobeProber {
    /// Creates a new ffprobe prober with the given configuration.
    pub fn new(config: ProberConfig) -> Self {
        Self { config }
    }

    /// Creates a prober with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ProberConfig::default())
    }

    /// Parses ffprobe JSON output into a tag mapping.
    ///
    /// Container-level tags take precedence over per-stream tags when both
    /// carry the same key.
    fn parse_probe_output(output: &str) -> Result<TagMap, ProberError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: Option<ProbeFormat>,
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            #[serde(default)]
            tags: HashMap<String, String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            #[serde(default)]
            tags: HashMap<String, String>,
        }

        let probe: ProbeOutput = serde_json::from_str(output).map_err(|e| {
            ProberError::parse_error(format!("Failed to parse ffprobe output: {}", e))
        })?;

        let mut tags = TagMap::new();
        for stream in &probe.streams {
            for (key, value) in &stream.tags {
                tags.insert(key.clone(), value.clone());
            }
        }
        if let Some(format) = &probe.format {
            for (key, value) in &format.tags {
                tags.insert(key.clone(), value.clone());
            }
        }

        Ok(tags)
    }
}

#[async_trait]
impl TagProber for FfprobeProber {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn read_tags(&self, path: &Path) -> Result<TagMap, ProberError> {
        if !path.exists() {
            return Err(ProberError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let output_fut = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let timeout_secs = self.config.timeout_secs;
        let output = timeout(Duration::from_secs(timeout_secs), output_fut)
            .await
            .map_err(|_| ProberError::Timeout { timeout_secs })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProberError::FfprobeNotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    ProberError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ProberError::probe_failed(format!(
                "ffprobe exited with code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(&stdout)
    }

    async fn validate(&self) -> Result<(), ProberError> {
        let result = Command::new(&self.config.ffprobe_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match result {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(ProberError::probe_failed(format!(
                "ffprobe -version exited with code {:?}",
                status.code()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ProberError::FfprobeNotFound {
                    path: self.config.ffprobe_path.clone(),
                })
            }
            Err(e) => Err(ProberError::Io(e)),
        }
    }
}
