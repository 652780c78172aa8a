//! FFmpeg-based cover resolver implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, warn};

use super::config::CoverConfig;
use super::error::CoverError;
use super::traits::CoverResolver;
use super::types::CoverOutcome;

/// Cover resolver backed by the filesystem and ffmpeg.
///
/// Sibling images are copied, embedded pictures are extracted with ffmpeg,
/// and resampling runs through ffmpeg's scale filter. Every write lands in a
/// unique temp file inside the album directory and is renamed into place.
pub struct FfmpegCoverResolver {
    config: CoverConfig,
    temp_counter: AtomicU64,
}

impl FfmpegCoverResolver {
    /// Creates a new resolver with the given configuration.
    pub fn new(config: CoverConfig) -> Self {
        Self {
            config,
            temp_counter: AtomicU64::new(0),
        }
    }

    /// Creates a resolver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CoverConfig::default())
    }

    /// Unique temp path inside `dir`, keeping the cover's extension so ffmpeg
    /// can infer the output format from it.
    fn temp_path(&self, dir: &Path) -> PathBuf {
        let n = self.temp_counter.fetch_add(1, Ordering::Relaxed);
        dir.join(format!(
            ".tmp-{}-{}-{}",
            std::process::id(),
            n,
            self.config.output_name
        ))
    }

    async fn run_ffmpeg(&self, args: &[String]) -> Result<std::process::Output, CoverError> {
        let output_fut = Command::new(&self.config.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let timeout_secs = self.config.timeout_secs;
        timeout(Duration::from_secs(timeout_secs), output_fut)
            .await
            .map_err(|_| CoverError::Timeout { timeout_secs })?
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CoverError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    CoverError::Io(e)
                }
            })
    }

    /// Resamples an image in place to the configured width, keeping aspect
    /// ratio. Goes through a temp file so the original survives any failure.
    async fn resample(&self, image: &Path) -> Result<(), CoverError> {
        let dir = image.parent().unwrap_or(Path::new("."));
        let tmp = self.temp_path(dir);

        let args = vec![
            "-y".to_string(),
            "-i".to_string(),
            image.to_string_lossy().to_string(),
            "-vf".to_string(),
            format!("scale={}:-1", self.config.target_width),
            "-loglevel".to_string(),
            "error".to_string(),
            tmp.to_string_lossy().to_string(),
        ];

        let result = self.run_ffmpeg(&args).await;
        match result {
            Ok(output) if output.status.success() => match fs::metadata(&tmp).await {
                Ok(meta) if meta.len() > 0 => {
                    fs::rename(&tmp, image).await?;
                    Ok(())
                }
                _ => {
                    let _ = fs::remove_file(&tmp).await;
                    Err(CoverError::resample_failed("produced an empty file"))
                }
            },
            Ok(output) => {
                let _ = fs::remove_file(&tmp).await;
                Err(CoverError::resample_failed(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ))
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp).await;
                Err(e)
            }
        }
    }

    /// Copies a sibling image into the album directory as the cover.
    async fn copy_sibling(
        &self,
        candidate: &Path,
        album_dir: &Path,
        target: &Path,
    ) -> Result<(), CoverError> {
        let tmp = self.temp_path(album_dir);

        let installed = async {
            fs::copy(candidate, &tmp).await?;
            if let Err(e) = self.resample(&tmp).await {
                warn!(
                    "Failed to resample cover for {}: {}",
                    album_dir.display(),
                    e
                );
            }
            fs::rename(&tmp, target).await?;
            Ok::<(), CoverError>(())
        }
        .await;

        if installed.is_err() {
            let _ = fs::remove_file(&tmp).await;
        }
        installed
    }

    /// Extracts the embedded picture stream of `source` into the album
    /// directory. Returns false when the source carries no usable picture.
    async fn extract_embedded(
        &self,
        source: &Path,
        album_dir: &Path,
        target: &Path,
    ) -> Result<bool, CoverError> {
        let tmp = self.temp_path(album_dir);

        let args = vec![
            "-y".to_string(),
            "-i".to_string(),
            source.to_string_lossy().to_string(),
            "-map".to_string(),
            "0:v".to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            tmp.to_string_lossy().to_string(),
        ];

        match self.run_ffmpeg(&args).await {
            Ok(output) if output.status.success() => match fs::metadata(&tmp).await {
                Ok(meta) if meta.len() > 0 => {
                    if let Err(e) = self.resample(&tmp).await {
                        warn!(
                            "Failed to resample cover for {}: {}",
                            album_dir.display(),
                            e
                        );
                    }
                    if let Err(e) = fs::rename(&tmp, target).await {
                        let _ = fs::remove_file(&tmp).await;
                        return Err(CoverError::Io(e));
                    }
                    Ok(true)
                }
                _ => {
                    let _ = fs::remove_file(&tmp).await;
                    Ok(false)
                }
            },
            Ok(output) => {
                let _ = fs::remove_file(&tmp).await;
                debug!(
                    "No embedded picture in {}: {}",
                    source.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Ok(false)
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp).await;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CoverResolver for FfmpegCoverResolver {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn resolve(&self, source: &Path, album_dir: &Path) -> Result<CoverOutcome, CoverError> {
        let target = album_dir.join(&self.config.output_name);
        if fs::metadata(&target).await.is_ok() {
            return Ok(CoverOutcome::AlreadyPresent);
        }

        if let Some(sibling_dir) = source.parent() {
            for name in &self.config.sibling_names {
                let candidate = sibling_dir.join(name);
                if fs::metadata(&candidate).await.is_err() {
                    continue;
                }
                match self.copy_sibling(&candidate, album_dir, &target).await {
                    Ok(()) => return Ok(CoverOutcome::CopiedSibling),
                    Err(e) => {
                        warn!(
                            "Failed to copy sibling cover {}: {}",
                            candidate.display(),
                            e
                        );
                        break;
                    }
                }
            }
        }

        match self.extract_embedded(source, album_dir, &target).await {
            Ok(true) => Ok(CoverOutcome::ExtractedEmbedded),
            Ok(false) => Ok(CoverOutcome::NotFound),
            Err(e) => {
                warn!(
                    "Cover extraction from {} failed: {}",
                    source.display(),
                    e
                );
                Ok(CoverOutcome::NotFound)
            }
        }
    }
}
