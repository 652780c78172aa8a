//! Batch dispatcher.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::cover::CoverResolver;
use crate::encoder::{Encoder, EncoderError};
use crate::prober::{ProberError, TagProber};

use super::config::PipelineConfig;
use super::types::{BatchSummary, ExitPolicy, SourceTrack, TrackOutcome};
use super::worker::TrackWorker;

/// Extension of the lossless input files the batch converts.
const INPUT_EXTENSION: &str = "flac";

/// Error type for batch-level failures.
///
/// Per-file failures are not errors; they are aggregated into the summary.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Source directory missing or not a directory.
    #[error("Source directory not found or not a directory: {path}")]
    SourceDirInvalid { path: PathBuf },

    /// Output root could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Tag prober failed validation.
    #[error("Prober validation failed: {0}")]
    Prober(#[from] ProberError),

    /// Encoder failed validation.
    #[error("Encoder validation failed: {0}")]
    Encoder(#[from] EncoderError),

    /// The configured exit policy rejected the finished batch.
    #[error("{failed} of {total} tracks failed (exit policy {policy:?})")]
    PolicyFailure {
        policy: ExitPolicy,
        failed: usize,
        total: usize,
    },
}

/// Counters shared by all in-flight workers.
#[derive(Default)]
struct BatchStats {
    converted: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
}

impl BatchStats {
    fn record(&self, outcome: &TrackOutcome) {
        match outcome {
            TrackOutcome::Converted => self.converted.fetch_add(1, Ordering::Relaxed),
            TrackOutcome::SkippedExisting => self.skipped.fetch_add(1, Ordering::Relaxed),
            TrackOutcome::Failed { .. } => self.failed.fetch_add(1, Ordering::Relaxed),
        };
    }
}

/// Discovers source tracks and runs workers over them with bounded
/// concurrency.
pub struct BatchRunner {
    config: PipelineConfig,
    prober: Arc<dyn TagProber>,
    encoder: Arc<dyn Encoder>,
    cover: Arc<dyn CoverResolver>,
}

impl BatchRunner {
    /// Creates a new batch runner.
    pub fn new(
        config: PipelineConfig,
        prober: Arc<dyn TagProber>,
        encoder: Arc<dyn Encoder>,
        cover: Arc<dyn CoverResolver>,
    ) -> Self {
        Self {
            config,
            prober,
            encoder,
            cover,
        }
    }

    /// Recursively enumerates source files under the root, sorted by path
    /// for stable logs. The extension match is case-insensitive.
    pub fn discover_tracks(source_root: &Path) -> Vec<SourceTrack> {
        let mut tracks: Vec<SourceTrack> = WalkDir::new(source_root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(INPUT_EXTENSION))
            })
            .map(|entry| SourceTrack::new(entry.into_path()))
            .collect();
        tracks.sort_by(|a, b| a.path.cmp(&b.path));
        tracks
    }

    /// Runs the whole batch: validate directories and tools, discover
    /// tracks, fan out workers, aggregate outcomes.
    pub async fn run(
        &self,
        source_root: &Path,
        output_root: &Path,
    ) -> Result<BatchSummary, BatchError> {
        let start = Instant::now();

        if !source_root.is_dir() {
            return Err(BatchError::SourceDirInvalid {
                path: source_root.to_path_buf(),
            });
        }
        tokio::fs::create_dir_all(output_root)
            .await
            .map_err(|source| BatchError::OutputDirFailed {
                path: output_root.to_path_buf(),
                source,
            })?;

        self.prober.validate().await?;
        self.encoder.validate().await?;

        let tracks = Self::discover_tracks(source_root);
        let total = tracks.len();
        let parallelism = self.config.effective_parallelism();
        info!(
            "Converting {} tracks from {} to {} ({} in parallel)",
            total,
            source_root.display(),
            output_root.display(),
            parallelism
        );

        let semaphore = Arc::new(Semaphore::new(parallelism));
        let stats = Arc::new(BatchStats::default());
        let worker = Arc::new(TrackWorker::new(
            Arc::clone(&self.prober),
            Arc::clone(&self.encoder),
            Arc::clone(&self.cover),
            output_root.to_path_buf(),
        ));

        let handles: Vec<_> = tracks
            .into_iter()
            .map(|track| {
                let semaphore = Arc::clone(&semaphore);
                let worker = Arc::clone(&worker);
                let stats = Arc::clone(&stats);
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .expect("semaphore is never closed");
                    let outcome = worker.process(&track).await;
                    stats.record(&outcome);
                })
            })
            .collect();

        for result in join_all(handles).await {
            if let Err(e) = result {
                error!("Worker task failed: {}", e);
                stats.failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        let summary = BatchSummary {
            total,
            converted: stats.converted.load(Ordering::Relaxed) as usize,
            skipped: stats.skipped.load(Ordering::Relaxed) as usize,
            failed: stats.failed.load(Ordering::Relaxed) as usize,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Conversion complete: {} converted, {} skipped, {} failed ({} tracks in {} ms)",
            summary.converted, summary.skipped, summary.failed, summary.total, summary.duration_ms
        );

        if !self.config.exit_policy.accepts(&summary) {
            return Err(BatchError::PolicyFailure {
                policy: self.config.exit_policy,
                failed: summary.failed,
                total: summary.total,
            });
        }

        Ok(summary)
    }
}
