//! Per-track conversion worker.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::cover::CoverResolver;
use crate::encoder::{EncodeJob, EncodeOutcome, Encoder};
use crate::layout;
use crate::metadata;
use crate::prober::TagProber;

use super::types::{ConversionStage, SourceTrack, TrackOutcome};

/// Converts a single track end to end.
///
/// Every failure is folded into the returned outcome; nothing panics or
/// propagates across the worker boundary, so one bad file can never take
/// down the batch.
pub struct TrackWorker {
    prober: Arc<dyn TagProber>,
    encoder: Arc<dyn Encoder>,
    cover: Arc<dyn CoverResolver>,
    output_root: PathBuf,
}

impl TrackWorker {
    /// Creates a new worker writing under the given output root.
    pub fn new(
        prober: Arc<dyn TagProber>,
        encoder: Arc<dyn Encoder>,
        cover: Arc<dyn CoverResolver>,
        output_root: PathBuf,
    ) -> Self {
        Self {
            prober,
            encoder,
            cover,
            output_root,
        }
    }

    /// Processes one track: probe, resolve metadata, build the destination,
    /// encode, and on a fresh encode resolve album art.
    ///
    /// An existing destination skips the encode and the cover step; cover
    /// failures are warnings and leave the track counted as converted.
    pub async fn process(&self, track: &SourceTrack) -> TrackOutcome {
        let tags = match self.prober.read_tags(&track.path).await {
            Ok(tags) => tags,
            Err(e) => {
                error!("Failed to probe {}: {}", track.path.display(), e);
                return TrackOutcome::Failed {
                    stage: ConversionStage::Probe,
                    reason: e.to_string(),
                };
            }
        };

        let resolved = metadata::resolve(&tags);
        let location = layout::build(
            &resolved,
            &self.output_root,
            self.encoder.output_extension(),
        );
        let destination = location.full_path();

        if let Err(e) = fs::create_dir_all(&location.directory).await {
            error!(
                "Failed to create album directory {}: {}",
                location.directory.display(),
                e
            );
            return TrackOutcome::Failed {
                stage: ConversionStage::Prepare,
                reason: e.to_string(),
            };
        }

        let job = EncodeJob {
            input_path: track.path.clone(),
            output_path: destination.clone(),
        };

        match self.encoder.encode(job).await {
            Ok(EncodeOutcome::SkippedExisting) => {
                info!(
                    "Skipping {} (already at {})",
                    track.path.display(),
                    destination.display()
                );
                TrackOutcome::SkippedExisting
            }
            Ok(EncodeOutcome::Encoded {
                output_size_bytes,
                duration_ms,
            }) => {
                info!(
                    "Converted {} -> {} ({} bytes in {} ms)",
                    track.path.display(),
                    destination.display(),
                    output_size_bytes,
                    duration_ms
                );
                match self.cover.resolve(&track.path, &location.directory).await {
                    Ok(outcome) => {
                        debug!(
                            "Cover art for {}: {:?}",
                            location.directory.display(),
                            outcome
                        );
                    }
                    Err(e) => {
                        warn!(
                            "Cover art for {} failed: {}",
                            location.directory.display(),
                            e
                        );
                    }
                }
                TrackOutcome::Converted
            }
            Err(e) => {
                error!("Failed to encode {}: {}", track.path.display(), e);
                TrackOutcome::Failed {
                    stage: ConversionStage::Encode,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::CoverError;
    use crate::encoder::EncoderError;
    use crate::prober::ProberError;
    use crate::testing::{tag_map, MockCoverResolver, MockEncoder, MockProber};
    use tempfile::TempDir;

    struct Harness {
        prober: MockProber,
        encoder: MockEncoder,
        cover: MockCoverResolver,
        worker: TrackWorker,
        _temp: TempDir,
        source: PathBuf,
        output_root: PathBuf,
    }

    impl Harness {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let source = temp.path().join("track.flac");
            std::fs::write(&source, b"flac").unwrap();
            let output_root = temp.path().join("out");

            let prober = MockProber::new();
            let encoder = MockEncoder::new();
            let cover = MockCoverResolver::new();
            let worker = TrackWorker::new(
                Arc::new(prober.clone()),
                Arc::new(encoder.clone()),
                Arc::new(cover.clone()),
                output_root.clone(),
            );

            Self {
                prober,
                encoder,
                cover,
                worker,
                _temp: temp,
                source,
                output_root,
            }
        }
    }

    #[tokio::test]
    async fn test_converted_track_resolves_cover() {
        let harness = Harness::new();
        harness
            .prober
            .set_tags(
                &harness.source,
                tag_map(&[("ARTIST", "Foo"), ("ALBUM", "Bar"), ("DATE", "2020")]),
            )
            .await;

        let outcome = harness
            .worker
            .process(&SourceTrack::new(&harness.source))
            .await;

        assert_eq!(outcome, TrackOutcome::Converted);
        assert_eq!(harness.encoder.encoded_count().await, 1);

        let cover_calls = harness.cover.recorded_calls().await;
        assert_eq!(cover_calls.len(), 1);
        assert_eq!(
            cover_calls[0].1,
            harness.output_root.join("Foo").join("2020 - Bar")
        );
    }

    #[tokio::test]
    async fn test_probe_failure_stops_before_encode() {
        let harness = Harness::new();
        harness
            .prober
            .set_next_error(ProberError::probe_failed("corrupt header"))
            .await;

        let outcome = harness
            .worker
            .process(&SourceTrack::new(&harness.source))
            .await;

        assert!(matches!(
            outcome,
            TrackOutcome::Failed {
                stage: ConversionStage::Probe,
                ..
            }
        ));
        assert_eq!(harness.encoder.encode_call_count().await, 0);
        assert!(harness.cover.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_skipped_track_skips_cover_step() {
        let harness = Harness::new();
        let destination = harness
            .output_root
            .join("Unknown Artist")
            .join("0000 - Unknown Album")
            .join("01-01 - Unknown Title.opus");
        std::fs::create_dir_all(destination.parent().unwrap()).unwrap();
        std::fs::write(&destination, b"opus").unwrap();

        let outcome = harness
            .worker
            .process(&SourceTrack::new(&harness.source))
            .await;

        assert_eq!(outcome, TrackOutcome::SkippedExisting);
        assert_eq!(harness.encoder.encoded_count().await, 0);
        assert!(harness.cover.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_encode_failure_is_contained() {
        let harness = Harness::new();
        harness
            .encoder
            .set_next_error(EncoderError::encode_failed("exit 1", None))
            .await;

        let outcome = harness
            .worker
            .process(&SourceTrack::new(&harness.source))
            .await;

        assert!(matches!(
            outcome,
            TrackOutcome::Failed {
                stage: ConversionStage::Encode,
                ..
            }
        ));
        assert!(harness.cover.recorded_calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_cover_failure_still_counts_as_converted() {
        let harness = Harness::new();
        harness
            .cover
            .set_next_error(CoverError::extraction_failed("no picture stream"))
            .await;

        let outcome = harness
            .worker
            .process(&SourceTrack::new(&harness.source))
            .await;

        assert_eq!(outcome, TrackOutcome::Converted);
    }

    #[tokio::test]
    async fn test_untagged_track_lands_in_unknown_album() {
        let harness = Harness::new();

        let outcome = harness
            .worker
            .process(&SourceTrack::new(&harness.source))
            .await;

        assert_eq!(outcome, TrackOutcome::Converted);
        assert!(harness
            .output_root
            .join("Unknown Artist")
            .join("0000 - Unknown Album")
            .join("01-01 - Unknown Title.opus")
            .exists());
    }
}
