//! Batch conversion pipeline.
//!
//! `TrackWorker` converts one track end to end (probe, metadata, layout,
//! encode, cover art); `BatchRunner` discovers the source tree and fans
//! workers out over a semaphore-bounded pool sized to the host CPU count.
//! Per-file failures never escape a worker; only batch-level conditions
//! (invalid directories, missing tools, exit policy) fail the run.

mod config;
mod runner;
mod types;
mod worker;

pub use config::PipelineConfig;
pub use runner::{BatchError, BatchRunner};
pub use types::{BatchSummary, ConversionStage, ExitPolicy, SourceTrack, TrackOutcome};
pub use worker::TrackWorker;
