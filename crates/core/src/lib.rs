pub mod config;
pub mod cover;
pub mod encoder;
pub mod layout;
pub mod metadata;
pub mod pipeline;
pub mod prober;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use cover::{CoverConfig, CoverError, CoverOutcome, CoverResolver, FfmpegCoverResolver};
pub use encoder::{
    EncodeJob, EncodeOutcome, Encoder, EncoderConfig, EncoderError, FfmpegEncoder,
    OpusCapabilities,
};
pub use layout::OutputLocation;
pub use metadata::TrackMetadata;
pub use pipeline::{
    BatchError, BatchRunner, BatchSummary, ConversionStage, ExitPolicy, PipelineConfig,
    SourceTrack, TrackOutcome, TrackWorker,
};
pub use prober::{FfprobeProber, ProberConfig, ProberError, TagMap, TagProber};
