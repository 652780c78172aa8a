//! Root configuration types.

use serde::{Deserialize, Serialize};

use crate::cover::CoverConfig;
use crate::encoder::EncoderConfig;
use crate::pipeline::PipelineConfig;
use crate::prober::ProberConfig;

/// Root configuration.
///
/// Every section is fully defaulted, so the converter runs with no config
/// file at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tag probing.
    #[serde(default)]
    pub prober: ProberConfig,

    /// Opus encoding.
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Cover-art resolution.
    #[serde(default)]
    pub cover: CoverConfig,

    /// Batch pipeline.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}
