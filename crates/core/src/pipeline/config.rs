//! Configuration for the pipeline module.

use serde::{Deserialize, Serialize};

use super::types::ExitPolicy;

/// Configuration for the batch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Explicit parallelism bound. When unset (or zero), the logical CPU
    /// count of the host is used.
    #[serde(default)]
    pub max_parallel: Option<usize>,

    /// Parallelism used when the CPU count cannot be determined.
    #[serde(default = "default_fallback_parallelism")]
    pub fallback_parallelism: usize,

    /// How per-file failures map to the batch result.
    #[serde(default)]
    pub exit_policy: ExitPolicy,
}

fn default_fallback_parallelism() -> usize {
    4
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_parallel: None,
            fallback_parallelism: default_fallback_parallelism(),
            exit_policy: ExitPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Sets an explicit parallelism bound.
    pub fn with_max_parallel(mut self, max: usize) -> Self {
        self.max_parallel = Some(max);
        self
    }

    /// Sets the exit policy.
    pub fn with_exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// The number of tracks processed concurrently: the explicit bound if
    /// set, else the detected logical CPU count, else the fallback.
    pub fn effective_parallelism(&self) -> usize {
        if let Some(max) = self.max_parallel {
            if max > 0 {
                return max;
            }
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(self.fallback_parallelism)
    }
}
