//! Mock implementations for testing.
//!
//! These mocks let pipeline code be tested without ffmpeg/ffprobe installed.
//! They record the calls they receive and allow injecting errors, matching
//! the seams the real implementations sit behind.

mod mock_cover;
mod mock_encoder;
mod mock_prober;

pub use mock_cover::MockCoverResolver;
pub use mock_encoder::{MockEncoder, RecordedEncode};
pub use mock_prober::MockProber;

use crate::prober::TagMap;

/// Builds a tag mapping from string pairs.
pub fn tag_map(pairs: &[(&str, &str)]) -> TagMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
