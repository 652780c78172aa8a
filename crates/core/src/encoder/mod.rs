//! Opus encoding of source tracks.
//!
//! This module provides the `Encoder` trait and the ffmpeg/libopus
//! implementation. Encoding is idempotent: a destination that already exists
//! is reported as skipped without spawning the external tool, which is what
//! makes a batch resumable across runs.

mod capabilities;
mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use capabilities::OpusCapabilities;
pub use config::EncoderConfig;
pub use error::EncoderError;
pub use ffmpeg::FfmpegEncoder;
pub use traits::Encoder;
pub use types::{EncodeJob, EncodeOutcome};
