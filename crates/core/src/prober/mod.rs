//! Tag probing for source files.
//!
//! This module provides the `TagProber` trait and the ffprobe-based
//! implementation that extracts a key/value tag mapping from one audio file.
//! A file with no tags yields an empty mapping, never an error; resolution
//! of individual fields (fallback chains, defaults) lives in the `metadata`
//! module.

mod config;
mod error;
mod ffprobe;
mod traits;
mod types;

pub use config::ProberConfig;
pub use error::ProberError;
pub use ffprobe::FfprobeProber;
pub use traits::TagProber;
pub use types::TagMap;
