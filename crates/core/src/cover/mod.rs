//! Album cover-art resolution.
//!
//! Each album directory carries at most one cover file. Resolution prefers
//! conventional sibling image files next to the source track, falls back to
//! the picture stream embedded in the audio, and resamples whatever it finds
//! to a fixed width. All writes go through a unique temp file followed by a
//! rename, so concurrent workers sharing an album can at worst overwrite
//! each other with a complete file, never leave a torn one.

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::CoverConfig;
pub use error::CoverError;
pub use ffmpeg::FfmpegCoverResolver;
pub use traits::CoverResolver;
pub use types::CoverOutcome;
