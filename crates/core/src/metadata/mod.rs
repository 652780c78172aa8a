//! Metadata field resolution.
//!
//! Turns a raw tag mapping into the six fields the output layout is built
//! from, applying per-field fallback chains over common tag spellings and
//! fixed defaults for anything absent. Missing metadata is never an error.

mod resolver;
mod types;

pub use resolver::resolve;
pub use types::TrackMetadata;
