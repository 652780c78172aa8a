//! Configuration loading and validation.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::Config;
pub use validate::validate_config;

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Config parsed but holds an invalid value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
