//! Cross-field configuration validation.

use super::{types::Config, ConfigError};

/// Validates a loaded configuration.
///
/// Serde defaults keep each field individually well-formed; this catches the
/// values that parse fine but cannot work at runtime.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.encoder.bitrate_kbps == 0 {
        return Err(ConfigError::Invalid(
            "encoder.bitrate_kbps must be greater than zero".to_string(),
        ));
    }
    if config.encoder.compression_level > 10 {
        return Err(ConfigError::Invalid(
            "encoder.compression_level must be between 0 and 10".to_string(),
        ));
    }
    if config.encoder.extension.is_empty() {
        return Err(ConfigError::Invalid(
            "encoder.extension must not be empty".to_string(),
        ));
    }
    if config.encoder.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "encoder.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.prober.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "prober.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.cover.target_width == 0 {
        return Err(ConfigError::Invalid(
            "cover.target_width must be greater than zero".to_string(),
        ));
    }
    if config.cover.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "cover.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if config.cover.output_name.is_empty()
        || config.cover.output_name.contains(['/', '\\'])
    {
        return Err(ConfigError::Invalid(
            "cover.output_name must be a plain filename".to_string(),
        ));
    }
    if config.pipeline.fallback_parallelism == 0 {
        return Err(ConfigError::Invalid(
            "pipeline.fallback_parallelism must be greater than zero".to_string(),
        ));
    }

    Ok(())
}
