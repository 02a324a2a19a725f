//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::EngineConfig;
use std::path::Path;

/// Loads and validates a `lodestone.toml` configuration from a directory.
///
/// Reads `<dir>/lodestone.toml`, parses it, and validates value ranges.
pub fn load_config(dir: &Path) -> Result<EngineConfig, ConfigError> {
    let config_path = dir.join("lodestone.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that constants are finite and in range.
fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let rc = &config.rc;
    if !rc.dbu_per_micron.is_finite() || rc.dbu_per_micron <= 0.0 {
        return Err(ConfigError::Validation(
            "rc.dbu_per_micron must be positive".to_string(),
        ));
    }
    for (name, value) in [
        ("rc.cap_per_micron", rc.cap_per_micron),
        ("rc.res_per_micron", rc.res_per_micron),
        ("rc.terminal_output_cap", rc.terminal_output_cap),
        ("rc.incremental_tolerance", rc.incremental_tolerance),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{name} must be finite and non-negative"
            )));
        }
    }
    Ok(())
}
