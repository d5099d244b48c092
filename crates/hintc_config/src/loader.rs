//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::HintConfig;
use std::path::{Component, Path};

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "hintc.toml";

/// Loads the configuration from `<project_dir>/hintc.toml`.
///
/// The file is optional: when it does not exist the defaults are returned.
pub fn load_config(project_dir: &Path) -> Result<HintConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, project_dir.display());
        return Ok(HintConfig::default());
    }
    load_config_file(&config_path)
}

/// Loads the configuration from an explicit file path, which must exist.
pub fn load_config_file(path: &Path) -> Result<HintConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<HintConfig, ConfigError> {
    let config: HintConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that paths are present and stay inside the output root.
pub(crate) fn validate_config(config: &HintConfig) -> Result<(), ConfigError> {
    let path = config.output.path.trim();
    if path.is_empty() {
        return Err(ConfigError::MissingField("output.path".to_string()));
    }
    let path = Path::new(path);
    if path.is_absolute() || path.has_root() {
        return Err(ConfigError::ValidationError(format!(
            "output.path '{}' must be relative to the class output root",
            path.display()
        )));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::ValidationError(format!(
            "output.path '{}' must not leave the class output root",
            path.display()
        )));
    }
    if let Some(incremental) = &config.incremental {
        if incremental.fragments_dir.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "incremental.fragments_dir".to_string(),
            ));
        }
    }
    Ok(())
}
