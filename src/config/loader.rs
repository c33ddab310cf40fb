//! Settings loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ReconcilerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Errors raised while loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate settings from a TOML file.
pub fn load_config(path: &Path) -> Result<ReconcilerConfig, ConfigError> {
    let settings: ReconcilerConfig = toml::from_str(&fs::read_to_string(path)?)?;
    validate_config(&settings).map_err(ConfigError::Validation)?;
    Ok(settings)
}
