//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check node entries follow the `server.N` / `host:peerPort:electionPort`
//!   convention before any merge or reconfiguration runs
//! - Validate the administrative CLI settings are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ReconcilerConfig → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the run

use crate::config::schema::ReconcilerConfig;
use crate::membership::QuorumMember;

/// A single semantic problem in the settings.
#[derive(Debug)]
pub enum ValidationError {
    EmptyConfFile,
    EmptyConfDir,
    EmptyImmutableKey,
    EmptyZkBin,
    EmptyZkConnect,
    InvalidNode { key: String, message: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyConfFile => write!(f, "conf_file must not be empty"),
            ValidationError::EmptyConfDir => write!(f, "conf_dir must not be empty"),
            ValidationError::EmptyImmutableKey => {
                write!(f, "immutable_keys must not contain empty keys")
            }
            ValidationError::EmptyZkBin => write!(f, "zk.bin must not be empty"),
            ValidationError::EmptyZkConnect => write!(f, "zk.connect must not be empty"),
            ValidationError::InvalidNode { key, message } => {
                write!(f, "node '{}': {}", key, message)
            }
        }
    }
}

/// Validate settings, collecting every problem found.
pub fn validate_config(settings: &ReconcilerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.conf_file.is_empty() {
        errors.push(ValidationError::EmptyConfFile);
    }
    if settings.conf_dir.is_empty() {
        errors.push(ValidationError::EmptyConfDir);
    }
    if settings.immutable_keys.iter().any(|k| k.is_empty()) {
        errors.push(ValidationError::EmptyImmutableKey);
    }
    if settings.zk.bin.is_empty() {
        errors.push(ValidationError::EmptyZkBin);
    }
    if settings.zk.connect.is_empty() {
        errors.push(ValidationError::EmptyZkConnect);
    }

    for (key, spec) in settings.node_pairs() {
        if let Err(e) = QuorumMember::from_resource(&key, &spec) {
            errors.push(ValidationError::InvalidNode {
                key,
                message: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
