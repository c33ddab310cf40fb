//! Static config file reconciliation.
//!
//! # Responsibilities
//! - Read the managed file (absent file = empty store)
//! - Build the desired store from settings, folding node entries in only
//!   while the ensemble has no dynamic config
//! - Merge under the immutable-key rules and write back only on change

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::{ReconcilerConfig, DYNAMIC_CONFIG_KEY};
use crate::config::store::ConfigStore;
use crate::reconcile::{Outcome, ReconcileError};

/// Whether the ensemble runs with dynamic membership: more than one node
/// configured AND the on-disk file already references a dynamic config file.
/// While this holds, `server.N` entries belong to ZooKeeper's dynamic file,
/// not the static one.
pub fn has_dynamic_config(node_count: usize, existing: &ConfigStore) -> bool {
    node_count > 1 && existing.contains_key(DYNAMIC_CONFIG_KEY)
}

/// Version suffix of the dynamic config file referenced by the static file,
/// e.g. `2060000086c` for `zoo.cfg.dynamic.2060000086c`.
pub fn dynamic_config_version(existing: &ConfigStore) -> Option<&str> {
    let path = existing.get(DYNAMIC_CONFIG_KEY)?;
    path.rsplit('.').next().filter(|suffix| !suffix.is_empty())
}

/// Compute the merged file text for `existing_text`, without touching disk.
/// The result carries no trailing newline; [`reconcile`] appends one when
/// writing.
pub fn merge(settings: &ReconcilerConfig, existing_text: Option<&str>) -> String {
    let mut existing = existing_text.map(ConfigStore::from_text).unwrap_or_default();

    let mut desired = ConfigStore::from_map(settings.config_pairs());
    if !has_dynamic_config(settings.node_pairs().len(), &existing) {
        for (key, spec) in settings.node_pairs() {
            desired.insert(key, spec);
        }
    }

    existing.apply(&desired, &settings.immutable_keys);
    existing.serialize()
}

/// Read the managed file and return the merged text, without writing.
pub fn render(settings: &ReconcilerConfig) -> Result<String, ReconcileError> {
    let path = settings.conf_path();
    let existing_text = read_optional(&path)?;
    Ok(merge(settings, existing_text.as_deref()))
}

/// Reconcile the managed file on disk. Writes only when the merged content
/// differs from what is already there.
pub fn reconcile(settings: &ReconcilerConfig) -> Result<Outcome, ReconcileError> {
    let path = settings.conf_path();
    let existing_text = read_optional(&path)?;
    let merged = merge(settings, existing_text.as_deref());
    let rendered = format!("{}\n", merged);

    if existing_text.as_deref() == Some(rendered.as_str()) {
        tracing::debug!(path = %path.display(), "static config already reconciled");
        return Ok(Outcome::Unchanged);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ReconcileError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(&path, &rendered).map_err(|source| ReconcileError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        entries = merged.lines().count(),
        "static config rewritten"
    );
    Ok(Outcome::Changed)
}

pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, ReconcileError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ReconcileError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}
