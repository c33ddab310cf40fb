//! Provisioning glue: file and membership reconciliation passes.
//!
//! The engine itself (`config::store`, `membership`) is pure; everything
//! that touches the filesystem or the administrative CLI lives here. One
//! provisioning run performs at most one static-file write and at most one
//! membership reconfiguration.

pub mod dynamic;
pub mod static_config;

use serde::Serialize;
use thiserror::Error;

use crate::membership::MembershipError;
use crate::zk::ZkError;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Preconditions for this pass were not met; nothing was examined.
    Skipped,
    /// Desired and actual state already agree.
    Unchanged,
    /// The file was rewritten or the ensemble was reconfigured.
    Changed,
}

/// Errors from reconciliation passes.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error(transparent)]
    Zk(#[from] ZkError),
}
