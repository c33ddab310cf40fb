//! Dynamic ensemble membership reconciliation.
//!
//! # Responsibilities
//! - Gate on preconditions: the static file exists and the ensemble
//!   actually runs with dynamic membership
//! - Fetch the live membership report through the per-run [`ZkCli`] context
//! - Compare desired and live membership by quorum endpoint
//! - Issue a single full-membership `reconfig` only on drift

use crate::config::schema::ReconcilerConfig;
use crate::config::store::ConfigStore;
use crate::membership::MembershipSet;
use crate::reconcile::static_config::{has_dynamic_config, read_optional};
use crate::reconcile::{Outcome, ReconcileError};
use crate::zk::ZkCli;

/// Reconcile live ensemble membership against the settings' node map.
pub async fn reconcile(
    zk: &ZkCli,
    settings: &ReconcilerConfig,
) -> Result<Outcome, ReconcileError> {
    let path = settings.conf_path();
    // No static file means the service is almost certainly not running.
    let Some(existing_text) = read_optional(&path)? else {
        tracing::debug!(path = %path.display(), "static config missing, skipping membership pass");
        return Ok(Outcome::Skipped);
    };

    let existing = ConfigStore::from_text(&existing_text);
    if !has_dynamic_config(settings.node_pairs().len(), &existing) {
        tracing::debug!("ensemble has no dynamic config, skipping membership pass");
        return Ok(Outcome::Skipped);
    }

    let desired = MembershipSet::from_nodes(settings.node_pairs())?;
    let live = live_members(zk).await?;

    if live.matches(&desired) {
        tracing::debug!(members = live.len(), "ensemble membership already matches");
        return Ok(Outcome::Unchanged);
    }

    tracing::info!(
        live = %live.serialize(),
        desired = %desired.serialize(),
        "ensemble membership drift detected"
    );
    zk.reconfig(&desired.serialize()).await?;
    Ok(Outcome::Changed)
}

/// Fetch and parse the live membership report.
pub async fn live_members(zk: &ZkCli) -> Result<MembershipSet, ReconcileError> {
    let report = zk.fetch_config().await?;
    Ok(MembershipSet::from_report(&report)?)
}
