//! ZooKeeper ensemble configuration reconciler.
//!
//! Merges a desired configuration into the on-disk static config file while
//! preserving line order, and keeps a dynamically reconfigurable ensemble's
//! live membership in line with the configured node map.

pub mod config;
pub mod membership;
pub mod reconcile;
pub mod zk;

pub use config::store::{ConfigEntry, ConfigStore};
pub use config::ReconcilerConfig;
pub use membership::{MembershipSet, QuorumMember};
pub use reconcile::Outcome;
pub use zk::ZkCli;
