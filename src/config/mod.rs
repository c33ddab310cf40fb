//! Configuration subsystem: the ordered store plus the tool's own settings.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ReconcilerConfig (validated, immutable for the run)
//!
//! managed ZooKeeper file (flat key=value text)
//!     → store.rs ConfigStore::from_text (existing, parse order kept)
//! settings [config] + [nodes] tables
//!     → store.rs ConfigStore::from_map (desired, author order kept)
//! existing.apply(&desired, immutable_keys)
//!     → store.rs serialize → written back by reconcile glue
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; a run never re-reads them
//! - The store does no I/O; reading and writing files is glue in `reconcile`
//! - Immutability is a merge parameter, not store state

pub mod loader;
pub mod schema;
pub mod store;
pub mod validation;

pub use schema::{ReconcilerConfig, ZkCliConfig, DYNAMIC_CONFIG_KEY};
pub use store::{ConfigEntry, ConfigStore};
