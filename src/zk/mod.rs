//! Access to the external ZooKeeper administrative tooling.

pub mod cli;

pub use cli::{ZkCli, ZkError};
