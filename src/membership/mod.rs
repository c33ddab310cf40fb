//! Ensemble membership reconciliation.
//!
//! # Data Flow
//! ```text
//! automation node map (server.N → host:peerPort:electionPort)
//!     → MembershipSet::from_nodes (desired)
//!
//! live membership report (server.N=host:peerPort:electionPort:role;clientPort)
//!     → MembershipSet::from_report (live)
//!
//! desired.matches(&live)?
//!     yes → nothing to do
//!     no  → desired.serialize() → `reconfig -members` payload
//! ```
//!
//! # Design Decisions
//! - Comparison is by quorum endpoint (id, host, peer port, election port);
//!   client ports are excluded, the two sides routinely disagree on them
//! - Serialization order is construction order; comparison ignores order
//! - The full desired membership is rendered in one payload, never as
//!   incremental diffs (the service rejects concurrent reconfigurations)

pub mod member;
pub mod set;

pub use member::{MembershipError, QuorumMember, DEFAULT_CLIENT_PORT};
pub use set::MembershipSet;
