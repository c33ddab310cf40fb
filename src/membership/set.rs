//! Ensemble membership set: parsing, comparison and payload rendering.

use std::collections::HashMap;

use crate::membership::member::{MembershipError, QuorumMember};

/// A set of quorum members keyed by id.
///
/// Unordered for comparison, insertion-ordered for serialization (the order
/// of whatever source it was built from). A duplicate id overwrites the
/// earlier member, map-style.
#[derive(Debug, Clone, Default)]
pub struct MembershipSet {
    index: HashMap<String, usize>,
    members: Vec<QuorumMember>,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from automation-supplied `server.N` →
    /// `host:peerPort:electionPort` pairs. Client ports take the default.
    pub fn from_nodes<I>(nodes: I) -> Result<Self, MembershipError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut set = Self::new();
        for (key, spec) in nodes {
            set.insert(QuorumMember::from_resource(&key, &spec)?);
        }
        Ok(set)
    }

    /// Build a set from a live membership report: lines of
    /// `server.N=host:peerPort:electionPort:role;clientPort`, with a
    /// `version=<hex>` trailer that is ignored. Non-member lines (blank
    /// lines, CLI log noise) are ignored as well.
    pub fn from_report(report: &str) -> Result<Self, MembershipError> {
        let mut set = Self::new();
        for line in report.lines() {
            if let Some(parsed) = QuorumMember::from_report_line(line) {
                set.insert(parsed?);
            }
        }
        Ok(set)
    }

    fn insert(&mut self, member: QuorumMember) {
        match self.index.get(&member.id) {
            Some(&i) => self.members[i] = member,
            None => {
                self.index.insert(member.id.clone(), self.members.len());
                self.members.push(member);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&QuorumMember> {
        self.index.get(id).map(|&i| &self.members[i])
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in construction order.
    pub fn iter(&self) -> std::slice::Iter<'_, QuorumMember> {
        self.members.iter()
    }

    /// Set-semantic comparison by quorum endpoint: same cardinality and,
    /// for every member here, a member in `other` with the same id, host,
    /// peer port and election port. Client ports and iteration order do not
    /// participate.
    pub fn matches(&self, other: &MembershipSet) -> bool {
        self.len() == other.len()
            && self
                .members
                .iter()
                .all(|m| other.get(&m.id).is_some_and(|o| m.same_endpoint(o)))
    }

    /// Render the `reconfig -members` payload: comma-joined
    /// `server.N=host:peerPort:electionPort;clientPort` entries in
    /// construction order. Byte-exact, no extra whitespace.
    pub fn serialize(&self) -> String {
        let entries: Vec<String> = self
            .members
            .iter()
            .map(|m| {
                format!(
                    "server.{}={}:{}:{};{}",
                    m.id, m.host, m.peer_port, m.election_port, m.client_port
                )
            })
            .collect();
        entries.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_nodes_serialize() {
        let set = MembershipSet::from_nodes(nodes(&[("server.1", "1.1.1.1:2888:3888")])).unwrap();
        assert_eq!(set.serialize(), "server.1=1.1.1.1:2888:3888;2181");
    }

    #[test]
    fn test_serialize_joins_with_single_comma() {
        let set = MembershipSet::from_nodes(nodes(&[
            ("server.1", "zk1:2888:3888"),
            ("server.2", "zk2:2888:3888"),
        ]))
        .unwrap();
        assert_eq!(
            set.serialize(),
            "server.1=zk1:2888:3888;2181,server.2=zk2:2888:3888;2181"
        );
    }

    #[test]
    fn test_from_report() {
        let report = "server.1=zk1:2888:3888:participant;2181\n\
                      server.2=zk2:2888:3888:observer;2182\n\
                      version=2060000086c";
        let set = MembershipSet::from_report(report).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("1").unwrap().host, "zk1");
        assert_eq!(set.get("2").unwrap().client_port, "2182");
        // Roles are discarded.
        assert_eq!(set.get("2").unwrap().election_port, "3888");
    }

    #[test]
    fn test_from_report_rejects_malformed_member() {
        let err = MembershipSet::from_report("server.1=zk1:2888").unwrap_err();
        assert!(err.to_string().contains("server.1"));
    }

    #[test]
    fn test_matches_is_order_independent() {
        let a = MembershipSet::from_nodes(nodes(&[
            ("server.1", "zk1:2888:3888"),
            ("server.2", "zk2:2888:3888"),
        ]))
        .unwrap();
        let b = MembershipSet::from_nodes(nodes(&[
            ("server.2", "zk2:2888:3888"),
            ("server.1", "zk1:2888:3888"),
        ]))
        .unwrap();

        assert!(a.matches(&b));
        assert!(b.matches(&a));
    }

    #[test]
    fn test_matches_ignores_client_port() {
        let desired =
            MembershipSet::from_nodes(nodes(&[("server.1", "zk1:2888:3888")])).unwrap();
        let live =
            MembershipSet::from_report("server.1=zk1:2888:3888:participant;2999").unwrap();

        assert!(desired.matches(&live));
    }

    #[test]
    fn test_matches_detects_endpoint_drift() {
        let a = MembershipSet::from_nodes(nodes(&[("server.1", "zk1:2888:3888")])).unwrap();
        let moved = MembershipSet::from_nodes(nodes(&[("server.1", "zk9:2888:3888")])).unwrap();
        let reported = MembershipSet::from_nodes(nodes(&[("server.1", "zk1:2888:3999")])).unwrap();

        assert!(!a.matches(&moved));
        assert!(!a.matches(&reported));
    }

    #[test]
    fn test_matches_detects_cardinality_change() {
        let a = MembershipSet::from_nodes(nodes(&[("server.1", "zk1:2888:3888")])).unwrap();
        let b = MembershipSet::from_nodes(nodes(&[
            ("server.1", "zk1:2888:3888"),
            ("server.2", "zk2:2888:3888"),
        ]))
        .unwrap();

        assert!(!a.matches(&b));
        assert!(!b.matches(&a));
    }

    #[test]
    fn test_duplicate_id_overwrites() {
        let set = MembershipSet::from_nodes(nodes(&[
            ("server.1", "zk1:2888:3888"),
            ("server.1", "zk9:2888:3888"),
        ]))
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("1").unwrap().host, "zk9");
    }
}
