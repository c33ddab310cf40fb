//! Quorum member descriptor and line parsing.

use serde::Serialize;
use thiserror::Error;

/// Client port assumed for members that do not report one.
pub const DEFAULT_CLIENT_PORT: &str = "2181";

/// Key prefix of member entries, in both resource maps and live reports.
const SERVER_KEY_PREFIX: &str = "server.";

/// A single ensemble member, as described either by automation or by the
/// live service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuorumMember {
    /// Ordinal suffix of the `server.N` key, kept verbatim.
    pub id: String,
    pub host: String,
    pub peer_port: String,
    pub election_port: String,
    /// Excluded from endpoint comparison; defaults to [`DEFAULT_CLIENT_PORT`].
    pub client_port: String,
}

/// Errors raised while parsing member descriptors.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// Key does not follow the `server.<id>` convention.
    #[error("invalid server key '{0}': expected 'server.<id>'")]
    InvalidKey(String),

    /// Member spec does not carry host, peer port and election port.
    #[error("invalid spec '{spec}' for server.{id}: expected host:peerPort:electionPort")]
    InvalidSpec { id: String, spec: String },
}

impl QuorumMember {
    /// Parse a resource-map entry: key `server.N`, value
    /// `host:peerPort:electionPort` (exactly three fields; roles belong to
    /// report lines only). The client port takes the default.
    pub fn from_resource(key: &str, spec: &str) -> Result<Self, MembershipError> {
        let id = parse_server_id(key)?;
        let (host, peer_port, election_port) = parse_endpoint(id, spec, false)?;
        Ok(Self {
            id: id.to_string(),
            host,
            peer_port,
            election_port,
            client_port: DEFAULT_CLIENT_PORT.to_string(),
        })
    }

    /// Parse one live-report line of the form
    /// `server.N=host:peerPort:electionPort:role;clientPort`.
    ///
    /// The role is discarded and may be absent; a missing `;clientPort`
    /// suffix falls back to the default. Returns `None` for lines that are
    /// not member entries at all (the `version=<hex>` trailer, blank lines,
    /// CLI log noise).
    pub fn from_report_line(line: &str) -> Option<Result<Self, MembershipError>> {
        let line = line.trim();
        if !line.starts_with(SERVER_KEY_PREFIX) {
            return None;
        }
        let (key, value) = line.split_once('=')?;

        let id = match parse_server_id(key) {
            Ok(id) => id,
            Err(e) => return Some(Err(e)),
        };
        let (endpoint, client_port) = match value.split_once(';') {
            Some((left, client)) => (left, client),
            None => (value, DEFAULT_CLIENT_PORT),
        };
        Some(parse_endpoint(id, endpoint, true).map(|(host, peer_port, election_port)| Self {
            id: id.to_string(),
            host,
            peer_port,
            election_port,
            client_port: client_port.to_string(),
        }))
    }

    /// True when `other` names the same quorum endpoint: same id, host, peer
    /// port and election port. Client ports are excluded, as resource maps
    /// and live reports routinely disagree on them.
    pub fn same_endpoint(&self, other: &QuorumMember) -> bool {
        self.id == other.id
            && self.host == other.host
            && self.peer_port == other.peer_port
            && self.election_port == other.election_port
    }
}

fn parse_server_id(key: &str) -> Result<&str, MembershipError> {
    match key.strip_prefix(SERVER_KEY_PREFIX) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(MembershipError::InvalidKey(key.to_string())),
    }
}

/// Split `host:peerPort:electionPort`. A trailing `:role` is tolerated (and
/// discarded) only when `allow_role` is set; resource maps carry exactly
/// three fields.
fn parse_endpoint(
    id: &str,
    spec: &str,
    allow_role: bool,
) -> Result<(String, String, String), MembershipError> {
    let fields: Vec<&str> = spec.split(':').collect();
    let arity_ok = if allow_role {
        fields.len() >= 3
    } else {
        fields.len() == 3
    };
    if !arity_ok || fields.iter().take(3).any(|f| f.is_empty()) {
        return Err(MembershipError::InvalidSpec {
            id: id.to_string(),
            spec: spec.to_string(),
        });
    }
    Ok((
        fields[0].to_string(),
        fields[1].to_string(),
        fields[2].to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_resource() {
        let m = QuorumMember::from_resource("server.1", "1.1.1.1:2888:3888").unwrap();
        assert_eq!(m.id, "1");
        assert_eq!(m.host, "1.1.1.1");
        assert_eq!(m.peer_port, "2888");
        assert_eq!(m.election_port, "3888");
        assert_eq!(m.client_port, DEFAULT_CLIENT_PORT);
    }

    #[test]
    fn test_from_resource_rejects_bad_key() {
        assert!(QuorumMember::from_resource("node.1", "h:2888:3888").is_err());
        assert!(QuorumMember::from_resource("server.", "h:2888:3888").is_err());
    }

    #[test]
    fn test_from_resource_rejects_short_spec() {
        let err = QuorumMember::from_resource("server.2", "host:2888").unwrap_err();
        assert!(err.to_string().contains("server.2"));
    }

    #[test]
    fn test_from_resource_rejects_role_suffix() {
        // Roles are a report-line extra; a resource value carries exactly
        // host, peer port and election port.
        assert!(QuorumMember::from_resource("server.1", "zk1:2888:3888:participant").is_err());
    }

    #[test]
    fn test_from_report_line_with_role_and_client_port() {
        let m = QuorumMember::from_report_line("server.3=zk3:2888:3888:participant;2182")
            .unwrap()
            .unwrap();
        assert_eq!(m.id, "3");
        assert_eq!(m.host, "zk3");
        assert_eq!(m.client_port, "2182");
    }

    #[test]
    fn test_from_report_line_defaults_client_port() {
        let m = QuorumMember::from_report_line("server.1=zk1:2888:3888:participant")
            .unwrap()
            .unwrap();
        assert_eq!(m.client_port, DEFAULT_CLIENT_PORT);
    }

    #[test]
    fn test_from_report_line_ignores_version_trailer() {
        assert!(QuorumMember::from_report_line("version=2060000086c").is_none());
        assert!(QuorumMember::from_report_line("").is_none());
    }

    #[test]
    fn test_same_endpoint_ignores_client_port() {
        let a = QuorumMember::from_resource("server.1", "zk1:2888:3888").unwrap();
        let mut b = a.clone();
        b.client_port = "2999".to_string();
        assert!(a.same_endpoint(&b));

        b.host = "zk2".to_string();
        assert!(!a.same_endpoint(&b));
    }

    #[test]
    fn test_error_display() {
        let err = MembershipError::InvalidKey("bogus".to_string());
        assert_eq!(err.to_string(), "invalid server key 'bogus': expected 'server.<id>'");
    }
}
