//! Settings schema for the reconciler itself.
//!
//! This is the tool's own configuration (TOML), not the ZooKeeper file it
//! manages. All types derive Serde traits; defaults mirror a stock ZooKeeper
//! deployment so a minimal settings file is enough.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The one key whose on-disk value must never be altered or removed by a
/// merge: ZooKeeper rewrites it itself while managing dynamic membership.
pub const DYNAMIC_CONFIG_KEY: &str = "dynamicConfigFile";

/// Root settings for a reconciliation run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Static config file name (ZooKeeper ships it as `zoo.cfg`).
    pub conf_file: String,

    /// Directory holding the static config file.
    pub conf_dir: String,

    /// Desired static settings, in author order.
    pub config: toml::Table,

    /// Ensemble nodes: `server.N` → `host:peerPort:electionPort`.
    pub nodes: toml::Table,

    /// Keys the merge must never alter, remove or create.
    pub immutable_keys: Vec<String>,

    /// Administrative CLI settings.
    pub zk: ZkCliConfig,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            conf_file: "zoo.cfg".to_string(),
            conf_dir: "/opt/zookeeper/conf".to_string(),
            config: default_static_config(),
            nodes: toml::Table::new(),
            immutable_keys: default_immutable_keys(),
            zk: ZkCliConfig::default(),
        }
    }
}

impl ReconcilerConfig {
    /// Full path of the managed static config file.
    pub fn conf_path(&self) -> PathBuf {
        Path::new(&self.conf_dir).join(&self.conf_file)
    }

    /// Desired static settings as strings, in author order.
    pub fn config_pairs(&self) -> Vec<(String, String)> {
        table_pairs(&self.config)
    }

    /// Ensemble node entries as strings, in author order.
    pub fn node_pairs(&self) -> Vec<(String, String)> {
        table_pairs(&self.nodes)
    }
}

/// Settings for invoking the external administrative CLI.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ZkCliConfig {
    /// Path of the `zkCli.sh` wrapper script.
    pub bin: String,

    /// `host:port` connect string passed to the CLI.
    pub connect: String,

    /// Hard deadline for one CLI invocation.
    pub timeout_secs: u64,
}

impl Default for ZkCliConfig {
    fn default() -> Self {
        Self {
            bin: "/opt/zookeeper/bin/zkCli.sh".to_string(),
            connect: "localhost:2181".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Stringify a TOML table in author order. Non-string scalars render in
/// their TOML form (`2181`, `true`), matching what automation writes.
fn table_pairs(table: &toml::Table) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(key, value)| (key.clone(), value_string(value)))
        .collect()
}

fn value_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn default_static_config() -> toml::Table {
    let mut table = toml::Table::new();
    table.insert("clientPort".into(), toml::Value::Integer(2181));
    table.insert(
        "dataDir".into(),
        toml::Value::String("/var/lib/zookeeper".into()),
    );
    table.insert("tickTime".into(), toml::Value::Integer(2000));
    table.insert("initLimit".into(), toml::Value::Integer(5));
    table.insert("syncLimit".into(), toml::Value::Integer(2));
    table
}

fn default_immutable_keys() -> Vec<String> {
    vec![DYNAMIC_CONFIG_KEY.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let settings = ReconcilerConfig::default();
        assert_eq!(settings.conf_file, "zoo.cfg");
        assert_eq!(
            settings.conf_path(),
            PathBuf::from("/opt/zookeeper/conf/zoo.cfg")
        );
        assert_eq!(settings.immutable_keys, vec![DYNAMIC_CONFIG_KEY.to_string()]);

        // Defaults stringify in declaration order.
        assert_eq!(
            settings.config_pairs(),
            vec![
                ("clientPort".to_string(), "2181".to_string()),
                ("dataDir".to_string(), "/var/lib/zookeeper".to_string()),
                ("tickTime".to_string(), "2000".to_string()),
                ("initLimit".to_string(), "5".to_string()),
                ("syncLimit".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_toml_settings() {
        let toml_content = r#"
            conf_file = "zoo.cfg"
            conf_dir = "/tmp/zk/conf"

            [config]
            clientPort = 2181
            dataDir = "/tmp/zk/data"
            reconfigEnabled = true

            [nodes]
            "server.1" = "zk1:2888:3888"
            "server.2" = "zk2:2888:3888"

            [zk]
            bin = "/usr/local/zookeeper/bin/zkCli.sh"
            connect = "zk1:2181"
            timeout_secs = 30
        "#;

        let settings: ReconcilerConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(settings.conf_dir, "/tmp/zk/conf");
        assert_eq!(settings.zk.connect, "zk1:2181");
        assert_eq!(settings.zk.timeout_secs, 30);
        assert_eq!(
            settings.config_pairs(),
            vec![
                ("clientPort".to_string(), "2181".to_string()),
                ("dataDir".to_string(), "/tmp/zk/data".to_string()),
                ("reconfigEnabled".to_string(), "true".to_string()),
            ]
        );
        assert_eq!(settings.node_pairs().len(), 2);
        // Unset sections keep their defaults.
        assert_eq!(settings.immutable_keys, vec![DYNAMIC_CONFIG_KEY.to_string()]);
    }
}
