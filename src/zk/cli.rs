//! Subprocess wrapper around the ZooKeeper administrative CLI.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::schema::ZkCliConfig;

/// Errors from administrative CLI invocations.
#[derive(Debug, Error)]
pub enum ZkError {
    #[error("failed to spawn {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{bin} exited with status {code}: {stderr}")]
    CommandFailed {
        bin: String,
        code: i32,
        stderr: String,
    },

    #[error("administrative CLI timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to the external `zkCli.sh` tool.
///
/// Created once per run and passed by reference to whatever needs live
/// cluster access; there is no process-wide memoized connection. Each call
/// runs one CLI session: the command is piped to stdin, followed by `quit`.
pub struct ZkCli {
    bin: String,
    connect: String,
    timeout: Duration,
}

impl ZkCli {
    pub fn new(config: &ZkCliConfig) -> Self {
        Self {
            bin: config.bin.clone(),
            connect: config.connect.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Fetch the live membership report from `/zookeeper/config`.
    ///
    /// The returned text carries `server.N=...` lines and a `version=<hex>`
    /// trailer, possibly interleaved with CLI log output; the membership
    /// parser ignores non-member lines.
    pub async fn fetch_config(&self) -> Result<String, ZkError> {
        self.run("get /zookeeper/config").await
    }

    /// Replace the ensemble membership in one shot.
    ///
    /// `members` is the full comma-joined desired membership; the service
    /// rejects concurrent reconfigurations, so callers issue at most one
    /// per run.
    pub async fn reconfig(&self, members: &str) -> Result<(), ZkError> {
        tracing::info!(members = %members, "issuing reconfig");
        self.run(&format!("reconfig -members {}", members)).await?;
        Ok(())
    }

    async fn run(&self, command: &str) -> Result<String, ZkError> {
        tracing::debug!(bin = %self.bin, command = %command, "running administrative CLI");

        let mut child = Command::new(&self.bin)
            .arg("-server")
            .arg(&self.connect)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timeout drops the child mid-wait; the command is already on
            // its stdin by then and must not execute after we report failure.
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ZkError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(format!("{}\nquit\n", command).as_bytes())
                .await?;
            // Dropping stdin closes the pipe and lets the CLI exit.
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ZkError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            return Err(ZkError::CommandFailed {
                bin: self.bin.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ZkError::CommandFailed {
            bin: "/opt/zookeeper/bin/zkCli.sh".to_string(),
            code: 1,
            stderr: "KeeperErrorCode = NewConfigNoQuorum".to_string(),
        };
        assert!(err.to_string().contains("status 1"));
        assert!(err.to_string().contains("NewConfigNoQuorum"));

        let err = ZkError::Timeout(60);
        assert_eq!(
            err.to_string(),
            "administrative CLI timed out after 60 seconds"
        );
    }
}
