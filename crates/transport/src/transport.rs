// SPDX-License-Identifier: MIT

//! C1: run a command vector on a named node.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use nexus_core::{FleetConfig, NodeName, NodeResult};
use tokio::process::Command;

use crate::subprocess::run_with_timeout;

/// Run a command vector on a node and report the outcome.
///
/// Implementations must never panic or propagate an error for a
/// transport-level failure (connect timeout, dial error, spawn failure) —
/// those are folded into [`NodeResult::Unreachable`] so fan-out stays
/// total.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn run_on_node(&self, node: &NodeName, argv: &[String], timeout: Duration) -> NodeResult;
}

/// The production [`Transport`]: local nodes spawn directly, remote nodes
/// are dispatched through a configurable remote-shell client (default
/// `ssh`) reusing a pre-established multiplexed control connection.
pub struct ProcessTransport {
    /// The remote-shell binary, e.g. `ssh`.
    remote_shell_bin: String,
    /// Node name → dial alias, resolved once from the frozen fleet config.
    aliases: HashMap<NodeName, String>,
}

impl ProcessTransport {
    /// Build a transport that dials each remote node by its configured
    /// alias (falling back to the node's own name when none is set).
    pub fn new(config: &FleetConfig) -> Self {
        let aliases = config
            .nodes
            .iter()
            .map(|n| (n.name.clone(), config.alias_for(&n.name)))
            .collect();
        Self {
            remote_shell_bin: "ssh".to_string(),
            aliases,
        }
    }

    /// Override the remote-shell binary (tests use this to point at a
    /// fake `ssh` on `PATH`).
    pub fn with_remote_shell_bin(mut self, remote_shell_bin: impl Into<String>) -> Self {
        self.remote_shell_bin = remote_shell_bin.into();
        self
    }

    /// Dial `alias` over the remote-shell client with a strict connect
    /// timeout, quoting `argv` so it survives the hop as a single command
    /// line.
    fn build_remote_command(&self, alias: &str, argv: &[String], timeout: Duration) -> Command {
        let quoted = shell_words::join(argv);
        let mut cmd = Command::new(&self.remote_shell_bin);
        cmd.args([
            "-o",
            &format!("ConnectTimeout={}", timeout.as_secs().max(1)),
            "-o",
            "BatchMode=yes",
            alias,
            &quoted,
        ]);
        cmd
    }
}

#[async_trait]
impl Transport for ProcessTransport {
    async fn run_on_node(
        &self,
        node: &NodeName,
        argv: &[String],
        timeout: Duration,
    ) -> NodeResult {
        if argv.is_empty() {
            return NodeResult::Unreachable {
                reason: "empty command vector".to_string(),
            };
        }

        let cmd = if node.is_local() {
            let mut cmd = Command::new(&argv[0]);
            cmd.args(&argv[1..]);
            cmd
        } else {
            let alias = self
                .aliases
                .get(node)
                .map(String::as_str)
                .unwrap_or_else(|| node.as_str());
            self.build_remote_command(alias, argv, timeout)
        };

        match run_with_timeout(cmd, timeout, "remote dispatch").await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                match output.status.code() {
                    Some(0) => NodeResult::Ok { stdout, stderr },
                    Some(code) => NodeResult::CommandFailed {
                        stdout,
                        stderr,
                        exit_code: code,
                    },
                    None => NodeResult::Unreachable {
                        reason: "process terminated by signal".to_string(),
                    },
                }
            }
            Err(reason) => {
                tracing::warn!(node = %node, %reason, "transport failure");
                NodeResult::Unreachable { reason }
            }
        }
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
