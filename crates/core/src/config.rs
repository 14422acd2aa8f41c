// SPDX-License-Identifier: MIT

//! The frozen configuration value the core receives (§6, §9 Open Question 1).
//!
//! Loading `fleet.toml` from disk, searching the candidate paths, and
//! expanding `$VAR`/`${VAR}` references in `default_cmd` are all the
//! configuration collaborator's job (`nexus-cli::config`). This type is
//! just the already-validated, already-expanded result the core consumes.

use crate::NodeName;
use serde::Deserialize;

/// One fleet member as declared in `fleet.toml`.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeSpec {
    pub name: NodeName,
    /// The alias the remote-shell client dials; defaults to `name` when
    /// omitted (and is unused entirely for `local`).
    pub alias: Option<String>,
}

/// A frozen, already-validated fleet configuration.
#[derive(Clone, Debug)]
pub struct FleetConfig {
    pub nodes: Vec<NodeSpec>,
    pub default_node: NodeName,
    /// Already expanded against the environment at load time.
    pub default_cmd: String,
    pub max_concurrent_ssh: usize,
    pub auto_reap_clean_exit: bool,
}

impl FleetConfig {
    /// All configured node names, in declaration order.
    pub fn node_names(&self) -> Vec<NodeName> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }

    /// The dial alias for a node: its declared `alias`, or its own name
    /// when no alias was given.
    pub fn alias_for(&self, node: &NodeName) -> String {
        self.nodes
            .iter()
            .find(|n| &n.name == node)
            .and_then(|n| n.alias.clone())
            .unwrap_or_else(|| node.to_string())
    }

    pub fn contains(&self, node: &NodeName) -> bool {
        self.nodes.iter().any(|n| &n.name == node)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
