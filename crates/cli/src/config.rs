// SPDX-License-Identifier: MIT

//! The `fleet.toml` configuration collaborator (§6, §9 Open Question 1).
//!
//! Loads and validates the fleet's node list and defaults, expanding
//! `default_cmd` against the environment at load time, and hands the core
//! an already-frozen [`FleetConfig`]. The core itself never reads a file or
//! an environment variable for configuration purposes.

use std::path::{Path, PathBuf};

use nexus_core::{FleetConfig, NodeName, NodeSpec};
use serde::Deserialize;
use thiserror::Error;

const ENV_CONFIG: &str = "NEXUS_CONFIG";
const DEFAULT_MAX_CONCURRENT_SSH: usize = 16;
const DEFAULT_CMD: &str = "$SHELL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no fleet.toml found (tried --config, ${ENV_CONFIG}, ./fleet.toml, ~/.config/nexus/fleet.toml)")]
    NotFound,

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    alias: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    nodes: Vec<RawNode>,
    default_node: Option<String>,
    default_cmd: Option<String>,
    max_concurrent_ssh: Option<usize>,
    #[serde(default)]
    auto_reap_clean_exit: bool,
}

/// Load and validate the fleet configuration.
///
/// Search order: `explicit_path` (`--config`), then `$NEXUS_CONFIG`, then
/// `./fleet.toml`, then `~/.config/nexus/fleet.toml`. A path supplied
/// explicitly (by flag or environment variable) must exist — only the two
/// implicit defaults are silently skipped when absent.
pub fn load(explicit_path: Option<&Path>) -> Result<FleetConfig, ConfigError> {
    let path = resolve_path(explicit_path)?;
    let raw_text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&raw_text).map_err(|source| ConfigError::Parse { path, source })?;
    Ok(build(raw))
}

fn resolve_path(explicit_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit_path {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return Ok(PathBuf::from(path));
    }
    let cwd_candidate = PathBuf::from("fleet.toml");
    if cwd_candidate.is_file() {
        return Ok(cwd_candidate);
    }
    if let Some(home_candidate) = home_config_path() {
        if home_candidate.is_file() {
            return Ok(home_candidate);
        }
    }
    Err(ConfigError::NotFound)
}

fn home_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/nexus/fleet.toml"))
}

fn build(raw: RawConfig) -> FleetConfig {
    let mut nodes: Vec<NodeSpec> = raw
        .nodes
        .into_iter()
        .map(|n| NodeSpec {
            name: NodeName::new(n.name),
            alias: n.alias,
        })
        .collect();

    if !nodes.iter().any(|n| n.name.is_local()) {
        nodes.insert(
            0,
            NodeSpec {
                name: NodeName::local(),
                alias: None,
            },
        );
    }

    let default_node = raw
        .default_node
        .map(NodeName::new)
        .unwrap_or_else(NodeName::local);

    FleetConfig {
        nodes,
        default_node,
        default_cmd: expand_env_vars(raw.default_cmd.as_deref().unwrap_or(DEFAULT_CMD)),
        max_concurrent_ssh: raw.max_concurrent_ssh.unwrap_or(DEFAULT_MAX_CONCURRENT_SSH),
        auto_reap_clean_exit: raw.auto_reap_clean_exit,
    }
}

/// Expand `$VAR` and `${VAR}` references against the process environment.
/// Unknown variables expand to an empty string (shell-like behavior for an
/// unset variable), never an error — `default_cmd` is a best-effort
/// convenience default, not a validated field.
fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();
    let bytes = input.as_bytes();

    while let Some((i, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        if bytes.get(i + 1) == Some(&b'{') {
            if let Some(end) = input[i + 2..].find('}') {
                let var = &input[i + 2..i + 2 + end];
                out.push_str(&std::env::var(var).unwrap_or_default());
                for _ in 0..(end + 2) {
                    chars.next();
                }
                continue;
            }
        }
        let start = i + 1;
        let end = input[start..]
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .map(|n| start + n)
            .unwrap_or(input.len());
        if end == start {
            out.push('$');
            continue;
        }
        let var = &input[start..end];
        out.push_str(&std::env::var(var).unwrap_or_default());
        for _ in 0..(end - start) {
            chars.next();
        }
    }
    out
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
