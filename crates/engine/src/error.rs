// SPDX-License-Identifier: MIT

//! Error taxonomy for the resolver (§7) and the attach state machine.

use nexus_core::QualifiedName;
use thiserror::Error;

/// Raised by [`crate::resolve`] for the 0/≥2 match branches (§4.4). The
/// unique-match branch never raises.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no session named {name:?} found on any node")]
    NotFound { name: String },

    /// The picker cancelled (non-zero exit); per §4.4 this is surfaced as
    /// `SessionNotFound`, not a distinct variant.
    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("Ambiguous session. Matches: {}.", format_matches(.matches))]
    Ambiguous { matches: Vec<QualifiedName> },

    #[error("unknown node {node:?}")]
    UnknownNode { node: String },

    #[error("fzf not found on PATH")]
    MissingPicker,
}

fn format_matches(matches: &[QualifiedName]) -> String {
    matches
        .iter()
        .map(|q| q.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raised by [`crate::attach`] only for `UnknownNode` or a transport/exec
/// spawn failure before the handoff (§4.5, §7); never for a successful
/// process replacement or fire-and-forget spawn.
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("unknown node {node:?}")]
    UnknownNode { node: String },

    #[error("failed to replace process image: {0}")]
    Exec(#[source] std::io::Error),

    #[error("failed to spawn detached window: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Raised by [`crate::dash`] while composing the dashboard, before the
/// final re-attach handoff (§4.6).
#[derive(Debug, Error)]
pub enum DashError {
    #[error("could not resolve the path to the current executable: {0}")]
    ResolveBinary(#[source] std::io::Error),

    #[error("dashboard composition step `{argv:?}` failed: {reason}")]
    Compose { argv: Vec<String>, reason: String },

    #[error(transparent)]
    Attach(#[from] AttachError),
}
