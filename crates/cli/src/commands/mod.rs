// SPDX-License-Identifier: MIT

//! Command handlers (§6 command surface table).
//!
//! Each handler owns one subcommand: it parses its own `clap::Args`,
//! resolves a target through `nexus-engine` when the command accepts a
//! bare or qualified session name, dispatches through `nexus-transport`,
//! and renders output as a plain-text table/status line or JSON.

pub mod attach;
pub mod dash;
pub mod gc;
pub mod kill;
pub mod list;
pub mod logs;
pub mod new;
pub mod peek;
pub mod send;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Result;
use nexus_core::{FleetConfig, QualifiedName};
use nexus_engine::{resolve, FzfPicker, Picker, ResolveError};
use nexus_transport::Transport;

use crate::error::ExitError;

/// Resolve `name` to a qualified target, converting the resolver's error
/// taxonomy into exit-code-tagged CLI errors (§7): not-found and
/// ambiguous-non-interactive are user errors (exit 1).
///
/// `fzf` is checked for presence only when a collision could actually
/// reach the interactive picker (§6) — a piped invocation with a unique or
/// qualified match never needs it.
pub async fn resolve_target(
    name: &str,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<QualifiedName> {
    let interactive = std::io::stdin().is_terminal();
    if interactive && !FzfPicker::is_available() {
        return Err(ExitError::user(
            "fzf is required to disambiguate a session name interactively; install it on PATH or pass a fully qualified node/session name",
        )
        .into());
    }
    let picker = FzfPicker::new();
    resolve(name, config, transport, &picker, interactive)
        .await
        .map_err(|err| resolve_error_to_exit(err).into())
}

fn resolve_error_to_exit(err: ResolveError) -> ExitError {
    match err {
        ResolveError::Ambiguous { .. } => {
            ExitError::user(format!("{err} Pass a fully qualified node/session name."))
        }
        ResolveError::NotFound { .. }
        | ResolveError::SelectionCancelled
        | ResolveError::UnknownNode { .. }
        | ResolveError::MissingPicker => ExitError::user(err.to_string()),
    }
}
