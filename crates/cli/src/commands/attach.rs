// SPDX-License-Identifier: MIT

//! `nx attach <name>` — resolve then dispatch through the attach state
//! machine (§6, §4.5).

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use nexus_core::FleetConfig;
use nexus_engine::{attach, AttachError, AttachOutcome};
use nexus_transport::Transport;

use crate::error::ExitError;

#[derive(Args)]
pub struct AttachArgs {
    /// Session name, bare or qualified as node/session
    pub name: String,
}

/// On scenario A success this never returns — the process image has been
/// replaced by the time `attach()` would come back. A returned `Ok` means
/// a scenario B/C window was spawned; the caller exits 0 normally.
pub async fn handle(
    args: AttachArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let target = super::resolve_target(&args.name, config, transport).await?;
    let tmux_env = std::env::var("TMUX").ok();
    match attach(&target, config, tmux_env.as_deref()) {
        Ok(AttachOutcome::Spawned { .. }) => Ok(()),
        Err(err) => Err(attach_error_to_exit(err).into()),
    }
}

/// `UnknownNode` is a user error (§7): exit 1. A spawn/exec failure before
/// the handoff is a protocol-level surprise: exit 2.
fn attach_error_to_exit(err: AttachError) -> ExitError {
    match err {
        AttachError::UnknownNode { .. } => ExitError::user(err.to_string()),
        AttachError::Exec(_) | AttachError::Spawn(_) => ExitError::protocol(err.to_string()),
    }
}
