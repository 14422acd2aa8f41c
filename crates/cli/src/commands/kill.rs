// SPDX-License-Identifier: MIT

//! `nx kill <name>` — kill-session (§6).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{CommandBuilder, FleetConfig, NodeResult};
use nexus_transport::Transport;

use crate::error::ExitError;

const KILL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct KillArgs {
    /// Session name, bare or qualified as node/session
    pub name: String,
}

pub async fn handle(
    args: KillArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let target = super::resolve_target(&args.name, config, transport.clone()).await?;
    let builder = CommandBuilder::fleet();
    let argv = builder.kill(&target.session);
    let result = transport
        .run_on_node(&target.node, &argv, KILL_TIMEOUT)
        .await;
    match result {
        NodeResult::Ok { .. } => {
            println!("Killed {target}");
            Ok(())
        }
        NodeResult::CommandFailed { stderr, .. } => {
            Err(ExitError::protocol(stderr.trim().to_string()).into())
        }
        NodeResult::Unreachable { reason } => {
            Err(ExitError::user(format!("{} is unreachable: {reason}", target.node)).into())
        }
    }
}
