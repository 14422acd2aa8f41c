// SPDX-License-Identifier: MIT

//! `nx send [--raw] <name> keys...` — send-keys, auto-appending `Enter`
//! unless `--raw` (§6, S6).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{CommandBuilder, FleetConfig, NodeResult};
use nexus_transport::Transport;

use crate::error::ExitError;

const SEND_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct SendArgs {
    /// Send the keys literally, without appending Enter
    #[arg(long)]
    pub raw: bool,

    /// Session name, bare or qualified as node/session
    pub name: String,

    /// Keys to send
    #[arg(required = true)]
    pub keys: Vec<String>,
}

pub async fn handle(
    args: SendArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let target = super::resolve_target(&args.name, config, transport.clone()).await?;
    let builder = CommandBuilder::fleet();
    let argv = builder.send(&target.session, &args.keys, args.raw);
    let result = transport
        .run_on_node(&target.node, &argv, SEND_TIMEOUT)
        .await;
    match result {
        NodeResult::Ok { .. } => Ok(()),
        NodeResult::CommandFailed { stderr, .. } => {
            Err(ExitError::protocol(stderr.trim().to_string()).into())
        }
        NodeResult::Unreachable { reason } => {
            Err(ExitError::user(format!("{} is unreachable: {reason}", target.node)).into())
        }
    }
}
