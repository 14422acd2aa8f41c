// SPDX-License-Identifier: MIT

//! `nx peek <name>` — print a session's current pane without attaching
//! (§6).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{CommandBuilder, FleetConfig, NodeResult};
use nexus_transport::Transport;

use crate::error::ExitError;

const PEEK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct PeekArgs {
    /// Session name, bare or qualified as node/session
    pub name: String,
}

pub async fn handle(
    args: PeekArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let target = super::resolve_target(&args.name, config, transport.clone()).await?;
    let builder = CommandBuilder::fleet();
    let argv = builder.capture_current_screen(&target.session);
    let result = transport
        .run_on_node(&target.node, &argv, PEEK_TIMEOUT)
        .await;
    match result {
        NodeResult::Ok { stdout, .. } => {
            print!("{stdout}");
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
