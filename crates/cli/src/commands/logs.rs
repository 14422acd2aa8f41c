// SPDX-License-Identifier: MIT

//! `nx logs <name> [--lines N]` — print scrollback (§6): default 100 lines
//! when stdout is a tty, full scrollback when piped.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{CommandBuilder, FleetConfig, NodeResult};
use nexus_transport::Transport;

use crate::error::ExitError;

const LOGS_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_TTY_LINES: u32 = 100;

#[derive(Args)]
pub struct LogsArgs {
    /// Session name, bare or qualified as node/session
    pub name: String,

    /// Number of scrollback lines to show (default: 100 on a tty, full
    /// scrollback when piped)
    #[arg(short = 'n', long = "lines")]
    pub lines: Option<u32>,
}

pub async fn handle(
    args: LogsArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let target = super::resolve_target(&args.name, config, transport.clone()).await?;
    let lines = args.lines.or_else(|| {
        if std::io::stdout().is_terminal() {
            Some(DEFAULT_TTY_LINES)
        } else {
            None
        }
    });
    let builder = CommandBuilder::fleet();
    let argv = builder.capture(&target.session, lines);
    let result = transport
        .run_on_node(&target.node, &argv, LOGS_TIMEOUT)
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
