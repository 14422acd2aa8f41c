// SPDX-License-Identifier: MIT

//! `nx new <name> [cmd...]` — create a detached session (§6, §7
//! `DuplicateSession`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{CommandBuilder, FleetConfig, NodeResult, ParsedName, QualifiedName};
use nexus_transport::Transport;

use crate::error::ExitError;

const NEW_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct NewArgs {
    /// Session name, optionally qualified as node/session
    pub name: String,

    /// Command to run in the new session (defaults to the fleet's default_cmd)
    pub command: Vec<String>,

    /// Working directory for the new session
    #[arg(short = 'c', long = "cwd")]
    pub cwd: Option<String>,
}

/// `new` is not pre-checked for a name collision (§7): it relies on tmux's
/// own "duplicate session" rejection and wraps the resulting stderr. This
/// is race-free by construction — there's no check-then-act window.
pub async fn handle(
    args: NewArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let target = match QualifiedName::parse_loose(&args.name) {
        ParsedName::Qualified(q) => q,
        ParsedName::Unqualified(session) => {
            QualifiedName::new(config.default_node.clone(), session)
        }
    };

    if !target.node.is_local() && !config.contains(&target.node) {
        return Err(ExitError::user(format!("unknown node {:?}", target.node.to_string())).into());
    }

    let command_argv: Vec<String> = if args.command.is_empty() {
        shell_words::split(&config.default_cmd).unwrap_or_else(|_| vec![config.default_cmd.clone()])
    } else {
        args.command
    };

    let builder = CommandBuilder::fleet();
    let argv = builder.new_session(&target.session, args.cwd.as_deref(), &command_argv);
    let result = transport.run_on_node(&target.node, &argv, NEW_TIMEOUT).await;

    match result {
        NodeResult::Ok { .. } => {
            println!("Created {target}");
            Ok(())
        }
        NodeResult::CommandFailed { stderr, .. } => {
            if stderr.to_lowercase().contains("duplicate session") {
                Err(ExitError::user(format!(
                    "Session '{}' already exists on {}.",
                    target.session, target.node
                ))
                .into())
            } else {
                Err(ExitError::protocol(stderr.trim().to_string()).into())
            }
        }
        NodeResult::Unreachable { reason } => {
            Err(ExitError::user(format!("{} is unreachable: {reason}", target.node)).into())
        }
    }
}
