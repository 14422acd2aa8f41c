// SPDX-License-Identifier: MIT

//! `nx gc [--dry-run] [name]` — reap dead sessions across the fleet (§6).
//!
//! With no `name`, scans the whole fleet; with a `name`, scopes the scan to
//! sessions matching that bare or qualified name. Prompts for confirmation
//! when stdin is a tty; auto-proceeds when piped.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{parse_list_output, CommandBuilder, FleetConfig, NodeResult, ParsedName, QualifiedName};
use nexus_transport::{fan_out, Transport};
use tokio_util::sync::CancellationToken;

use crate::error::ExitError;

const LIST_TIMEOUT: Duration = Duration::from_secs(2);
const KILL_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Args)]
pub struct GcArgs {
    /// Only consider sessions matching this bare or qualified name
    pub name: Option<String>,

    /// List what would be killed without killing it
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn handle(
    args: GcArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
) -> Result<()> {
    let builder = CommandBuilder::fleet();
    let node_names = config.node_names();
    let results = fan_out(
        transport.clone(),
        &node_names,
        &builder.list(),
        config.max_concurrent_ssh,
        LIST_TIMEOUT,
        CancellationToken::new(),
    )
    .await;

    let name_filter = args.name.as_deref().map(QualifiedName::parse_loose);

    let mut dead = Vec::new();
    for node in &node_names {
        let Some(result) = results.get(node) else {
            continue;
        };
        if !result.is_ok() {
            tracing::warn!(%node, "node unreachable during gc scan");
            continue;
        }
        let records =
            parse_list_output(result.stdout()).map_err(|e| ExitError::protocol(e.to_string()))?;
        for record in records {
            if !record.is_dead {
                continue;
            }
            let matches_filter = match &name_filter {
                None => true,
                Some(ParsedName::Qualified(q)) => q.node == *node && q.session == record.name,
                Some(ParsedName::Unqualified(name)) => *name == record.name,
            };
            if matches_filter {
                dead.push(QualifiedName::new(node.clone(), record.name));
            }
        }
    }

    if dead.is_empty() {
        println!("No dead sessions to reap");
        return Ok(());
    }

    for target in &dead {
        println!("{target}");
    }

    if args.dry_run {
        return Ok(());
    }

    if std::io::stdin().is_terminal() && !confirm(dead.len())? {
        println!("Aborted");
        return Ok(());
    }

    for target in &dead {
        let argv = builder.kill(&target.session);
        let result = transport
            .run_on_node(&target.node, &argv, KILL_TIMEOUT)
            .await;
        if let NodeResult::CommandFailed { stderr, .. } = result {
            tracing::warn!(%target, %stderr, "gc: failed to kill session");
        }
    }
    println!("Reaped {} session(s)", dead.len());
    Ok(())
}

fn confirm(count: usize) -> Result<bool> {
    use std::io::Write;
    print!("Kill {count} dead session(s)? [y/N] ");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
