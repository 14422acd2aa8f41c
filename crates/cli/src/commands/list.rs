// SPDX-License-Identifier: MIT

//! `nx list` — fan out the pinned `list` operation across the fleet and
//! render one row per live or dead session, plus one row per unreachable
//! node (§6, S1).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use nexus_core::{parse_list_output, CommandBuilder, FleetConfig};
use nexus_transport::{fan_out, Transport};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::ExitError;
use crate::output::OutputFormat;
use crate::table::{Column, Table};

const LIST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Args)]
pub struct ListArgs {}

#[derive(Serialize)]
struct Row {
    node: String,
    session: String,
    windows: u32,
    attached: u32,
    command: String,
    status: String,
}

pub async fn handle(
    _args: ListArgs,
    config: &FleetConfig,
    transport: Arc<dyn Transport>,
    format: OutputFormat,
) -> Result<()> {
    let builder = CommandBuilder::fleet();
    let node_names = config.node_names();
    let results = fan_out(
        transport,
        &node_names,
        &builder.list(),
        config.max_concurrent_ssh,
        LIST_TIMEOUT,
        CancellationToken::new(),
    )
    .await;

    let mut rows = Vec::new();
    for node in &node_names {
        let Some(result) = results.get(node) else {
            continue;
        };
        if !result.is_ok() {
            rows.push(Row {
                node: node.to_string(),
                session: String::new(),
                windows: 0,
                attached: 0,
                command: String::new(),
                status: "unreachable".to_string(),
            });
            continue;
        }
        let records =
            parse_list_output(result.stdout()).map_err(|e| ExitError::protocol(e.to_string()))?;
        for record in records {
            let status = if !record.is_dead {
                "running".to_string()
            } else {
                match record.exit_status {
                    Some(code) => format!("dead (exit {code})"),
                    None => "dead".to_string(),
                }
            };
            rows.push(Row {
                node: node.to_string(),
                session: record.name,
                windows: record.windows,
                attached: record.attached,
                command: record.command,
                status,
            });
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No active sessions");
                return Ok(());
            }
            let mut table = Table::new(vec![
                Column::left("NODE"),
                Column::left("SESSION"),
                Column::right("WINDOWS"),
                Column::right("ATTACHED"),
                Column::left("COMMAND"),
                Column::status("STATUS"),
            ]);
            for row in &rows {
                table.row(vec![
                    row.node.clone(),
                    row.session.clone(),
                    row.windows.to_string(),
                    row.attached.to_string(),
                    row.command.clone(),
                    row.status.clone(),
                ]);
            }
            table.render(&mut std::io::stdout());
        }
    }
    Ok(())
}
