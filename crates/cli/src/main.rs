// SPDX-License-Identifier: MIT

//! nx — Nexus fleet orchestrator CLI.

mod color;
mod commands;
mod config;
mod error;
mod output;
mod table;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{attach, dash, gc, kill, list, logs, new, peek, send};
use error::{format_error, ExitError};
use nexus_transport::{ProcessTransport, Transport};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "nx",
    version,
    about = "Nexus - fleet orchestrator for tmux sessions",
    styles = color::styles()
)]
struct Cli {
    /// Path to fleet.toml (overrides $NEXUS_CONFIG and the default search path)
    #[arg(long = "config", global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List live sessions across the fleet
    List(list::ListArgs),
    /// Create a new detached session
    New(new::NewArgs),
    /// Attach to a session
    Attach(attach::AttachArgs),
    /// Print a session's current pane without attaching
    Peek(peek::PeekArgs),
    /// Print a session's scrollback
    Logs(logs::LogsArgs),
    /// Send keys to a session
    Send(send::SendArgs),
    /// Kill a session
    Kill(kill::KillArgs),
    /// Reap dead sessions across the fleet
    Gc(gc::GcArgs),
    /// Open a read-only dashboard over every live session
    Dash,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e.downcast_ref::<ExitError>().map_or(2, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {msg}");
        }
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let fleet = config::load(cli.config.as_deref()).map_err(|e| ExitError::user(e.to_string()))?;
    let transport: Arc<dyn Transport> = Arc::new(ProcessTransport::new(&fleet));

    match cli.command {
        Commands::List(args) => list::handle(args, &fleet, transport, cli.output).await,
        Commands::New(args) => new::handle(args, &fleet, transport).await,
        Commands::Attach(args) => attach::handle(args, &fleet, transport).await,
        Commands::Peek(args) => peek::handle(args, &fleet, transport).await,
        Commands::Logs(args) => logs::handle(args, &fleet, transport).await,
        Commands::Send(args) => send::handle(args, &fleet, transport).await,
        Commands::Kill(args) => kill::handle(args, &fleet, transport).await,
        Commands::Gc(args) => gc::handle(args, &fleet, transport).await,
        Commands::Dash => dash::handle(&fleet, transport).await,
    }
}
