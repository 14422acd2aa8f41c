// SPDX-License-Identifier: MIT

//! C6: the dashboard composer (§4.6).
//!
//! Builds a transient, read-only multi-pane tmux session on a distinct
//! `nx_dash` socket — one pane per live fleet session — and binds Enter to
//! a shim that tears the dashboard down and re-enters the focused pane's
//! target via [`crate::attach`] under the caller's *original* environment.

use std::sync::Arc;
use std::time::Duration;

use nexus_core::{parse_list_output, CommandBuilder, FleetConfig, NodeName, NodeResult, QualifiedName};
use nexus_transport::{fan_out, Transport};
use tokio_util::sync::CancellationToken;

use crate::attach::exec_replace;
use crate::error::{AttachError, DashError};

/// Pane cap for very large fleets (§4.6 step 5, §9 design note).
pub const DASHBOARD_PANE_CAP: usize = 16;

/// The dedicated socket the dashboard runs on — distinct from `nexus` so a
/// user already inside the fleet socket can still launch it safely.
const DASH_SOCKET: &str = "nx_dash";
const DASH_SESSION: &str = "nx_dash";
const TILED_LAYOUT: &str = "tiled";
const LIST_TIMEOUT: Duration = Duration::from_secs(2);
const COMPOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// What [`dash`] did. `Empty` is a real (non-erroring) outcome; any
/// non-empty fleet ends in a process replacement and never returns a value
/// on success, mirroring [`crate::attach::attach`].
#[derive(Debug)]
pub enum DashOutcome {
    /// No live sessions anywhere in the fleet; caller should print
    /// "No active sessions" and exit 0.
    Empty,
}

/// The capped, ordered set of panes the dashboard will compose, plus
/// whatever didn't fit (§4.6 step 5). Pure — computing the plan never
/// touches tmux.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashPlan {
    pub panes: Vec<QualifiedName>,
    pub elided: Vec<QualifiedName>,
}

/// Sort deterministically (node, then session — matching the resolver's
/// ordering convention, §5) and cap at [`DASHBOARD_PANE_CAP`].
fn build_plan(mut live: Vec<QualifiedName>) -> DashPlan {
    live.sort_by(|a, b| (a.node.as_str(), a.session.as_str()).cmp(&(b.node.as_str(), b.session.as_str())));
    if live.len() > DASHBOARD_PANE_CAP {
        let elided = live.split_off(DASHBOARD_PANE_CAP);
        DashPlan { panes: live, elided }
    } else {
        DashPlan { panes: live, elided: Vec::new() }
    }
}

/// The read-only attach command line run inside a dashboard pane (§4.6
/// step 4): a direct read-only attach for local targets, an SSH-wrapped
/// one for remote targets.
fn pane_command(target: &QualifiedName, config: &FleetConfig) -> String {
    if target.node.is_local() {
        format!("tmux -L nexus attach-session -r -t {}", target.session)
    } else {
        let alias = config.alias_for(&target.node);
        format!(
            "ssh -t {} 'tmux -L nexus attach-session -r -t {}'",
            alias, target.session
        )
    }
}

/// The Enter-key shim (§4.6 "the Enter shim"): a single shell command line
/// performing, strictly in this order: (1) capture the focused pane's
/// `@nx_target`, (2) capture the stored `NX_BIN` path, (3) tear the
/// dashboard down, (4) re-exec into the target. The ordering is
/// load-bearing (§4.6, §8 invariant 7) — step 3 must precede step 4 so
/// the re-entry observes the caller's *original* `TMUX`, not `nx_dash`'s.
fn enter_shim_script() -> String {
    format!(
        "TARGET=$(tmux -L {sock} display-message -p '#{{@nx_target}}'); \
NX_BIN=$(tmux -L {sock} show-environment NX_BIN | cut -d= -f2-); \
tmux -L {sock} detach-client -s {session} && tmux -L {sock} kill-session -t {session}; \
exec \"$NX_BIN\" attach \"$TARGET\"",
        sock = DASH_SOCKET,
        session = DASH_SESSION,
    )
}

async fn dispatch(
    transport: &Arc<dyn Transport>,
    node: &NodeName,
    argv: &[String],
    timeout: Duration,
) -> Result<NodeResult, DashError> {
    let result = transport.run_on_node(node, argv, timeout).await;
    match &result {
        NodeResult::Ok { .. } => Ok(result),
        NodeResult::CommandFailed { stderr, .. } => Err(DashError::Compose {
            argv: argv.to_vec(),
            reason: stderr.clone(),
        }),
        NodeResult::Unreachable { reason } => Err(DashError::Compose {
            argv: argv.to_vec(),
            reason: reason.clone(),
        }),
    }
}

/// Compose and attach to the dashboard (§4.6).
///
/// Never returns on success once at least one live session exists (the
/// current process is replaced by the final attach). Returns
/// `Ok(DashOutcome::Empty)` if the fleet has no live sessions at all.
pub async fn dash(config: &FleetConfig, transport: Arc<dyn Transport>) -> Result<DashOutcome, DashError> {
    let fleet_builder = CommandBuilder::fleet();
    let node_names = config.node_names();
    let results = fan_out(
        transport.clone(),
        &node_names,
        &fleet_builder.list(),
        config.max_concurrent_ssh,
        LIST_TIMEOUT,
        CancellationToken::new(),
    )
    .await;

    let mut live = Vec::new();
    for node in &node_names {
        let Some(result) = results.get(node) else { continue };
        if !result.is_ok() {
            tracing::warn!(%node, "node unreachable while composing dashboard");
            continue;
        }
        let Ok(records) = parse_list_output(result.stdout()) else {
            tracing::warn!(%node, "malformed list output while composing dashboard");
            continue;
        };
        for record in records {
            if !record.is_dead {
                live.push(QualifiedName::new(node.clone(), record.name));
            }
        }
    }

    if live.is_empty() {
        return Ok(DashOutcome::Empty);
    }

    let plan = build_plan(live);
    if !plan.elided.is_empty() {
        tracing::warn!(
            elided = ?plan.elided.iter().map(|q| q.to_string()).collect::<Vec<_>>(),
            "dashboard pane cap ({DASHBOARD_PANE_CAP}) reached; some sessions are not shown"
        );
    }

    let nx_bin = std::env::current_exe().map_err(DashError::ResolveBinary)?;
    let dash_builder = CommandBuilder::new(DASH_SOCKET);
    let local = NodeName::local();

    dispatch(
        &transport,
        &local,
        &dash_builder.new_session(DASH_SESSION, None, &[]),
        COMPOSE_TIMEOUT,
    )
    .await?;

    for target in &plan.panes {
        let command_line = pane_command(target, config);
        dispatch(
            &transport,
            &local,
            &dash_builder.split_window(DASH_SESSION, &command_line),
            COMPOSE_TIMEOUT,
        )
        .await?;
        dispatch(
            &transport,
            &local,
            &dash_builder.set_pane_option(DASH_SESSION, "@nx_target", &target.to_string()),
            COMPOSE_TIMEOUT,
        )
        .await?;
    }

    dispatch(
        &transport,
        &local,
        &dash_builder.select_layout(DASH_SESSION, TILED_LAYOUT),
        COMPOSE_TIMEOUT,
    )
    .await?;

    dispatch(
        &transport,
        &local,
        &dash_builder.set_env(DASH_SESSION, "NX_BIN", &nx_bin.display().to_string()),
        COMPOSE_TIMEOUT,
    )
    .await?;

    dispatch(
        &transport,
        &local,
        &dash_builder.bind_key("Enter", &enter_shim_script()),
        COMPOSE_TIMEOUT,
    )
    .await?;

    let attach_argv = dash_builder.attach(DASH_SESSION);
    Err(DashError::Attach(AttachError::Exec(exec_replace(&attach_argv))))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
