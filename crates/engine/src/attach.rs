// SPDX-License-Identifier: MIT

//! C5: the attach state machine (§4.5).
//!
//! Detects the caller's current tmux-nesting context from the `TMUX`
//! environment variable and dispatches to one of five scenarios. Scenario
//! A replaces the current process image (never returns on success);
//! scenarios B/C spawn a fire-and-forget detached window and the caller
//! exits 0.
//!
//! Scenario selection and argv construction are pure ([`plan`]) so they're
//! unit-testable without ever touching a real process; [`attach`] is the
//! thin, untestable shell around it that actually execs or spawns.

use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use nexus_core::{CommandBuilder, FleetConfig, NodeName, QualifiedName};

use crate::error::AttachError;

/// The dedicated socket name isolating fleet sessions from the user's
/// personal tmux namespace (§4.3, §6).
const FLEET_SOCKET: &str = "nexus";

/// One of five nesting scenarios (§4.5), determined by whether `TMUX` is
/// set, which socket it names, and whether the target node is local.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// `TMUX` unset, target is local: replace process with a direct attach.
    ALocal,
    /// `TMUX` unset, target is remote: replace process with a remote-shell
    /// hop wrapping the attach.
    ARemote,
    /// `TMUX` set and on the `nexus` socket, target is local: switch-client
    /// in place.
    BLocal,
    /// `TMUX` set and on the `nexus` socket, target is remote: spawn a new
    /// window wrapping a remote-shell hop.
    BRemote,
    /// `TMUX` set and on a socket other than `nexus` (the user's personal
    /// tmux): spawn a new window on the caller's own socket.
    C,
}

/// How a planned argv is meant to be dispatched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Scenario A: replace the current process image.
    Exec,
    /// Scenario B/C: spawn a detached, fire-and-forget window.
    Spawn,
}

/// A fully planned attach dispatch: which scenario fired and the exact
/// argv that would be exec'd or spawned. Pure — building a plan never
/// touches a subprocess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachPlan {
    pub scenario: Scenario,
    pub argv: Vec<String>,
    mode: Mode,
}

/// What happened after dispatching [`attach`].
#[derive(Debug)]
pub enum AttachOutcome {
    /// Scenario B/C: a detached window was spawned; caller should exit 0.
    Spawned { argv: Vec<String> },
}

/// Parse `TMUX` as `path,pid,session` and decide the scenario (§4.5
/// nesting detection rule): the scenario is B iff the socket path's final
/// component is `nexus`.
pub fn detect_scenario(tmux_env: Option<&str>, target_node: &NodeName) -> Scenario {
    let local = target_node.is_local();
    match tmux_env {
        None => {
            if local {
                Scenario::ALocal
            } else {
                Scenario::ARemote
            }
        }
        Some(value) => {
            let socket_path = value.split(',').next().unwrap_or("");
            let socket_name = std::path::Path::new(socket_path)
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("");
            if socket_name == FLEET_SOCKET {
                if local {
                    Scenario::BLocal
                } else {
                    Scenario::BRemote
                }
            } else {
                Scenario::C
            }
        }
    }
}

/// Build the attach plan for `target` (pure: §8 invariant 6, scenario
/// partition, and scenario S5 are both asserted directly against this).
fn plan(target: &QualifiedName, config: &FleetConfig, tmux_env: Option<&str>) -> AttachPlan {
    let scenario = detect_scenario(tmux_env, &target.node);
    let builder = CommandBuilder::fleet();

    match scenario {
        Scenario::ALocal => AttachPlan {
            scenario,
            argv: builder.attach(&target.session),
            mode: Mode::Exec,
        },
        Scenario::ARemote => {
            let alias = config.alias_for(&target.node);
            let mut argv = vec!["ssh".to_string(), "-t".to_string(), alias];
            argv.extend(builder.attach(&target.session));
            AttachPlan {
                scenario,
                argv,
                mode: Mode::Exec,
            }
        }
        Scenario::BLocal => AttachPlan {
            scenario,
            argv: builder.switch_client(&target.session),
            mode: Mode::Spawn,
        },
        Scenario::BRemote => {
            let alias = config.alias_for(&target.node);
            let inner = remote_attach_hop(&alias, &target.session);
            AttachPlan {
                scenario,
                argv: builder.new_window(&target.session, &inner),
                mode: Mode::Spawn,
            }
        }
        Scenario::C => {
            let alias = config.alias_for(&target.node);
            let inner = remote_attach_hop(&alias, &target.session);
            // Scenario C binds to the caller's own (non-nexus) socket,
            // not the fleet socket: use bare `tmux new-window`, no `-L`.
            let argv = vec![
                "tmux".to_string(),
                "new-window".to_string(),
                "-n".to_string(),
                target.session.clone(),
                inner,
            ];
            AttachPlan { scenario, argv, mode: Mode::Spawn }
        }
    }
}

/// The remote-shell hop wrapped inside B-remote/C windows (§4.5 table).
/// No "remain-on-exit" setting is ever applied: the window must close on
/// its own once the hop exits (zombie-avoidance rule).
fn remote_attach_hop(alias: &str, session: &str) -> String {
    format!("ssh -t {alias} 'tmux -L nexus attach -t {session}'")
}

/// Dispatch `attach` for `target` given the process's current `TMUX`
/// environment and the fleet configuration (used to resolve remote-shell
/// aliases).
///
/// Never returns on scenario A success (the process image is replaced).
/// Returns `Ok(AttachOutcome::Spawned { .. })` on B/C success, after which
/// the caller exits 0. Raises only for `UnknownNode` or a spawn failure
/// before the handoff.
pub fn attach(
    target: &QualifiedName,
    config: &FleetConfig,
    tmux_env: Option<&str>,
) -> Result<AttachOutcome, AttachError> {
    if !target.node.is_local() && !config.contains(&target.node) {
        return Err(AttachError::UnknownNode {
            node: target.node.to_string(),
        });
    }

    let planned = plan(target, config, tmux_env);
    match planned.mode {
        Mode::Exec => Err(AttachError::Exec(exec_replace(&planned.argv))),
        Mode::Spawn => spawn_detached(&planned.argv),
    }
}

/// Replace the current process image with `argv` (scenario A). Uses
/// `exec` on Unix so signal propagation and terminal ownership transfer
/// cleanly — never a spawn-and-wait (§9 design note). Only returns on
/// failure; the `io::Error` is always the actual cause.
pub(crate) fn exec_replace(argv: &[String]) -> std::io::Error {
    Command::new(&argv[0]).args(&argv[1..]).exec()
}

/// Spawn a fire-and-forget window (scenario B/C). The window owns the
/// subsequent remote-shell hop; the caller has nothing left to own and
/// must exit immediately to free the user's shell (§4.5).
fn spawn_detached(argv: &[String]) -> Result<AttachOutcome, AttachError> {
    Command::new(&argv[0])
        .args(&argv[1..])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(AttachError::Spawn)?;
    Ok(AttachOutcome::Spawned {
        argv: argv.to_vec(),
    })
}

#[cfg(test)]
#[path = "attach_tests.rs"]
mod tests;
