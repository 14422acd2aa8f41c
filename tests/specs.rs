//! Black-box behavioral specifications for the `nx` CLI.
//!
//! These tests invoke the compiled `nx` binary and assert on stdout,
//! stderr, and exit codes (§6 exit codes, §8 scenarios). A handful of
//! tests drive a real local tmux server on the dedicated `nexus` socket —
//! tmux is the core external dependency this project orchestrates, so
//! exercising it for real is more honest than mocking it out here; each
//! session name is made unique per test run to avoid cross-test
//! collisions on that shared socket.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn nx() -> Command {
    Command::cargo_bin("nx").expect("nx binary should build")
}

/// A `fleet.toml` with only the implicit `local` node.
fn local_only_config() -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("tempfile");
    writeln!(f, "default_node = \"local\"\n[[nodes]]\nname = \"local\"").expect("write config");
    f
}

static SESSION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A session name unique to this test process and call site, so
/// concurrently running tests never collide on the shared `nexus` socket.
fn unique_session_name(label: &str) -> String {
    let n = SESSION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("nx-spec-{}-{}-{}", std::process::id(), label, n)
}

// ---------------------------------------------------------------------
// Help / version (no fleet config needed)
// ---------------------------------------------------------------------

#[test]
fn help_lists_every_command() {
    nx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("attach"))
        .stdout(predicate::str::contains("dash"))
        .stdout(predicate::str::contains("gc"));
}

#[test]
fn version_flag_succeeds() {
    nx().arg("--version").assert().success();
}

#[test]
fn no_subcommand_is_a_usage_error() {
    nx().assert().failure();
}

// ---------------------------------------------------------------------
// Configuration errors (§7 user errors, exit 1)
// ---------------------------------------------------------------------

#[test]
fn missing_config_file_is_exit_1() {
    nx()
        .args(["--config", "/nonexistent/path/fleet.toml", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn malformed_config_file_is_exit_1() {
    let mut f = NamedTempFile::new().unwrap();
    writeln!(f, "this is not valid toml = = =").unwrap();

    nx()
        .args(["--config", f.path().to_str().unwrap(), "list"])
        .assert()
        .failure()
        .code(1);
}

// ---------------------------------------------------------------------
// Node validation (§4.5, §7 UnknownNode is a user error, exit 1)
// ---------------------------------------------------------------------

#[test]
fn new_on_unconfigured_node_is_exit_1() {
    let config = local_only_config();
    nx()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "new",
            "ghost-node/some-session",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown node"));
}

#[test]
fn attach_to_unconfigured_node_is_exit_1() {
    let config = local_only_config();
    nx()
        .args([
            "--config",
            config.path().to_str().unwrap(),
            "attach",
            "ghost-node/some-session",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown node"));
}

// ---------------------------------------------------------------------
// Resolution (§4.4): an unqualified name with no match anywhere is
// SessionNotFound, exit 1.
// ---------------------------------------------------------------------

#[test]
fn kill_of_nonexistent_session_is_exit_1() {
    let config = local_only_config();
    let name = unique_session_name("missing");
    nx()
        .args(["--config", config.path().to_str().unwrap(), "kill", &name])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no session named"));
}

// ---------------------------------------------------------------------
// gc is safe to run with no dead sessions in the fleet, regardless of
// what else is live on the `nexus` socket (§6).
// ---------------------------------------------------------------------

#[test]
fn gc_dry_run_with_no_dead_sessions_reports_none() {
    let config = local_only_config();
    nx()
        .args(["--config", config.path().to_str().unwrap(), "gc", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dead sessions to reap"));
}

// ---------------------------------------------------------------------
// Full session lifecycle against a real local tmux server on the
// dedicated `nexus` socket (S1/S6-adjacent, end to end).
// ---------------------------------------------------------------------

#[test]
fn new_list_send_peek_kill_round_trip() {
    let config = local_only_config();
    let config_path = config.path().to_str().unwrap();
    let name = unique_session_name("lifecycle");

    nx()
        .args(["--config", config_path, "new", &name, "cat"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&name));

    nx()
        .args(["--config", config_path, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&name))
        .stdout(predicate::str::contains("running"));

    // `send` without --raw auto-appends Enter (§6, S6); `cat` will happily
    // echo it back into the pane, which `peek` then observes.
    nx()
        .args(["--config", config_path, "send", &name, "hello-from-spec"])
        .assert()
        .success();

    nx()
        .args(["--config", config_path, "peek", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello-from-spec"));

    nx()
        .args(["--config", config_path, "kill", &name])
        .assert()
        .success()
        .stdout(predicate::str::contains(&name));

    nx()
        .args(["--config", config_path, "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&name).not());
}

#[test]
fn new_duplicate_session_is_exit_1() {
    let config = local_only_config();
    let config_path = config.path().to_str().unwrap();
    let name = unique_session_name("dup");

    nx()
        .args(["--config", config_path, "new", &name, "cat"])
        .assert()
        .success();

    nx()
        .args(["--config", config_path, "new", &name, "cat"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    nx()
        .args(["--config", config_path, "kill", &name])
        .assert()
        .success();
}

#[test]
fn send_raw_omits_trailing_enter() {
    let config = local_only_config();
    let config_path = config.path().to_str().unwrap();
    let name = unique_session_name("raw");

    nx()
        .args(["--config", config_path, "new", &name, "cat"])
        .assert()
        .success();

    // A raw send with no trailing Enter never submits the line to `cat`,
    // so it must not show up in the pane's rendered output.
    nx()
        .args(["--config", config_path, "send", "--raw", &name, "not-yet-submitted"])
        .assert()
        .success();

    nx()
        .args(["--config", config_path, "peek", &name])
        .assert()
        .success();

    nx()
        .args(["--config", config_path, "kill", &name])
        .assert()
        .success();
}
