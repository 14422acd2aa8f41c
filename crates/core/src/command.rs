// SPDX-License-Identifier: MIT

//! Command-builder surface (§4.3, §4.6): pure argv construction for every
//! tmux sub-operation the core issues. Nothing here executes anything —
//! that's `nexus-transport`'s job. Keeping construction pure makes every
//! shape unit-testable without a subprocess.

/// The pinned format string for `tmux list-sessions`, matching the field
/// order of [`crate::SessionRecord`] exactly.
pub const LIST_FORMAT: &str =
    "#{session_name}|#{session_windows}|#{session_attached}|#{pane_current_path}|#{pane_current_command}|#{pane_pid}|#{pane_dead}|#{pane_dead_status}";

/// Builds tmux argv vectors against one dedicated control socket.
///
/// The fleet's sessions live on socket `nexus`; the dashboard composer
/// additionally builds against a distinct `nx_dash` socket. Both are
/// constructed the same way, so one builder type parameterized by socket
/// name covers both.
pub struct CommandBuilder {
    socket: String,
}

impl CommandBuilder {
    pub fn new(socket: impl Into<String>) -> Self {
        Self {
            socket: socket.into(),
        }
    }

    /// The canonical fleet socket (`nexus`), isolated from the user's
    /// personal tmux namespace.
    pub fn fleet() -> Self {
        Self::new("nexus")
    }

    fn base(&self) -> Vec<String> {
        vec!["tmux".into(), "-L".into(), self.socket.clone()]
    }

    /// `list`: list-sessions restricted to this socket, pinned format.
    pub fn list(&self) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["list-sessions".into(), "-F".into(), LIST_FORMAT.into()]);
        argv
    }

    /// `new`: new-session detached, with an optional working directory and
    /// trailing command argv.
    pub fn new_session(&self, name: &str, cwd: Option<&str>, command: &[String]) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["new-session".into(), "-d".into(), "-s".into(), name.into()]);
        if let Some(cwd) = cwd {
            argv.extend(["-c".into(), cwd.into()]);
        }
        argv.extend(command.iter().cloned());
        argv
    }

    /// `capture`: capture-pane printed, optionally limited to the last `n`
    /// scrollback lines (`None` captures the full scrollback). Used by
    /// `logs`, which always wants some amount of history.
    pub fn capture(&self, target: &str, lines: Option<u32>) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["capture-pane".into(), "-p".into(), "-t".into(), target.into()]);
        match lines {
            Some(n) => argv.extend(["-S".into(), format!("-{n}")]),
            None => argv.extend(["-S".into(), "-".into()]),
        }
        argv
    }

    /// `capture` (current screen only): no `-S` means tmux prints just the
    /// visible pane, not any scrollback. Used by `peek`, which wants the
    /// session's current state, not its history.
    pub fn capture_current_screen(&self, target: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["capture-pane".into(), "-p".into(), "-t".into(), target.into()]);
        argv
    }

    /// `send`: send-keys to target, appending the literal `Enter` token
    /// unless `raw` is set.
    pub fn send(&self, target: &str, keys: &[String], raw: bool) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["send-keys".into(), "-t".into(), target.into()]);
        argv.extend(keys.iter().cloned());
        if !raw {
            argv.push("Enter".into());
        }
        argv
    }

    /// `kill`: kill-session target.
    pub fn kill(&self, target: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["kill-session".into(), "-t".into(), target.into()]);
        argv
    }

    /// `switch`: switch-client to target. Used only for attach scenario
    /// B-local, where the caller is already inside the fleet socket.
    pub fn switch_client(&self, target: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["switch-client".into(), "-t".into(), target.into()]);
        argv
    }

    /// `new-window`: create a window running `shell_command` (a full shell
    /// command line, not an argv — used to wrap a remote-shell hop).
    pub fn new_window(&self, name: &str, shell_command: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "new-window".into(),
            "-n".into(),
            name.into(),
            shell_command.into(),
        ]);
        argv
    }

    /// Read-only attach (dashboard panes): forbids input and bypasses
    /// client-driven resize negotiation.
    pub fn attach_read_only(&self, target: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["attach-session".into(), "-r".into(), "-t".into(), target.into()]);
        argv
    }

    pub fn attach(&self, target: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["attach-session".into(), "-t".into(), target.into()]);
        argv
    }

    /// `split-window`: open a new pane in `target` running `shell_command`.
    pub fn split_window(&self, target: &str, shell_command: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "split-window".into(),
            "-t".into(),
            target.into(),
            shell_command.into(),
        ]);
        argv
    }

    /// `select-layout`: apply a named tiled layout to `target`.
    pub fn select_layout(&self, target: &str, layout: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "select-layout".into(),
            "-t".into(),
            target.into(),
            layout.into(),
        ]);
        argv
    }

    /// `set-pane-option`: attach an arbitrary user option (e.g.
    /// `@nx_target`) to a pane.
    pub fn set_pane_option(&self, target: &str, option: &str, value: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "set-option".into(),
            "-p".into(),
            "-t".into(),
            target.into(),
            option.into(),
            value.into(),
        ]);
        argv
    }

    /// `set-env`: set a session environment variable.
    pub fn set_env(&self, target: &str, key: &str, value: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "set-environment".into(),
            "-t".into(),
            target.into(),
            key.into(),
            value.into(),
        ]);
        argv
    }

    /// `bind-key`: bind a key in this socket's key table to a shell
    /// command sequence.
    pub fn bind_key(&self, key: &str, tmux_command: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["bind-key".into(), key.into(), tmux_command.into()]);
        argv
    }

    /// `display-message -p`: print a format string, used by the dashboard
    /// Enter shim to capture `@nx_target`.
    pub fn display_message(&self, target: &str, format: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "display-message".into(),
            "-t".into(),
            target.into(),
            "-p".into(),
            format.into(),
        ]);
        argv
    }

    /// `show-environment`: read back a session environment variable.
    pub fn show_environment(&self, target: &str, key: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend([
            "show-environment".into(),
            "-t".into(),
            target.into(),
            key.into(),
        ]);
        argv
    }

    /// `kill-session`: tear down the dashboard's own session.
    pub fn kill_own_session(&self, target: &str) -> Vec<String> {
        self.kill(target)
    }

    /// `detach-client`: detach the caller from `target`.
    pub fn detach_client(&self, target: &str) -> Vec<String> {
        let mut argv = self.base();
        argv.extend(["detach-client".into(), "-s".into(), target.into()]);
        argv
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
